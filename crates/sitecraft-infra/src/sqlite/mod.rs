//! SQLite storage layer: the permanent `Project`/`ProjectConfig` store
//! committed drafts migrate into (§4.E, §6.2).

pub mod pool;
pub mod project;

pub use pool::DatabasePool;
pub use project::SqliteProjectRepository;
