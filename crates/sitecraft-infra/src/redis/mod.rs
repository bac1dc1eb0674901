//! Redis-backed implementations of `sitecraft-core`'s `DraftStore` and
//! `DistributedLock` traits (§4.B, §6.2): a TTL key-value mapping plus the
//! `lock:commit:{draftId}` mutex, both over a single shared connection
//! manager.

pub mod draft_store;
pub mod lock;

pub use draft_store::RedisDraftStore;
pub use lock::RedisLock;
