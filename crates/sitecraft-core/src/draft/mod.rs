//! The draft lifecycle: TTL-backed persistence with sliding refresh,
//! optimistic update, and existence/TTL queries (§4.B).

pub mod store;
