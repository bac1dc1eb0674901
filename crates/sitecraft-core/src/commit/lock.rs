//! `DistributedLock` trait: a Redis-style `SET key val NX EX ttl` mutex.
//! Per §9 "Locks", this is an optimization layered on top of the
//! relational store's uniqueness constraint -- correctness never depends
//! on lock fairness or liveness.

use std::future::Future;

use sitecraft_types::error::CommitError;

pub trait DistributedLock: Send + Sync {
    /// Attempts to acquire `key` for `ttl_seconds`. Returns `true` if this
    /// call acquired it, `false` if another holder is already present.
    fn acquire(
        &self,
        key: &str,
        ttl_seconds: u64,
    ) -> impl Future<Output = Result<bool, CommitError>> + Send;

    /// Releases `key`. Best-effort: failures are logged and swallowed by
    /// callers, never surfaced (§7 "Propagation policy").
    fn release(&self, key: &str) -> impl Future<Output = Result<(), CommitError>> + Send;
}
