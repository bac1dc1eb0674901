//! `RedisLock`: the `lock:commit:{draftId}` mutex backing the commit
//! coordinator (§4.E, §9 "Locks").

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use sitecraft_core::commit::lock::DistributedLock;
use sitecraft_types::error::CommitError;

/// Value stored in a lock key. The holder's identity is irrelevant since
/// release is unconditional (best-effort, per §9), so any fixed marker works.
const LOCK_VALUE: &str = "1";

#[derive(Clone)]
pub struct RedisLock {
    conn: ConnectionManager,
}

impl RedisLock {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

impl DistributedLock for RedisLock {
    async fn acquire(&self, key: &str, ttl_seconds: u64) -> Result<bool, CommitError> {
        let mut conn = self.conn.clone();
        let result: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(LOCK_VALUE)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await
            .map_err(|e| CommitError::Lock(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn release(&self, key: &str) -> Result<(), CommitError> {
        let mut conn = self.conn.clone();
        let _: i64 = conn
            .del(key)
            .await
            .map_err(|e| CommitError::Lock(e.to_string()))?;
        Ok(())
    }
}
