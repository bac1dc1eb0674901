//! `RedisDraftStore`: the TTL key-value mapping `draft:{id} -> canonical
//! JSON` described in §4.B and §6.2.
//!
//! Uses a `ConnectionManager` (auto-reconnecting, safely cloneable) rather
//! than a raw `MultiplexedConnection`, matching the `redis` crate's
//! recommended long-lived-client pattern. Because a `ConnectionManager`
//! may transparently swap the underlying connection, `WATCH`/`MULTI`/`EXEC`
//! is not safe to rely on for the compare-and-set primitive; instead
//! `update_with_lock` uses a small Lua script so the read-compare-write is
//! atomic server-side regardless of which physical connection issues it.

use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};

use sitecraft_core::canonical::canonicalize;
use sitecraft_core::draft::store::{DraftStore, MAX_CAS_RETRIES};
use sitecraft_types::draft::Draft;
use sitecraft_types::error::DraftError;
use sitecraft_types::ids::DraftId;

/// Default sliding TTL used by `sitecraft-infra::config::AppConfig` when a
/// create request does not specify one.
pub const DEFAULT_DRAFT_TTL_SECONDS: i64 = 86_400;

/// Lua script implementing the compare-and-set primitive `update_with_lock`
/// needs: set `KEYS[1]` to `ARGV[2]` with TTL `ARGV[3]` only if its current
/// value equals `ARGV[1]` (or the key is absent and `ARGV[1]` is the empty
/// sentinel). Returns `1` on success, `0` on a lost race.
const CAS_SCRIPT: &str = r#"
local current = redis.call("GET", KEYS[1])
if current == ARGV[1] then
  redis.call("SET", KEYS[1], ARGV[2], "EX", ARGV[3])
  return 1
else
  return 0
end
"#;

fn draft_key(id: &DraftId) -> String {
    format!("draft:{id}")
}

fn serialize(draft: &Draft) -> Result<String, DraftError> {
    let value = serde_json::to_value(draft).map_err(|e| DraftError::Store(e.to_string()))?;
    Ok(canonicalize(&value))
}

fn deserialize(raw: &str) -> Option<Draft> {
    serde_json::from_str(raw).ok()
}

/// TTL to store a draft with, per §4.B: the shorter of `ttlSeconds` and the
/// time remaining until `expiresAt`, floored at 1 second so an
/// already-elapsed draft still expires promptly rather than persisting
/// forever under a zero or negative TTL.
fn effective_ttl_seconds(draft: &Draft) -> i64 {
    let remaining = (draft.expires_at - Utc::now()).num_seconds();
    remaining.min(draft.ttl_seconds).max(1)
}

#[derive(Clone)]
pub struct RedisDraftStore {
    conn: ConnectionManager,
}

impl RedisDraftStore {
    /// Connects to `redis_url` and returns a store ready to share across
    /// every request-handling task.
    pub async fn connect(redis_url: &str) -> Result<Self, DraftError> {
        let client = redis::Client::open(redis_url).map_err(|e| DraftError::Store(e.to_string()))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| DraftError::Store(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Returns a cheap clone of the underlying connection manager so
    /// `RedisLock` can share the same pool of connections rather than
    /// opening a second one.
    pub fn connection_manager(&self) -> ConnectionManager {
        self.conn.clone()
    }
}

impl DraftStore for RedisDraftStore {
    async fn save(&self, draft: &Draft) -> Result<(), DraftError> {
        let mut conn = self.conn.clone();
        let key = draft_key(&draft.draft_id);
        let raw = serialize(draft)?;
        let ttl = effective_ttl_seconds(draft);

        let result: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(&raw)
            .arg("NX")
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await
            .map_err(|e| DraftError::Store(e.to_string()))?;

        match result {
            Some(_) => Ok(()),
            None => Err(DraftError::AlreadyExists),
        }
    }

    async fn update(&self, draft: &Draft) -> Result<(), DraftError> {
        let mut conn = self.conn.clone();
        let key = draft_key(&draft.draft_id);
        let raw = serialize(draft)?;
        let ttl = effective_ttl_seconds(draft);

        let result: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(&raw)
            .arg("XX")
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await
            .map_err(|e| DraftError::Store(e.to_string()))?;

        match result {
            Some(_) => Ok(()),
            None => Err(DraftError::NotFound),
        }
    }

    async fn find_by_id(&self, id: &DraftId, slide: bool) -> Result<Option<Draft>, DraftError> {
        let mut conn = self.conn.clone();
        let key = draft_key(id);

        let raw: Option<String> = conn.get(&key).await.map_err(|e| DraftError::Store(e.to_string()))?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let Some(draft) = deserialize(&raw) else {
            // Corrupt blob: treated as absent per §4.B "Failure semantics".
            let _: Result<(), _> = conn.del(&key).await;
            return Ok(None);
        };

        if slide {
            let _: Result<(), _> = conn.expire(&key, draft.ttl_seconds).await;
        }

        Ok(Some(draft))
    }

    async fn exists(&self, id: &DraftId) -> Result<bool, DraftError> {
        let mut conn = self.conn.clone();
        let exists: bool = conn
            .exists(draft_key(id))
            .await
            .map_err(|e| DraftError::Store(e.to_string()))?;
        Ok(exists)
    }

    async fn delete(&self, id: &DraftId) -> Result<(), DraftError> {
        let mut conn = self.conn.clone();
        let _: i64 = conn
            .del(draft_key(id))
            .await
            .map_err(|e| DraftError::Store(e.to_string()))?;
        Ok(())
    }

    async fn get_ttl(&self, id: &DraftId) -> Result<Option<i64>, DraftError> {
        let mut conn = self.conn.clone();
        let ttl: i64 = conn
            .ttl(draft_key(id))
            .await
            .map_err(|e| DraftError::Store(e.to_string()))?;
        // redis TTL returns -2 (no such key) or -1 (key exists, no expiry);
        // every draft key is always written with an expiry, so either
        // negative result means "not a live draft" to this store.
        Ok(if ttl >= 0 { Some(ttl) } else { None })
    }

    async fn update_with_lock<F>(&self, id: &DraftId, transform: F) -> Result<Draft, DraftError>
    where
        F: Fn(Draft) -> Result<Draft, DraftError> + Send + Sync,
    {
        let mut conn = self.conn.clone();
        let key = draft_key(id);
        let script = Script::new(CAS_SCRIPT);

        for _ in 0..MAX_CAS_RETRIES {
            let current: Option<String> =
                conn.get(&key).await.map_err(|e| DraftError::Store(e.to_string()))?;
            let Some(current_raw) = current else {
                return Err(DraftError::NotFound);
            };
            let Some(current_draft) = deserialize(&current_raw) else {
                let _: Result<(), _> = conn.del(&key).await;
                return Err(DraftError::NotFound);
            };

            let updated = transform(current_draft)?;
            let updated_raw = serialize(&updated)?;
            let ttl = effective_ttl_seconds(&updated);

            let applied: i64 = script
                .key(&key)
                .arg(&current_raw)
                .arg(&updated_raw)
                .arg(ttl)
                .invoke_async(&mut conn)
                .await
                .map_err(|e| DraftError::Store(e.to_string()))?;

            if applied == 1 {
                return Ok(updated);
            }
            // Another writer raced in between; retry against the latest state.
        }

        Err(DraftError::Conflict)
    }
}
