//! The commit coordinator (§4.E): migrates a draft into a permanent
//! project + project-config under a distributed mutual-exclusion guard,
//! with exactly-once semantics under retries.

pub mod lock;

/// TTL, in seconds, of the `lock:commit:{draftId}` mutex (§6.2).
pub const COMMIT_LOCK_TTL_SECONDS: u64 = 30;

pub fn lock_key(draft_id: &sitecraft_types::ids::DraftId) -> String {
    format!("lock:commit:{draft_id}")
}
