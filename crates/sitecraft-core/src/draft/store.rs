//! `DraftStore` trait: the single seam between the draft lifecycle and
//! whatever TTL key-value store backs it.
//!
//! Uses RPITIT (return position `impl Trait` in traits) consistent with
//! every async trait in this project.

use std::future::Future;

use sitecraft_types::error::DraftError;
use sitecraft_types::ids::DraftId;
use sitecraft_types::draft::Draft;

/// Maximum number of compare-and-set attempts `update_with_lock` makes
/// before giving up with `DraftError::Conflict` (§4.B).
pub const MAX_CAS_RETRIES: u32 = 3;

/// TTL-backed key-value persistence for drafts (§4.B contract table).
///
/// Implementations map `draft:{id}` to the canonical JSON of a `Draft` with
/// a TTL equal to the shorter of `ttlSeconds` and `expiresAt - now`, and
/// must support three atomic primitives: set-if-absent with TTL,
/// set-if-present with TTL, and a watch/compare-and-set transaction.
/// Single-key operations never block another key.
pub trait DraftStore: Send + Sync {
    /// Stores a brand-new draft. Fails with `AlreadyExists` if the key is
    /// already present.
    fn save(&self, draft: &Draft) -> impl Future<Output = Result<(), DraftError>> + Send;

    /// Overwrites an existing draft and refreshes its TTL. Fails with
    /// `NotFound` if the key is absent.
    fn update(&self, draft: &Draft) -> impl Future<Output = Result<(), DraftError>> + Send;

    /// Looks up a draft by id. When `slide` is true and the draft is
    /// found, its TTL is reset to `ttlSeconds`; a bare read (`slide =
    /// false`) never mutates the TTL. Returns `Ok(None)` for an absent or
    /// corrupt (failed-to-deserialize) key — corruption is treated as
    /// absence and the key is dropped.
    fn find_by_id(
        &self,
        id: &DraftId,
        slide: bool,
    ) -> impl Future<Output = Result<Option<Draft>, DraftError>> + Send;

    /// Whether a draft is currently present (and not expired).
    fn exists(&self, id: &DraftId) -> impl Future<Output = Result<bool, DraftError>> + Send;

    /// Removes a draft. Idempotent: deleting an absent key is not an
    /// error.
    fn delete(&self, id: &DraftId) -> impl Future<Output = Result<(), DraftError>> + Send;

    /// Remaining TTL in seconds, or `None` if the draft is absent.
    fn get_ttl(&self, id: &DraftId) -> impl Future<Output = Result<Option<i64>, DraftError>> + Send;

    /// Applies `transform` to the current draft under optimistic
    /// compare-and-set, retrying up to `MAX_CAS_RETRIES` times if another
    /// writer raced in between. `transform` must be pure and side-effect
    /// free since it may run more than once per call.
    fn update_with_lock<F>(
        &self,
        id: &DraftId,
        transform: F,
    ) -> impl Future<Output = Result<Draft, DraftError>> + Send
    where
        F: Fn(Draft) -> Result<Draft, DraftError> + Send + Sync;
}
