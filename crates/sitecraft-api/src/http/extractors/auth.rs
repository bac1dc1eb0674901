//! Internal-token authentication extractor for the commit endpoint
//! (§6.1 "Commit authentication").

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;
use crate::state::AppState;

/// Marker proving the request carried a matching `X-Internal-Token`
/// header. Extracting this is the only auth check this service performs.
pub struct InternalToken;

impl FromRequestParts<AppState> for InternalToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get("x-internal-token")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing X-Internal-Token header".to_string()))?;

        if provided != state.internal_token.as_ref() {
            return Err(AppError::Unauthorized("invalid X-Internal-Token".to_string()));
        }

        Ok(InternalToken)
    }
}
