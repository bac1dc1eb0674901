//! `GET /drafts/{draftId}/preview` and `GET /p/{draftId}` (§6.1). Both
//! slide the draft's TTL and support `If-None-Match` (§6.1 "ETag").

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use sitecraft_core::preview::{PreviewFormat, PreviewOutput};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(rename = "type", default)]
    format: Option<String>,
}

fn parse_format(raw: Option<&str>) -> Result<PreviewFormat, AppError> {
    match raw.unwrap_or("html") {
        "html" => Ok(PreviewFormat::Html),
        "json" => Ok(PreviewFormat::Json),
        other => Err(AppError::Validation(format!("unknown preview type '{other}'"))),
    }
}

fn if_none_match_hits(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|value| value.split(',').any(|candidate| candidate.trim() == etag))
}

fn preview_response(output: PreviewOutput, headers: &HeaderMap) -> Response {
    let etag = output.etag().to_string();
    if if_none_match_hits(headers, &etag) {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
    }

    match output {
        PreviewOutput::Html { content, .. } => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()), (header::ETAG, etag)],
            content,
        )
            .into_response(),
        json @ PreviewOutput::Json { .. } => {
            (StatusCode::OK, [(header::ETAG, etag)], Json(json)).into_response()
        }
    }
}

/// `GET /drafts/{draftId}/preview?type=html|json`.
pub async fn get_preview(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    Query(query): Query<PreviewQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let draft_id = draft_id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid draftId '{draft_id}'")))?;
    let format = parse_format(query.format.as_deref())?;
    let output = state
        .draft_service
        .get_preview(&draft_id, format, chrono::Utc::now())
        .await?;
    Ok(preview_response(output, &headers))
}

/// `GET /p/{draftId}`: always HTML, outside `/api/v1` (§6.1).
pub async fn get_direct_preview(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let draft_id = draft_id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid draftId '{draft_id}'")))?;
    let output = state
        .draft_service
        .get_preview(&draft_id, PreviewFormat::Html, chrono::Utc::now())
        .await?;
    Ok(preview_response(output, &headers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn parse_format_defaults_to_html() {
        assert_eq!(parse_format(None).unwrap(), PreviewFormat::Html);
    }

    #[test]
    fn parse_format_rejects_unknown_type() {
        assert!(parse_format(Some("xml")).is_err());
    }

    #[test]
    fn if_none_match_matches_exact_etag() {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static(r#"W/"cfg_1:abc""#));
        assert!(if_none_match_hits(&headers, r#"W/"cfg_1:abc""#));
        assert!(!if_none_match_hits(&headers, r#"W/"cfg_2:abc""#));
    }

    #[test]
    fn if_none_match_absent_header_is_a_miss() {
        let headers = HeaderMap::new();
        assert!(!if_none_match_hits(&headers, r#"W/"cfg_1:abc""#));
    }
}
