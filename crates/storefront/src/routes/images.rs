//! Image proxy.
//!
//! Order pages link to `/images/{token}` instead of the storage URL. The token
//! is opened with the current key first, then any retired keys; on success
//! the browser is redirected to the storage object.

use axum::{
    extract::{Path, State},
    http::{
        HeaderValue, StatusCode,
        header::{CACHE_CONTROL, LOCATION, REFERRER_POLICY},
    },
    response::{IntoResponse, Response},
};
use tracing::instrument;
use url::Url;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Redirect to the storage URL sealed in `token`.
///
/// GET /images/{token}
///
/// Every failure (bad encoding, wrong key, tampering, a URL that can't be sent
/// as a `Location` header) answers with the same 404.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, Path(token): Path<String>) -> Result<Response> {
    let Some(opened) = state.images().open_detailed(&token) else {
        return Err(AppError::ImageNotFound);
    };

    // Url::parse percent-encodes anything that isn't valid in a header.
    let location = Url::parse(&opened.url)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or(AppError::ImageNotFound)?;

    tracing::debug!(scheme = %opened.scheme, stale = opened.is_stale(), "image token opened");

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, location),
            (CACHE_CONTROL, HeaderValue::from_static("private, no-store")),
            (REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        ],
    )
        .into_response())
}
