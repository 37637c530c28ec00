//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// The target is whatever the owner submitted; it is not re-validated here.
///
/// # Errors
///
/// - 404 Not Found with `URL not found` if the id is unknown
/// - 500 if the stored target cannot be sent as a `Location` header (rows
///   written before control characters were refused at shorten time)
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.link_service.resolve(&id).await?;

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|_| {
        AppError::internal(
            "Stored URL cannot be redirected to",
            json!({ "short_id": id }),
        )
    })?;

    debug!(short_id = %id, "Redirecting");

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
