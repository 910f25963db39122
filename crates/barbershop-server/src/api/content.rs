//! `GET /content/{key}.json`: the static content documents.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension,
};
use barbershop_core::ContentKey;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) async fn get_content_file(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(key) = file
        .strip_suffix(".json")
        .and_then(|stem| stem.parse::<ContentKey>().ok())
    else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("unknown content document '{file}'"),
        ));
    };

    let path = state.content_dir.join(key.file_name());
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            bytes,
        )),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(key = %key, path = %path.display(), "content document missing");
            Err(ApiError::new(
                req_id.0,
                "not_found",
                format!("content document '{key}' not found"),
            ))
        }
        Err(error) => {
            tracing::error!(key = %key, path = %path.display(), error = %error, "content read failed");
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                "failed to read content document",
            ))
        }
    }
}
