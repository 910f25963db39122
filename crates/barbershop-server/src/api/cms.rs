//! `GET /api/cms`: page content read live from the CMS spreadsheet.
//!
//! The body is the bare `{hero, services, gallery}` object the site bundle
//! expects, and failures use the flat `{"error": "..."}` shape rather than the
//! API envelope.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
struct CmsError {
    error: &'static str,
}

pub(super) async fn get_cms(State(state): State<AppState>) -> impl IntoResponse {
    let Some(sheets) = state.sheets.as_ref() else {
        tracing::error!("cms requested but no spreadsheet is configured");
        return fetch_failed();
    };

    match sheets.fetch_site_content().await {
        Ok(content) => (StatusCode::OK, Json(content)).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "cms sheet read failed");
            fetch_failed()
        }
    }
}

pub(super) async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(CmsError {
            error: "Method not allowed",
        }),
    )
}

fn fetch_failed() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(CmsError {
            error: "Failed to fetch CMS data",
        }),
    )
        .into_response()
}
