mod booking;
mod cms;
mod content;
mod franchise;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use barbershop_core::{AppConfig, BranchesFile, Clock};
use barbershop_sheets::{SheetsClient, WebhookClient};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

/// Simulated processing time of the submission endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SubmitDelays {
    pub booking: Duration,
    pub franchise: Duration,
}

impl SubmitDelays {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            booking: Duration::from_millis(config.booking_submit_delay_ms),
            franchise: Duration::from_millis(config.franchise_submit_delay_ms),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub branches: Arc<BranchesFile>,
    pub clock: Arc<dyn Clock>,
    pub content_dir: Arc<PathBuf>,
    /// `None` when no spreadsheet is configured; `/api/cms` then fails.
    pub sheets: Option<Arc<SheetsClient>>,
    /// `None` when no webhook is configured; submissions are only logged.
    pub webhook: Option<WebhookClient>,
    pub delays: SubmitDelays,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Field-keyed messages for `validation_error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    sheets: &'static str,
    webhook: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                fields: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    /// A `validation_error` carrying per-field messages.
    pub fn validation(request_id: impl Into<String>, fields: impl Serialize) -> Self {
        let mut error = Self::new(request_id, "validation_error", "one or more fields are invalid");
        error.error.fields = serde_json::to_value(fields).ok();
        error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "method_not_allowed" => StatusCode::METHOD_NOT_ALLOWED,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a body that failed to parse as JSON to a `bad_request`.
pub(super) fn map_json_rejection(request_id: String, rejection: &JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "rejected request body");
    ApiError::new(request_id, "bad_request", rejection.body_text())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn submission_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(booking::create_booking))
        .route("/api/franchise", post(franchise::create_inquiry))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/cms",
            get(cms::get_cms).fallback(cms::method_not_allowed),
        )
        .route("/api/branches", get(booking::list_branches))
        .route("/api/slots", get(booking::get_slots))
        .route("/content/{file}", get(content::get_content_file));

    Router::new()
        .merge(public_routes)
        .merge(submission_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let configured = |present: bool| if present { "configured" } else { "disabled" };
    Json(ApiResponse::new(
        req_id.0,
        HealthData {
            status: "ok",
            sheets: configured(state.sheets.is_some()),
            webhook: configured(state.webhook.is_some()),
        },
    ))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
