use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use barbershop_core::{validate_franchise, FranchiseInquiry};
use barbershop_sheets::Submission;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_json_rejection, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct InquiryReceipt {
    status: &'static str,
    city: String,
}

pub(super) async fn create_inquiry(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<FranchiseInquiry>, JsonRejection>,
) -> Result<Json<ApiResponse<InquiryReceipt>>, ApiError> {
    let Json(inquiry) = payload.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;

    if let Err(errors) = validate_franchise(&inquiry) {
        tracing::info!(invalid_fields = errors.len(), "franchise inquiry rejected");
        return Err(ApiError::validation(req_id.0, &errors));
    }

    let city = inquiry.city.clone();
    match &state.webhook {
        Some(webhook) => {
            webhook.submit_detached(Submission::Franchise(inquiry));
        }
        None => tracing::info!(city = %city, "no webhook configured; inquiry not forwarded"),
    }

    tokio::time::sleep(state.delays.franchise).await;

    Ok(Json(ApiResponse::new(
        req_id.0,
        InquiryReceipt {
            status: "received",
            city,
        },
    )))
}
