use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use barbershop_core::{
    parse_date, slot_availability, validate_booking, Branch, BookingConfirmation, BookingDraft,
    SlotAvailability,
};
use barbershop_sheets::Submission;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_json_rejection, ApiError, ApiResponse, AppState};

pub(super) async fn list_branches(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Branch>>> {
    Json(ApiResponse::new(req_id.0, state.branches.branches.clone()))
}

#[derive(Debug, Deserialize)]
pub(super) struct SlotsQuery {
    pub branch: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SlotsData {
    branch: String,
    date: String,
    #[serde(flatten)]
    availability: SlotAvailability,
}

pub(super) async fn get_slots(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<ApiResponse<SlotsData>>, ApiError> {
    let branch = query.branch.unwrap_or_default();
    let date = query.date.unwrap_or_default();

    if branch.trim().is_empty() || date.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "both `branch` and `date` are required",
        ));
    }
    if state.branches.find(&branch).is_none() {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("unknown branch '{branch}'"),
        ));
    }

    let now = state.clock.now();
    let Some(parsed) = parse_date(&date) else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "`date` must be formatted YYYY-MM-DD",
        ));
    };
    if parsed < now.date() {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "`date` must be today or later",
        ));
    }

    let availability = slot_availability(parsed, now);
    tracing::debug!(
        branch = %branch,
        date = %date,
        slots = availability.slots().len(),
        "slot lookup"
    );

    Ok(Json(ApiResponse::new(
        req_id.0,
        SlotsData {
            branch,
            date,
            availability,
        },
    )))
}

/// Validates a booking, forwards it to the spreadsheet webhook and confirms it.
///
/// Delivery to the webhook is detached; its outcome never changes the
/// response.
pub(super) async fn create_booking(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<BookingDraft>, JsonRejection>,
) -> Result<Json<ApiResponse<BookingConfirmation>>, ApiError> {
    let Json(draft) = payload.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;

    if let Err(errors) = validate_booking(&draft, &state.branches, state.clock.now()) {
        tracing::info!(invalid_fields = errors.len(), "booking rejected");
        return Err(ApiError::validation(req_id.0, &errors));
    }

    let confirmation = BookingConfirmation::from_draft(&draft, &state.branches);
    match &state.webhook {
        Some(webhook) => {
            webhook.submit_detached(Submission::Booking(draft));
        }
        None => tracing::info!(
            branch = %draft.branch,
            date = %draft.date,
            "no webhook configured; booking not forwarded"
        ),
    }

    tokio::time::sleep(state.delays.booking).await;
    tracing::info!(
        branch = %confirmation.branch_name,
        date = %confirmation.date,
        time_slot = %confirmation.time_slot,
        "booking confirmed"
    );

    Ok(Json(ApiResponse::new(req_id.0, confirmation)))
}
