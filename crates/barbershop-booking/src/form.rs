//! Booking form state machine.
//!
//! One owner drives the form through `&mut self` methods. Choosing a branch or
//! a date clears the chosen time slot and schedules a delayed slot lookup on a
//! background task. A newer selection aborts the pending lookup, and each
//! lookup carries the generation it was scheduled for so a late write-back
//! from a superseded selection is dropped.

use std::sync::Arc;
use std::time::Duration;

use barbershop_core::booking::{is_weekday, CLOSED_MESSAGE};
use barbershop_core::{
    parse_date, slot_availability, validate_booking, BookingConfirmation, BookingDraft,
    BookingField, BranchesFile, Clock, FieldErrors, TimeSlot,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Simulated latencies of the slot lookup and the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSettings {
    pub slot_delay: Duration,
    pub submit_delay: Duration,
}

impl FormSettings {
    #[must_use]
    pub fn from_millis(slot_delay_ms: u64, submit_delay_ms: u64) -> Self {
        Self {
            slot_delay: Duration::from_millis(slot_delay_ms),
            submit_delay: Duration::from_millis(submit_delay_ms),
        }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self::from_millis(500, 1500)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    Submitted { confirmation: BookingConfirmation },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("booking has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors<BookingField>),

    #[error("booking already submitted; reset the form to book again")]
    AlreadySubmitted,
}

#[derive(Debug, Default)]
struct FormState {
    draft: BookingDraft,
    errors: FieldErrors<BookingField>,
    available_slots: Vec<TimeSlot>,
    slots_loading: bool,
    generation: u64,
    status: FormStatus,
}

/// Point-in-time copy of everything a view needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub draft: BookingDraft,
    pub errors: FieldErrors<BookingField>,
    pub available_slots: Vec<TimeSlot>,
    pub slots_loading: bool,
    /// Time slots are selectable only once both branch and date are chosen.
    pub can_select_time_slot: bool,
    pub status: FormStatus,
}

pub struct BookingForm {
    state: Arc<Mutex<FormState>>,
    branches: Arc<BranchesFile>,
    clock: Arc<dyn Clock>,
    settings: FormSettings,
    pending: Option<JoinHandle<()>>,
}

impl BookingForm {
    pub fn new(branches: Arc<BranchesFile>, clock: Arc<dyn Clock>, settings: FormSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            branches,
            clock,
            settings,
            pending: None,
        }
    }

    #[must_use]
    pub fn branches(&self) -> &BranchesFile {
        &self.branches
    }

    /// Updates one field and clears its error.
    ///
    /// Branch and date changes also clear the chosen time slot and reschedule
    /// the slot lookup. Edits are ignored (returning `false`) once the booking
    /// has been submitted.
    pub async fn set_field(&mut self, field: BookingField, value: impl Into<String>) -> bool {
        let shared = Arc::clone(&self.state);
        let mut state = shared.lock().await;
        if state.status != FormStatus::Editing {
            tracing::debug!(?field, "ignoring edit on a submitted booking");
            return false;
        }

        state.draft.set(field, value);
        state.errors.clear(field);
        if field.affects_slots() {
            state.draft.time_slot.clear();
            self.schedule_slot_lookup(&mut state);
        }
        true
    }

    fn schedule_slot_lookup(&mut self, state: &mut FormState) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        state.generation += 1;
        state.available_slots.clear();
        state.slots_loading = false;

        if state.draft.branch.trim().is_empty() || state.draft.date.trim().is_empty() {
            return;
        }

        let Some(date) = parse_date(&state.draft.date) else {
            state
                .errors
                .insert(BookingField::Date, "Please select a valid date");
            return;
        };
        if date < self.clock.now().date() {
            state
                .errors
                .insert(BookingField::Date, "Please select today or a later date");
            return;
        }
        if !is_weekday(date) {
            state.errors.insert(BookingField::Date, CLOSED_MESSAGE);
            return;
        }

        state.slots_loading = true;
        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        let delay = self.settings.slot_delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let availability = slot_availability(date, clock.now());

            let mut state = shared.lock().await;
            if state.generation != generation {
                tracing::debug!(
                    generation,
                    current = state.generation,
                    "discarding superseded slot lookup"
                );
                return;
            }
            if let Some(message) = availability.message() {
                state.errors.insert(BookingField::Date, message);
            }
            state.available_slots = availability.slots().to_vec();
            state.slots_loading = false;
        }));
    }

    /// Waits for the pending slot lookup, if any, to finish.
    pub async fn wait_for_slots(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(error) = handle.await {
                if !error.is_cancelled() {
                    tracing::warn!(error = %error, "slot lookup task failed");
                }
            }
        }
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.state.lock().await;
        FormSnapshot {
            draft: state.draft.clone(),
            errors: state.errors.clone(),
            available_slots: state.available_slots.clone(),
            slots_loading: state.slots_loading,
            can_select_time_slot: !state.draft.branch.is_empty() && !state.draft.date.is_empty(),
            status: state.status.clone(),
        }
    }

    /// Validates the draft and, if it passes, simulates sending it.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] with every failing field (the same
    /// errors are stored on the form), or [`SubmitError::AlreadySubmitted`]
    /// if the form has not been reset since the last success.
    pub async fn submit(&mut self) -> Result<BookingConfirmation, SubmitError> {
        let shared = Arc::clone(&self.state);
        let draft = {
            let mut state = shared.lock().await;
            if state.status != FormStatus::Editing {
                return Err(SubmitError::AlreadySubmitted);
            }
            if let Err(errors) = validate_booking(&state.draft, &self.branches, self.clock.now()) {
                state.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
            state.errors.clear_all();
            state.status = FormStatus::Submitting;
            state.draft.clone()
        };

        tracing::info!(
            branch = %draft.branch,
            date = %draft.date,
            time_slot = %draft.time_slot,
            "submitting booking"
        );
        tokio::time::sleep(self.settings.submit_delay).await;

        let confirmation = BookingConfirmation::from_draft(&draft, &self.branches);
        shared.lock().await.status = FormStatus::Submitted {
            confirmation: confirmation.clone(),
        };
        Ok(confirmation)
    }

    /// "Book another": clears the draft, errors, slots and success state.
    pub async fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let mut state = self.state.lock().await;
        let generation = state.generation + 1;
        *state = FormState {
            generation,
            ..FormState::default()
        };
    }
}

impl Drop for BookingForm {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
