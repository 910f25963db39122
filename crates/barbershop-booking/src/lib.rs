//! Booking form state machine: field edits, delayed slot lookup, validation
//! and simulated submission.

pub mod form;

pub use form::{BookingForm, FormSettings, FormSnapshot, FormStatus, SubmitError};
