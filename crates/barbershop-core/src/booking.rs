//! Appointment slot policy and booking validation.
//!
//! The shop takes appointments Monday to Friday on the hour from 12:00 PM to
//! 8:00 PM. On the current day only slots whose hour is strictly later than the
//! current hour are offered.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::branches::BranchesFile;
use crate::validation::{email_error, phone_error, FieldErrors};

pub const BUSINESS_EMAIL: &str = "thebarbershop114@gmail.com";

pub const CLOSED_MESSAGE: &str = "We're open Monday to Friday only";
pub const SOLD_OUT_MESSAGE: &str = "No more slots available today. Please select another date.";

/// Wire format of the booking `date` field (what an HTML date input submits).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A bookable start time, stored as the hour of day (0-23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u8);

pub const TIME_SLOTS: [TimeSlot; 9] = [
    TimeSlot(12),
    TimeSlot(13),
    TimeSlot(14),
    TimeSlot(15),
    TimeSlot(16),
    TimeSlot(17),
    TimeSlot(18),
    TimeSlot(19),
    TimeSlot(20),
];

impl TimeSlot {
    #[must_use]
    pub fn hour(self) -> u8 {
        self.0
    }

    /// 12-hour label such as `"4:00 PM"`.
    #[must_use]
    pub fn label(self) -> String {
        let period = if self.0 < 12 { "AM" } else { "PM" };
        let display = match self.0 % 12 {
            0 => 12,
            h => h,
        };
        format!("{display}:00 {period}")
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid time slot '{s}'");
        let (time, period) = s.trim().split_once(' ').ok_or_else(invalid)?;
        // Slots start on the hour, so the minutes must read exactly "00".
        let hours: u8 = match time.split_once(':') {
            Some((h, "00")) => h.parse().ok(),
            _ => None,
        }
        .filter(|h| (1..=12).contains(h))
        .ok_or_else(invalid)?;
        let hour = match (period, hours) {
            ("AM", 12) => 0,
            ("AM", h) => h,
            ("PM", 12) => 12,
            ("PM", h) => h + 12,
            _ => return Err(invalid()),
        };
        Ok(TimeSlot(hour))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Result of applying the slot policy to one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotAvailability {
    Open { slots: Vec<TimeSlot> },
    /// Weekend.
    Closed { message: &'static str },
    /// Today, but every slot has already started.
    SoldOut { message: &'static str },
}

impl SlotAvailability {
    #[must_use]
    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            SlotAvailability::Open { slots } => slots,
            SlotAvailability::Closed { .. } | SlotAvailability::SoldOut { .. } => &[],
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SlotAvailability::Open { .. } => None,
            SlotAvailability::Closed { message } | SlotAvailability::SoldOut { message } => {
                Some(*message)
            }
        }
    }
}

/// Monday through Friday (1-5 counting from Sunday = 0).
#[must_use]
pub fn is_weekday(date: NaiveDate) -> bool {
    (1..=5).contains(&date.weekday().num_days_from_sunday())
}

/// Applies the weekday and business-hours rules to `date` as seen at `now`.
#[must_use]
pub fn slot_availability(date: NaiveDate, now: NaiveDateTime) -> SlotAvailability {
    if !is_weekday(date) {
        return SlotAvailability::Closed {
            message: CLOSED_MESSAGE,
        };
    }

    if date != now.date() {
        return SlotAvailability::Open {
            slots: TIME_SLOTS.to_vec(),
        };
    }

    let current_hour = now.hour();
    let slots: Vec<TimeSlot> = TIME_SLOTS
        .iter()
        .copied()
        .filter(|slot| u32::from(slot.hour()) > current_hour)
        .collect();

    if slots.is_empty() {
        SlotAvailability::SoldOut {
            message: SOLD_OUT_MESSAGE,
        }
    } else {
        SlotAvailability::Open { slots }
    }
}

/// Parses the `YYYY-MM-DD` value of a date input.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    FullName,
    Email,
    Phone,
    Branch,
    Date,
    TimeSlot,
}

impl BookingField {
    /// Branch and date changes invalidate the chosen slot.
    #[must_use]
    pub fn affects_slots(self) -> bool {
        matches!(self, BookingField::Branch | BookingField::Date)
    }
}

/// Appointment request as typed into the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub branch: String,
    pub date: String,
    pub time_slot: String,
}

impl BookingDraft {
    #[must_use]
    pub fn get(&self, field: BookingField) -> &str {
        match field {
            BookingField::FullName => &self.full_name,
            BookingField::Email => &self.email,
            BookingField::Phone => &self.phone,
            BookingField::Branch => &self.branch,
            BookingField::Date => &self.date,
            BookingField::TimeSlot => &self.time_slot,
        }
    }

    pub fn set(&mut self, field: BookingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BookingField::FullName => self.full_name = value,
            BookingField::Email => self.email = value,
            BookingField::Phone => self.phone = value,
            BookingField::Branch => self.branch = value,
            BookingField::Date => self.date = value,
            BookingField::TimeSlot => self.time_slot = value,
        }
    }
}

/// What the success screen shows after a booking goes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub email: String,
    pub date: String,
    pub time_slot: String,
    pub branch_name: String,
    pub contact_email: &'static str,
}

impl BookingConfirmation {
    /// Builds the confirmation for an already validated draft.
    #[must_use]
    pub fn from_draft(draft: &BookingDraft, branches: &BranchesFile) -> Self {
        let date = parse_date(&draft.date).map_or_else(
            || draft.date.clone(),
            |d| d.format("%A, %B %-d, %Y").to_string(),
        );
        let branch_name = branches
            .find(&draft.branch)
            .map_or_else(|| draft.branch.clone(), |b| b.name.clone());
        Self {
            email: draft.email.clone(),
            date,
            time_slot: draft.time_slot.clone(),
            branch_name,
            contact_email: BUSINESS_EMAIL,
        }
    }
}

/// Validates every booking field.
///
/// Besides the required-field checks, the date must be a real `YYYY-MM-DD`
/// date not earlier than `now`, the branch must exist, and the time slot must be
/// one the slot policy still offers for that date.
///
/// # Errors
///
/// Returns the field-keyed messages for every failing field.
pub fn validate_booking(
    draft: &BookingDraft,
    branches: &BranchesFile,
    now: NaiveDateTime,
) -> Result<(), FieldErrors<BookingField>> {
    let mut errors = FieldErrors::new();

    if draft.full_name.trim().is_empty() {
        errors.insert(BookingField::FullName, "Name is required");
    }
    if let Some(message) = email_error(&draft.email) {
        errors.insert(BookingField::Email, message);
    }
    if let Some(message) = phone_error(&draft.phone) {
        errors.insert(BookingField::Phone, message);
    }

    if draft.branch.trim().is_empty() {
        errors.insert(BookingField::Branch, "Please select a branch");
    } else if branches.find(&draft.branch).is_none() {
        errors.insert(BookingField::Branch, "Unknown branch");
    }

    let availability = if draft.date.trim().is_empty() {
        errors.insert(BookingField::Date, "Please select a date");
        None
    } else {
        match parse_date(&draft.date) {
            Some(d) if d < now.date() => {
                errors.insert(BookingField::Date, "Please select today or a later date");
                None
            }
            Some(d) => {
                let availability = slot_availability(d, now);
                if let Some(message) = availability.message() {
                    errors.insert(BookingField::Date, message);
                }
                Some(availability)
            }
            None => {
                errors.insert(BookingField::Date, "Please select a valid date");
                None
            }
        }
    };

    if draft.time_slot.trim().is_empty() {
        errors.insert(BookingField::TimeSlot, "Please select a time slot");
    } else if let Some(availability) = availability {
        let offered = draft
            .time_slot
            .parse::<TimeSlot>()
            .is_ok_and(|slot| availability.slots().contains(&slot));
        if !offered {
            errors.insert(BookingField::TimeSlot, "Selected time slot is not available");
        }
    }

    errors.into_result()
}

#[cfg(test)]
#[path = "booking_test.rs"]
mod tests;
