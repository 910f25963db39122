use serde::{Deserialize, Serialize};

use crate::validation::{email_error, phone_error, FieldErrors};

pub const INVESTMENT_RANGES: [&str; 4] = [
    "₹5 - 10 Lakhs",
    "₹10 - 20 Lakhs",
    "₹20 - 30 Lakhs",
    "₹30+ Lakhs",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FranchiseField {
    FullName,
    Email,
    Phone,
    City,
    Occupation,
    Investment,
}

/// Franchise enquiry form. `message` is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FranchiseInquiry {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub occupation: String,
    pub investment: String,
    pub message: String,
}

/// Validates a franchise enquiry.
///
/// # Errors
///
/// Returns the field-keyed messages for every failing field.
pub fn validate_franchise(inquiry: &FranchiseInquiry) -> Result<(), FieldErrors<FranchiseField>> {
    let mut errors = FieldErrors::new();

    if inquiry.full_name.trim().is_empty() {
        errors.insert(FranchiseField::FullName, "Name is required");
    }
    if let Some(message) = email_error(&inquiry.email) {
        errors.insert(FranchiseField::Email, message);
    }
    if let Some(message) = phone_error(&inquiry.phone) {
        errors.insert(FranchiseField::Phone, message);
    }
    if inquiry.city.trim().is_empty() {
        errors.insert(FranchiseField::City, "City is required");
    }
    if inquiry.occupation.trim().is_empty() {
        errors.insert(FranchiseField::Occupation, "Occupation is required");
    }
    if !INVESTMENT_RANGES.contains(&inquiry.investment.as_str()) {
        errors.insert(FranchiseField::Investment, "Please select investment range");
    }

    errors.into_result()
}
