//! Field validation shared by the booking and franchise forms.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

/// `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Digits left after stripping every non-digit character.
#[must_use]
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    phone_digits(value).len() == 10
}

/// Error message for a required email field, if any.
#[must_use]
pub fn email_error(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some("Email is required")
    } else if !is_valid_email(value) {
        Some("Invalid email format")
    } else {
        None
    }
}

/// Error message for a required phone field, if any.
#[must_use]
pub fn phone_error(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some("Phone number is required")
    } else if !is_valid_phone(value) {
        Some("Invalid phone number")
    } else {
        None
    }
}

/// Error messages keyed by form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors<F: Ord + Serialize> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord + Serialize> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Serialize + Copy> FieldErrors<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Removes the error for `field`. Returns `true` if one was present.
    pub fn clear(&mut self, field: F) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    #[must_use]
    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(())` when no field has an error.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_without_at_sign_fails() {
        assert!(!is_valid_email("not-an-email"));
    }

    #[test]
    fn short_email_passes() {
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn email_with_spaces_or_missing_dot_fails() {
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@bco"));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn short_phone_fails() {
        assert!(!is_valid_phone("123"));
    }

    #[test]
    fn formatted_phone_passes_after_stripping() {
        assert_eq!(phone_digits("98765-43210"), "9876543210");
        assert!(is_valid_phone("98765-43210"));
        assert!(is_valid_phone("(987) 654 3210"));
    }

    #[test]
    fn eleven_digit_phone_fails() {
        assert!(!is_valid_phone("+91 98765 43210"));
    }

    #[test]
    fn email_error_distinguishes_missing_from_malformed() {
        assert_eq!(email_error("  "), Some("Email is required"));
        assert_eq!(email_error("nope"), Some("Invalid email format"));
        assert_eq!(email_error("a@b.co"), None);
    }

    #[test]
    fn phone_error_distinguishes_missing_from_malformed() {
        assert_eq!(phone_error(""), Some("Phone number is required"));
        assert_eq!(phone_error("123"), Some("Invalid phone number"));
        assert_eq!(phone_error("98765-43210"), None);
    }

    #[test]
    fn field_errors_clear_reports_presence() {
        let mut errors: FieldErrors<u8> = FieldErrors::new();
        errors.insert(1, "bad");
        assert!(errors.clear(1));
        assert!(!errors.clear(1));
        assert!(errors.into_result().is_ok());
    }
}
