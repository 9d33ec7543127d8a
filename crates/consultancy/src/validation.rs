//! Field-level request validation shared by every intake form.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// One rejected field, serialized into the `details` array of a 400 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every problem found in a payload; never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub details: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed ({} issue(s))", self.details.len())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            details: vec![FieldError::new(field, message)],
        }
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.details.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// `Ok(value)` when no issue was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.details.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email regex should compile")
    })
}

fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9+()\- ]{7,20}$").expect("phone regex should compile"))
}

/// Trimmed, length-checked required text. Records an error and returns an
/// empty string when the value is missing or out of bounds.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> String {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.push(field, format!("{field} is required"));
        return String::new();
    }
    check_length(errors, field, trimmed, min, max);
    trimmed.to_string()
}

/// Optional text: blank collapses to `None`, present values are length-checked.
pub fn optional_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    let trimmed = value.map(str::trim).filter(|value| !value.is_empty())?;
    check_length(errors, field, trimmed, 0, max);
    Some(trimmed.to_string())
}

fn check_length(errors: &mut ValidationErrors, field: &str, value: &str, min: usize, max: usize) {
    let length = value.chars().count();
    if length < min {
        errors.push(field, format!("{field} must be at least {min} characters"));
    } else if length > max {
        errors.push(field, format!("{field} must be at most {max} characters"));
    }
}

/// Required, lowercased email address.
pub fn email(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> String {
    let address = required_text(errors, field, value, 3, 254);
    if !address.is_empty() && !email_pattern().is_match(&address) {
        errors.push(field, format!("{field} must be a valid email address"));
    }
    address.to_ascii_lowercase()
}

pub fn phone(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> String {
    let number = required_text(errors, field, value, 7, 20);
    if !number.is_empty() && !phone_pattern().is_match(&number) {
        errors.push(
            field,
            format!("{field} may only contain digits, spaces, and + - ( )"),
        );
    }
    number
}

/// Resolves a closed-set label, listing the accepted values on failure.
pub fn one_of<T: Copy>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    choices: &[T],
    label: fn(T) -> &'static str,
) -> Option<T> {
    let raw = value.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        errors.push(field, format!("{field} is required"));
        return None;
    }

    let found = choices.iter().copied().find(|choice| label(*choice) == raw);
    if found.is_none() {
        let accepted: Vec<&str> = choices.iter().map(|choice| label(*choice)).collect();
        errors.push(
            field,
            format!("{field} must be one of: {}", accepted.join(", ")),
        );
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_reports_missing_and_bounds() {
        let mut errors = ValidationErrors::default();
        assert_eq!(required_text(&mut errors, "name", None, 2, 10), "");
        assert_eq!(required_text(&mut errors, "name", Some("  a "), 2, 10), "a");
        assert_eq!(
            required_text(&mut errors, "name", Some("abcdefghijkl"), 2, 10),
            "abcdefghijkl"
        );
        let messages: Vec<_> = errors.details.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "name is required",
                "name must be at least 2 characters",
                "name must be at most 10 characters",
            ]
        );
    }

    #[test]
    fn email_is_lowercased_and_shape_checked() {
        let mut errors = ValidationErrors::default();
        assert_eq!(
            email(&mut errors, "email", Some(" Priya@Example.COM ")),
            "priya@example.com"
        );
        assert!(errors.is_empty());
        email(&mut errors, "email", Some("not-an-email"));
        assert_eq!(errors.details.len(), 1);
        assert_eq!(errors.details[0].field, "email");
    }

    #[test]
    fn one_of_lists_accepted_values() {
        let mut errors = ValidationErrors::default();
        let choices = [1u8, 2];
        fn label(value: u8) -> &'static str {
            if value == 1 {
                "one"
            } else {
                "two"
            }
        }
        assert_eq!(one_of(&mut errors, "n", Some("two"), &choices, label), Some(2));
        assert_eq!(one_of(&mut errors, "n", Some("three"), &choices, label), None);
        assert_eq!(errors.details[0].message, "n must be one of: one, two");
    }

    #[test]
    fn optional_blank_is_none() {
        let mut errors = ValidationErrors::default();
        assert_eq!(optional_text(&mut errors, "subject", Some("   "), 10), None);
        assert_eq!(
            optional_text(&mut errors, "subject", Some("hello"), 10).as_deref(),
            Some("hello")
        );
        assert!(errors.finish(|| ()).is_ok());
    }
}
