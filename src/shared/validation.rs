//! Validation Utilities
//!
//! Conversions from `validator` errors plus the custom field rules used by
//! the book request DTOs.

use std::borrow::Cow;

use chrono::{Datelike, Utc};
use validator::{ValidationError, ValidationErrors};

use super::error::FieldError;

/// Earliest publication year accepted for a book.
pub const MIN_PUBLICATION_YEAR: i32 = 1000;

/// Maximum length of a stored title or author, counted after trimming.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Maximum length of a stored ISBN, hyphens included.
pub const MAX_ISBN_LENGTH: usize = 20;

/// Flatten validation errors into field errors, sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    field_errors
}

/// Summarise field errors into a single message (`field: message`).
pub fn summarize(errors: &[FieldError]) -> String {
    errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into())
}

fn rule_violation(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Title and author rule, applied to the trimmed value that gets stored:
/// not blank and at most [`MAX_TEXT_LENGTH`] characters.
pub fn validate_book_text(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(rule_violation("blank", "must not be blank"));
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(rule_violation(
            "length",
            format!("must be at most {} characters", MAX_TEXT_LENGTH),
        ));
    }
    Ok(())
}

/// Accept ISBN-10 or ISBN-13: digits and hyphens only, exactly 10 or 13 digits.
pub fn validate_isbn(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_ISBN_LENGTH {
        return Err(rule_violation(
            "isbn",
            format!("must be at most {} characters", MAX_ISBN_LENGTH),
        ));
    }

    if !value.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Err(rule_violation("isbn", "may contain only digits and hyphens"));
    }

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits != 10 && digits != 13 {
        return Err(rule_violation("isbn", "must contain exactly 10 or 13 digits"));
    }

    Ok(())
}

/// Accept years between [`MIN_PUBLICATION_YEAR`] and the current year.
pub fn validate_publication_year(year: i32) -> Result<(), ValidationError> {
    let current = Utc::now().year();
    if year < MIN_PUBLICATION_YEAR || year > current {
        return Err(rule_violation(
            "publication_year",
            format!("must be between {} and {}", MIN_PUBLICATION_YEAR, current),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("9781400079988" ; "isbn13 plain")]
    #[test_case("978-0-14-310763-7" ; "isbn13 hyphenated")]
    #[test_case("0306406152" ; "isbn10 plain")]
    #[test_case("0-306-40615-2" ; "isbn10 hyphenated")]
    fn accepts_valid_isbn(isbn: &str) {
        assert!(validate_isbn(isbn).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("12345" ; "too few digits")]
    #[test_case("97814000799881" ; "fourteen digits")]
    #[test_case("030640615X" ; "check letter")]
    #[test_case("978-0-14-310763-7-----" ; "too long")]
    fn rejects_invalid_isbn(isbn: &str) {
        assert!(validate_isbn(isbn).is_err());
    }

    #[test]
    fn publication_year_bounds() {
        let current = Utc::now().year();
        assert!(validate_publication_year(1869).is_ok());
        assert!(validate_publication_year(current).is_ok());
        assert!(validate_publication_year(999).is_err());
        assert!(validate_publication_year(current + 1).is_err());
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(validate_book_text("   ").is_err());
        assert!(validate_book_text("").is_err());
        assert!(validate_book_text(" War and Peace ").is_ok());
    }

    #[test]
    fn text_length_is_measured_after_trimming() {
        let padded = format!("  {}  ", "я".repeat(MAX_TEXT_LENGTH));
        assert!(validate_book_text(&padded).is_ok());

        let too_long = "a".repeat(MAX_TEXT_LENGTH + 1);
        assert!(validate_book_text(&too_long).is_err());
    }

    #[test]
    fn summarize_uses_first_error() {
        let errors = vec![
            FieldError {
                field: "author".into(),
                message: "must not be blank".into(),
            },
            FieldError {
                field: "title".into(),
                message: "must not be blank".into(),
            },
        ];
        assert_eq!(summarize(&errors), "author: must not be blank");
        assert_eq!(summarize(&[]), "Validation failed");
    }
}
