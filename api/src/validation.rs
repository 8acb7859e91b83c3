//! Input validation utilities for the GraphQL API
//!
//! Create inputs are validated field by field. Update inputs only validate the fields that
//! will actually be applied, i.e. present and truthy values.

use async_graphql::Error;
use chrono::Datelike;
use marketplace_db::patch::Truthy;
use validator::ValidateEmail;

use crate::errors;

/// Year of the first automobile
pub const MIN_VEHICLE_YEAR: i32 = 1886;

/// Maximum length of a chat message in characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Rejects blank values and returns the trimmed value
pub fn require_non_blank(field: &str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(errors::validation_failed(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Validate an email address shape and return it trimmed
pub fn validate_email(email: &str) -> Result<String, Error> {
    let trimmed = email.trim();
    if !trimmed.validate_email() {
        return Err(errors::validation_failed("email", "must be a valid email address"));
    }
    Ok(trimmed.to_string())
}

/// Validate a model year against `1886..=current year + 1`
pub fn validate_year(year: i32) -> Result<i32, Error> {
    let max_year = chrono::Utc::now().year() + 1;
    if !(MIN_VEHICLE_YEAR..=max_year).contains(&year) {
        return Err(errors::validation_failed(
            "year",
            &format!("must be between {MIN_VEHICLE_YEAR} and {max_year}"),
        ));
    }
    Ok(year)
}

pub fn validate_price(price: f64) -> Result<f64, Error> {
    if !price.is_finite() || price < 0.0 {
        return Err(errors::validation_failed("price", "must be a non-negative number"));
    }
    Ok(price)
}

pub fn validate_mileage(mileage: i32) -> Result<i32, Error> {
    if mileage < 0 {
        return Err(errors::validation_failed("mileage", "must not be negative"));
    }
    Ok(mileage)
}

/// Validate chat message content: non-blank and at most [`MAX_MESSAGE_LENGTH`] characters
pub fn validate_message_content(content: &str) -> Result<String, Error> {
    let content = require_non_blank("content", content)?;
    if content.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(errors::validation_failed(
            "content",
            &format!("must be at most {MAX_MESSAGE_LENGTH} characters"),
        ));
    }
    Ok(content)
}

/// Rejects permission subjects containing the `,` list separator of the stored column
pub fn validate_subjects(subjects: Vec<String>) -> Result<Vec<String>, Error> {
    if let Some(bad) = subjects.iter().find(|s| s.contains(',')) {
        return Err(errors::validation_failed(
            "subjects",
            &format!("subject '{bad}' must not contain ','"),
        ));
    }
    Ok(subjects)
}

/// Applies `check` to the value of a partial update if it would be applied at all
///
/// Absent and falsy values pass through unchanged, since they leave the stored value as is.
pub fn validate_update<T, F>(value: Option<T>, check: F) -> Result<Option<T>, Error>
where
    T: Truthy,
    F: FnOnce(T) -> Result<T, Error>,
{
    match value {
        Some(v) if v.is_truthy() => check(v).map(Some),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("dealer@example.com", true)]
    #[case("  dealer@example.com ", true)]
    #[case("dealer.example.com", false)]
    #[case("@example.com", false)]
    fn test_email_shape(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(validate_email(email).is_ok(), valid);
    }

    #[rstest]
    #[case(1885, false)]
    #[case(1886, true)]
    #[case(2020, true)]
    #[case(chrono::Utc::now().year() + 1, true)]
    #[case(chrono::Utc::now().year() + 2, false)]
    fn test_year_range(#[case] year: i32, #[case] valid: bool) {
        assert_eq!(validate_year(year).is_ok(), valid);
    }

    #[test]
    fn test_price_and_mileage_must_not_be_negative() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_mileage(0).is_ok());
        assert!(validate_mileage(-10).is_err());
    }

    #[test]
    fn test_message_content_limits() {
        assert_eq!(validate_message_content("  hi  ").ok().as_deref(), Some("hi"));
        assert!(validate_message_content("   ").is_err());
        assert!(validate_message_content(&"x".repeat(MAX_MESSAGE_LENGTH)).is_ok());
        assert!(validate_message_content(&"x".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }

    #[rstest]
    #[case(vec!["vehicle", "brand"], true)]
    #[case(vec![], true)]
    #[case(vec!["vehicle,brand"], false)]
    #[case(vec!["vehicle", "brand,"], false)]
    fn test_subjects_must_not_contain_separator(#[case] subjects: Vec<&str>, #[case] valid: bool) {
        let subjects = subjects.into_iter().map(String::from).collect();
        assert_eq!(validate_subjects(subjects).is_ok(), valid);
    }

    #[test]
    fn test_update_validation_skips_falsy_values() {
        assert!(matches!(validate_update(Some(0), validate_year), Ok(Some(0))));
        assert!(validate_update(Some(1700), validate_year).is_err());
        assert!(matches!(validate_update(None, validate_mileage), Ok(None)));
        assert!(validate_update(Some(-5), validate_mileage).is_err());
        assert!(matches!(
            validate_update(Some(String::new()), |e: String| validate_email(&e)),
            Ok(Some(ref s)) if s.is_empty()
        ));
    }
}
