//! Field checks shared by the form-backed services

use chrono::{DateTime, NaiveDate, Utc};
use email_address::EmailAddress;

use crate::error::FieldErrors;
use crate::models::{Money, MoneyParseError};

/// Largest amount a single transaction may carry
pub const MAX_AMOUNT: Money = Money::from_major_minor(1_000_000_000, 0);

/// Parse a calendar date: `YYYY-MM-DD`, or an RFC 3339 timestamp taken as
/// its UTC calendar day
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

pub fn is_valid_email(input: &str) -> bool {
    EmailAddress::is_valid(input.trim())
}

/// Trimmed value, or `None` when blank
pub fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Require a non-blank value, recording `message` against `field` otherwise
pub fn required(errors: &mut FieldErrors, field: &str, input: &str, message: &str) -> Option<String> {
    let value = non_blank(input);
    if value.is_none() {
        errors.add(field, message);
    }
    value
}

/// Require a positive amount of at most `MAX_AMOUNT`, in whole hundredths
pub fn positive_amount(errors: &mut FieldErrors, field: &str, input: &str) -> Option<Money> {
    let message = match Money::parse(input) {
        Ok(amount) if amount > MAX_AMOUNT => "Amount is too large",
        Ok(amount) if amount.is_positive() => return Some(amount),
        Ok(_) => "Amount must be greater than 0",
        Err(MoneyParseError::TooManyDecimals(_)) => "Amount can have at most 2 decimal places",
        Err(MoneyParseError::InvalidFormat(_)) => "Amount must be a number",
    };
    errors.add(field, message);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let may_20 = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert_eq!(parse_date("2024-05-20"), Some(may_20));
        assert_eq!(parse_date(" 2024-05-20 "), Some(may_20));
        assert_eq!(parse_date("2024-05-20T10:30:00Z"), Some(may_20));
        assert_eq!(parse_date("2024-05-21T02:00:00+05:30"), Some(may_20));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("contact@qec.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_positive_amount() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            positive_amount(&mut errors, "amount", "120.50"),
            Some(Money::from_minor(12050))
        );
        assert!(errors.is_empty());

        assert_eq!(positive_amount(&mut errors, "amount", "0"), None);
        assert_eq!(positive_amount(&mut errors, "amount", "-5"), None);
        assert_eq!(
            errors.get("amount").unwrap(),
            ["Amount must be greater than 0", "Amount must be greater than 0"]
        );
    }

    #[test]
    fn test_amount_with_extra_decimals_is_rejected() {
        let mut errors = FieldErrors::new();
        assert_eq!(positive_amount(&mut errors, "amount", "0.005"), None);
        assert_eq!(positive_amount(&mut errors, "amount", "10.999"), None);
        assert_eq!(
            errors.get("amount").unwrap(),
            [
                "Amount can have at most 2 decimal places",
                "Amount can have at most 2 decimal places"
            ]
        );
    }

    #[test]
    fn test_amount_above_limit_is_rejected() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            positive_amount(&mut errors, "amount", "1000000000"),
            Some(MAX_AMOUNT)
        );
        assert!(errors.is_empty());

        assert_eq!(positive_amount(&mut errors, "amount", "1000000000.01"), None);
        assert_eq!(positive_amount(&mut errors, "amount", "90000000000000000"), None);
        assert_eq!(positive_amount(&mut errors, "amount", "abc"), None);
        assert_eq!(
            errors.get("amount").unwrap(),
            ["Amount is too large", "Amount is too large", "Amount must be a number"]
        );
    }
}
