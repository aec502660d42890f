//! Field-level validation primitives.
//!
//! These are the building blocks the record schemas compose. Each check
//! returns the [`Violation`] it detected so callers can attach the field name.

use crate::error::Violation;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Message reported when a password fails the complexity rule.
pub const PASSWORD_COMPLEXITY_MESSAGE: &str =
    "Password must contain at least one uppercase letter, one lowercase letter, and one number";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PASSWORD_CHARSET_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-\.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .unwrap()
    })
}

fn password_charset_regex() -> &'static Regex {
    PASSWORD_CHARSET_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z\d]{8,}$").unwrap())
}

/// Validates email format
///
/// # Examples
/// ```
/// use carebook::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), Violation> {
    // The regex tolerates "a..b@x.com", which mail servers reject
    if email.starts_with('.') || email.contains("..") {
        return Err(Violation::InvalidEmail);
    }

    if !email_regex().is_match(email) {
        return Err(Violation::InvalidEmail);
    }

    Ok(())
}

/// Validates password complexity: at least 8 ASCII letters or digits, with at
/// least one lowercase letter, one uppercase letter and one digit.
pub fn validate_password_complexity(password: &str) -> Result<(), Violation> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lower && has_upper && has_digit && password_charset_regex().is_match(password) {
        Ok(())
    } else {
        Err(Violation::PatternMismatch {
            message: PASSWORD_COMPLEXITY_MESSAGE.to_string(),
        })
    }
}

/// Validates a minimum string length, counted in characters.
pub fn validate_min_length(value: &str, min: usize) -> Result<(), Violation> {
    if value.chars().count() < min {
        return Err(Violation::TooShort { min });
    }
    Ok(())
}

/// Validates an inclusive lower bound.
pub fn validate_min(value: f64, min: f64) -> Result<(), Violation> {
    if value < min {
        return Err(Violation::BelowMinimum { min });
    }
    Ok(())
}

/// Validates an inclusive upper bound.
pub fn validate_max(value: f64, max: f64) -> Result<(), Violation> {
    if value > max {
        return Err(Violation::AboveMaximum { max });
    }
    Ok(())
}

/// Coerces a JSON value to a number the way form inputs are coerced.
///
/// Numbers pass through. Strings are trimmed; an empty string is `0`, and
/// anything that does not parse is rejected. Booleans become `0`/`1`.
/// Returns `None` when no finite number can be produced.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => return None,
    };

    number.is_finite().then_some(number)
}

/// Returns `true` if the value parses as an RFC 3339 timestamp or a
/// `YYYY-MM-DD` date.
pub fn is_date(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
