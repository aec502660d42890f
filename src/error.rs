use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The constraint a field failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A required field is absent or `null`.
    Missing,
    /// The value is present but of the wrong JSON type.
    WrongType { expected: String },
    /// String shorter than the minimum length (in characters).
    TooShort { min: usize },
    /// Number below the inclusive minimum.
    BelowMinimum { min: f64 },
    /// Number above the inclusive maximum.
    AboveMaximum { max: f64 },
    /// String is not shaped like an email address.
    InvalidEmail,
    /// String does not satisfy a pattern rule.
    PatternMismatch { message: String },
    /// `confirmPassword` differs from `password`.
    PasswordMismatch,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing => write!(f, "is required"),
            Violation::WrongType { expected } => write!(f, "must be {}", expected),
            Violation::TooShort { min } => write!(f, "must be at least {} characters long", min),
            Violation::BelowMinimum { min } => write!(f, "must be greater than or equal to {}", min),
            Violation::AboveMaximum { max } => write!(f, "must be less than or equal to {}", max),
            Violation::InvalidEmail => write!(f, "must be a valid email address"),
            Violation::PatternMismatch { message } => write!(f, "{}", message),
            Violation::PasswordMismatch => write!(f, "must match password"),
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFailure {
    pub field: String,
    pub violation: Violation,
}

impl FieldFailure {
    pub fn new(field: impl Into<String>, violation: Violation) -> Self {
        Self {
            field: field.into(),
            violation,
        }
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.violation)
    }
}

/// Structured validation errors with field-level failures, in check order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub failures: Vec<FieldFailure>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, violation: Violation) -> Self {
        Self {
            failures: vec![FieldFailure::new(field, violation)],
        }
    }

    pub fn push(&mut self, field: impl Into<String>, violation: Violation) {
        self.failures.push(FieldFailure::new(field, violation));
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` if any failure names `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.failures.iter().any(|f| f.field == field)
    }

    /// Violations recorded for `field`, in check order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.failures
            .iter()
            .filter(move |f| f.field == field)
            .map(|f| &f.violation)
    }

    /// Flattens failures into a `field -> message` map, keeping the first
    /// message per field.
    pub fn fields(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for failure in &self.failures {
            map.entry(failure.field.clone())
                .or_insert_with(|| failure.violation.to_string());
        }
        map
    }

    /// Converts into `Ok(())` when no failures were collected.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.failures.iter().map(|f| f.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error with field-level details.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A form update named a field that cannot take a text value.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// An error raised by the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// An I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;
