//! Declarative record shapes.
//!
//! A [`Schema`] is a table of field rules. Each rule names a field, the JSON
//! kind it must have, whether it may be absent, and an ordered list of
//! constraints. Validation walks the table and collects every failure rather
//! than stopping at the first one.

mod shapes;

pub use shapes::{PHONE_NUMBER_MAX, PHONE_NUMBER_MIN};

use crate::error::{ValidationErrors, Violation};
use crate::validation;
use serde_json::{Map, Value};

/// The JSON kind a field must have before its constraints are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    /// A number, or a string that coerces to one (form inputs submit strings).
    CoercedNumber,
    StringList,
    /// An RFC 3339 timestamp or `YYYY-MM-DD` string.
    Date,
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Number | FieldKind::CoercedNumber => "a number",
            FieldKind::StringList => "a list of strings",
            FieldKind::Date => "a date",
        }
    }
}

/// A single constraint on a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    MinLength(usize),
    Min(f64),
    Max(f64),
    Email,
    PasswordComplexity,
}

/// Validation rule for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    optional: bool,
    constraints: Vec<Constraint>,
}

impl FieldRule {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
            constraints: Vec::new(),
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn coerced_number(name: &'static str) -> Self {
        Self::new(name, FieldKind::CoercedNumber)
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::StringList)
    }

    pub fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Marks the field optional: absent or `null` skips all constraints.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn min_length(self, min: usize) -> Self {
        self.with(Constraint::MinLength(min))
    }

    /// Shorthand for `min_length(1)`, the form-level "required" check.
    pub fn non_empty(self) -> Self {
        self.min_length(1)
    }

    pub fn min(self, min: f64) -> Self {
        self.with(Constraint::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.with(Constraint::Max(max))
    }

    pub fn email(self) -> Self {
        self.with(Constraint::Email)
    }

    pub fn password_complexity(self) -> Self {
        self.with(Constraint::PasswordComplexity)
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn check(&self, object: &Map<String, Value>, errors: &mut ValidationErrors) {
        let value = match object.get(self.name) {
            None | Some(Value::Null) => {
                if !self.optional {
                    errors.push(self.name, Violation::Missing);
                }
                return;
            }
            Some(value) => value,
        };

        let Some(typed) = self.extract(value) else {
            errors.push(
                self.name,
                Violation::WrongType {
                    expected: self.kind.expected().to_string(),
                },
            );
            return;
        };

        for constraint in &self.constraints {
            if let Err(violation) = apply(constraint, &typed) {
                errors.push(self.name, violation);
            }
        }
    }

    fn extract<'a>(&self, value: &'a Value) -> Option<Typed<'a>> {
        match self.kind {
            FieldKind::String => value.as_str().map(Typed::Str),
            FieldKind::Number => value.as_f64().map(Typed::Num),
            FieldKind::CoercedNumber => validation::coerce_number(value).map(Typed::Num),
            FieldKind::StringList => {
                let items = value.as_array()?;
                items.iter().all(Value::is_string).then_some(Typed::List(items.len()))
            }
            FieldKind::Date => value
                .as_str()
                .filter(|s| validation::is_date(s))
                .map(Typed::Str),
        }
    }
}

/// A field value after its kind check passed.
enum Typed<'a> {
    Str(&'a str),
    Num(f64),
    List(usize),
}

fn apply(constraint: &Constraint, value: &Typed<'_>) -> Result<(), Violation> {
    match (constraint, value) {
        (Constraint::MinLength(min), Typed::Str(s)) => validation::validate_min_length(s, *min),
        (Constraint::MinLength(min), Typed::List(len)) => {
            if len < min {
                Err(Violation::TooShort { min: *min })
            } else {
                Ok(())
            }
        }
        (Constraint::Min(min), Typed::Num(n)) => validation::validate_min(*n, *min),
        (Constraint::Max(max), Typed::Num(n)) => validation::validate_max(*n, *max),
        (Constraint::Email, Typed::Str(s)) => validation::validate_email(s),
        (Constraint::PasswordComplexity, Typed::Str(s)) => {
            validation::validate_password_complexity(s)
        }
        // Constraint does not apply to this kind
        _ => Ok(()),
    }
}

/// Cross-field rule evaluated after the per-field rules.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossFieldRule {
    /// When `field` is a string, it must equal `other`.
    Matches {
        field: &'static str,
        other: &'static str,
    },
}

impl CrossFieldRule {
    fn check(&self, object: &Map<String, Value>, errors: &mut ValidationErrors) {
        match self {
            CrossFieldRule::Matches { field, other } => {
                let Some(value) = object.get(*field).and_then(Value::as_str) else {
                    return;
                };
                if object.get(*other).and_then(Value::as_str) != Some(value) {
                    errors.push(*field, Violation::PasswordMismatch);
                }
            }
        }
    }
}

/// A named record shape.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldRule>,
    cross_field: Vec<CrossFieldRule>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            cross_field: Vec::new(),
        }
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    pub fn cross_field(mut self, rule: CrossFieldRule) -> Self {
        self.cross_field.push(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    /// Names of the fields that must be present.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|rule| !rule.optional)
            .map(|rule| rule.name)
    }

    /// Validates a candidate record.
    ///
    /// Unknown fields are ignored. A candidate that is not a JSON object fails
    /// with a single `WrongType` failure on the field `$`.
    pub fn validate(&self, candidate: &Value) -> Result<(), ValidationErrors> {
        let Some(object) = candidate.as_object() else {
            return Err(ValidationErrors::single(
                "$",
                Violation::WrongType {
                    expected: "an object".to_string(),
                },
            ));
        };

        let mut errors = ValidationErrors::new();
        for rule in &self.fields {
            rule.check(object, &mut errors);
        }
        for rule in &self.cross_field {
            rule.check(object, &mut errors);
        }

        if !errors.is_empty() {
            tracing::debug!(schema = self.name, failures = errors.len(), "Validation failed");
        }
        errors.into_result()
    }
}
