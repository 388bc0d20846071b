use once_cell::sync::Lazy;
use regex::Regex;

use crate::reason::Reason;
use crate::record::{ContactRecord, Field};

/// Minimum trimmed length of the sender name.
pub const NAME_MIN: usize = 2;
/// Inclusive trimmed-length bounds of the message body.
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 1000;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
    pub code: &'static str,
}

/// Result of validating the whole record at once. Failures are collected in
/// step order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }
}

/// Validates one field in isolation.
///
/// Pure string checks only; cheap enough to run on every keystroke.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    match field {
        Field::Name => validate_name(value),
        Field::Email => validate_email(value),
        Field::Reason => validate_reason(value),
        Field::Message => validate_message(value),
    }
}

/// Validates every field of the record. A record is submittable exactly when
/// the returned report is valid.
pub fn validate_record(record: &ContactRecord) -> ValidationReport {
    let mut errors = Vec::new();
    for field in Field::ORDER {
        if let Err(error) = validate_field(field, record.field_text(field)) {
            errors.push(error);
        }
    }
    ValidationReport { errors }
}

fn validate_name(value: &str) -> Result<(), FieldError> {
    if value.trim().chars().count() < NAME_MIN {
        return Err(FieldError {
            field: Field::Name,
            message: format!("Name must be at least {NAME_MIN} characters"),
            code: "min_length",
        });
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), FieldError> {
    if !EMAIL_PATTERN.is_match(value.trim()) {
        return Err(FieldError {
            field: Field::Email,
            message: "Enter a valid email address".into(),
            code: "pattern_mismatch",
        });
    }
    Ok(())
}

fn validate_reason(value: &str) -> Result<(), FieldError> {
    if Reason::from_id(value.trim()).is_none() {
        return Err(FieldError {
            field: Field::Reason,
            message: "Pick one of the listed reasons".into(),
            code: "unknown_reason",
        });
    }
    Ok(())
}

fn validate_message(value: &str) -> Result<(), FieldError> {
    let length = value.trim().chars().count();
    if length < MESSAGE_MIN {
        let needed = MESSAGE_MIN - length;
        let plural = if needed == 1 { "" } else { "s" };
        return Err(FieldError {
            field: Field::Message,
            message: format!("Message needs {needed} more character{plural}"),
            code: "min_length",
        });
    }
    if length > MESSAGE_MAX {
        return Err(FieldError {
            field: Field::Message,
            message: format!("Message must stay within {MESSAGE_MAX} characters"),
            code: "max_length",
        });
    }
    Ok(())
}
