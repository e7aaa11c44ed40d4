//! Contact Form Validation - Rule/Field Separation
//!
//! Rules inspect a single field value. The validator runs them per field
//! and rebuilds the whole error map on every pass.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Loose `local@domain.tld` shape. Not RFC 5322, and not anchored.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("is required")]
    Required,

    #[error("is invalid")]
    InvalidFormat,
}

impl ValidationError {
    /// Inline message shown under the field, e.g. "Email is invalid".
    pub fn message(&self, field: Field) -> String {
        format!("{} {}", field.label(), self)
    }
}

pub type FieldErrors = BTreeMap<Field, ValidationError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactInput {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

/// Field rule trait - yields at most one error per value
pub trait FieldRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, value: &str) -> Option<ValidationError>;
}

// --- Concrete Rules ---

pub struct RequiredRule;

impl FieldRule for RequiredRule {
    fn name(&self) -> &'static str { "required" }

    fn check(&self, value: &str) -> Option<ValidationError> {
        if value.trim().is_empty() {
            Some(ValidationError::Required)
        } else {
            None
        }
    }
}

pub struct EmailFormatRule;

impl FieldRule for EmailFormatRule {
    fn name(&self) -> &'static str { "email_format" }

    fn check(&self, value: &str) -> Option<ValidationError> {
        if EMAIL_SHAPE.is_match(value) {
            None
        } else {
            Some(ValidationError::InvalidFormat)
        }
    }
}

/// Validator holds an ordered rule chain per field; the first failing
/// rule decides the field's error.
pub struct Validator {
    rules: Vec<(Field, Vec<Box<dyn FieldRule>>)>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                (Field::Name, vec![Box::new(RequiredRule)]),
                (Field::Email, vec![Box::new(RequiredRule), Box::new(EmailFormatRule)]),
                (Field::Message, vec![Box::new(RequiredRule)]),
            ],
        }
    }

    pub fn validate(&self, input: &ContactInput) -> FieldErrors {
        let mut errors = FieldErrors::new();

        for (field, chain) in &self.rules {
            let value = input.value(*field);
            if let Some(error) = chain.iter().find_map(|rule| rule.check(value)) {
                errors.insert(*field, error);
            }
        }

        errors
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with the default rule set.
pub fn validate(input: &ContactInput) -> FieldErrors {
    Validator::new().validate(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_only() {
        let errors = validate(&ContactInput::new("", "a@b.com", "hi"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&Field::Name), Some(&ValidationError::Required));
    }

    #[test]
    fn test_bad_email_shape() {
        let errors = validate(&ContactInput::new("Jo", "not-an-email", "hi"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&Field::Email), Some(&ValidationError::InvalidFormat));
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let errors = validate(&ContactInput::new("  ", "\t", "\n "));
        assert_eq!(errors.len(), 3);
        assert!(errors.values().all(|e| *e == ValidationError::Required));
    }

    #[test]
    fn test_required_wins_over_format() {
        let errors = validate(&ContactInput::new("Jo", "   ", "hi"));
        assert_eq!(errors.get(&Field::Email), Some(&ValidationError::Required));
    }

    #[test]
    fn test_loose_email_heuristic_preserved() {
        // Accepted by the loose shape even though not strictly valid.
        for email in ["a@b.c", "x y@b.co", "@@a.b", "a@b.c.", "mail: a@b.io"] {
            let errors = validate(&ContactInput::new("Jo", email, "hi"));
            assert!(errors.is_empty(), "expected {email:?} to pass");
        }
        for email in ["a@b", "ab.com", "a@.", "a @b.com"] {
            let errors = validate(&ContactInput::new("Jo", email, "hi"));
            assert_eq!(
                errors.get(&Field::Email),
                Some(&ValidationError::InvalidFormat),
                "expected {email:?} to fail"
            );
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::Required.message(Field::Name), "Name is required");
        assert_eq!(ValidationError::InvalidFormat.message(Field::Email), "Email is invalid");
    }

    #[test]
    fn test_errors_serialize_by_field_name() {
        let errors = validate(&ContactInput::new("", "nope", ""));
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "required",
                "email": "invalid_format",
                "message": "required"
            })
        );
    }
}
