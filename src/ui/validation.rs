//! Form field validation
//!
//! Regex-based checks applied to form fields before a registration,
//! report or donation form is submitted.

use std::sync::OnceLock;
use regex::Regex;
use serde::Serialize;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"^\+?[0-9][0-9\s-]{8,18}[0-9]$").expect("phone pattern is valid")
    })
}

/// A single check applied to a field value
#[derive(Debug, Clone)]
pub enum Rule {
    Required,
    Email,
    Phone,
    MinLength(usize),
    MaxLength(usize),
    Pattern { regex: Regex, message: String },
}

impl Rule {
    /// Custom regex rule with its own failure message
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Rule::Pattern {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    fn check(&self, label: &str, value: &str) -> Option<String> {
        let value = value.trim();
        match self {
            Rule::Required if value.is_empty() => Some(format!("{} is required", label)),
            // format checks only apply to filled-in fields
            _ if value.is_empty() => None,
            Rule::Required => None,
            Rule::Email if !email_regex().is_match(value) => {
                Some("Please enter a valid email address".to_string())
            }
            Rule::Phone if !phone_regex().is_match(value) => {
                Some("Please enter a valid phone number".to_string())
            }
            Rule::MinLength(min) if value.chars().count() < *min => {
                Some(format!("{} must be at least {} characters", label, min))
            }
            Rule::MaxLength(max) if value.chars().count() > *max => {
                Some(format!("{} must be at most {} characters", label, max))
            }
            Rule::Pattern { regex, message } if !regex.is_match(value) => Some(message.clone()),
            _ => None,
        }
    }
}

/// First failing rule of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: String,
    label: String,
    rules: Vec<Rule>,
}

/// Ordered set of field rules
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    fields: Vec<FieldSpec>,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, label: &str, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            rules,
        });
        self
    }

    /// Validate one field; `None` for unknown fields or valid values
    pub fn validate_field(&self, name: &str, value: &str) -> Option<FieldError> {
        let spec = self.fields.iter().find(|f| f.name == name)?;
        spec.rules
            .iter()
            .find_map(|rule| rule.check(&spec.label, value))
            .map(|message| FieldError {
                field: spec.name.clone(),
                message,
            })
    }

    /// Validate a whole form. Missing values are treated as empty.
    pub fn validate<'a, F>(&self, lookup: F) -> Vec<FieldError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.fields
            .iter()
            .filter_map(|spec| self.validate_field(&spec.name, lookup(&spec.name).unwrap_or("")))
            .collect()
    }

    /// Validator for the NGO/volunteer registration form
    pub fn registration() -> Self {
        Self::new()
            .field("name", "Name", vec![Rule::Required, Rule::MinLength(2)])
            .field("email", "Email", vec![Rule::Required, Rule::Email])
            .field("phone", "Phone", vec![Rule::Required, Rule::Phone])
    }

    /// Validator for the case report form
    pub fn case_report() -> Self {
        Self::new()
            .field("reporter_phone", "Phone", vec![Rule::Required, Rule::Phone])
            .field("location", "Location", vec![Rule::Required, Rule::MaxLength(255)])
    }
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone.trim())
}
