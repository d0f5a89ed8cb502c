//! Employee-mode validation for raw HYGH configuration objects.
//!
//! Validation runs against the untyped JSON tree rather than the serde model so
//! that malformed shapes and omitted fields surface as issues with exact paths
//! instead of decode errors or silent defaults. Every check appends to a shared
//! issue list; nothing returns early once the root is known to be an object.

mod employee;
mod fields;
mod schema;


use crate::ConfigError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use std::fmt;

/// Path reported when the config root itself has the wrong shape.
pub const ROOT_PATH: &str = "root";

/// A single rule violation located in the config tree.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    /// Dot-separated pointer to the offending field, e.g. `gateway.bind`.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of validating a config object.
///
/// `Invalid` always carries at least one issue, ordered by rule declaration
/// and then by the order fields appear in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every applicable rule passed.
    Ok,
    /// One or more rules failed.
    Invalid(Vec<ValidationIssue>),
}

impl ValidationResult {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        if issues.is_empty() {
            ValidationResult::Ok
        } else {
            ValidationResult::Invalid(issues)
        }
    }

    /// True when no rule reported an issue.
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResult::Ok)
    }

    /// Issues in report order; empty when the config is valid.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ValidationResult::Ok => &[],
            ValidationResult::Invalid(issues) => issues,
        }
    }

    /// Paths of every reported issue, in report order.
    pub fn paths(&self) -> Vec<&str> {
        self.issues()
            .iter()
            .map(|issue| issue.path.as_str())
            .collect()
    }

    /// Convert into a `Result`, rejecting the config when any issue was found.
    pub fn into_result(self) -> Result<(), ConfigError> {
        match self {
            ValidationResult::Ok => Ok(()),
            ValidationResult::Invalid(issues) => Err(ConfigError::Rejected { issues }),
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationResult::Ok => {
                let mut state = serializer.serialize_struct("ValidationResult", 1)?;
                state.serialize_field("ok", &true)?;
                state.end()
            }
            ValidationResult::Invalid(issues) => {
                let mut state = serializer.serialize_struct("ValidationResult", 2)?;
                state.serialize_field("ok", &false)?;
                state.serialize_field("issues", issues)?;
                state.end()
            }
        }
    }
}

/// Validate a raw config object against the base schema and, when
/// `hygh.employeeMode` is `true`, the employee-mode hardening rules.
///
/// The input is only borrowed; repeated calls on the same value return equal
/// results.
pub fn validate_config_object(config: &Value) -> ValidationResult {
    let Some(root) = config.as_object() else {
        return ValidationResult::Invalid(vec![ValidationIssue::new(
            ROOT_PATH,
            "expected object",
        )]);
    };

    let mut issues = Vec::new();
    schema::check_base_schema(root, &mut issues);
    if employee::employee_mode_enabled(root) {
        employee::check_employee_mode(root, &mut issues);
    }
    ValidationResult::from_issues(issues)
}
