//! Typed lookups over raw config objects.

use super::ValidationIssue;
use serde_json::{Map, Value};

/// Lookup outcome for a single key of a config object.
///
/// Absence and a wrong JSON type are kept apart so rules can decide which of
/// them count as a violation.
#[derive(Debug, Clone, Copy)]
pub(super) enum Slot<T> {
    /// Key not present.
    Missing,
    /// Key present with an unexpected JSON type.
    Mistyped,
    /// Key present with the expected type.
    Present(T),
}

impl<T> Slot<T> {
    fn from_lookup<'a>(
        value: Option<&'a Value>,
        project: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Self {
        match value {
            None => Slot::Missing,
            Some(value) => match project(value) {
                Some(inner) => Slot::Present(inner),
                None => Slot::Mistyped,
            },
        }
    }

    /// The typed value, treating missing and mistyped alike.
    pub(super) fn present(self) -> Option<T> {
        match self {
            Slot::Present(inner) => Some(inner),
            Slot::Missing | Slot::Mistyped => None,
        }
    }
}

/// Look up a nested object.
pub(super) fn object_field<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Slot<&'a Map<String, Value>> {
    Slot::from_lookup(map.get(key), Value::as_object)
}

/// Look up a string.
pub(super) fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Slot<&'a str> {
    Slot::from_lookup(map.get(key), Value::as_str)
}

/// Look up a boolean.
pub(super) fn bool_field(map: &Map<String, Value>, key: &str) -> Slot<bool> {
    Slot::from_lookup(map.get(key), Value::as_bool)
}

/// Look up an unsigned integer.
pub(super) fn u64_field(map: &Map<String, Value>, key: &str) -> Slot<u64> {
    Slot::from_lookup(map.get(key), Value::as_u64)
}

/// Join nested paths for issue reporting.
pub(super) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Record an issue at `path`.
pub(super) fn report(issues: &mut Vec<ValidationIssue>, path: &str, message: &str) {
    issues.push(ValidationIssue::new(path, message));
}
