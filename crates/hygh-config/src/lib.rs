//! Configuration models and employee-mode validation for HYGH deployments.
//!
//! This crate owns the hardening policy checked before the gateway and chat
//! channels start, the typed config model handed to them afterwards, and a
//! small JSON5 reader used by the startup path.

mod error;
mod loader;
mod model;
mod validate;

/// Public error type returned by config loading APIs.
pub use error::ConfigError;
/// Raw config readers (no layering).
pub use loader::{parse_config_str, read_config_value};
/// Configuration schema models.
pub use model::*;
/// Employee-mode validator and its result types.
pub use validate::{ROOT_PATH, ValidationIssue, ValidationResult, validate_config_object};
