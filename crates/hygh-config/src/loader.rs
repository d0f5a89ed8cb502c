//! Single-file config reading and the validate-then-decode startup path.
//!
//! Layering and default merging live with the service's own config loader;
//! this module only turns one JSON5 document into a raw value or a validated
//! `HyghServiceConfig`.

use crate::{ConfigError, HyghServiceConfig, validate_config_object};
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a JSON5 config file into a raw value without validating it.
pub fn read_config_value(path: impl AsRef<Path>) -> Result<Value, ConfigError> {
    info!("reading config from path: {}", path.as_ref().display());
    let contents = fs::read_to_string(path)?;
    parse_config_str(&contents)
}

/// Parse JSON5 contents into a raw value without validating it.
pub fn parse_config_str(contents: &str) -> Result<Value, ConfigError> {
    debug!("parsing config contents (len={})", contents.len());
    let value: Value = json5::from_str(contents)?;
    Ok(value)
}

impl HyghServiceConfig {
    /// Load, validate, and decode a config file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let value = read_config_value(path)?;
        Self::from_value(&value)
    }

    /// Load, validate, and decode JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        let value = parse_config_str(contents)?;
        Self::from_value(&value)
    }

    /// Validate a raw config and decode the hardened sections.
    ///
    /// Every issue is returned in `ConfigError::Rejected`; decoding only
    /// happens once the value passes validation.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let result = validate_config_object(value);
        if !result.is_ok() {
            warn!("config rejected (issues={})", result.issues().len());
            for issue in result.issues() {
                debug!("config issue: {issue}");
            }
        }
        result.into_result()?;
        let config: HyghServiceConfig = serde_json::from_value(value.clone())?;
        info!(
            "config accepted (employee_mode={})",
            config.employee_mode()
        );
        Ok(config)
    }
}
