//! Error types for config loading.

use crate::ValidationIssue;
use thiserror::Error;

/// Errors returned while loading a config or handing it to the service.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config file failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing a config file failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// Converting JSON values failed.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// The config violated one or more validation rules.
    #[error("config rejected: {}", summarize(.issues))]
    Rejected { issues: Vec<ValidationIssue> },
}

impl ConfigError {
    /// Issues carried by a rejected config; empty for IO and parse failures.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ConfigError::Rejected { issues } => issues,
            _ => &[],
        }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    match issues {
        [] => "no issues reported".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
