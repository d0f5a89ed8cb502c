//! Startup gate for HYGH deployments.
//!
//! Loads a service config, runs the employee-mode validator, and renders the
//! outcome for operators. The `hygh` binary maps [`CheckStatus`] to its exit
//! code so supervisors refuse to start the gateway on a rejected config.

use anyhow::{Context, Result};
use clap::ValueEnum;
use hygh_config::{ValidationResult, read_config_value, validate_config_object};
use log::{info, warn};
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;

/// Rules enforced when `hygh.employeeMode` is `true`, as (path, requirement).
pub const EMPLOYEE_MODE_RULES: &[(&str, &str)] = &[
    ("channels.slack", "a Slack channel must be configured"),
    (
        "channels.slack.mode",
        "Slack and every account overriding `mode` must use socket mode",
    ),
    ("gateway.bind", "the gateway must bind to loopback or tailnet"),
    (
        "gateway.controlUi.enabled",
        "the control UI must be explicitly set to false",
    ),
];

/// Output format for check reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `path: message` line per issue.
    #[default]
    Text,
    /// The validation result as JSON.
    Json,
}

/// Overall outcome of checking a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Every rule passed; the service may start.
    Passed,
    /// The config was read but violates one or more rules.
    Rejected,
    /// The config could not be read or parsed.
    LoadFailed,
}

impl CheckStatus {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            CheckStatus::Passed => 0,
            CheckStatus::Rejected => 1,
            CheckStatus::LoadFailed => 2,
        }
    }
}

/// Rendered result of [`check_config_file`].
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub status: CheckStatus,
    /// Text destined for stdout, newline-terminated.
    pub output: String,
}

/// Read and validate a config file, rendering the outcome in `format`.
///
/// Read and parse failures become a `LoadFailed` report rather than an error;
/// only rendering failures are returned as `Err`.
pub fn check_config_file(path: &Path, format: OutputFormat) -> Result<CheckReport> {
    let value = match read_config_value(path)
        .with_context(|| format!("failed to load config {}", path.display()))
    {
        Ok(value) => value,
        Err(err) => {
            warn!("{err:#}");
            return render_load_failure(&err, format);
        }
    };

    let result = validate_config_object(&value);
    let status = if result.is_ok() {
        info!("config passed validation (path={})", path.display());
        CheckStatus::Passed
    } else {
        warn!(
            "config failed validation (path={}, issues={})",
            path.display(),
            result.issues().len()
        );
        CheckStatus::Rejected
    };
    let output = render_result(&result, format)?;
    Ok(CheckReport { status, output })
}

/// Render a validation result for stdout.
pub fn render_result(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut output =
                serde_json::to_string_pretty(result).context("failed to encode result")?;
            output.push('\n');
            Ok(output)
        }
        OutputFormat::Text => {
            if result.is_ok() {
                return Ok("config ok\n".to_string());
            }
            let issues = result.issues();
            let mut output = format!(
                "config rejected ({} issue{}):\n",
                issues.len(),
                if issues.len() == 1 { "" } else { "s" }
            );
            for issue in issues {
                writeln!(output, "  {issue}")?;
            }
            Ok(output)
        }
    }
}

/// Describe the employee-mode rules, one per line.
pub fn render_rules() -> String {
    let mut output = String::from("employee mode (hygh.employeeMode = true) requires:\n");
    for (path, requirement) in EMPLOYEE_MODE_RULES {
        let _ = writeln!(output, "  {path}: {requirement}");
    }
    output
}

fn render_load_failure(err: &anyhow::Error, format: OutputFormat) -> Result<CheckReport> {
    let output = match format {
        OutputFormat::Json => {
            let body = json!({ "ok": false, "error": format!("{err:#}") });
            let mut output =
                serde_json::to_string_pretty(&body).context("failed to encode error")?;
            output.push('\n');
            output
        }
        OutputFormat::Text => format!("{err:#}\n"),
    };
    Ok(CheckReport {
        status: CheckStatus::LoadFailed,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write JSON5 contents into a temp dir and return the file path.
    fn write_json5(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("hygh.json5");
        fs::write(&path, contents).expect("write");
        path
    }

    /// A hardened config passes with exit code zero.
    #[test]
    fn check_passes_hardened_config() {
        let temp = TempDir::new().expect("tmp");
        let path = write_json5(
            &temp,
            r#"{
                hygh: { employeeMode: true },
                channels: { slack: { mode: "socket", botToken: "xoxb", appToken: "xapp" } },
                gateway: { bind: "loopback", controlUi: { enabled: false } },
            }"#,
        );
        let report = check_config_file(&path, OutputFormat::Text).expect("report");
        assert_eq!(report.status, CheckStatus::Passed);
        assert_eq!(report.status.exit_code(), 0);
        assert_eq!(report.output, "config ok\n");
    }

    /// Every issue is printed as `path: message`.
    #[test]
    fn check_lists_every_issue_in_text() {
        let temp = TempDir::new().expect("tmp");
        let path = write_json5(
            &temp,
            r#"{
                hygh: { employeeMode: true },
                channels: { slack: { mode: "socket" } },
                gateway: { bind: "lan" },
            }"#,
        );
        let report = check_config_file(&path, OutputFormat::Text).expect("report");
        assert_eq!(report.status, CheckStatus::Rejected);
        assert_eq!(report.status.exit_code(), 1);
        assert_eq!(
            report.output,
            "config rejected (2 issues):\n  \
             gateway.bind: Gateway must bind to loopback or tailnet under employee mode\n  \
             gateway.controlUi.enabled: Control UI must be explicitly disabled under employee mode\n"
        );
    }

    /// JSON output mirrors the serialized validation result.
    #[test]
    fn check_renders_json() {
        let temp = TempDir::new().expect("tmp");
        let path = write_json5(&temp, r#"{ hygh: { employeeMode: true }, channels: {} }"#);
        let report = check_config_file(&path, OutputFormat::Json).expect("report");
        assert_eq!(report.status, CheckStatus::Rejected);
        let body: serde_json::Value = serde_json::from_str(&report.output).expect("json");
        assert_eq!(body["ok"], json!(false));
        let paths: Vec<&str> = body["issues"]
            .as_array()
            .expect("issues")
            .iter()
            .filter_map(|issue| issue["path"].as_str())
            .collect();
        assert_eq!(
            paths,
            vec!["channels.slack", "gateway.bind", "gateway.controlUi.enabled"]
        );
    }

    /// Unreadable files exit with the load-failure code.
    #[test]
    fn check_reports_missing_file() {
        let temp = TempDir::new().expect("tmp");
        let path = temp.path().join("absent.json5");
        let report = check_config_file(&path, OutputFormat::Text).expect("report");
        assert_eq!(report.status, CheckStatus::LoadFailed);
        assert_eq!(report.status.exit_code(), 2);
        assert!(report.output.starts_with("failed to load config"));
        assert!(report.output.contains("failed to read config"));
    }

    /// Parse errors are reported as JSON when requested.
    #[test]
    fn check_reports_parse_error_as_json() {
        let temp = TempDir::new().expect("tmp");
        let path = write_json5(&temp, "{ gateway: ");
        let report = check_config_file(&path, OutputFormat::Json).expect("report");
        assert_eq!(report.status, CheckStatus::LoadFailed);
        let body: serde_json::Value = serde_json::from_str(&report.output).expect("json");
        assert_eq!(body["ok"], json!(false));
        assert!(
            body["error"]
                .as_str()
                .expect("error")
                .contains("failed to parse config")
        );
    }

    /// The rules listing names every guarded path.
    #[test]
    fn rules_listing_covers_every_rule() {
        let rules = render_rules();
        for (path, _) in EMPLOYEE_MODE_RULES {
            assert!(rules.contains(path), "missing {path}");
        }
        assert_eq!(rules.lines().count(), EMPLOYEE_MODE_RULES.len() + 1);
    }
}
