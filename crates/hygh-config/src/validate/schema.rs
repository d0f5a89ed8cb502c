//! Base schema checks for the sections the hardening rules read.
//!
//! These run whether or not employee mode is enabled. Only recognized keys are
//! checked; unrelated sections of the service config pass through untouched.

use super::ValidationIssue;
use super::fields::{Slot, bool_field, join_path, object_field, report, str_field, u64_field};
use serde_json::{Map, Value};

/// Slack transport modes.
const SLACK_MODES: &[&str] = &["socket", "http"];
/// Gateway network exposure classes.
const GATEWAY_BINDS: &[&str] = &["loopback", "tailnet", "lan", "public"];
/// String-valued Slack fields shared by the channel and its accounts.
const SLACK_STRING_KEYS: &[&str] = &["name", "botToken", "appToken", "signingSecret"];

const EXPECTED_OBJECT: &str = "expected object";
const EXPECTED_BOOLEAN: &str = "expected boolean";
const EXPECTED_STRING: &str = "expected string";

/// Check the shape of `hygh`, `channels`, and `gateway`.
pub(super) fn check_base_schema(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    if let Some(hygh) = expect_object(root, "", "hygh", issues) {
        expect_bool(hygh, "hygh", "employeeMode", issues);
    }
    if let Some(channels) = expect_object(root, "", "channels", issues) {
        if let Some(slack) = expect_object(channels, "channels", "slack", issues) {
            check_slack(slack, "channels.slack", issues);
        }
    }
    if let Some(gateway) = expect_object(root, "", "gateway", issues) {
        check_gateway(gateway, "gateway", issues);
    }
}

/// Validate the Slack channel block and each of its accounts.
fn check_slack(slack: &Map<String, Value>, path: &str, issues: &mut Vec<ValidationIssue>) {
    check_slack_fields(slack, path, issues);
    if let Slot::Present("http") = str_field(slack, "mode") {
        if str_field(slack, "signingSecret").present().is_none() {
            report(
                issues,
                &join_path(path, "signingSecret"),
                "Slack HTTP mode requires a signing secret",
            );
        }
    }

    let accounts_path = join_path(path, "accounts");
    let Some(accounts) = expect_object(slack, path, "accounts", issues) else {
        return;
    };
    let base_mode = str_field(slack, "mode").present();
    let base_secret = str_field(slack, "signingSecret").present();
    for (name, account) in accounts {
        let account_path = join_path(&accounts_path, name);
        let Some(account) = account.as_object() else {
            report(issues, &account_path, EXPECTED_OBJECT);
            continue;
        };
        check_slack_fields(account, &account_path, issues);

        let mode = match str_field(account, "mode") {
            Slot::Present(mode) => Some(mode),
            Slot::Missing => base_mode,
            Slot::Mistyped => None,
        };
        if mode != Some("http") {
            continue;
        }
        let secret = str_field(account, "signingSecret").present().or(base_secret);
        if secret.is_none() {
            report(
                issues,
                &join_path(&account_path, "signingSecret"),
                "Slack HTTP mode requires a signing secret",
            );
        }
    }
}

/// Field checks shared by the top-level Slack block and its accounts.
fn check_slack_fields(config: &Map<String, Value>, path: &str, issues: &mut Vec<ValidationIssue>) {
    let mode_path = join_path(path, "mode");
    match str_field(config, "mode") {
        Slot::Missing => {}
        Slot::Mistyped => report(issues, &mode_path, EXPECTED_STRING),
        Slot::Present(mode) => {
            if !SLACK_MODES.contains(&mode) {
                report(
                    issues,
                    &mode_path,
                    "invalid Slack mode (expected socket or http)",
                );
            }
        }
    }
    expect_bool(config, path, "enabled", issues);
    for key in SLACK_STRING_KEYS {
        if let Slot::Mistyped = str_field(config, key) {
            report(issues, &join_path(path, key), EXPECTED_STRING);
        }
    }
}

/// Validate the gateway block.
fn check_gateway(gateway: &Map<String, Value>, path: &str, issues: &mut Vec<ValidationIssue>) {
    let bind_path = join_path(path, "bind");
    match str_field(gateway, "bind") {
        Slot::Missing => {}
        Slot::Mistyped => report(issues, &bind_path, EXPECTED_STRING),
        Slot::Present(bind) => {
            if !GATEWAY_BINDS.contains(&bind) {
                report(
                    issues,
                    &bind_path,
                    "invalid gateway bind (expected loopback, tailnet, lan, or public)",
                );
            }
        }
    }

    match u64_field(gateway, "port") {
        Slot::Missing => {}
        Slot::Present(port) if (1..=u64::from(u16::MAX)).contains(&port) => {}
        Slot::Present(_) | Slot::Mistyped => {
            report(issues, &join_path(path, "port"), "expected port number")
        }
    }

    let control_ui_path = join_path(path, "controlUi");
    if let Some(control_ui) = expect_object(gateway, path, "controlUi", issues) {
        expect_bool(control_ui, &control_ui_path, "enabled", issues);
    }
}

/// Return the nested object at `key`, reporting a mistyped value.
fn expect_object<'a>(
    map: &'a Map<String, Value>,
    path: &str,
    key: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a Map<String, Value>> {
    match object_field(map, key) {
        Slot::Present(inner) => Some(inner),
        Slot::Missing => None,
        Slot::Mistyped => {
            report(issues, &join_path(path, key), EXPECTED_OBJECT);
            None
        }
    }
}

/// Report `key` when it is present but not a boolean.
fn expect_bool(
    map: &Map<String, Value>,
    path: &str,
    key: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if let Slot::Mistyped = bool_field(map, key) {
        report(issues, &join_path(path, key), EXPECTED_BOOLEAN);
    }
}
