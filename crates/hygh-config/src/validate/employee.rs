//! Hardening rules enforced when `hygh.employeeMode` is `true`.
//!
//! Each rule appends its own issues; a failing rule never hides another. A
//! field counts as compliant only when it is present with the required value,
//! so omission fails the same way an unsafe value does.

use super::ValidationIssue;
use super::fields::{Slot, bool_field, join_path, object_field, report, str_field};
use serde_json::{Map, Value};

const SLACK_PATH: &str = "channels.slack";
const GATEWAY_BIND_PATH: &str = "gateway.bind";
const CONTROL_UI_ENABLED_PATH: &str = "gateway.controlUi.enabled";

/// Binds that keep the gateway off publicly routable interfaces.
const PRIVATE_BINDS: &[&str] = &["loopback", "tailnet"];

/// True only when `hygh.employeeMode` is the boolean `true`.
pub(super) fn employee_mode_enabled(root: &Map<String, Value>) -> bool {
    object_field(root, "hygh")
        .present()
        .and_then(|hygh| bool_field(hygh, "employeeMode").present())
        .unwrap_or(false)
}

/// Apply every employee-mode rule in declaration order.
pub(super) fn check_employee_mode(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    check_slack_required(root, issues);
    check_slack_socket_mode(root, issues);
    check_gateway_bind(root, issues);
    check_control_ui_disabled(root, issues);
}

/// Employee deployments must declare a Slack channel.
fn check_slack_required(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let slack = match object_field(root, "channels") {
        Slot::Missing => Slot::Missing,
        Slot::Present(channels) => object_field(channels, "slack"),
        // Reported by the base schema.
        Slot::Mistyped => return,
    };
    if let Slot::Missing = slack {
        report(
            issues,
            SLACK_PATH,
            "Slack channel configuration is required under employee mode",
        );
    }
}

/// Slack and every account that overrides `mode` must use socket mode.
///
/// Accounts without their own `mode` inherit the top-level one, which is
/// checked separately, so only explicit overrides are reported per account.
fn check_slack_socket_mode(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let Some(slack) = object_field(root, "channels")
        .present()
        .and_then(|channels| object_field(channels, "slack").present())
    else {
        return;
    };

    check_socket_mode(slack, SLACK_PATH, issues);

    let Some(accounts) = object_field(slack, "accounts").present() else {
        return;
    };
    let accounts_path = join_path(SLACK_PATH, "accounts");
    for (name, account) in accounts {
        let Some(account) = account.as_object() else {
            continue;
        };
        if account.contains_key("mode") {
            check_socket_mode(account, &join_path(&accounts_path, name), issues);
        }
    }
}

fn check_socket_mode(config: &Map<String, Value>, path: &str, issues: &mut Vec<ValidationIssue>) {
    if let Slot::Present("socket") = str_field(config, "mode") {
        return;
    }
    report(
        issues,
        &join_path(path, "mode"),
        "Slack must use socket mode under employee mode",
    );
}

/// The gateway must bind to loopback or the tailnet.
fn check_gateway_bind(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let bind = object_field(root, "gateway")
        .present()
        .and_then(|gateway| str_field(gateway, "bind").present());
    if bind.is_some_and(|bind| PRIVATE_BINDS.contains(&bind)) {
        return;
    }
    report(
        issues,
        GATEWAY_BIND_PATH,
        "Gateway must bind to loopback or tailnet under employee mode",
    );
}

/// The control UI must be disabled with an explicit `false`.
fn check_control_ui_disabled(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let enabled = object_field(root, "gateway")
        .present()
        .and_then(|gateway| object_field(gateway, "controlUi").present())
        .and_then(|control_ui| bool_field(control_ui, "enabled").present());
    if enabled == Some(false) {
        return;
    }
    report(
        issues,
        CONTROL_UI_ENABLED_PATH,
        "Control UI must be explicitly disabled under employee mode",
    );
}
