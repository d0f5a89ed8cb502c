//! Configuration schema for the sections HYGH hardens.
//!
//! Fields are optional with no serde defaults: a value the operator did not
//! write stays `None`, so callers can tell "omitted" from "set to false".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root view of a HYGH service config.
///
/// Only the hardened sections are modelled; other top-level keys are ignored
/// on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyghServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hygh: Option<HyghConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<ChannelsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayConfig>,
}

impl HyghServiceConfig {
    /// True when the config opts into employee-mode hardening.
    pub fn employee_mode(&self) -> bool {
        self.hygh
            .as_ref()
            .and_then(|hygh| hygh.employee_mode)
            .unwrap_or(false)
    }

    /// The Slack channel block, if declared.
    pub fn slack(&self) -> Option<&SlackConfig> {
        self.channels.as_ref().and_then(|channels| channels.slack.as_ref())
    }
}

/// Hardening flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HyghConfig {
    /// Harden runtime defaults for employee deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_mode: Option<bool>,
}

/// Chat channels keyed by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<SlackConfig>,
}

/// Slack transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlackMode {
    /// Outbound websocket connection; no public endpoint needed.
    Socket,
    /// Events API over an inbound HTTP endpoint.
    Http,
}

/// Slack channel settings, optionally split into named accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SlackMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<BTreeMap<String, SlackAccountConfig>>,
}

impl SlackConfig {
    /// Mode an account runs with: its own override, else the channel mode.
    ///
    /// Returns `None` for unknown accounts or when neither level sets a mode.
    pub fn effective_mode(&self, account: &str) -> Option<SlackMode> {
        let account = self.accounts.as_ref()?.get(account)?;
        account.mode.or(self.mode)
    }

    /// Signing secret an account verifies requests with, inheriting the
    /// channel-level secret when the account has none.
    pub fn effective_signing_secret(&self, account: &str) -> Option<&str> {
        let account = self.accounts.as_ref()?.get(account)?;
        account
            .signing_secret
            .as_deref()
            .or(self.signing_secret.as_deref())
    }
}

/// Per-account Slack overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackAccountConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SlackMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_secret: Option<String>,
}

/// Network exposure class for the gateway listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayBind {
    Loopback,
    Tailnet,
    Lan,
    Public,
}

impl GatewayBind {
    /// True for binds that are not reachable from the LAN or internet.
    pub fn is_private(self) -> bool {
        matches!(self, GatewayBind::Loopback | GatewayBind::Tailnet)
    }
}

/// Gateway listener settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<GatewayBind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_ui: Option<ControlUiConfig>,
}

/// Administrative web UI bundled with the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlUiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl ControlUiConfig {
    /// True only when `enabled` was written as `false`.
    pub fn is_explicitly_disabled(&self) -> bool {
        self.enabled == Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn slack_with_accounts() -> SlackConfig {
        serde_json::from_value(json!({
            "mode": "http",
            "signingSecret": "shared",
            "accounts": {
                "ops": { "mode": "socket" },
                "eng": { "signingSecret": "eng-secret" }
            }
        }))
        .expect("slack")
    }

    /// Accounts fall back to the channel mode when they do not override it.
    #[test]
    fn effective_mode_prefers_account_override() {
        let slack = slack_with_accounts();
        assert_eq!(slack.effective_mode("ops"), Some(SlackMode::Socket));
        assert_eq!(slack.effective_mode("eng"), Some(SlackMode::Http));
        assert_eq!(slack.effective_mode("missing"), None);
    }

    /// Accounts inherit the channel signing secret.
    #[test]
    fn effective_signing_secret_inherits() {
        let slack = slack_with_accounts();
        assert_eq!(slack.effective_signing_secret("ops"), Some("shared"));
        assert_eq!(slack.effective_signing_secret("eng"), Some("eng-secret"));
    }

    /// Only loopback and tailnet count as private binds.
    #[test]
    fn private_binds() {
        assert!(GatewayBind::Loopback.is_private());
        assert!(GatewayBind::Tailnet.is_private());
        assert!(!GatewayBind::Lan.is_private());
        assert!(!GatewayBind::Public.is_private());
    }

    /// An omitted `enabled` is not treated as disabled.
    #[test]
    fn control_ui_requires_explicit_false() {
        assert!(!ControlUiConfig::default().is_explicitly_disabled());
        assert!(!ControlUiConfig { enabled: Some(true) }.is_explicitly_disabled());
        assert!(ControlUiConfig { enabled: Some(false) }.is_explicitly_disabled());
    }

    /// Omitted fields stay omitted when the model is written back out.
    #[test]
    fn serializes_only_present_fields() {
        let config: HyghServiceConfig = serde_json::from_value(json!({
            "hygh": { "employeeMode": true },
            "gateway": { "bind": "loopback", "controlUi": {} },
            "agents": { "list": [] }
        }))
        .expect("config");
        assert!(config.employee_mode());
        assert!(config.slack().is_none());
        assert_eq!(
            serde_json::to_value(&config).expect("json"),
            json!({
                "hygh": { "employeeMode": true },
                "gateway": { "bind": "loopback", "controlUi": {} }
            })
        );
    }
}
