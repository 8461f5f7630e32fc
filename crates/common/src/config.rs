//! Bot configuration types.

use serde::{Deserialize, Serialize};

use crate::types::SubscriberDefaults;

/// Top-level bot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Firestore service-account credentials.
    #[serde(default)]
    pub service_account: ServiceAccount,

    /// SMTP transport settings.
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Rule-evaluation parameters.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Evaluate and log without sending mail or deleting queue items.
    #[serde(default)]
    pub dry_run: bool,
}

/// Google service-account identity, as found in the downloaded JSON key.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ServiceAccount {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub client_email: String,
    /// PEM private key (may contain literal `\n` for newlines).
    #[serde(default)]
    pub private_key: String,
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// SMTP relay settings. Defaults match the QQ-mail SMTPS endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Account (also the envelope sender address).
    #[serde(default)]
    pub username: String,

    /// Account password or app authorization code.
    #[serde(default)]
    pub password: String,

    /// Display name on the From header.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_name: default_from_name(),
        }
    }
}

/// Rule-evaluation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Thresholds applied to subscriber documents that carry none.
    #[serde(default)]
    pub subscriber_defaults: SubscriberDefaults,

    /// Coordinates used when a subscriber has no saved location (Beijing).
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,

    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            subscriber_defaults: SubscriberDefaults::default(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.qq.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_from_name() -> String {
    "MyDashboard Bot".to_string()
}

fn default_fallback_latitude() -> f64 {
    39.9042
}

fn default_fallback_longitude() -> f64 {
    116.4074
}
