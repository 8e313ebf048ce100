//! # Front-end configuration — `client.toml`
//!
//! Settings the web client reads at startup (filename:
//! [`ClientConfig::filename`] = `"client.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"   # backend serving /api/auth/*
//!
//! [toast]
//! duration_ms = 4000                   # 0 keeps toasts until dismissed
//!
//! [forms]
//! revalidate = "on_change"             # or "on_submit"
//!
//! [log]
//! level = "info"
//! ```
//!
//! Every section and key is optional; a missing or empty file is the default
//! configuration.

use forms::ReValidateMode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub toast: ToastConfig,
    #[serde(default)]
    pub forms: FormsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the auth backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToastConfig {
    /// How long a toast stays up. 0 disables auto-dismiss.
    #[serde(default = "default_toast_duration")]
    pub duration_ms: u32,
}

fn default_toast_duration() -> u32 {
    4000
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default)]
    pub revalidate: ReValidateMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
