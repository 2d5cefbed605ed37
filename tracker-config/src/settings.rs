//! Settings types

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{ConfigError, ConfigResult};

/// Proxy used for the server connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub url: Option<String>,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub domain: Option<String>,
}

/// Settings for the tracker integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Server URL, e.g. `http://myserver/VersionOne`.
    pub application_url: Option<String>,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub integrated_auth: bool,
    pub use_proxy: bool,
    pub proxy: ProxySettings,
    /// Restrict the task views to workitems owned by the current user.
    pub show_my_tasks: bool,
    pub selected_project_id: Option<String>,
    /// Whether the server tracks effort; gates effort-only columns.
    pub track_effort: bool,
    pub min_log_level: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            application_url: None,
            username: None,
            password: None,
            integrated_auth: false,
            use_proxy: false,
            proxy: ProxySettings::default(),
            show_my_tasks: false,
            selected_project_id: None,
            track_effort: true,
            min_log_level: "info".to_string(),
        }
    }
}

impl TrackerSettings {
    /// The configured minimum log level.
    pub fn log_level(&self) -> ConfigResult<Level> {
        Level::from_str(&self.min_log_level).map_err(|_| {
            ConfigError::invalid_value(
                "min_log_level",
                format!("unknown level '{}'", self.min_log_level),
            )
        })
    }

    /// Whether tasks from every owner are shown.
    pub fn show_all_tasks(&self) -> bool {
        !self.show_my_tasks
    }
}
