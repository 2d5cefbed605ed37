//! Settings provider using Figment

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

use crate::error::{ConfigError, ConfigResult};
use crate::settings::TrackerSettings;

/// Prefix for environment variable overrides, e.g. `TRACKER_TRACK_EFFORT=false`.
pub const ENV_PREFIX: &str = "TRACKER_";

/// Settings provider using figment
///
/// Sources are merged in precedence order (later sources override earlier ones):
/// 1. [`TrackerSettings::default`]
/// 2. Settings files, in the order they were added
/// 3. Environment variables with the [`ENV_PREFIX`] prefix
#[derive(Debug, Clone, Default)]
pub struct SettingsProvider {
    files: Vec<PathBuf>,
    skip_env: bool,
}

impl SettingsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a settings file. Missing files are ignored.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Do not read environment variables.
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Load settings from all sources.
    pub fn load(&self) -> ConfigResult<TrackerSettings> {
        let figment = self.build_figment()?;
        let settings: TrackerSettings = figment.extract()?;
        // surface a bad level at load time rather than at first use
        settings.log_level()?;
        debug!(
            track_effort = settings.track_effort,
            files = self.files.len(),
            "tracker settings loaded"
        );
        Ok(settings)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(TrackerSettings::default()));

        for path in &self.files {
            trace!(path = %path.display(), "merging settings file");
            figment = figment.merge(file_provider(path)?);
        }

        if !self.skip_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment)
    }
}

fn file_provider(path: &Path) -> ConfigResult<Figment> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "toml" => Ok(Figment::from(Toml::file(path))),
        "yaml" | "yml" => Ok(Figment::from(Yaml::file(path))),
        "json" => Ok(Figment::from(Json::file(path))),
        _ => Err(ConfigError::UnsupportedFormat { format: extension }),
    }
}
