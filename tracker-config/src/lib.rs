//! Tracker settings using Figment
//!
//! Settings are layered with a clear precedence order:
//! defaults → configuration files (in the order given) → `TRACKER_` environment variables.
//!
//! ```no_run
//! use tracker_config::{EffortTracking, SettingsProvider};
//!
//! let settings = SettingsProvider::new()
//!     .with_file("tracker.yaml")
//!     .load()?;
//!
//! if settings.track_effort() {
//!     println!("effort columns visible");
//! }
//! # Ok::<(), tracker_config::ConfigError>(())
//! ```
//!
//! Nothing is cached: call [`SettingsProvider::load`] again to pick up edits.

mod effort;
mod error;
mod provider;
mod settings;

pub use effort::EffortTracking;
pub use error::{ConfigError, ConfigResult};
pub use provider::{SettingsProvider, ENV_PREFIX};
pub use settings::{ProxySettings, TrackerSettings};
