//! Bootstrap options.
//!
//! Defaults are compiled in; the two environment variables below are the only
//! runtime inputs.

use serde::Serialize;
use std::path::PathBuf;

/// Display name of the application. Lowercased for the configuration folder.
pub const APPLICATION_NAME: &str = "Stacksync";

/// Persisted configuration document, relative to the user configuration root.
pub const CONFIG_FILENAME: &str = "config.xml";

/// Archive looked up inside the application directory when no bundle location is set.
pub const RESOURCE_ARCHIVE: &str = "resources.zip";

/// Env var naming the application install root.
pub const HOME_ENV: &str = "STACKSYNC_HOME";

/// Env var naming the bundled resource location.
pub const RESOURCES_ENV: &str = "STACKSYNC_RESOURCES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapOptions {
    pub app_name: String,
    pub config_filename: String,
    /// Install root. Ignored unless it contains a `res` directory.
    pub home_override: Option<PathBuf>,
    /// Location of the bundled resource tree; discovered from the
    /// application directory when unset.
    pub resource_bundle: Option<String>,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            app_name: APPLICATION_NAME.to_string(),
            config_filename: CONFIG_FILENAME.to_string(),
            home_override: None,
            resource_bundle: None,
        }
    }
}

impl BootstrapOptions {
    /// Defaults with `STACKSYNC_HOME` and `STACKSYNC_RESOURCES` applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(env_trimmed(HOME_ENV), env_trimmed(RESOURCES_ENV))
    }

    fn with_overrides(mut self, home: Option<String>, resources: Option<String>) -> Self {
        if let Some(home) = home {
            self.home_override = Some(PathBuf::from(home));
        }
        if let Some(resources) = resources {
            self.resource_bundle = Some(resources);
        }
        self
    }

    /// Name of the per-user configuration folder (`stacksync`).
    pub fn folder_name(&self) -> String {
        self.app_name.to_lowercase()
    }
}

/// Helper to read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
