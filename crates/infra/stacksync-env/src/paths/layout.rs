use crate::config::BootstrapOptions;
use crate::error::{EnvironmentError, Result};
use crate::platform::{ConfigRootStyle, PlatformProfile};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const BIN_DIR: &str = "bin";
pub const RES_DIR: &str = "res";
pub const CONF_DIR: &str = "conf";

/// Directories the application reads from and writes to.
///
/// `app_dir` is the install root and may be read-only. Everything else lives
/// under the per-user configuration root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathLayout {
    pub app_dir: PathBuf,
    pub app_bin_dir: PathBuf,
    pub app_res_dir: PathBuf,
    pub app_conf_dir: PathBuf,
    pub user_home: PathBuf,
    pub user_config_root: PathBuf,
    pub user_config_file: PathBuf,
}

impl PathLayout {
    /// Compute every path. Touches the filesystem only to validate the home override.
    pub fn resolve(
        profile: &PlatformProfile,
        options: &BootstrapOptions,
        user_home: &Path,
        current_dir: &Path,
    ) -> Self {
        let app_dir = select_app_dir(options.home_override.as_deref(), current_dir);
        let user_config_root = user_config_root(profile, user_home, &options.folder_name());

        let layout = Self {
            app_dir,
            app_bin_dir: user_config_root.join(BIN_DIR),
            app_res_dir: user_config_root.join(RES_DIR),
            app_conf_dir: user_config_root.join(CONF_DIR),
            user_home: user_home.to_path_buf(),
            user_config_file: user_config_root.join(&options.config_filename),
            user_config_root,
        };
        debug!(
            app_dir = %layout.app_dir.display(),
            config_root = %layout.user_config_root.display(),
            "Resolved directory layout"
        );
        layout
    }

    /// Create `bin`, `res` and `conf` under the configuration root.
    ///
    /// Failures are only logged: the post-deployment existence checks are
    /// what turn a missing directory into an error.
    pub fn ensure_directories(&self) {
        for dir in [&self.app_bin_dir, &self.app_res_dir, &self.app_conf_dir] {
            if let Err(e) = super::ensure_dir(dir) {
                warn!(path = %dir.display(), error = %e, "Could not create directory");
            }
        }
    }

    pub fn verify_application_dir(&self) -> Result<()> {
        if self.app_dir.exists() {
            Ok(())
        } else {
            Err(EnvironmentError::MissingApplicationDirectory {
                path: self.app_dir.clone(),
            })
        }
    }

    /// Must run after resource deployment, which populates `res` on first start.
    pub fn verify_resource_dir(&self) -> Result<()> {
        if self.app_res_dir.exists() {
            Ok(())
        } else {
            Err(EnvironmentError::MissingResourceDirectory {
                path: self.app_res_dir.clone(),
            })
        }
    }

    /// Destination directory for one of the bundled roots.
    pub fn destination_for(&self, root: &str) -> &Path {
        match root {
            BIN_DIR => &self.app_bin_dir,
            RES_DIR => &self.app_res_dir,
            CONF_DIR => &self.app_conf_dir,
            _ => &self.user_config_root,
        }
    }
}

/// Use the override only if it looks like an install root (has `res/`).
pub fn select_app_dir(home_override: Option<&Path>, current_dir: &Path) -> PathBuf {
    match home_override {
        Some(home) if home.join(RES_DIR).exists() => home.to_path_buf(),
        Some(home) => {
            warn!(
                home = %home.display(),
                fallback = %current_dir.display(),
                "Home override has no res directory; using current directory"
            );
            current_dir.to_path_buf()
        }
        None => current_dir.to_path_buf(),
    }
}

pub fn user_config_root(profile: &PlatformProfile, user_home: &Path, folder_name: &str) -> PathBuf {
    match profile.config_root_style() {
        ConfigRootStyle::DotFolder => user_home.join(format!(".{folder_name}")),
        ConfigRootStyle::LegacyAppData => user_home.join("Application Data").join(folder_name),
        ConfigRootStyle::RoamingAppData => {
            user_home.join("AppData").join("Roaming").join(folder_name)
        }
    }
}
