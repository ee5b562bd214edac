use crate::config::BootstrapOptions;
use crate::deploy::{BundleLocation, DeployReport, ResourceDeployer};
use crate::error::{EnvironmentError, Result};
use crate::host::HostEnvironment;
use crate::identity::DeviceIdentity;
use crate::paths::PathLayout;
use crate::platform::{Architecture, OsFamily, PlatformProfile};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Immutable result of process bootstrap.
///
/// Built once by [`Environment::initialize`]; nothing in it changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    platform: PlatformProfile,
    layout: PathLayout,
    identity: DeviceIdentity,
}

impl Environment {
    /// Detect the platform, lay out and populate the directories, then resolve
    /// the device identity.
    ///
    /// Any error leaves nothing behind except directories that were already
    /// created, which later runs reuse.
    pub fn initialize(host: &dyn HostEnvironment, options: &BootstrapOptions) -> Result<Self> {
        let platform = PlatformProfile::detect(host)?;

        let user_home = host.user_home().ok_or(EnvironmentError::MissingUserHome)?;
        let current_dir = host
            .current_dir()
            .map_err(EnvironmentError::CurrentDirectory)?;

        let layout = PathLayout::resolve(&platform, options, &user_home, &current_dir);
        layout.ensure_directories();

        let report = deploy_resources(&layout, &platform, options)?;
        debug!(files = report.files, skipped = report.skipped, "Resources in place");

        layout.verify_application_dir()?;
        layout.verify_resource_dir()?;

        let identity = DeviceIdentity::resolve(&layout, host);

        let env = Self {
            platform,
            layout,
            identity,
        };
        info!(
            os = %env.operating_system(),
            arch = %env.architecture(),
            app_dir = %env.app_dir().display(),
            config_root = %env.default_user_config_dir().display(),
            device_name = %env.device_name(),
            "Environment initialized"
        );
        Ok(env)
    }

    pub fn platform(&self) -> &PlatformProfile {
        &self.platform
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn app_dir(&self) -> &Path {
        &self.layout.app_dir
    }

    pub fn app_bin_dir(&self) -> &Path {
        &self.layout.app_bin_dir
    }

    pub fn app_res_dir(&self) -> &Path {
        &self.layout.app_res_dir
    }

    pub fn app_conf_dir(&self) -> &Path {
        &self.layout.app_conf_dir
    }

    pub fn default_user_config_file(&self) -> &Path {
        &self.layout.user_config_file
    }

    pub fn default_user_config_dir(&self) -> &Path {
        &self.layout.user_config_root
    }

    pub fn default_user_home(&self) -> &Path {
        &self.layout.user_home
    }

    /// Always normalized (no hyphens).
    pub fn device_name(&self) -> String {
        self.identity.device_name()
    }

    pub fn device_name_with_timestamp(&self) -> String {
        self.identity.device_name_with_timestamp()
    }

    pub fn user_name(&self) -> &str {
        self.identity.user_name()
    }

    pub const fn operating_system(&self) -> OsFamily {
        self.platform.os_family
    }

    pub const fn architecture(&self) -> Architecture {
        self.platform.architecture
    }
}

fn deploy_resources(
    layout: &PathLayout,
    platform: &PlatformProfile,
    options: &BootstrapOptions,
) -> Result<DeployReport> {
    let location = match options.resource_bundle.as_deref() {
        Some(configured) => BundleLocation::parse(configured)?,
        None => BundleLocation::discover(&layout.app_dir),
    };
    debug!(location = ?location, "Deploying resources");
    ResourceDeployer::new(layout, platform).deploy(&location.resources())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct TestHost {
        os: &'static str,
        home: Option<PathBuf>,
        cwd: PathBuf,
    }

    impl HostEnvironment for TestHost {
        fn os_name(&self) -> String {
            self.os.into()
        }
        fn pointer_width(&self) -> String {
            "64".into()
        }
        fn user_home(&self) -> Option<PathBuf> {
            self.home.clone()
        }
        fn user_name(&self) -> Option<String> {
            Some("alex".into())
        }
        fn current_dir(&self) -> io::Result<PathBuf> {
            Ok(self.cwd.clone())
        }
        fn hostname(&self) -> io::Result<String> {
            Ok("workstation-7".into())
        }
    }

    fn seeded_install() -> TempDir {
        let dir = TempDir::new().unwrap();
        for root in ["bin", "res", "conf"] {
            std::fs::create_dir_all(dir.path().join(root)).unwrap();
            std::fs::write(dir.path().join(root).join("marker"), root).unwrap();
        }
        dir
    }

    #[test]
    fn test_initialize_from_loose_install() {
        let install = seeded_install();
        let home = TempDir::new().unwrap();
        let host = TestHost {
            os: "Linux",
            home: Some(home.path().to_path_buf()),
            cwd: install.path().to_path_buf(),
        };

        let env = Environment::initialize(&host, &BootstrapOptions::default()).unwrap();

        let root = home.path().join(".stacksync");
        assert_eq!(env.operating_system(), OsFamily::Linux);
        assert_eq!(env.architecture(), Architecture::Amd64);
        assert_eq!(env.app_dir(), install.path());
        assert_eq!(env.default_user_config_dir(), root);
        assert_eq!(env.default_user_config_file(), root.join("config.xml"));
        assert_eq!(env.default_user_home(), home.path());
        assert!(env.app_res_dir().join("marker").is_file());
        assert_eq!(env.device_name(), "workstati");
        assert_eq!(env.user_name(), "alex");
    }

    #[test]
    fn test_missing_home_is_fatal() {
        let install = seeded_install();
        let host = TestHost {
            os: "Linux",
            home: None,
            cwd: install.path().to_path_buf(),
        };
        assert!(matches!(
            Environment::initialize(&host, &BootstrapOptions::default()),
            Err(EnvironmentError::MissingUserHome)
        ));
    }

    #[test]
    fn test_unsupported_platform_stops_before_touching_disk() {
        let home = TempDir::new().unwrap();
        let host = TestHost {
            os: "solaris",
            home: Some(home.path().to_path_buf()),
            cwd: home.path().to_path_buf(),
        };
        let err = Environment::initialize(&host, &BootstrapOptions::default()).unwrap_err();
        assert!(matches!(err, EnvironmentError::UnsupportedPlatform { ref os_name } if os_name == "solaris"));
        assert!(!home.path().join(".stacksync").exists());
    }
}
