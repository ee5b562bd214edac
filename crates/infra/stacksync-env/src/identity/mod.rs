//! Device identity: the short name this installation is known by, and the
//! OS login name.

pub mod config_xml;
pub mod providers;

use crate::host::HostEnvironment;
use crate::paths::PathLayout;
use chrono::{DateTime, Local, TimeZone};
use providers::{DeviceNameProvider, Hostname, PersistedConfig, Placeholder, first_device_name};
use serde::Serialize;
use tracing::warn;

/// Stored when every other source fails.
pub const PLACEHOLDER_DEVICE_NAME: &str = "(unknown)";

/// Host names longer than this are shortened.
pub const MAX_HOSTNAME_LEN: usize = 10;

/// Length a long host name is cut to. One less than [`MAX_HOSTNAME_LEN`],
/// kept for compatibility with names already registered.
pub const TRUNCATED_HOSTNAME_LEN: usize = 9;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    /// As resolved. May still contain hyphens when it came from the config
    /// file or from a host name looked up next to an existing config file.
    device_name: String,
    user_name: String,
}

impl DeviceIdentity {
    /// Never fails. Sources, in order: saved config, host name, placeholder.
    pub fn resolve(layout: &PathLayout, host: &dyn HostEnvironment) -> Self {
        let config_exists = layout.user_config_file.exists();

        let persisted = PersistedConfig {
            path: layout.user_config_file.clone(),
        };
        let hostname = Hostname {
            host,
            normalize: !config_exists,
        };
        let device_name = if config_exists {
            let chain: [&dyn DeviceNameProvider; 3] = [&persisted, &hostname, &Placeholder];
            first_device_name(&chain)
        } else {
            let chain: [&dyn DeviceNameProvider; 2] = [&hostname, &Placeholder];
            first_device_name(&chain)
        };

        let user_name = host.user_name().unwrap_or_else(|| {
            warn!("Could not determine the login name");
            String::new()
        });

        Self {
            device_name,
            user_name,
        }
    }

    pub fn new(device_name: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            user_name: user_name.into(),
        }
    }

    /// Device name with hyphens replaced by underscores.
    pub fn device_name(&self) -> String {
        normalize_device_name(&self.device_name)
    }

    pub fn raw_device_name(&self) -> &str {
        &self.device_name
    }

    /// Stored device name followed by the current minute (`yyyyMMddHHmm`).
    pub fn device_name_with_timestamp(&self) -> String {
        self.device_name_with_timestamp_at(&Local::now())
    }

    pub fn device_name_with_timestamp_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!("{}{}", self.device_name, at.format(TIMESTAMP_FORMAT))
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}

pub fn normalize_device_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Names over [`MAX_HOSTNAME_LEN`] characters keep their first
/// [`TRUNCATED_HOSTNAME_LEN`] characters.
pub fn truncate_hostname(name: &str) -> String {
    if name.chars().count() > MAX_HOSTNAME_LEN {
        name.chars().take(TRUNCATED_HOSTNAME_LEN).collect()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BootstrapOptions;
    use crate::platform::{Architecture, OsFamily, PlatformProfile};
    use chrono::Utc;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct NamedHost {
        hostname: Option<&'static str>,
        lookups: AtomicUsize,
    }

    impl NamedHost {
        fn new(hostname: Option<&'static str>) -> Self {
            Self {
                hostname,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    impl HostEnvironment for NamedHost {
        fn os_name(&self) -> String {
            "Linux".into()
        }
        fn pointer_width(&self) -> String {
            "64".into()
        }
        fn user_home(&self) -> Option<PathBuf> {
            None
        }
        fn user_name(&self) -> Option<String> {
            Some("alex".into())
        }
        fn current_dir(&self) -> io::Result<PathBuf> {
            Ok(PathBuf::from("."))
        }
        fn hostname(&self) -> io::Result<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.hostname
                .map(str::to_string)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no host name"))
        }
    }

    fn layout(home: &Path) -> PathLayout {
        let profile = PlatformProfile {
            os_family: OsFamily::Linux,
            architecture: Architecture::Amd64,
            os_name: "Linux".into(),
        };
        PathLayout::resolve(&profile, &BootstrapOptions::default(), home, home)
    }

    fn write_config(layout: &PathLayout, body: &str) {
        std::fs::create_dir_all(&layout.user_config_root).unwrap();
        std::fs::write(&layout.user_config_file, body).unwrap();
    }

    #[test]
    fn test_truncation_keeps_nine_characters() {
        assert_eq!(truncate_hostname("this-is-a-very-long-hostname"), "this-is-a");
        assert_eq!(truncate_hostname("dev-host-01"), "dev-host-");
        assert_eq!(truncate_hostname("exactly-10"), "exactly-10");
        assert_eq!(truncate_hostname("short"), "short");
        assert_eq!(truncate_hostname("ünïcödé-hôst"), "ünïcödé-h");
    }

    #[test]
    fn test_normalization_removes_hyphens() {
        for raw in ["a-b", "---", "dev-host-", "no_hyphen"] {
            let id = DeviceIdentity::new(raw, "u");
            assert!(!id.device_name().contains('-'), "{raw}");
        }
        assert_eq!(DeviceIdentity::new("a-b-c", "u").device_name(), "a_b_c");
    }

    #[test]
    fn test_hostname_used_without_config() {
        let home = TempDir::new().unwrap();
        let host = NamedHost::new(Some("dev-host-01"));
        let id = DeviceIdentity::resolve(&layout(home.path()), &host);

        assert_eq!(id.raw_device_name(), "dev_host_");
        assert_eq!(id.device_name(), "dev_host_");
        assert_eq!(id.user_name(), "alex");
    }

    #[test]
    fn test_lookup_failure_yields_placeholder() {
        let home = TempDir::new().unwrap();
        let id = DeviceIdentity::resolve(&layout(home.path()), &NamedHost::new(None));
        assert_eq!(id.device_name(), "(unknown)");
    }

    #[test]
    fn test_persisted_name_takes_precedence() {
        let home = TempDir::new().unwrap();
        let layout = layout(home.path());
        write_config(
            &layout,
            "<config><device><name>mydevice</name></device></config>",
        );

        let host = NamedHost::new(Some("other-host"));
        let id = DeviceIdentity::resolve(&layout, &host);

        assert_eq!(id.device_name(), "mydevice");
        assert_eq!(host.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_persisted_name_is_stored_verbatim() {
        let home = TempDir::new().unwrap();
        let layout = layout(home.path());
        write_config(&layout, "<config><device><name>my-box</name></device></config>");

        let id = DeviceIdentity::resolve(&layout, &NamedHost::new(Some("h")));
        assert_eq!(id.raw_device_name(), "my-box");
        assert_eq!(id.device_name(), "my_box");
    }

    #[test]
    fn test_broken_config_falls_back_to_unnormalized_hostname() {
        let home = TempDir::new().unwrap();
        let layout = layout(home.path());
        write_config(&layout, "<config><device><name>x</device>");

        let id = DeviceIdentity::resolve(&layout, &NamedHost::new(Some("dev-host-01")));
        assert_eq!(id.raw_device_name(), "dev-host-");
        assert_eq!(id.device_name(), "dev_host_");
    }

    #[test]
    fn test_truncated_config_does_not_override_hostname() {
        let home = TempDir::new().unwrap();
        let layout = layout(home.path());
        write_config(&layout, "<config><device><name>mydevice</name></device>");

        let host = NamedHost::new(Some("laptop"));
        let id = DeviceIdentity::resolve(&layout, &host);
        assert_eq!(id.device_name(), "laptop");
        assert_eq!(host.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_timestamp_uses_minute_resolution() {
        let id = DeviceIdentity::new("box", "u");
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 59).unwrap();
        assert_eq!(id.device_name_with_timestamp_at(&at), "box202403070905");

        let now = id.device_name_with_timestamp();
        assert_eq!(now.len(), "box".len() + 12);
        assert!(now[3..].chars().all(|c| c.is_ascii_digit()));
    }
}
