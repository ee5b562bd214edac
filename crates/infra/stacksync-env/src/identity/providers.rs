//! Device-name sources, tried in order until one yields a value.

use super::config_xml::read_device_name;
use super::{PLACEHOLDER_DEVICE_NAME, normalize_device_name, truncate_hostname};
use crate::host::HostEnvironment;
use std::path::PathBuf;
use tracing::{debug, warn};

pub trait DeviceNameProvider {
    fn label(&self) -> &'static str;

    /// `None` means "no opinion, ask the next provider".
    fn device_name(&self) -> Option<String>;
}

/// `device/name` from the saved configuration document.
pub struct PersistedConfig {
    pub path: PathBuf,
}

impl DeviceNameProvider for PersistedConfig {
    fn label(&self) -> &'static str {
        "persisted-config"
    }

    fn device_name(&self) -> Option<String> {
        match read_device_name(&self.path) {
            Ok(Some(name)) if !name.is_empty() => Some(name),
            Ok(_) => {
                debug!(path = %self.path.display(), "Config has no device name");
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read device name from config");
                None
            }
        }
    }
}

/// Local host name, shortened to fit the device-name limit.
pub struct Hostname<'a> {
    pub host: &'a dyn HostEnvironment,
    /// Replace hyphens before storing (used when no config file exists).
    pub normalize: bool,
}

impl DeviceNameProvider for Hostname<'_> {
    fn label(&self) -> &'static str {
        "hostname"
    }

    fn device_name(&self) -> Option<String> {
        match self.host.hostname() {
            Ok(name) if !name.is_empty() => {
                let name = truncate_hostname(&name);
                Some(if self.normalize {
                    normalize_device_name(&name)
                } else {
                    name
                })
            }
            Ok(_) => {
                warn!("Host name lookup returned an empty name");
                None
            }
            Err(e) => {
                warn!(error = %e, "Cannot find host name");
                None
            }
        }
    }
}

pub struct Placeholder;

impl DeviceNameProvider for Placeholder {
    fn label(&self) -> &'static str {
        "placeholder"
    }

    fn device_name(&self) -> Option<String> {
        Some(PLACEHOLDER_DEVICE_NAME.to_string())
    }
}

/// First non-empty answer wins; the placeholder ends every chain.
pub fn first_device_name(providers: &[&dyn DeviceNameProvider]) -> String {
    for provider in providers {
        if let Some(name) = provider.device_name() {
            debug!(source = provider.label(), device_name = %name, "Resolved device name");
            return name;
        }
    }
    PLACEHOLDER_DEVICE_NAME.to_string()
}
