use crate::error::{EnvironmentError, Result};
use crate::host::HostEnvironment;
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OsFamily {
    Windows,
    Linux,
    Mac,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    I386,
    Amd64,
}

/// Where the per-user configuration root lives under the user home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRootStyle {
    /// `~/.stacksync` (Linux, Mac)
    DotFolder,
    /// `~/Application Data/stacksync` (Windows XP)
    LegacyAppData,
    /// `~/AppData/Roaming/stacksync` (Windows Vista and later)
    RoamingAppData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformProfile {
    pub os_family: OsFamily,
    pub architecture: Architecture,
    /// OS name exactly as the host reported it.
    pub os_name: String,
}

impl Architecture {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I386 => "i386",
            Self::Amd64 => "amd64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::Linux => write!(f, "Linux"),
            Self::Mac => write!(f, "Mac"),
        }
    }
}

impl PlatformProfile {
    pub fn detect(host: &dyn HostEnvironment) -> Result<Self> {
        debug!("Starting platform detection");

        let os_name = host.os_name();
        let os_family = classify_os(&os_name)?;
        let architecture = classify_architecture(&host.pointer_width())?;

        debug!(os = %os_family, arch = %architecture, raw = %os_name, "Detected platform");
        Ok(Self {
            os_family,
            architecture,
            os_name,
        })
    }

    pub fn config_root_style(&self) -> ConfigRootStyle {
        match self.os_family {
            OsFamily::Linux | OsFamily::Mac => ConfigRootStyle::DotFolder,
            OsFamily::Windows if self.os_name.to_lowercase().contains("xp") => {
                ConfigRootStyle::LegacyAppData
            }
            OsFamily::Windows => ConfigRootStyle::RoamingAppData,
        }
    }

    /// Linux and Mac route loose-directory resources to the configuration root.
    pub fn is_unix_like(&self) -> bool {
        matches!(self.os_family, OsFamily::Linux | OsFamily::Mac)
    }
}

/// Classify an OS name by case-insensitive substring.
pub fn classify_os(os_name: &str) -> Result<OsFamily> {
    let lower = os_name.to_lowercase();
    if lower.contains("linux") {
        Ok(OsFamily::Linux)
    } else if lower.contains("windows") {
        Ok(OsFamily::Windows)
    } else if lower.contains("mac os x") {
        Ok(OsFamily::Mac)
    } else {
        Err(EnvironmentError::UnsupportedPlatform {
            os_name: os_name.to_string(),
        })
    }
}

pub fn classify_architecture(pointer_width: &str) -> Result<Architecture> {
    match pointer_width {
        "32" => Ok(Architecture::I386),
        "64" => Ok(Architecture::Amd64),
        other => Err(EnvironmentError::UnsupportedArchitecture {
            value: other.to_string(),
        }),
    }
}
