//! Queries against the running host.
//!
//! All reads the initializer makes from the outside world go through
//! [`HostEnvironment`], so tests can substitute a fixed host.

use std::io;
use std::path::PathBuf;
use tracing::debug;

pub trait HostEnvironment: Send + Sync {
    /// Human-readable OS name, e.g. "Linux", "Windows XP", "Mac OS X".
    fn os_name(&self) -> String;

    /// Address width in bits, as text ("32", "64").
    fn pointer_width(&self) -> String;

    fn user_home(&self) -> Option<PathBuf>;

    /// Login name of the current user.
    fn user_name(&self) -> Option<String>;

    fn current_dir(&self) -> io::Result<PathBuf>;

    fn hostname(&self) -> io::Result<String>;
}

/// The real host the process runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostEnvironment for SystemHost {
    fn os_name(&self) -> String {
        match std::env::consts::OS {
            "linux" => "Linux".to_string(),
            "windows" => "Windows".to_string(),
            "macos" => "Mac OS X".to_string(),
            other => other.to_string(),
        }
    }

    fn pointer_width(&self) -> String {
        if cfg!(target_pointer_width = "64") {
            "64".to_string()
        } else if cfg!(target_pointer_width = "32") {
            "32".to_string()
        } else {
            (std::mem::size_of::<usize>() * 8).to_string()
        }
    }

    fn user_home(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn user_name(&self) -> Option<String> {
        login_name()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn hostname(&self) -> io::Result<String> {
        let name = lookup_hostname()?;
        debug!(hostname = %name, "Resolved local host name");
        Ok(name)
    }
}

#[cfg(unix)]
fn lookup_hostname() -> io::Result<String> {
    let raw = nix::unistd::gethostname().map_err(io::Error::from)?;
    raw.into_string()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "host name is not valid UTF-8"))
}

#[cfg(not(unix))]
fn lookup_hostname() -> io::Result<String> {
    std::env::var("COMPUTERNAME")
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "COMPUTERNAME is not set"))
}

#[cfg(unix)]
fn login_name() -> Option<String> {
    nix::unistd::User::from_uid(nix::unistd::getuid())
        .ok()
        .flatten()
        .map(|user| user.name)
}

#[cfg(not(unix))]
fn login_name() -> Option<String> {
    std::env::var("USERNAME").ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_host_reports_known_width() {
        let width = SystemHost.pointer_width();
        assert!(width == "32" || width == "64", "unexpected width {width}");
    }

    #[test]
    fn system_host_os_name_is_classifiable_on_supported_targets() {
        let name = SystemHost.os_name();
        match std::env::consts::OS {
            "linux" => assert_eq!(name, "Linux"),
            "macos" => assert_eq!(name, "Mac OS X"),
            "windows" => assert_eq!(name, "Windows"),
            other => assert_eq!(name, other),
        }
    }

    #[test]
    fn system_host_current_dir_matches_std() {
        assert_eq!(
            SystemHost.current_dir().unwrap(),
            std::env::current_dir().unwrap()
        );
    }
}
