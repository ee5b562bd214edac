use std::path::PathBuf;
use thiserror::Error;

/// Fatal initialization failures.
///
/// Degraded conditions (hostname lookup, unreadable config, a single bad
/// archive entry) never become an `EnvironmentError`; they are logged and
/// replaced by their fallback value.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Platform not supported: {os_name}")]
    UnsupportedPlatform { os_name: String },

    #[error("Only 32bit and 64bit systems are supported, not '{value}'")]
    UnsupportedArchitecture { value: String },

    #[error("Could not determine the user home directory")]
    MissingUserHome,

    #[error("Could not determine the current working directory: {0}")]
    CurrentDirectory(#[source] std::io::Error),

    #[error("Could not find application directory at {}", path.display())]
    MissingApplicationDirectory { path: PathBuf },

    #[error("Could not find application resources directory at {}", path.display())]
    MissingResourceDirectory { path: PathBuf },

    #[error("Resource location '{form}' is not a recognized resource source")]
    UnrecognizedResourceSource { form: String },

    #[error("Bundled resource root '{root}' not found at {location}")]
    MissingResourceRoot { root: String, location: String },

    #[error("Could not open resource archive {}: {source}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Could not copy resources into {}: {source}", path.display())]
    ResourceCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EnvironmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_carries_raw_name() {
        let err = EnvironmentError::UnsupportedPlatform {
            os_name: "solaris".into(),
        };
        assert_eq!(err.to_string(), "Platform not supported: solaris");
    }

    #[test]
    fn missing_directory_messages_show_path() {
        let err = EnvironmentError::MissingResourceDirectory {
            path: PathBuf::from("/tmp/x/res"),
        };
        assert!(err.to_string().contains("/tmp/x/res"));
    }
}
