//! Parsing of resource bundle locations.
//!
//! `zip:<archive>[!/<prefix>]` names a packaged archive, `file:<dir>` or a
//! plain path names a loose directory tree. Any other scheme is rejected.

use super::archive::ArchiveResource;
use super::directory::DirectoryResource;
use super::{BundledResources, ResourceSource};
use crate::config::RESOURCE_ARCHIVE;
use crate::error::{EnvironmentError, Result};
use crate::paths::{BIN_DIR, CONF_DIR, RES_DIR};
use std::path::{Path, PathBuf};

const ARCHIVE_SCHEME: &str = "zip";
const FILE_SCHEME: &str = "file";
const ENTRY_SEPARATOR: &str = "!/";

/// Where the bundled `bin`/`res`/`conf` roots live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleLocation {
    Archive { archive: PathBuf, prefix: String },
    Directory(PathBuf),
}

impl BundleLocation {
    pub fn parse(location: &str) -> Result<Self> {
        match scheme_of(location) {
            Some(ARCHIVE_SCHEME) => {
                let rest = &location[ARCHIVE_SCHEME.len() + 1..];
                let (archive, prefix) = match rest.find(ENTRY_SEPARATOR) {
                    Some(idx) => (&rest[..idx], &rest[idx + ENTRY_SEPARATOR.len()..]),
                    None => (rest, ""),
                };
                Ok(Self::Archive {
                    archive: PathBuf::from(archive),
                    prefix: prefix.trim_matches('/').to_string(),
                })
            }
            Some(FILE_SCHEME) => {
                let rest = &location[FILE_SCHEME.len() + 1..];
                let path = rest.strip_prefix("//").unwrap_or(rest);
                Ok(Self::Directory(PathBuf::from(path)))
            }
            Some(other) => Err(EnvironmentError::UnrecognizedResourceSource {
                form: other.to_string(),
            }),
            None => Ok(Self::Directory(PathBuf::from(location))),
        }
    }

    /// `<app_dir>/resources.zip` if present, otherwise the loose tree in `app_dir`.
    pub fn discover(app_dir: &Path) -> Self {
        let archive = app_dir.join(RESOURCE_ARCHIVE);
        if archive.is_file() {
            Self::Archive {
                archive,
                prefix: String::new(),
            }
        } else {
            Self::Directory(app_dir.to_path_buf())
        }
    }

    pub fn source_for(&self, root: &str) -> ResourceSource {
        match self {
            Self::Archive { archive, prefix } => {
                let entry_prefix = if prefix.is_empty() {
                    format!("{root}/")
                } else {
                    format!("{prefix}/{root}/")
                };
                ResourceSource::Archive(ArchiveResource::new(archive.clone(), entry_prefix))
            }
            Self::Directory(dir) => ResourceSource::Directory(DirectoryResource::new(dir.join(root))),
        }
    }

    pub fn resources(&self) -> BundledResources {
        BundledResources {
            bin: self.source_for(BIN_DIR),
            res: self.source_for(RES_DIR),
            conf: self.source_for(CONF_DIR),
        }
    }
}

/// URI scheme of `location`, if it has one.
///
/// Single letters are drive prefixes (`C:\...`), not schemes.
fn scheme_of(location: &str) -> Option<&str> {
    let (scheme, _) = location.split_once(':')?;
    let looks_like_scheme = scheme.len() >= 2
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    looks_like_scheme.then_some(scheme)
}
