use super::{DeployReport, Materialize};
use crate::error::{EnvironmentError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A resource root that is a plain directory on disk (unpacked source tree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResource {
    path: PathBuf,
}

impl DirectoryResource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Materialize for DirectoryResource {
    /// Copy the directory itself into `destination`, i.e. `<destination>/<name>/...`.
    ///
    /// Symlinks are followed and their targets copied. Existing files are
    /// overwritten; any copy error is fatal.
    fn materialize_into(&self, destination: &Path) -> Result<DeployReport> {
        if !self.path.is_dir() {
            return Err(EnvironmentError::MissingResourceRoot {
                root: root_name(&self.path),
                location: self.path.display().to_string(),
            });
        }

        let target_root = match self.path.file_name() {
            Some(name) => destination.join(name),
            None => destination.to_path_buf(),
        };

        let mut report = DeployReport::default();
        for entry in WalkDir::new(&self.path).follow_links(true) {
            let entry = entry.map_err(|e| EnvironmentError::ResourceCopy {
                path: e.path().unwrap_or(&self.path).to_path_buf(),
                source: e.into(),
            })?;
            let relative = entry
                .path()
                .strip_prefix(&self.path)
                .unwrap_or_else(|_| Path::new(""));
            let target = target_root.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target).map_err(|source| EnvironmentError::ResourceCopy {
                    path: target.clone(),
                    source,
                })?;
                report.directories += 1;
            } else {
                std::fs::copy(entry.path(), &target).map_err(|source| {
                    EnvironmentError::ResourceCopy {
                        path: target.clone(),
                        source,
                    }
                })?;
                report.files += 1;
            }
        }

        debug!(
            source = %self.path.display(),
            target = %target_root.display(),
            files = report.files,
            "Copied directory resources"
        );
        Ok(report)
    }
}

fn root_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}
