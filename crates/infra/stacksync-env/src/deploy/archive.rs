use super::{DeployReport, Materialize};
use crate::error::{EnvironmentError, Result};
use std::fs::File;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// A resource root packaged inside a ZIP archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveResource {
    archive: PathBuf,
    /// Entry-name prefix of the root, always ending in `/`.
    entry_prefix: String,
}

impl ArchiveResource {
    pub fn new(archive: PathBuf, entry_prefix: impl Into<String>) -> Self {
        let mut entry_prefix = entry_prefix.into();
        if !entry_prefix.is_empty() && !entry_prefix.ends_with('/') {
            entry_prefix.push('/');
        }
        Self {
            archive,
            entry_prefix,
        }
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    pub fn entry_prefix(&self) -> &str {
        &self.entry_prefix
    }
}

impl Materialize for ArchiveResource {
    /// Extract every entry under the prefix into `destination`.
    ///
    /// Only failing to open the archive is fatal. A bad entry is logged and
    /// counted as skipped.
    fn materialize_into(&self, destination: &Path) -> Result<DeployReport> {
        let file = File::open(&self.archive).map_err(|e| EnvironmentError::ArchiveOpen {
            path: self.archive.clone(),
            source: e.into(),
        })?;
        let mut archive = ZipArchive::new(file).map_err(|source| EnvironmentError::ArchiveOpen {
            path: self.archive.clone(),
            source,
        })?;

        let mut report = DeployReport::default();
        for index in 0..archive.len() {
            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(archive = %self.archive.display(), index, error = %e, "Skipping unreadable archive entry");
                    report.skipped += 1;
                    continue;
                }
            };

            let name = entry.name().to_string();
            let Some(relative) = name.strip_prefix(&self.entry_prefix) else {
                continue;
            };
            let Some(relative) = safe_relative_path(relative) else {
                warn!(entry = %name, "Skipping archive entry outside of the resource root");
                report.skipped += 1;
                continue;
            };
            let target = destination.join(&relative);

            let outcome = if entry.is_dir() {
                std::fs::create_dir_all(&target).map(|()| report.directories += 1)
            } else {
                extract_file(&mut entry, &target).map(|()| report.files += 1)
            };
            if let Err(e) = outcome {
                warn!(entry = %name, target = %target.display(), error = %e, "Failed to extract archive entry");
                report.skipped += 1;
            }
        }

        debug!(
            archive = %self.archive.display(),
            prefix = %self.entry_prefix,
            files = report.files,
            skipped = report.skipped,
            "Extracted archive resources"
        );
        Ok(report)
    }
}

fn extract_file(reader: &mut impl io::Read, target: &Path) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = File::create(target)?;
    io::copy(reader, &mut out)?;
    Ok(())
}

/// Reject names that would land outside the destination (`..`, absolute paths).
fn safe_relative_path(name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        .then(|| path.to_path_buf())
}
