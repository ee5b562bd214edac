//! Deployment of the bundled resource tree.
//!
//! The three roots (`bin`, `res`, `conf`) are independent. Each one is either
//! an [`ArchiveResource`] (packaged build) or a [`DirectoryResource`]
//! (unpacked source tree).

pub mod archive;
pub mod directory;
pub mod location;

pub use archive::ArchiveResource;
pub use directory::DirectoryResource;
pub use location::BundleLocation;

use crate::error::Result;
use crate::paths::{BIN_DIR, CONF_DIR, PathLayout, RES_DIR};
use crate::platform::PlatformProfile;
use std::ops::AddAssign;
use std::path::Path;
use tracing::info;

pub trait Materialize {
    fn materialize_into(&self, destination: &Path) -> Result<DeployReport>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    Archive(ArchiveResource),
    Directory(DirectoryResource),
}

impl Materialize for ResourceSource {
    fn materialize_into(&self, destination: &Path) -> Result<DeployReport> {
        match self {
            Self::Archive(archive) => archive.materialize_into(destination),
            Self::Directory(dir) => dir.materialize_into(destination),
        }
    }
}

/// Counts of what a deployment touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub directories: usize,
    pub files: usize,
    /// Archive entries that could not be extracted.
    pub skipped: usize,
}

impl AddAssign for DeployReport {
    fn add_assign(&mut self, rhs: Self) {
        self.directories += rhs.directories;
        self.files += rhs.files;
        self.skipped += rhs.skipped;
    }
}

/// The three bundled roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledResources {
    pub bin: ResourceSource,
    pub res: ResourceSource,
    pub conf: ResourceSource,
}

pub struct ResourceDeployer<'a> {
    layout: &'a PathLayout,
    profile: &'a PlatformProfile,
}

impl<'a> ResourceDeployer<'a> {
    pub fn new(layout: &'a PathLayout, profile: &'a PlatformProfile) -> Self {
        Self { layout, profile }
    }

    pub fn deploy(&self, resources: &BundledResources) -> Result<DeployReport> {
        let mut total = DeployReport::default();
        for (root, source) in [
            (BIN_DIR, &resources.bin),
            (RES_DIR, &resources.res),
            (CONF_DIR, &resources.conf),
        ] {
            total += self.deploy_root(root, source)?;
        }

        info!(
            config_root = %self.layout.user_config_root.display(),
            files = total.files,
            directories = total.directories,
            skipped = total.skipped,
            "Deployed bundled resources"
        );
        Ok(total)
    }

    pub fn deploy_root(&self, root: &str, source: &ResourceSource) -> Result<DeployReport> {
        source.materialize_into(self.destination(root, source))
    }

    /// Loose directories go to the configuration root on Linux and Mac, which
    /// keeps the flat layout of an unpacked source tree.
    pub fn destination(&self, root: &str, source: &ResourceSource) -> &'a Path {
        match source {
            ResourceSource::Directory(_) if self.profile.is_unix_like() => {
                self.layout.user_config_root.as_path()
            }
            _ => self.layout.destination_for(root),
        }
    }
}
