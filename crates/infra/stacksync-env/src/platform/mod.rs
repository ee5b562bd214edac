pub mod detector;

pub use detector::{
    Architecture, ConfigRootStyle, OsFamily, PlatformProfile, classify_architecture, classify_os,
};
