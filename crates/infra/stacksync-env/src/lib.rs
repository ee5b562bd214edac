//! Process bootstrap for the Stacksync desktop client.
//!
//! This crate runs once, before any sync, network or UI code, and produces an
//! immutable [`Environment`]:
//! - [`platform`]: operating system family and CPU word size
//! - [`paths`]: application and per-user configuration directories
//! - [`deploy`]: copies the bundled `bin`/`res`/`conf` trees into place
//! - [`identity`]: device name and login name, with a layered fallback
//!
//! # Example
//! ```no_run
//! use stacksync_env::{BootstrapOptions, Environment, SystemHost};
//!
//! let env = Environment::initialize(&SystemHost, &BootstrapOptions::from_env()).unwrap();
//! println!("{} on {}", env.device_name(), env.operating_system());
//! ```
//!
//! # Environment Variables
//! - `STACKSYNC_HOME`: application install root (used only if it contains `res/`)
//! - `STACKSYNC_RESOURCES`: location of the bundled resource tree
//!   (`zip:<archive>[!/<prefix>]`, `file:<dir>` or a plain directory)

pub mod config;
pub mod deploy;
pub mod environment;
pub mod error;
pub mod host;
pub mod identity;
pub mod paths;
pub mod platform;
pub mod shared;

// Re-exports for convenient access
pub use config::BootstrapOptions;
pub use environment::Environment;
pub use error::{EnvironmentError, Result};
pub use host::{HostEnvironment, SystemHost};
pub use identity::DeviceIdentity;
pub use paths::PathLayout;
pub use platform::{Architecture, OsFamily, PlatformProfile};
pub use shared::{SharedEnvironment, global};
