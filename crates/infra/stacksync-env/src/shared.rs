//! Once-per-process access to the [`Environment`].
//!
//! Prefer building an [`Environment`] at startup and passing it down. The
//! shared cell exists for code that cannot be handed one.

use crate::config::BootstrapOptions;
use crate::environment::Environment;
use crate::error::{EnvironmentError, Result};
use crate::host::{HostEnvironment, SystemHost};
use once_cell::sync::OnceCell;
use tracing::error;

/// Lazily initialized environment slot.
///
/// Concurrent first callers block until one of them has finished, and all of
/// them see the same outcome. Initialization runs at most once: a failure is
/// kept and handed to every later caller.
#[derive(Debug, Default)]
pub struct SharedEnvironment {
    cell: OnceCell<Result<Environment>>,
}

impl SharedEnvironment {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_init(
        &self,
        host: &dyn HostEnvironment,
        options: &BootstrapOptions,
    ) -> std::result::Result<&Environment, &EnvironmentError> {
        self.cell
            .get_or_init(|| {
                let outcome = Environment::initialize(host, options);
                if let Err(e) = &outcome {
                    error!(error = %e, "Environment initialization failed");
                }
                outcome
            })
            .as_ref()
    }

    /// `None` until an initialization has succeeded.
    pub fn get(&self) -> Option<&Environment> {
        self.cell.get().and_then(|outcome| outcome.as_ref().ok())
    }
}

static GLOBAL: SharedEnvironment = SharedEnvironment::new();

/// Process-wide environment built from the real host and `STACKSYNC_*` variables.
pub fn global() -> std::result::Result<&'static Environment, &'static EnvironmentError> {
    GLOBAL.get_or_init(&SystemHost, &BootstrapOptions::from_env())
}
