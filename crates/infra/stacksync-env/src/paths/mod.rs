mod layout;

pub use layout::{BIN_DIR, CONF_DIR, PathLayout, RES_DIR, select_app_dir, user_config_root};

use std::path::Path;

/// Ensure a directory exists, creating it and its ancestors if necessary.
///
/// Concurrent creation by another process is not an error.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("c");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
