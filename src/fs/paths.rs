//! Output directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default output directory when neither CLI nor config supply one.
pub const DEFAULT_OUTPUT_DIR: &str = "./downloads";

/// Ensure a directory exists, creating it and its parents if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// The default output directory path.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call on an existing directory is a no-op.
        ensure_dir(&nested).unwrap();
    }
}
