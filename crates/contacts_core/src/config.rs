//! Store configuration.
//!
//! The backing file location is passed into the repository at construction
//! instead of living in a process-wide constant.

use std::path::{Path, PathBuf};

/// File name used when no explicit storage path is configured.
pub const DEFAULT_STORAGE_FILE: &str = "contacs.txt";

/// Configuration for the file-backed contact store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the backing file. Relative paths resolve against the working directory.
    pub storage_path: PathBuf,
}

impl StoreConfig {
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_STORAGE_FILE};
    use std::path::Path;

    #[test]
    fn default_points_at_working_directory_file() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_path(), Path::new(DEFAULT_STORAGE_FILE));
    }
}
