use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A config file in a directory removed on drop.
pub struct TempConfig {
    dir: TempDir,
    path: PathBuf,
}

impl TempConfig {
    pub fn create(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("capguard.toml");
        fs::write(&path, contents).expect("write temp config");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a sibling file such as a scenario.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
