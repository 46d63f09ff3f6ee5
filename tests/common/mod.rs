#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the dirschema binary.
#[macro_export]
macro_rules! dirschema_cmd {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("dirschema"))
    };
}

/// Temporary directory with helpers for building test trees.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file (and its parents) with the given content.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory (and its parents).
    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.dir.path().join(relative_path))
            .expect("Failed to create directory");
    }

    /// Writes a schema document and returns its path.
    pub fn write_schema(&self, name: &str, content: &str) -> PathBuf {
        self.create_file(name, content);
        self.dir.path().join(name)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
