//! Pass-through adapter for plain directories on the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

use super::TreeAdapter;

/// Adapter rooted at a directory of the real filesystem.
///
/// Symlinks are not followed and do not appear in the enumeration.
pub struct FsAdapter {
    base: PathBuf,
}

impl FsAdapter {
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.base.clone()
        } else {
            self.base.join(path)
        }
    }
}

impl TreeAdapter for FsAdapter {
    fn enumerate(&self) -> Result<Vec<String>> {
        let mut paths = vec![String::new()];
        for entry in WalkDir::new(&self.base).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.path_is_symlink() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.base)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            let normalized: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            paths.push(normalized.join("/"));
        }
        paths.sort();
        Ok(paths)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }

    fn is_file(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn read_bytes(&self, path: &str) -> Option<Vec<u8>> {
        fs::read(self.resolve(path)).ok()
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
