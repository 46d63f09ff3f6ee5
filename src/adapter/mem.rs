//! In-memory tree adapter, used by unit tests as a container double.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;

use super::TreeAdapter;

/// A fully in-memory tree of files and directories.
///
/// Parent directories are created implicitly. Enumeration order is
/// lexicographic with the root first.
#[derive(Debug, Default)]
pub struct MemAdapter {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

impl MemAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with raw contents.
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.add_parents(path);
        self.files.insert(path.to_string(), contents.into());
        self
    }

    /// Add a file containing serialized JSON.
    #[must_use]
    pub fn with_json(self, path: &str, value: &serde_json::Value) -> Self {
        self.with_file(path, value.to_string())
    }

    /// Add an (empty) directory.
    #[must_use]
    pub fn with_dir(mut self, path: &str) -> Self {
        self.add_parents(path);
        if !path.is_empty() {
            self.dirs.insert(path.to_string());
        }
        self
    }

    fn add_parents(&mut self, path: &str) {
        for (i, c) in path.char_indices() {
            if c == '/' {
                self.dirs.insert(path[..i].to_string());
            }
        }
    }
}

impl TreeAdapter for MemAdapter {
    fn enumerate(&self) -> Result<Vec<String>> {
        let mut all: BTreeSet<&str> = self.dirs.iter().map(String::as_str).collect();
        all.extend(self.files.keys().map(String::as_str));
        let mut paths = vec![String::new()];
        paths.extend(all.into_iter().filter(|p| !p.is_empty()).map(str::to_string));
        Ok(paths)
    }

    fn is_dir(&self, path: &str) -> bool {
        path.is_empty() || self.dirs.contains(path)
    }

    fn is_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read_bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.files.get(path).cloned()
    }
}

#[cfg(test)]
#[path = "mem_tests.rs"]
mod tests;
