//! Adapter for the entry table of a ZIP archive.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::zip::ZipArchive;

use crate::error::Result;
use crate::path::normalize;

use super::TreeAdapter;

/// Adapter over an opened ZIP archive.
///
/// Directories are the explicit directory entries plus the implicit
/// ancestors of every entry, so archives that omit directory records
/// still present a complete tree.
pub struct ZipAdapter {
    archive: RefCell<ZipArchive<File>>,
    /// Normalized file path -> raw entry name inside the archive.
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl ZipAdapter {
    /// Open a ZIP archive and index its entry table.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is not a valid ZIP
    /// archive, or contains entries with `.`/`..` path segments.
    pub fn open(path: &Path) -> Result<Self> {
        let archive = ZipArchive::new(File::open(path)?)?;
        let mut files = BTreeMap::new();
        let mut dirs = BTreeSet::new();
        dirs.insert(String::new());
        for raw in archive.file_names() {
            let normalized = normalize(raw.trim_end_matches('/'))?;
            if normalized.is_empty() {
                continue;
            }
            for ancestor in ancestors(&normalized) {
                dirs.insert(ancestor);
            }
            if raw.ends_with('/') {
                dirs.insert(normalized);
            } else {
                files.insert(normalized, raw.to_string());
            }
        }
        Ok(Self {
            archive: RefCell::new(archive),
            files,
            dirs,
        })
    }
}

impl TreeAdapter for ZipAdapter {
    fn enumerate(&self) -> Result<Vec<String>> {
        let mut all: BTreeSet<&str> = self.dirs.iter().map(String::as_str).collect();
        all.extend(self.files.keys().map(String::as_str));
        Ok(all.into_iter().map(str::to_string).collect())
    }

    fn is_dir(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read_bytes(&self, path: &str) -> Option<Vec<u8>> {
        let raw = self.files.get(path)?;
        let mut archive = self.archive.borrow_mut();
        let mut entry = archive.by_name(raw).ok()?;
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).ok()?;
        Some(buf)
    }
}

/// Proper ancestors of a normalized path, nearest the root first.
fn ancestors(path: &str) -> Vec<String> {
    path.char_indices()
        .filter(|&(_, c)| c == '/')
        .map(|(i, _)| path[..i].to_string())
        .collect()
}

#[cfg(test)]
#[path = "zip_tests.rs"]
mod tests;
