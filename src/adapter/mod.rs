//! Adapters that present directory-like containers as normalized path trees.
//!
//! The evaluator never inspects concrete container kinds; it only sees the
//! [`TreeAdapter`] interface. Paths handed out and accepted here are always
//! normalized (see [`crate::path::normalize`]) and the empty string is the
//! container root.

mod fs;
mod mem;
mod zip;

pub use fs::FsAdapter;
pub use mem::MemAdapter;
pub use self::zip::ZipAdapter;

use std::path::Path;

use serde_json::Value;

use crate::error::{DirschemaError, Result};

/// Why a JSON document could not be produced for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonLoadError {
    /// The path is missing, not file-like, or could not be read.
    Unreadable,
    /// Bytes were read but are not valid JSON.
    Invalid(String),
}

/// Interface for things that behave like a tree of directories and files.
pub trait TreeAdapter {
    /// All paths of the container, normalized, including the root (`""`).
    ///
    /// # Errors
    /// Returns an error if the underlying container cannot be read.
    fn enumerate(&self) -> Result<Vec<String>>;

    /// Whether the path is (like) a directory.
    fn is_dir(&self, path: &str) -> bool;

    /// Whether the path is (like) a file.
    fn is_file(&self, path: &str) -> bool;

    /// Whether the path exists at all.
    fn exists(&self, path: &str) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    /// Raw contents of a file-like entry, if it can be read.
    fn read_bytes(&self, path: &str) -> Option<Vec<u8>>;

    /// Load a file-like entry as a JSON value. Strict JSON only.
    ///
    /// # Errors
    /// Distinguishes unreadable entries from entries that fail to parse.
    fn load_json(&self, path: &str) -> std::result::Result<Value, JsonLoadError> {
        let bytes = self.read_bytes(path).ok_or(JsonLoadError::Unreadable)?;
        serde_json::from_slice(&bytes).map_err(|e| JsonLoadError::Invalid(e.to_string()))
    }
}

/// Return a suitable adapter based on path kind and file extension.
///
/// # Errors
/// Returns an error if the path is neither a directory nor a supported
/// archive file, or if opening the archive fails.
pub fn adapter_for(path: &Path) -> Result<Box<dyn TreeAdapter>> {
    if path.is_dir() {
        return Ok(Box::new(FsAdapter::new(path)));
    }
    if path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
    {
        return Ok(Box::new(ZipAdapter::open(path)?));
    }
    Err(DirschemaError::NoAdapter(path.to_path_buf()))
}
