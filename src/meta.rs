//! Naming convention for metadata companion files.
//!
//! A convention maps a data path to the path of its JSON metadata
//! companion (a "sidecar" file). Companions are excluded from the set of
//! validated paths and are only ever loaded through `validMeta` rules.

use serde::{Deserialize, Serialize};

use crate::error::{DirschemaError, Result};

/// Filename convention for metadata files associated with other entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetaConvention {
    pub path_prefix: String,
    pub path_suffix: String,
    pub file_prefix: String,
    pub file_suffix: String,
}

impl Default for MetaConvention {
    fn default() -> Self {
        Self {
            path_prefix: String::new(),
            path_suffix: String::new(),
            file_prefix: String::new(),
            file_suffix: "_meta.json".to_string(),
        }
    }
}

impl MetaConvention {
    /// Build a convention from its four parts.
    ///
    /// # Errors
    /// Returns an error unless at least one of `file_prefix` or
    /// `file_suffix` is non-empty (otherwise every filename would be a
    /// companion of itself).
    pub fn new(
        path_prefix: impl Into<String>,
        path_suffix: impl Into<String>,
        file_prefix: impl Into<String>,
        file_suffix: impl Into<String>,
    ) -> Result<Self> {
        let conv = Self {
            path_prefix: path_prefix.into(),
            path_suffix: path_suffix.into(),
            file_prefix: file_prefix.into(),
            file_suffix: file_suffix.into(),
        };
        if conv.file_prefix.is_empty() && conv.file_suffix.is_empty() {
            return Err(DirschemaError::Schema(
                "at least one of file_prefix or file_suffix must be set".to_string(),
            ));
        }
        Ok(conv)
    }

    /// Compute the metadata companion path for `path`.
    ///
    /// The input must be normalized; the result is normalized.
    #[must_use]
    pub fn companion(&self, path: &str, is_dir: bool) -> String {
        let segments: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };
        let (name, parent) = segments
            .split_last()
            .map_or(("", &segments[..]), |(last, rest)| (*last, rest));

        let mut parts: Vec<&str> = Vec::new();
        if !self.path_prefix.is_empty() {
            parts.push(&self.path_prefix);
        }
        parts.extend(parent);

        let filename;
        if is_dir {
            if !name.is_empty() {
                parts.push(name);
            }
            if !self.path_suffix.is_empty() {
                parts.push(&self.path_suffix);
            }
            filename = format!("{}{}", self.file_prefix, self.file_suffix);
        } else {
            if !self.path_suffix.is_empty() {
                parts.push(&self.path_suffix);
            }
            filename = format!("{}{}{}", self.file_prefix, name, self.file_suffix);
        }
        parts.push(&filename);
        parts.join("/")
    }

    /// Whether `path` is a metadata companion under this convention.
    ///
    /// Structural check on the prefixes and suffixes; the root is never a
    /// companion.
    #[must_use]
    pub fn is_companion(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let segments: Vec<&str> = path.split('/').collect();
        let name = segments[segments.len() - 1];
        if !self.file_prefix.is_empty() && !name.starts_with(&self.file_prefix) {
            return false;
        }
        if !self.file_suffix.is_empty() && !name.ends_with(&self.file_suffix) {
            return false;
        }
        let pieces =
            usize::from(!self.path_prefix.is_empty()) + usize::from(!self.path_suffix.is_empty());
        if segments.len() < 1 + pieces {
            return false;
        }
        if !self.path_prefix.is_empty() && segments[0] != self.path_prefix {
            return false;
        }
        if !self.path_suffix.is_empty() && segments[segments.len() - 2] != self.path_suffix {
            return false;
        }
        true
    }
}

#[cfg(test)]
#[path = "meta_tests.rs"]
mod tests;
