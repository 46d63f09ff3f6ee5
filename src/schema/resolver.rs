//! Resolution of schema references to validation sources.
//!
//! A `valid`/`validMeta` value is either an inline schema or a string
//! reference. References support `http(s)://` and `file://` URIs, the
//! `local://` and `cwd://` shorthands, bare relative paths, and the
//! `v#NAME://ARG` plugin pseudo-URI.

use std::path::{Path, PathBuf};

use crate::error::{DirschemaError, Result};
use crate::rule::SchemaOrRef;

/// Where relative references are anchored.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Base directory for `local://` references; typically the directory
    /// of the rule document.
    pub local_basedir: Option<PathBuf>,
    /// Prefix added to bare relative references before resolution.
    pub relative_prefix: String,
    /// Working directory for `cwd://` references; the process working
    /// directory when unset.
    pub working_dir: Option<PathBuf>,
}

impl ResolverConfig {
    fn working_dir(&self) -> Result<PathBuf> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    fn local_basedir(&self) -> Result<PathBuf> {
        match &self.local_basedir {
            Some(dir) => Ok(dir.clone()),
            None => self.working_dir(),
        }
    }
}

/// A schema reference resolved to something the validator can act on.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSource {
    /// Inline schema body (object or boolean).
    Inline(serde_json::Value),
    /// Absolute path of a local schema document.
    Local(PathBuf),
    /// `http(s)://` URI of a remote schema document.
    Remote(String),
    /// Custom validation plugin invocation.
    Plugin { name: String, arg: String },
}

/// Resolve a rule's schema field into a [`SchemaSource`].
///
/// # Errors
/// Returns an error for malformed plugin pseudo-URIs and unknown
/// protocols.
pub fn resolve(schema: &SchemaOrRef, config: &ResolverConfig) -> Result<SchemaSource> {
    match schema {
        SchemaOrRef::Inline(value) => Ok(SchemaSource::Inline(value.clone())),
        SchemaOrRef::Ref(reference) => resolve_ref(reference, config),
    }
}

fn resolve_ref(reference: &str, config: &ResolverConfig) -> Result<SchemaSource> {
    let expanded = apply_prefix(reference, config);
    if let Some(rest) = expanded.strip_prefix("v#") {
        let (name, arg) = rest.split_once("://").ok_or_else(|| {
            DirschemaError::Schema(format!(
                "invalid validator plugin pseudo-URI: '{expanded}'"
            ))
        })?;
        if name.is_empty() {
            return Err(DirschemaError::Schema(format!(
                "invalid validator plugin pseudo-URI: '{expanded}'"
            )));
        }
        return Ok(SchemaSource::Plugin {
            name: name.to_string(),
            arg: arg.to_string(),
        });
    }
    uri_to_source(&normalize_uri(&expanded, config)?)
}

/// Normalize a path or URI into `http(s)://...` or `file://<abs path>`.
///
/// # Errors
/// Returns an error for unknown protocols or when the working directory
/// cannot be determined.
pub fn to_uri(location: &str, config: &ResolverConfig) -> Result<String> {
    normalize_uri(&apply_prefix(location, config), config)
}

fn apply_prefix(location: &str, config: &ResolverConfig) -> String {
    if !location.starts_with('/') && !location.contains("://") {
        format!("{}{location}", config.relative_prefix)
    } else {
        location.to_string()
    }
}

fn normalize_uri(location: &str, config: &ResolverConfig) -> Result<String> {
    let (protocol, rest) = match location.split_once("://") {
        Some((protocol, rest)) => (protocol, rest),
        None => ("", location),
    };
    match protocol {
        "http" | "https" | "file" => Ok(location.to_string()),
        "local" => {
            let base = config.local_basedir()?;
            Ok(file_uri(&base.join(rest.trim_start_matches('/'))))
        }
        "cwd" => {
            // Absolute remainders are still taken relative to the working
            // directory, so cwd:// and cwd:/// agree.
            let base = config.working_dir()?;
            Ok(file_uri(&base.join(rest.trim_start_matches('/'))))
        }
        "" => {
            let path = Path::new(rest);
            if path.is_absolute() {
                Ok(file_uri(path))
            } else {
                Ok(file_uri(&config.working_dir()?.join(path)))
            }
        }
        other => Err(DirschemaError::UnknownProtocol(other.to_string())),
    }
}

fn uri_to_source(uri: &str) -> Result<SchemaSource> {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        Ok(SchemaSource::Remote(uri.to_string()))
    } else if let Some(path) = uri.strip_prefix("file://") {
        Ok(SchemaSource::Local(PathBuf::from(path)))
    } else {
        Err(DirschemaError::Unresolvable {
            uri: uri.to_string(),
            reason: "expected http(s):// or file:// after normalization".to_string(),
        })
    }
}

fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
