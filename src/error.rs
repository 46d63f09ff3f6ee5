use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirschemaError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid match pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("Unresolvable reference '{uri}': {reason}")]
    Unresolvable { uri: String, reason: String },

    #[error("Validator plugin not found: '{0}'")]
    UnknownPlugin(String),

    #[error("Found no suitable adapter for path: {0}")]
    NoAdapter(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("HTTP request to {url} failed: {reason}")]
    Http { url: String, reason: String },
}

impl DirschemaError {
    /// Returns the error type as a short string identifier.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Schema(_) => "Schema",
            Self::InvalidPath { .. } => "Path",
            Self::InvalidPattern { .. } => "Pattern",
            Self::UnknownProtocol(_) | Self::Unresolvable { .. } => "Reference",
            Self::UnknownPlugin(_) => "Plugin",
            Self::NoAdapter(_) => "Adapter",
            Self::Io(_) => "IO",
            Self::Json(_) => "JSON",
            Self::Yaml(_) => "YAML",
            Self::Zip(_) => "ZIP",
            Self::Http { .. } => "HTTP",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirschemaError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
