//! Registry for custom validation plugins.
//!
//! Plugins are addressed from rules through `v#NAME://ARG` pseudo-URIs
//! and receive raw adapter access, so they can validate files that are
//! not JSON at all.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::adapter::TreeAdapter;

use super::JsonValidationErrors;

/// Custom validation hook.
pub trait ValidationHandler {
    /// Validate the entry at `path`. An empty error map means success.
    ///
    /// `arg` is the string following the pseudo-URI separator, i.e. for
    /// `v#NAME://a/b` the argument is `a/b`.
    fn validate(&self, path: &str, arg: &str, adapter: &dyn TreeAdapter)
    -> JsonValidationErrors;
}

/// Validation handlers by name.
#[derive(Default, Clone)]
pub struct PluginRegistry {
    handlers: BTreeMap<String, Arc<dyn ValidationHandler>>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn ValidationHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ValidationHandler>> {
        self.handlers.get(name)
    }

    /// Registered handler names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
