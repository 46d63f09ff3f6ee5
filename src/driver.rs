//! Whole-tree validation runs: enumerate, filter companions, evaluate.

use std::path::Path;
use std::sync::Arc;

use crate::adapter::TreeAdapter;
use crate::error::Result;
use crate::eval::{Evaluator, PathErrors, Report};
use crate::meta::MetaConvention;
use crate::rule::{DsRule, LoadResult, load_rule};
use crate::schema::{DocLoader, JsonValidator, PluginRegistry, ResolverConfig, ValidationHandler};

/// Validator for a fixed rule document and metadata convention.
///
/// Rule, convention, and reference configuration are immutable for the
/// lifetime of the validator; every [`DirValidator::validate`] call runs
/// against a freshly supplied adapter.
pub struct DirValidator {
    rule: DsRule,
    meta: MetaConvention,
    resolver: ResolverConfig,
    validator: JsonValidator,
    warnings: Vec<String>,
}

impl DirValidator {
    /// Build a validator from an in-memory rule.
    #[must_use]
    pub fn new(rule: impl Into<DsRule>, meta: MetaConvention, resolver: ResolverConfig) -> Self {
        let loader = DocLoader::new(resolver.clone());
        Self {
            rule: rule.into(),
            meta,
            resolver,
            validator: JsonValidator::new(loader, PluginRegistry::new()),
            warnings: Vec::new(),
        }
    }

    /// Load the rule document from a file path and build a validator.
    ///
    /// When no `local://` base directory is configured, the document's
    /// parent directory is used.
    ///
    /// # Errors
    /// Returns an error if the document cannot be loaded or is not a
    /// valid rule document.
    pub fn from_location(
        location: &Path,
        meta: MetaConvention,
        mut resolver: ResolverConfig,
    ) -> Result<Self> {
        if resolver.local_basedir.is_none() {
            resolver.local_basedir = location.parent().map(Path::to_path_buf);
        }
        let loader = DocLoader::new(resolver.clone());
        let LoadResult { rule, warnings } =
            load_rule(&location.to_string_lossy(), &loader)?;
        Ok(Self {
            rule,
            meta,
            resolver: resolver.clone(),
            validator: JsonValidator::new(DocLoader::new(resolver), PluginRegistry::new()),
            warnings,
        })
    }

    /// Replace the plugin registry used for `v#NAME://ARG` references.
    #[must_use]
    pub fn with_plugins(mut self, registry: PluginRegistry) -> Self {
        self.validator = JsonValidator::new(DocLoader::new(self.resolver.clone()), registry);
        self
    }

    /// Register a single validation plugin.
    #[must_use]
    pub fn with_plugin(self, name: &str, handler: Arc<dyn ValidationHandler>) -> Self {
        let mut registry = PluginRegistry::new();
        registry.register(name, handler);
        self.with_plugins(registry)
    }

    /// Lint warnings collected while loading the rule document.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Validate every path of the tree.
    ///
    /// Companion paths of the metadata convention are skipped. The
    /// report preserves the adapter's enumeration order and is empty iff
    /// the tree satisfies the schema.
    ///
    /// # Errors
    /// Returns an error if the adapter fails to enumerate the tree.
    pub fn validate(&self, adapter: &dyn TreeAdapter) -> Result<Report> {
        let evaluator = Evaluator::new(adapter, &self.meta, &self.validator, &self.resolver);
        let mut report = Report::default();
        for path in adapter.enumerate()? {
            if self.meta.is_companion(&path) {
                continue;
            }
            if let Some(errors) = evaluator.evaluate(&self.rule, &path) {
                report.entries.insert(path, errors);
            }
        }
        Ok(report)
    }

    /// Evaluate a single path against the rule (no companion filtering).
    #[must_use]
    pub fn validate_path(&self, adapter: &dyn TreeAdapter, path: &str) -> Option<PathErrors> {
        let evaluator = Evaluator::new(adapter, &self.meta, &self.validator, &self.resolver);
        evaluator.evaluate(&self.rule, path)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
