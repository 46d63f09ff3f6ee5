//! JSON Schema validation with compiled-validator memoization.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use jsonschema::{Draft, Validator};
use serde_json::Value;

use crate::adapter::TreeAdapter;
use crate::error::{DirschemaError, Result};

use super::load::DocLoader;
use super::plugin::PluginRegistry;
use super::resolver::SchemaSource;

/// Validation errors keyed by JSON pointer into the instance document.
///
/// The root location is `/`. An empty map means the instance is valid.
pub type JsonValidationErrors = BTreeMap<String, Vec<String>>;

/// Validates JSON values against schemas and dispatches plugin
/// invocations.
///
/// Compiled validators are memoized for the lifetime of the validator,
/// keyed by the resolved schema source; the rule document is immutable so
/// no invalidation is needed.
pub struct JsonValidator {
    loader: DocLoader,
    registry: PluginRegistry,
    compiled: RefCell<HashMap<String, Arc<Validator>>>,
}

impl JsonValidator {
    #[must_use]
    pub fn new(loader: DocLoader, registry: PluginRegistry) -> Self {
        Self {
            loader,
            registry,
            compiled: RefCell::new(HashMap::new()),
        }
    }

    /// Validate a JSON value against a resolved schema source.
    ///
    /// # Errors
    /// Returns an error when the schema itself cannot be loaded or
    /// compiled; instance violations are reported in the `Ok` map.
    pub fn validate_value(
        &self,
        source: &SchemaSource,
        value: &Value,
    ) -> Result<JsonValidationErrors> {
        let validator = self.compiled(source)?;
        let mut errors = JsonValidationErrors::new();
        for error in validator.iter_errors(value) {
            let pointer = error.instance_path.to_string();
            let key = if pointer.is_empty() {
                "/".to_string()
            } else {
                pointer
            };
            errors.entry(key).or_default().push(error.to_string());
        }
        Ok(errors)
    }

    /// Run a validation plugin by name.
    ///
    /// # Errors
    /// Returns an error if no plugin is registered under `name`.
    pub fn run_plugin(
        &self,
        name: &str,
        arg: &str,
        path: &str,
        adapter: &dyn TreeAdapter,
    ) -> Result<JsonValidationErrors> {
        let handler = self
            .registry
            .get(name)
            .ok_or_else(|| DirschemaError::UnknownPlugin(name.to_string()))?;
        Ok(handler.validate(path, arg, adapter))
    }

    fn compiled(&self, source: &SchemaSource) -> Result<Arc<Validator>> {
        let key = match source {
            SchemaSource::Inline(value) => format!("inline:{value}"),
            SchemaSource::Local(path) => format!("file://{}", path.display()),
            SchemaSource::Remote(uri) => uri.clone(),
            SchemaSource::Plugin { name, .. } => {
                return Err(DirschemaError::Schema(format!(
                    "plugin '{name}' is not a JSON Schema"
                )));
            }
        };
        if let Some(validator) = self.compiled.borrow().get(&key) {
            return Ok(Arc::clone(validator));
        }
        let schema = match source {
            SchemaSource::Inline(value) => value.clone(),
            SchemaSource::Local(path) => self.loader.load(&format!("file://{}", path.display()))?,
            SchemaSource::Remote(uri) => self.loader.load(uri)?,
            SchemaSource::Plugin { .. } => unreachable!("handled above"),
        };
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema)
            .map_err(|e| DirschemaError::Schema(format!("invalid JSON Schema: {e}")))?;
        let validator = Arc::new(validator);
        self.compiled
            .borrow_mut()
            .insert(key, Arc::clone(&validator));
        Ok(validator)
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
