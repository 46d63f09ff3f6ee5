//! JSON/YAML document loading with `$ref` inlining.
//!
//! Rule documents and referenced schema documents are loaded through the
//! same path: fetch bytes (file or HTTP), parse as JSON falling back to
//! YAML, then replace every `$ref` node with the referenced value. A
//! reference-hop cap breaks cycles.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

use serde_json::Value;

use crate::error::{DirschemaError, Result};

use super::remote::{HttpClient, ReqwestClient};
use super::resolver::{ResolverConfig, to_uri};

/// Maximum number of reference hops before a cycle is assumed.
const MAX_REF_HOPS: usize = 32;

/// Loads JSON/YAML documents and inlines their references.
pub struct DocLoader {
    config: ResolverConfig,
    http: Box<dyn HttpClient>,
    cache: RefCell<HashMap<String, Value>>,
}

impl DocLoader {
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_http(config, Box::new(ReqwestClient))
    }

    #[must_use]
    pub fn with_http(config: ResolverConfig, http: Box<dyn HttpClient>) -> Self {
        Self {
            config,
            http,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Load a document from a path or URI and inline every `$ref`.
    ///
    /// # Errors
    /// Returns an error if fetching or parsing fails, a reference cannot
    /// be resolved, or reference nesting exceeds the cycle cap.
    pub fn load(&self, location: &str) -> Result<Value> {
        let uri = to_uri(location, &self.config)?;
        let document = self.fetch(&uri)?;
        self.resolve_refs(&document, &document, 0)
    }

    fn fetch(&self, uri: &str) -> Result<Value> {
        if let Some(cached) = self.cache.borrow().get(uri) {
            return Ok(cached.clone());
        }
        let text = if uri.starts_with("http://") || uri.starts_with("https://") {
            self.http.get(uri)?
        } else if let Some(path) = uri.strip_prefix("file://") {
            fs::read_to_string(path)?
        } else {
            return Err(DirschemaError::Unresolvable {
                uri: uri.to_string(),
                reason: "unsupported document location".to_string(),
            });
        };
        let value = parse_json_or_yaml(&text)?;
        self.cache
            .borrow_mut()
            .insert(uri.to_string(), value.clone());
        Ok(value)
    }

    fn resolve_refs(&self, node: &Value, root: &Value, hops: usize) -> Result<Value> {
        if hops > MAX_REF_HOPS {
            return Err(DirschemaError::Schema(
                "reference nesting too deep (reference cycle?)".to_string(),
            ));
        }
        match node {
            Value::Object(map) => {
                if let Some(Value::String(target)) = map.get("$ref") {
                    return self.resolve_reference(target, root, hops);
                }
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), self.resolve_refs(value, root, hops)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => {
                let resolved: Result<Vec<Value>> = items
                    .iter()
                    .map(|item| self.resolve_refs(item, root, hops))
                    .collect();
                Ok(Value::Array(resolved?))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_reference(&self, target: &str, root: &Value, hops: usize) -> Result<Value> {
        if target.starts_with("v#") {
            return Err(DirschemaError::Schema(format!(
                "validator plugin pseudo-URI not allowed in $ref: '{target}'"
            )));
        }
        // Fragment into the current document.
        if let Some(pointer) = target.strip_prefix('#') {
            let referenced = root.pointer(pointer).ok_or_else(|| {
                DirschemaError::Unresolvable {
                    uri: target.to_string(),
                    reason: "no such location in document".to_string(),
                }
            })?;
            return self.resolve_refs(&referenced.clone(), root, hops + 1);
        }
        // External document, optionally with a fragment.
        let (location, pointer) = match target.split_once('#') {
            Some((location, pointer)) => (location, Some(pointer)),
            None => (target, None),
        };
        let uri = to_uri(location, &self.config)?;
        let document = self.fetch(&uri)?;
        let referenced = match pointer {
            Some(pointer) => document
                .pointer(pointer)
                .ok_or_else(|| DirschemaError::Unresolvable {
                    uri: target.to_string(),
                    reason: "no such location in referenced document".to_string(),
                })?
                .clone(),
            None => document.clone(),
        };
        // References inside the external document resolve against it.
        self.resolve_refs(&referenced, &document, hops + 1)
    }
}

/// Parse a string as JSON, falling back to YAML.
///
/// # Errors
/// Returns the YAML error if both parses fail.
pub(crate) fn parse_json_or_yaml(text: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    Ok(serde_json::to_value(yaml)?)
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
