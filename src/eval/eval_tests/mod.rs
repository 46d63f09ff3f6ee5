mod logic_tests;

use serde_json::Value;

use crate::adapter::MemAdapter;
use crate::meta::MetaConvention;
use crate::rule::DsRule;
use crate::schema::{DocLoader, JsonValidator, PluginRegistry, ResolverConfig};

use super::{ErrorValue, Evaluator, PathErrors};

/// Evaluate a rule (given as JSON) against one path of an in-memory tree.
pub fn evaluate(rule: &Value, adapter: &MemAdapter, path: &str) -> Option<PathErrors> {
    evaluate_with_plugins(rule, adapter, path, PluginRegistry::new())
}

pub fn evaluate_with_plugins(
    rule: &Value,
    adapter: &MemAdapter,
    path: &str,
    registry: PluginRegistry,
) -> Option<PathErrors> {
    let rule: DsRule = serde_json::from_value(rule.clone()).expect("rule should parse");
    let meta = MetaConvention::default();
    let resolver = ResolverConfig::default();
    let validator = JsonValidator::new(DocLoader::new(resolver.clone()), registry);
    let evaluator = Evaluator::new(adapter, &meta, &validator, &resolver);
    evaluator.evaluate(&rule, path)
}

/// Whether the rule is satisfied for the path.
pub fn is_satisfied(rule: &Value, adapter: &MemAdapter, path: &str) -> bool {
    evaluate(rule, adapter, path).is_none()
}

/// The message reported at a rule location; panics when absent.
pub fn message_at<'e>(errors: &'e PathErrors, loc: &str) -> &'e str {
    let entry = errors
        .get(loc)
        .unwrap_or_else(|| panic!("no error at '{loc}', got {:?}", errors.keys().collect::<Vec<_>>()));
    match &entry.err {
        ErrorValue::Message(message) => message,
        ErrorValue::Schema(_) => panic!("expected message at '{loc}', got schema errors"),
    }
}
