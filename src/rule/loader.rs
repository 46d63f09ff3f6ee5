//! Loading and checking of rule documents.
//!
//! Structural problems (unknown keys, conflicting successors, invalid
//! regexes) abort the load; stylistic problems are returned as warnings
//! next to the parsed rule.

use regex::Regex;
use serde_json::Value;

use crate::error::{DirschemaError, Result};
use crate::path::full_match_pattern;
use crate::schema::DocLoader;

use super::{DsRule, Rule};

/// Recognized rule node keys.
const KNOWN_KEYS: &[&str] = &[
    "match",
    "matchStart",
    "matchStop",
    "rewrite",
    "type",
    "valid",
    "validMeta",
    "not",
    "allOf",
    "anyOf",
    "oneOf",
    "if",
    "then",
    "else",
    "next",
    "description",
    "details",
];

/// Keys whose value is a single sub-rule.
const SUBRULE_KEYS: &[&str] = &["not", "if", "then", "else", "next"];

/// Keys whose value is a list of sub-rules.
const LIST_KEYS: &[&str] = &["allOf", "anyOf", "oneOf"];

/// A parsed rule document plus non-fatal lint warnings.
#[derive(Debug)]
pub struct LoadResult {
    pub rule: DsRule,
    pub warnings: Vec<String>,
}

/// Parse a JSON value (already `$ref`-resolved) into a rule tree.
///
/// # Errors
/// Returns an error on unknown keys, malformed nodes, conflicting
/// `next`/`then` usage, or invalid match patterns.
pub fn parse_rule(value: &Value) -> Result<LoadResult> {
    check_node(value, "")?;
    let rule: DsRule = serde_json::from_value(value.clone())?;
    let mut warnings = Vec::new();
    lint_rule(&rule, "", &mut warnings)?;
    Ok(LoadResult { rule, warnings })
}

/// Load a rule document from a path or URI and parse it.
///
/// # Errors
/// Propagates document loading failures and all [`parse_rule`] errors.
pub fn load_rule(location: &str, loader: &DocLoader) -> Result<LoadResult> {
    let value = loader.load(location)?;
    parse_rule(&value)
}

fn loc_display(loc: &str) -> &str {
    if loc.is_empty() { "/" } else { loc }
}

fn check_node(value: &Value, loc: &str) -> Result<()> {
    let map = match value {
        Value::Bool(_) => return Ok(()),
        Value::Object(map) => map,
        _ => {
            return Err(DirschemaError::Schema(format!(
                "rule at '{}' must be a boolean or a mapping",
                loc_display(loc)
            )));
        }
    };
    for (key, child) in map {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            return Err(DirschemaError::Schema(format!(
                "unknown rule key '{key}' at '{}'",
                loc_display(loc)
            )));
        }
        if SUBRULE_KEYS.contains(&key.as_str()) {
            check_node(child, &format!("{loc}/{key}"))?;
        } else if LIST_KEYS.contains(&key.as_str()) {
            let Value::Array(items) = child else {
                return Err(DirschemaError::Schema(format!(
                    "'{key}' at '{}' must be a list of rules",
                    loc_display(loc)
                )));
            };
            for (index, item) in items.iter().enumerate() {
                check_node(item, &format!("{loc}/{key}/{index}"))?;
            }
        }
    }
    Ok(())
}

fn lint_rule(rule: &DsRule, loc: &str, warnings: &mut Vec<String>) -> Result<()> {
    let DsRule::Node(node) = rule else {
        return Ok(());
    };
    check_successors(node, loc, warnings)?;
    if let Some(pattern) = &node.match_ {
        Regex::new(&full_match_pattern(pattern)).map_err(|source| {
            DirschemaError::InvalidPattern {
                pattern: pattern.clone(),
                source: Box::new(source),
            }
        })?;
    }

    for (key, sub) in [
        ("not", &node.not_),
        ("if", &node.if_),
        ("then", &node.then),
        ("else", &node.else_),
        ("next", &node.next),
    ] {
        if let Some(sub) = sub {
            lint_rule(sub, &format!("{loc}/{key}"), warnings)?;
        }
    }
    for (key, list) in [
        ("allOf", &node.all_of),
        ("anyOf", &node.any_of),
        ("oneOf", &node.one_of),
    ] {
        for (index, sub) in list.iter().enumerate() {
            lint_rule(sub, &format!("{loc}/{key}/{index}"), warnings)?;
        }
    }
    Ok(())
}

fn check_successors(node: &Rule, loc: &str, warnings: &mut Vec<String>) -> Result<()> {
    if node.if_.is_none() {
        if node.next.is_some() && node.then.is_some() {
            return Err(DirschemaError::Schema(format!(
                "'then' and 'next' cannot both be present without 'if' at '{}'",
                loc_display(loc)
            )));
        }
        if node.then.is_some() {
            warnings.push(format!(
                "legacy 'then' used as successor at '{}'; prefer 'next'",
                loc_display(loc)
            ));
        }
        if node.else_.is_some() {
            warnings.push(format!(
                "'else' without 'if' has no effect at '{}'",
                loc_display(loc)
            ));
        }
    }
    if node.rewrite.is_some() && node.successor().is_none() {
        warnings.push(format!(
            "'rewrite' without a successor rule has no effect at '{}'",
            loc_display(loc)
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
