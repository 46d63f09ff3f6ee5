//! Recursive rule interpreter.
//!
//! Each rule node is evaluated in stages against one path: slice window
//! resolution, regex match, primitive constraints (`type`, `valid`,
//! `validMeta`), logical composition (`not`, `allOf`, `anyOf`, `oneOf`,
//! `if`/`then`/`else`), and finally the successor rule on the possibly
//! rewritten path. A failing stage short-circuits the stages after it; a
//! failing `match` makes the whole rule inapplicable instead of failing.

mod context;
pub mod report;

pub use context::MatchState;
pub use report::{ErrorValue, PathErrors, Report, ReportedError};

use std::cell::RefCell;
use std::collections::HashMap;

use regex::Regex;

use crate::adapter::{JsonLoadError, TreeAdapter};
use crate::meta::MetaConvention;
use crate::path::{PathSlice, expand_template, full_match_pattern};
use crate::rule::{DsRule, Rule, SchemaOrRef};
use crate::schema::{JsonValidator, ResolverConfig, SchemaSource, resolve};

use report::{child_loc, loc_key};

/// Evaluates rules against paths of one adapter-backed tree.
///
/// Compiled match patterns are memoized across paths; the evaluator
/// itself holds no other mutable state.
pub struct Evaluator<'a> {
    adapter: &'a dyn TreeAdapter,
    meta: &'a MetaConvention,
    validator: &'a JsonValidator,
    resolver: &'a ResolverConfig,
    patterns: RefCell<HashMap<String, Regex>>,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(
        adapter: &'a dyn TreeAdapter,
        meta: &'a MetaConvention,
        validator: &'a JsonValidator,
        resolver: &'a ResolverConfig,
    ) -> Self {
        Self {
            adapter,
            meta,
            validator,
            resolver,
            patterns: RefCell::new(HashMap::new()),
        }
    }

    /// Evaluate the root rule against a path from the initial state.
    ///
    /// Returns `None` on success, otherwise the collected failures.
    #[must_use]
    pub fn evaluate(&self, rule: &DsRule, path: &str) -> Option<PathErrors> {
        let state = MatchState::initial(path);
        let (ok, mut errors) = self.eval_rule(rule, path, &state, "");
        if ok {
            return None;
        }
        if errors.is_empty() {
            errors.insert(
                loc_key(""),
                ReportedError::message(path, "Validation failed (no error log available)"),
            );
        }
        Some(errors)
    }

    fn eval_rule(
        &self,
        rule: &DsRule,
        path: &str,
        state: &MatchState,
        loc: &str,
    ) -> (bool, PathErrors) {
        let mut own = PathErrors::new();
        let node = match rule {
            DsRule::Bool(true) => return (true, own),
            DsRule::Bool(false) => {
                own.insert(
                    loc_key(loc),
                    ReportedError::message(path, "Schema forbids this path"),
                );
                return (false, own);
            }
            DsRule::Node(node) => node,
        };

        // Slice window: node overrides, else inherited.
        let start = node.match_start.unwrap_or(state.start());
        let stop = node.match_stop.unwrap_or(state.stop());
        let slice = PathSlice::cut(path, start, stop);
        let mut state = state.with_window(start, stop);

        // Match stage: a failed match makes the rule inapplicable.
        if let Some(pattern) = &node.match_ {
            match self.captures_for(pattern, slice.slice()) {
                Ok(Some(captures)) => state.set_captures(captures),
                Ok(None) => return (true, own),
                Err(message) => {
                    own.insert(child_loc(loc, "match"), ReportedError::message(path, message));
                    return (
                        false,
                        self.assemble(node, loc, path, &state, own, PathErrors::new()),
                    );
                }
            }
        }

        let mut nested = PathErrors::new();

        // Primitive stage: every present primitive is evaluated so that
        // independent errors are reported together.
        let is_file = self.adapter.is_file(path);
        let is_dir = self.adapter.is_dir(path);
        if let Some(required) = node.type_
            && !required.is_satisfied(is_file, is_dir)
        {
            own.insert(
                child_loc(loc, "type"),
                ReportedError::message(path, required.violation_message()),
            );
        }
        for (key, field) in [("valid", &node.valid), ("validMeta", &node.valid_meta)] {
            if let Some(schema) = field {
                self.check_schema(key, schema, path, is_file, is_dir, loc, &mut own);
            }
        }
        if !own.is_empty() {
            return (false, self.assemble(node, loc, path, &state, own, nested));
        }

        let mut failed = false;

        // Logical stage.
        if let Some(sub) = &node.not_ {
            let (sub_ok, _) = self.eval_rule(sub, path, &state, &child_loc(loc, "not"));
            if sub_ok {
                own.insert(
                    child_loc(loc, "not"),
                    ReportedError::message(
                        path,
                        "Negated sub-rule satisfied, but should have failed",
                    ),
                );
                failed = true;
            }
        }

        // allOf short-circuits on the first failing arm.
        if !node.all_of.is_empty() {
            let total = node.all_of.len();
            for (index, sub) in node.all_of.iter().enumerate() {
                let sub_loc = format!("{loc}/allOf/{index}");
                let (sub_ok, sub_errors) = self.eval_rule(sub, path, &state, &sub_loc);
                if !sub_ok {
                    own.insert(
                        child_loc(loc, "allOf"),
                        ReportedError::message(
                            path,
                            format!(
                                "All of {total} sub-rules must be satisfied \
                                 (sub-rule {index} failed)"
                            ),
                        ),
                    );
                    nested.extend(sub_errors);
                    failed = true;
                    break;
                }
            }
        }

        // anyOf short-circuits on the first satisfied arm.
        if !node.any_of.is_empty() {
            let total = node.any_of.len();
            let mut collected = PathErrors::new();
            let mut satisfied = false;
            for (index, sub) in node.any_of.iter().enumerate() {
                let sub_loc = format!("{loc}/anyOf/{index}");
                let (sub_ok, sub_errors) = self.eval_rule(sub, path, &state, &sub_loc);
                if sub_ok {
                    satisfied = true;
                    break;
                }
                collected.extend(sub_errors);
            }
            if !satisfied {
                own.insert(
                    child_loc(loc, "anyOf"),
                    ReportedError::message(
                        path,
                        format!(
                            "At least 1 of {total} sub-rules must be satisfied (satisfied: 0)"
                        ),
                    ),
                );
                nested.extend(collected);
                failed = true;
            }
        }

        // oneOf evaluates every arm so the satisfied count is exact.
        if !node.one_of.is_empty() {
            let total = node.one_of.len();
            let mut satisfied = 0usize;
            let mut collected = PathErrors::new();
            for (index, sub) in node.one_of.iter().enumerate() {
                let sub_loc = format!("{loc}/oneOf/{index}");
                let (sub_ok, sub_errors) = self.eval_rule(sub, path, &state, &sub_loc);
                if sub_ok {
                    satisfied += 1;
                } else {
                    collected.extend(sub_errors);
                }
            }
            if satisfied != 1 {
                own.insert(
                    child_loc(loc, "oneOf"),
                    ReportedError::message(
                        path,
                        format!(
                            "Exactly 1 of {total} sub-rules must be satisfied \
                             (satisfied: {satisfied})"
                        ),
                    ),
                );
                nested.extend(collected);
                failed = true;
            }
        }

        // The failure of the condition itself is never reported.
        if let Some(condition) = &node.if_ {
            let (cond_ok, _) = self.eval_rule(condition, path, &state, &child_loc(loc, "if"));
            let (branch, key) = if cond_ok {
                (node.then.as_ref(), "then")
            } else {
                (node.else_.as_ref(), "else")
            };
            if let Some(branch) = branch {
                let (branch_ok, branch_errors) =
                    self.eval_rule(branch, path, &state, &child_loc(loc, key));
                if !branch_ok {
                    nested.extend(branch_errors);
                    failed = true;
                }
            }
        }

        if failed {
            return (false, self.assemble(node, loc, path, &state, own, nested));
        }

        // Successor stage, on the rewritten path if a rewrite is set.
        // Same-level constraints above always saw the original path.
        if let Some(successor) = node.successor() {
            let next_path = match &node.rewrite {
                Some(template) => {
                    let captures = state.rewrite_captures(slice.slice());
                    let rewritten = expand_template(template, &captures)
                        .and_then(|replacement| {
                            slice.splice(&replacement).map_err(|e| e.to_string())
                        });
                    match rewritten {
                        Ok(next_path) => next_path,
                        Err(message) => {
                            own.insert(
                                child_loc(loc, "rewrite"),
                                ReportedError::message(
                                    path,
                                    format!("Cannot rewrite path: {message}"),
                                ),
                            );
                            return (
                                false,
                                self.assemble(node, loc, path, &state, own, nested),
                            );
                        }
                    }
                }
                None => path.to_string(),
            };
            let key = node.successor_key();
            let (succ_ok, succ_errors) =
                self.eval_rule(successor, &next_path, &state, &child_loc(loc, key));
            if !succ_ok {
                nested.extend(succ_errors);
                return (false, self.assemble(node, loc, path, &state, own, nested));
            }
        }

        (true, PathErrors::new())
    }

    /// Apply description/details post-processing to a failing node.
    fn assemble(
        &self,
        node: &Rule,
        loc: &str,
        path: &str,
        state: &MatchState,
        own: PathErrors,
        nested: PathErrors,
    ) -> PathErrors {
        match node.description.as_deref() {
            // A non-empty description replaces everything reported at and
            // beneath this node with the single custom message.
            Some(description) if !description.is_empty() => {
                let message = expand_template(description, state.captures())
                    .unwrap_or_else(|_| description.to_string());
                let mut out = PathErrors::new();
                out.insert(loc_key(loc), ReportedError::message(path, message));
                out
            }
            // An empty description silences this node's own messages.
            Some(_) => {
                if node.details {
                    nested
                } else {
                    PathErrors::new()
                }
            }
            None => {
                let mut out = own;
                if node.details {
                    out.extend(nested);
                }
                out
            }
        }
    }

    fn check_schema(
        &self,
        key: &'static str,
        schema: &SchemaOrRef,
        path: &str,
        is_file: bool,
        is_dir: bool,
        loc: &str,
        own: &mut PathErrors,
    ) {
        let key_loc = child_loc(loc, key);
        if !is_file && !is_dir {
            own.insert(
                key_loc,
                ReportedError::message(path, format!("Path '{path}' does not exist")),
            );
            return;
        }
        let target = if key == "validMeta" {
            self.meta.companion(path, is_dir)
        } else {
            path.to_string()
        };
        let source = match resolve(schema, self.resolver) {
            Ok(source) => source,
            Err(e) => {
                own.insert(
                    key_loc,
                    ReportedError::message(
                        &target,
                        format!("Could not resolve schema reference: {e}"),
                    ),
                );
                return;
            }
        };
        if let SchemaSource::Plugin { name, arg } = &source {
            match self.validator.run_plugin(name, arg, &target, self.adapter) {
                Ok(errors) if errors.is_empty() => {}
                Ok(errors) => {
                    own.insert(key_loc, ReportedError::schema(&target, errors));
                }
                Err(e) => {
                    own.insert(
                        key_loc,
                        ReportedError::message(
                            &target,
                            format!("Could not resolve schema reference: {e}"),
                        ),
                    );
                }
            }
            return;
        }
        let value = match self.adapter.load_json(&target) {
            Ok(value) => value,
            Err(JsonLoadError::Unreadable) => {
                own.insert(
                    key_loc,
                    ReportedError::message(
                        &target,
                        format!("File '{target}' could not be loaded"),
                    ),
                );
                return;
            }
            Err(JsonLoadError::Invalid(reason)) => {
                own.insert(
                    key_loc,
                    ReportedError::message(
                        &target,
                        format!("File '{target}' could not be parsed: {reason}"),
                    ),
                );
                return;
            }
        };
        match self.validator.validate_value(&source, &value) {
            Ok(errors) if errors.is_empty() => {}
            Ok(errors) => {
                own.insert(key_loc, ReportedError::schema(&target, errors));
            }
            Err(e) => {
                own.insert(
                    key_loc,
                    ReportedError::message(&target, format!("Could not process schema: {e}")),
                );
            }
        }
    }

    /// Full-match a pattern against a slice, returning the captures on
    /// success. Group 0 is the whole match.
    fn captures_for(
        &self,
        pattern: &str,
        slice: &str,
    ) -> std::result::Result<Option<Vec<String>>, String> {
        let mut patterns = self.patterns.borrow_mut();
        if !patterns.contains_key(pattern) {
            let compiled = Regex::new(&full_match_pattern(pattern))
                .map_err(|e| format!("Invalid match pattern '{pattern}': {e}"))?;
            patterns.insert(pattern.to_string(), compiled);
        }
        let regex = &patterns[pattern];
        Ok(regex.captures(slice).map(|captures| {
            captures
                .iter()
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect()
        }))
    }
}

#[cfg(test)]
#[path = "eval_tests/mod.rs"]
mod tests;
