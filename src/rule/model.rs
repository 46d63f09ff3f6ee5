//! Typed in-memory representation of a rule document.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Path kind required by a `type` constraint.
///
/// `Missing` means the path must not exist at all, `Any` means any kind
/// is fine as long as the path exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    Any,
    Missing,
    File,
    Dir,
}

impl PathType {
    /// Whether the existence flags of a path satisfy this kind.
    #[must_use]
    pub const fn is_satisfied(self, is_file: bool, is_dir: bool) -> bool {
        match self {
            Self::Any => is_file || is_dir,
            Self::Missing => !is_file && !is_dir,
            Self::File => is_file,
            Self::Dir => is_dir,
        }
    }

    /// Message reported when the kind requirement is violated.
    #[must_use]
    pub const fn violation_message(self) -> &'static str {
        match self {
            Self::Any => "Entity must exist (type: true)",
            Self::Missing => "Entity must not exist (type: false)",
            Self::File => "Entity does not have expected type: 'file'",
            Self::Dir => "Entity does not have expected type: 'dir'",
        }
    }
}

impl<'de> Deserialize<'de> for PathType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Str(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Bool(true) => Ok(Self::Any),
            Raw::Bool(false) => Ok(Self::Missing),
            Raw::Str(s) if s == "file" => Ok(Self::File),
            Raw::Str(s) if s == "dir" => Ok(Self::Dir),
            Raw::Str(s) => Err(D::Error::custom(format!(
                "invalid type '{s}' (expected true, false, \"file\" or \"dir\")"
            ))),
        }
    }
}

impl Serialize for PathType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_bool(true),
            Self::Missing => serializer.serialize_bool(false),
            Self::File => serializer.serialize_str("file"),
            Self::Dir => serializer.serialize_str("dir"),
        }
    }
}

/// An inline JSON Schema or a string reference to one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref(String),
    Inline(Value),
}

/// A rule: either trivially true/false, or a conjunction of keyword
/// constraints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DsRule {
    Bool(bool),
    Node(Box<Rule>),
}

impl From<bool> for DsRule {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Rule> for DsRule {
    fn from(value: Rule) -> Self {
        Self::Node(Box::new(value))
    }
}

/// Conjunction node carrying at most one of each recognized keyword.
///
/// Booleans and sub-rules are wrapped in [`DsRule`]; all fields are
/// optional and a default node is trivially satisfied.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rule {
    /// Full-match regex over the path slice; sets capture groups.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_: Option<String>,

    /// First segment index of the slice window (signed, inherited).
    #[serde(rename = "matchStart", skip_serializing_if = "Option::is_none")]
    pub match_start: Option<i32>,

    /// One-past-last segment index of the slice window; 0 means "to end".
    #[serde(rename = "matchStop", skip_serializing_if = "Option::is_none")]
    pub match_stop: Option<i32>,

    /// Substitution template applied to the slice for the successor rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<String>,

    /// Required path kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<PathType>,

    /// Validate the file at this path against a schema or plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<SchemaOrRef>,

    /// Validate the metadata companion against a schema or plugin.
    #[serde(rename = "validMeta", skip_serializing_if = "Option::is_none")]
    pub valid_meta: Option<SchemaOrRef>,

    /// Negation.
    #[serde(rename = "not", skip_serializing_if = "Option::is_none")]
    pub not_: Option<DsRule>,

    /// Conjunction, evaluated in order.
    #[serde(rename = "allOf", skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<DsRule>,

    /// Disjunction, evaluated in order.
    #[serde(rename = "anyOf", skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<DsRule>,

    /// Exactly-one-of, evaluated in order.
    #[serde(rename = "oneOf", skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<DsRule>,

    /// Condition: on success proceed with `then`, otherwise with `else`.
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub if_: Option<DsRule>,

    /// Branch taken when `if` holds; without `if`, legacy successor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub then: Option<DsRule>,

    /// Branch taken when `if` does not hold.
    #[serde(rename = "else", skip_serializing_if = "Option::is_none")]
    pub else_: Option<DsRule>,

    /// Successor rule, evaluated on the (possibly rewritten) path once
    /// all same-level constraints are satisfied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<DsRule>,

    /// Custom message shown instead of the generated ones when this rule
    /// fails. Supports numeric backreferences into the active captures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Keep errors from sub-rules; set to false to prune them.
    #[serde(skip_serializing_if = "is_true")]
    pub details: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires the reference
const fn is_true(value: &bool) -> bool {
    *value
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            match_: None,
            match_start: None,
            match_stop: None,
            rewrite: None,
            type_: None,
            valid: None,
            valid_meta: None,
            not_: None,
            all_of: Vec::new(),
            any_of: Vec::new(),
            one_of: Vec::new(),
            if_: None,
            then: None,
            else_: None,
            next: None,
            description: None,
            details: true,
        }
    }
}

impl Rule {
    /// The successor sub-rule: `next`, or legacy `then` when no `if` is
    /// present.
    #[must_use]
    pub fn successor(&self) -> Option<&DsRule> {
        self.next
            .as_ref()
            .or_else(|| if self.if_.is_none() { self.then.as_ref() } else { None })
    }

    /// Key under which successor failures are reported.
    #[must_use]
    pub fn successor_key(&self) -> &'static str {
        if self.next.is_some() { "next" } else { "then" }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
