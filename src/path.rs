//! Path canonicalization and the segment window used by match rules.
//!
//! All engine-facing paths are `/`-delimited strings with no leading or
//! trailing slash; the empty string denotes the root. [`PathSlice`] cuts a
//! path into a prefix, a windowed slice, and a suffix along signed segment
//! indices so that regex matching and rewriting operate on the slice only.

use crate::error::{DirschemaError, Result};

/// Canonicalize a path string: collapse slashes, strip leading/trailing
/// slashes, reject `.` and `..` segments.
///
/// The result is idempotent under repeated normalization; the root
/// normalizes to the empty string.
///
/// # Errors
/// Returns an error if the path contains a `.` or `..` segment.
pub fn normalize(input: &str) -> Result<String> {
    let mut segments = Vec::new();
    for segment in input.split('/') {
        match segment {
            "" => {}
            "." | ".." => {
                return Err(DirschemaError::InvalidPath {
                    path: input.to_string(),
                    reason: format!("'{segment}' segment not allowed"),
                });
            }
            other => segments.push(other),
        }
    }
    Ok(segments.join("/"))
}

/// A path cut into `prefix / slice / suffix` along segment indices.
///
/// Invariant: `PathSlice::cut(p, a, b).reassemble() == p` for every path
/// and window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSlice {
    prefix: String,
    slice: String,
    suffix: String,
}

impl PathSlice {
    /// Cut `path` along the `[start, stop)` segment window.
    ///
    /// Negative indices count from the end; `stop == 0` means "to the
    /// end". Indices clamp to the segment range and an inverted window
    /// yields an empty slice.
    #[must_use]
    pub fn cut(path: &str, start: i32, stop: i32) -> Self {
        let segments: Vec<&str> = path.split('/').collect();
        let len = segments.len();
        let a = resolve_index(start, len);
        let b = if stop == 0 { len } else { resolve_index(stop, len) };
        let b = b.max(a);
        Self {
            prefix: segments[..a].join("/"),
            slice: segments[a..b].join("/"),
            suffix: segments[b..].join("/"),
        }
    }

    /// The windowed part of the path.
    #[must_use]
    pub fn slice(&self) -> &str {
        &self.slice
    }

    /// Recover the complete path.
    #[must_use]
    pub fn reassemble(&self) -> String {
        let parts: Vec<&str> = [&self.prefix, &self.slice, &self.suffix]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        parts.join("/")
    }

    /// Replace the windowed part, keeping prefix and suffix, and return
    /// the normalized full path.
    ///
    /// # Errors
    /// Returns an error if the replacement introduces `.` or `..` segments.
    pub fn splice(&self, replacement: &str) -> Result<String> {
        let spliced = Self {
            prefix: self.prefix.clone(),
            slice: replacement.to_string(),
            suffix: self.suffix.clone(),
        };
        normalize(&spliced.reassemble())
    }
}

/// Resolve a signed segment index against a segment count, clamping to
/// the valid range.
fn resolve_index(index: i32, len: usize) -> usize {
    let len = i64::from(u32::try_from(len).unwrap_or(u32::MAX));
    let index = i64::from(index);
    let resolved = if index < 0 { len + index } else { index };
    usize::try_from(resolved.clamp(0, len)).unwrap_or(0)
}

/// Anchor a user pattern so that it must match a whole slice.
#[must_use]
pub(crate) fn full_match_pattern(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

/// Expand numeric backreferences (`\0`, `\1`, ...) in a substitution
/// template against captured substrings. `\\` produces a literal
/// backslash.
///
/// # Errors
/// Returns a message if the template references a missing capture group
/// or ends in a dangling backslash.
pub fn expand_template(
    template: &str,
    captures: &[String],
) -> std::result::Result<String, String> {
    let mut out = String::new();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            Some(d) if d.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&d) = chars.peek()
                    && d.is_ascii_digit()
                {
                    digits.push(d);
                    chars.next();
                }
                let index: usize = digits
                    .parse()
                    .map_err(|_| format!("invalid group reference '\\{digits}'"))?;
                let capture = captures
                    .get(index)
                    .ok_or_else(|| format!("no capture group {index}"))?;
                out.push_str(capture);
            }
            _ => return Err("dangling backslash in substitution template".to_string()),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
