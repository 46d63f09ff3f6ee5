use crate::error::Result;
use crate::eval::Report;

use super::OutputFormatter;

/// Human-readable YAML rendering of a report.
///
/// Paths map to rule locations, which map to the reported path and
/// message. An empty report renders as the empty string.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        if report.is_empty() {
            return Ok(String::new());
        }
        Ok(serde_yaml::to_string(report)?)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
