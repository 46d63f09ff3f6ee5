use crate::error::Result;
use crate::eval::Report;

use super::OutputFormatter;

/// Machine-readable JSON rendering of a report.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
