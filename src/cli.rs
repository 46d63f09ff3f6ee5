use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::{DirschemaError, Result};
use crate::meta::MetaConvention;

/// Output format for validation reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable YAML report
    #[default]
    Text,
    /// JSON report
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "dirschema")]
#[command(
    author,
    version,
    about = "Validate directory-like trees against a DirSchema document",
    long_about = "Validate a directory (or ZIP archive) against a DirSchema rule \
    document. Every path of the tree is checked against the rules; unsatisfied \
    constraints are reported per path and the exit code reflects the outcome."
)]
pub struct Cli {
    /// Path of the JSON/YAML document with the rules to enforce
    pub schema: PathBuf,

    /// Directory path (or suitable archive file) to be checked
    pub target: PathBuf,

    /// Metadata companion convention, as four strings
    #[arg(
        long,
        num_args = 4,
        value_names = ["PATH_PREFIX", "PATH_SUFFIX", "FILE_PREFIX", "FILE_SUFFIX"]
    )]
    pub conv: Option<Vec<String>>,

    /// Base directory for local:// references [default: schema document directory]
    #[arg(long)]
    pub local_basedir: Option<PathBuf>,

    /// Prefix added to relative references (paths without a leading slash
    /// or an access protocol) before resolution
    #[arg(long, default_value = "")]
    pub relative_prefix: String,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress warnings and non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the metadata convention from `--conv`, or the default.
    ///
    /// # Errors
    /// Returns an error if both file parts of the convention are empty.
    pub fn meta_convention(&self) -> Result<MetaConvention> {
        match &self.conv {
            Some(parts) => {
                MetaConvention::new(&parts[0], &parts[1], &parts[2], &parts[3])
            }
            None => Ok(MetaConvention::default()),
        }
    }
}

/// Protocols accepted in `--relative-prefix`.
const VALID_PROTOCOLS: &[&str] = &["http://", "https://", "file://", "cwd://", "local://"];

/// Validate a `--relative-prefix` argument.
///
/// A prefix without a protocol is a plain path prefix and always fine;
/// with a protocol it must be one of the supported schemes or a plugin
/// pseudo-URI.
///
/// # Errors
/// Returns an error for unsupported protocols.
pub fn check_relative_prefix(prefix: &str) -> Result<()> {
    let Some(separator) = prefix.find("://") else {
        return Ok(());
    };
    if separator == 0 {
        return Err(DirschemaError::UnknownProtocol(String::new()));
    }
    if VALID_PROTOCOLS.iter().any(|p| prefix.starts_with(p)) || prefix.starts_with("v#") {
        return Ok(());
    }
    let protocol = &prefix[..separator];
    Err(DirschemaError::UnknownProtocol(protocol.to_string()))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
