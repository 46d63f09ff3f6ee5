use std::fs;
use std::path::Path;

use clap::Parser;

use dirschema::adapter::adapter_for;
use dirschema::cli::{Cli, ReportFormat, check_relative_prefix};
use dirschema::driver::DirValidator;
use dirschema::output::{JsonFormatter, OutputFormatter, TextFormatter};
use dirschema::schema::ResolverConfig;
use dirschema::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS};

fn main() {
    let cli = Cli::parse();
    let exit_code = run(&cli);
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    match run_impl(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_impl(cli: &Cli) -> dirschema::Result<i32> {
    // 1. Validate reference configuration
    check_relative_prefix(&cli.relative_prefix)?;
    let meta = cli.meta_convention()?;
    let resolver = ResolverConfig {
        local_basedir: cli.local_basedir.clone(),
        relative_prefix: cli.relative_prefix.clone(),
        working_dir: None,
    };

    // 2. Load the rule document
    let validator = DirValidator::from_location(&cli.schema, meta, resolver)?;
    if !cli.quiet {
        for warning in validator.warnings() {
            eprintln!("Warning: {warning}");
        }
    }

    // 3. Open the target tree and run validation
    if cli.verbose > 0 {
        eprintln!("Validating '{}' ...", cli.target.display());
    }
    let adapter = adapter_for(&cli.target)?;
    let report = validator.validate(adapter.as_ref())?;
    if cli.verbose > 0 {
        eprintln!(
            "Validation of '{}' {}",
            cli.target.display(),
            if report.is_empty() { "successful" } else { "failed" }
        );
    }
    if report.is_empty() {
        return Ok(EXIT_SUCCESS);
    }

    // 4. Render and write the report
    let output = match cli.format {
        ReportFormat::Text => TextFormatter.format(&report)?,
        ReportFormat::Json => JsonFormatter::new().format(&report)?,
    };
    write_output(cli.output.as_deref(), &output, cli.quiet)?;
    Ok(EXIT_VIOLATIONS)
}

fn write_output(path: Option<&Path>, content: &str, quiet: bool) -> dirschema::Result<()> {
    if let Some(path) = path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}
