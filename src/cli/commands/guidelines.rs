//! Guidelines command handler

use std::path::PathBuf;

use super::{OutputFormat, emit, load_input};
use crate::cli::error::CliError;
use crate::export::{JsonExporter, MarkdownExporter};
use crate::import::BpmnImporter;
use crate::validation::GuidelineChecker;

/// Arguments for the guidelines command
#[derive(Debug, Clone)]
pub struct GuidelinesArgs {
    /// Process definition path or '-' for stdin
    pub input: String,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// Fail when any rule fails
    pub strict: bool,
}

/// Run the guideline rules against one process definition
pub fn handle_guidelines(args: &GuidelinesArgs) -> Result<(), CliError> {
    let content = load_input(&args.input)?;
    let graph = BpmnImporter::new().import(&content)?;
    let report = GuidelineChecker::new().evaluate(&graph);

    let result = match args.format {
        OutputFormat::Json => JsonExporter::new().export_guidelines(&report)?,
        OutputFormat::Markdown => MarkdownExporter::new().export_guidelines(&report)?,
    };
    emit(&result, args.output.as_deref())?;

    if args.strict && report.summary.fail > 0 {
        return Err(CliError::GuidelineFailures(report.summary.fail));
    }
    Ok(())
}
