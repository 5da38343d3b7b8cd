//! Parameters command handler

use std::path::PathBuf;

use super::{OutputFormat, emit, load_config, load_input, load_optional};
use crate::analysis::ParameterAnalyzer;
use crate::cli::error::CliError;
use crate::export::{JsonExporter, MarkdownExporter};

/// Arguments for the parameters command
#[derive(Debug, Clone)]
pub struct ParametersArgs {
    /// Schema file path or '-' for stdin
    pub schema: String,
    pub properties: Option<PathBuf>,
    pub process: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Classify the parameters of loose artifact files
pub fn handle_parameters(args: &ParametersArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let schema = load_input(&args.schema)?;
    let properties = load_optional(args.properties.as_deref())?;
    let process = load_optional(args.process.as_deref())?;

    let analysis = ParameterAnalyzer::with_config(&config.parameters).try_analyze(
        Some(&schema),
        properties.as_deref(),
        process.as_deref(),
    )?;

    let result = match args.format {
        OutputFormat::Json => JsonExporter::new().export_parameters(&analysis)?,
        OutputFormat::Markdown => MarkdownExporter::new().export_parameters(&analysis)?,
    };
    emit(&result, args.output.as_deref())
}
