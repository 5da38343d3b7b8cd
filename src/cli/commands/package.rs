//! Package command handler

use std::path::PathBuf;
use tracing::info;

use super::{OutputFormat, emit, load_config};
use crate::analysis::PackageAnalyzer;
use crate::cli::error::CliError;
use crate::export::{JsonExporter, MarkdownExporter};

/// Arguments for the package command
#[derive(Debug, Clone)]
pub struct PackageArgs {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Analyze every artifact of a content package archive
pub fn handle_package(args: &PackageArgs) -> Result<(), CliError> {
    if !args.input.exists() {
        return Err(CliError::FileNotFound(args.input.clone()));
    }

    let config = load_config(args.config.as_deref())?;
    let analysis = PackageAnalyzer::with_config(config).analyze_file(&args.input)?;
    info!(
        "Package {} has {} artifacts",
        analysis.archive_name,
        analysis.artifacts.len()
    );

    let result = match args.format {
        OutputFormat::Json => JsonExporter::new().export_package(&analysis)?,
        OutputFormat::Markdown => MarkdownExporter::new().export_package(&analysis)?,
    };
    emit(&result, args.output.as_deref())
}
