//! CLI binary entry point for cpi-inspector

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use cpi_package_inspector::cli::CliError;
#[cfg(feature = "cli")]
use cpi_package_inspector::cli::commands::OutputFormat;
#[cfg(feature = "cli")]
use cpi_package_inspector::cli::commands::config::{handle_config_init, handle_config_show};
#[cfg(feature = "cli")]
use cpi_package_inspector::cli::commands::guidelines::{GuidelinesArgs, handle_guidelines};
#[cfg(feature = "cli")]
use cpi_package_inspector::cli::commands::load_config;
#[cfg(feature = "cli")]
use cpi_package_inspector::cli::commands::package::{PackageArgs, handle_package};
#[cfg(feature = "cli")]
use cpi_package_inspector::cli::commands::parameters::{ParametersArgs, handle_parameters};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cpi-inspector")]
#[command(about = "Parameter and guideline analysis for integration content packages")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./.cpi-inspector.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Analyze every artifact of a content package archive
    Package {
        /// Package archive (.zip)
        input: PathBuf,
        /// Report format
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatArg,
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify parameters of loose artifact files
    Parameters {
        /// Parameter schema file or '-' for stdin
        #[arg(long)]
        schema: String,
        /// Property file with configured values
        #[arg(long)]
        properties: Option<PathBuf>,
        /// Process definition file
        #[arg(long)]
        process: Option<PathBuf>,
        /// Report format
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatArg,
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check one process definition against the guidelines
    Guidelines {
        /// Process definition file or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Report format
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatArg,
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Exit with an error when any rule fails
        #[arg(long)]
        strict: bool,
    },
    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a sample configuration file
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[cfg(feature = "cli")]
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    Markdown,
}

#[cfg(feature = "cli")]
impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<(), CliError> = match cli.command {
        Commands::Package {
            input,
            format,
            output,
        } => handle_package(&PackageArgs {
            input,
            format: format.into(),
            output,
            config: cli.config,
        }),
        Commands::Parameters {
            schema,
            properties,
            process,
            format,
            output,
        } => handle_parameters(&ParametersArgs {
            schema,
            properties,
            process,
            format: format.into(),
            output,
            config: cli.config,
        }),
        Commands::Guidelines {
            input,
            format,
            output,
            strict,
        } => handle_guidelines(&GuidelinesArgs {
            input,
            format: format.into(),
            output,
            strict,
        }),
        Commands::Config { command } => match command {
            ConfigCommands::Init { dir, force } => handle_config_init(&dir, force),
            ConfigCommands::Show => {
                load_config(cli.config.as_deref()).and_then(|config| handle_config_show(&config))
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
