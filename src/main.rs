//! tftools CLI entrypoint.
//!
//! This is the main entrypoint for the tftools command-line tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tftools::cli::{Cli, Commands, OutputFormatter};
use tftools::config::{ConfigParser, Settings};
use tftools::error::Result;
use tftools::plan::{PlanParser, STDIN_LOCATION};
use tftools::PlanSummarizer;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // .env may set TFTOOLS_CONFIG, which clap reads while parsing
    let dotenv = ConfigParser::new().load_dotenv();
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match dotenv.and_then(|()| run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Logs go to stderr so the report on stdout stays clean for piping.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point.
fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);
    let overrides = cli.command.overrides();

    let settings = ConfigParser::new()
        .load(cli.config.as_deref())?
        .with_overrides(overrides);
    debug!("Effective settings: {settings:?}");

    match cli.command {
        Commands::Summarize { paths, .. } => cmd_summarize(&paths, &settings, &formatter),
    }
}

/// Summarize one or more plans.
fn cmd_summarize(paths: &[PathBuf], settings: &Settings, formatter: &OutputFormatter) -> Result<()> {
    let summarizer = PlanSummarizer::new(settings.show_tags);
    let parser = PlanParser::new();
    let mut stdout = std::io::stdout().lock();

    if paths.is_empty() {
        let plan = parser.parse_reader(std::io::stdin().lock(), STDIN_LOCATION)?;
        let results = summarizer.summarize(&plan);
        write!(stdout, "{}", formatter.format_summary(&results, settings))?;
        return Ok(());
    }

    let multiple = paths.len() > 1;
    for path in paths {
        let plan = if is_stdin(path) {
            parser.parse_reader(std::io::stdin().lock(), STDIN_LOCATION)?
        } else {
            parser.load_file(path)?
        };

        // Each plan gets its own result set
        let results = summarizer.summarize(&plan);

        if multiple {
            writeln!(stdout, "==> {} <==", path.display())?;
        }
        write!(stdout, "{}", formatter.format_summary(&results, settings))?;
        if multiple {
            writeln!(stdout)?;
        }
    }

    Ok(())
}

/// Returns true if the path argument means standard input.
fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
