use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bitree::{AnalysisError, Analyzer, ReportConfig};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bitree",
    version,
    about = "Build a byte-frequency bit trie from a genome file and report its statistics"
)]
struct Cli {
    /// Genome file to read ('-' for stdin). Lines starting with '>' and 'N' bases are skipped.
    input: PathBuf,
    /// Report file to write ('-' for stdout).
    output: PathBuf,
    /// Skip the deep copy and move sections.
    #[arg(long)]
    no_demo: bool,
    /// Print statistics only, without one line per node.
    #[arg(long)]
    no_nodes: bool,
    /// Omit node addresses so reports are identical across runs.
    #[arg(long)]
    hide_addresses: bool,
    /// Add standard deviation, leaf/node counts and a structural fingerprint.
    #[arg(long)]
    summary: bool,
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            show_nodes: !self.no_nodes,
            show_addresses: !self.hide_addresses,
            ownership_demo: !self.no_demo,
            show_summary: self.summary,
        }
    }
}

/// Input missing or unreadable
const EXIT_UNREADABLE_INPUT: u8 = 3;
/// Input has no bytes
const EXIT_EMPTY_INPUT: u8 = 4;
/// Any other failure
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AnalysisError>() {
        Some(AnalysisError::Read(_)) => EXIT_UNREADABLE_INPUT,
        Some(AnalysisError::EmptyInput) => EXIT_EMPTY_INPUT,
        Some(AnalysisError::Write(_)) | None => EXIT_FAILURE,
    }
}

fn run(cli: &Cli) -> Result<()> {
    let analyzer = Analyzer::new(cli.report_config());
    debug!(config = ?analyzer.config(), "report configuration");
    let reader = open_input(&cli.input)?;
    let (trie, filter) = analyzer
        .build(reader)
        .with_context(|| format!("failed to analyse {}", cli.input.display()))?;

    // Output is only created once the input proved usable
    let mut writer = open_output(&cli.output)?;
    let outcome = analyzer
        .report(trie, filter, &mut writer)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        leaves = outcome.statistics.leaves,
        height = outcome.statistics.height,
        mean = outcome.statistics.mean,
        variance = outcome.statistics.variance,
        "report written to {}",
        cli.output.display()
    );
    if let Some(check) = outcome.ownership {
        if !check.holds() {
            warn!(?check, "copy/move identity check failed");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_stdio(path) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .map_err(AnalysisError::Read)
        .with_context(|| format!("input file {} is not readable", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if is_stdio(path) {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
