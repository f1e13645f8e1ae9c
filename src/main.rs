//! # Boggle Search
//!
//! Finds every dictionary word that can be traced on a Boggle board by
//! running a Pregel-style vertex program over the board's cell graph.
//!
//! ## Quick Start
//! ```bash
//! cargo run -- board.txt --dictionary words.txt
//! ```

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Configuration management
mod config;

/// Result formatting
mod output;

// =============================================================================
// IMPORTS
// =============================================================================
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use boggle_pregel::{find_words, load_graph, BoardFormat, Dictionary};

use crate::config::Config;
use crate::output::Report;

// =============================================================================
// CLI ARGUMENTS
// =============================================================================
#[derive(Parser, Debug)]
#[command(
    name = "boggle-search",
    version = "0.1.0",
    about = "Find every dictionary word traceable on a Boggle board",
    long_about = r#"
Boggle Search - dictionary words on a letter grid, one superstep per letter.

A word is a path of adjacent cells (including diagonals) that visits no cell
twice. Each word is reported on the cell holding its last letter.

BOARD FORMATS:
  grid        One row per line, e.g. "CATS" or "C A T S"
  adjacency   One vertex per line: "ID NEIGHBOR NEIGHBOR ..."

EXAMPLES:
  # Built-in demonstration dictionary
  boggle-search board.txt

  # Custom dictionary, JSON output
  boggle-search board.txt --dictionary words.txt --json
"#
)]
struct Args {
    /// Board file to search
    #[arg(value_name = "BOARD")]
    board: PathBuf,

    /// Dictionary file, one word per line (overrides BOGGLE_DICTIONARY)
    #[arg(short = 'd', long = "dictionary", value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Board file layout
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<FormatArg>,

    /// Stop after this many supersteps (overrides BOGGLE_MAX_SUPERSTEPS)
    #[arg(long = "max-supersteps")]
    max_supersteps: Option<usize>,

    /// Concurrent vertex computations (overrides BOGGLE_PARALLELISM)
    #[arg(short = 'p', long = "parallelism")]
    parallelism: Option<usize>,

    /// Print results as JSON
    #[arg(long = "json", default_value = "false")]
    json: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long = "verbose", default_value = "false")]
    verbose: bool,
}

/// Board layout as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Grid,
    Adjacency,
}

impl From<FormatArg> for BoardFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Grid => BoardFormat::Grid,
            FormatArg::Adjacency => BoardFormat::Adjacency,
        }
    }
}

impl Args {
    /// Apply command-line overrides on top of the environment config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(path) = &self.dictionary {
            config.dictionary = Some(path.clone());
        }
        if let Some(format) = self.format {
            config.board_format = format.into();
        }
        if let Some(max) = self.max_supersteps {
            config.max_supersteps = max;
        }
        if let Some(parallelism) = self.parallelism {
            config.parallelism = parallelism;
        }
        config
    }
}

// =============================================================================
// MAIN FUNCTION
// =============================================================================
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose)?;

    let config = args.apply(Config::from_env()?);
    config.validate()?;

    info!(
        board = %args.board.display(),
        format = ?config.board_format,
        max_supersteps = config.max_supersteps,
        parallelism = config.parallelism,
        "Configuration loaded"
    );

    let dictionary = match &config.dictionary {
        Some(path) => Dictionary::load(path)
            .await
            .with_context(|| format!("Failed to load dictionary {}", path.display()))?,
        None => {
            info!("No dictionary given, using built-in word list");
            Dictionary::builtin()
        }
    };

    let graph = load_graph(&args.board, config.board_format)
        .await
        .with_context(|| format!("Failed to load board {}", args.board.display()))?;

    info!(vertices = graph.len(), words = dictionary.len(), "Starting search");

    let result = find_words(graph, Arc::new(dictionary), config.pregel_config())
        .await
        .context("Word search failed")?;

    if !result.is_natural() {
        warn!(
            supersteps = result.supersteps,
            "Search stopped at the superstep bound; results may be incomplete"
        );
    }

    let report = Report::from(result);
    info!(
        supersteps = report.supersteps,
        found = report.word_count(),
        "Search completed"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush().context("Failed to flush output")?;

    Ok(())
}

// =============================================================================
// LOGGING INITIALIZATION
// =============================================================================
/// Initialize the tracing subscriber for structured logging.
///
/// Logs go to stderr so that stdout carries only results. `RUST_LOG` is
/// honored unless `--verbose` is given.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}
