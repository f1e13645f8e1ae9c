//! # Configuration Module
//!
//! Loads search settings from the environment (and a `.env` file if present).
//! Command-line flags are applied on top of this in `main.rs`, so the
//! priority is: defaults, then environment, then flags.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use boggle_pregel::{BoardFormat, PregelConfig};

// =============================================================================
// CONFIGURATION STRUCT
// =============================================================================
/// Settings for one word search run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Dictionary file; the built-in word list is used when unset
    pub dictionary: Option<PathBuf>,

    /// Upper bound on supersteps before the run is stopped
    pub max_supersteps: usize,

    /// Maximum number of vertex computations running at once
    pub parallelism: usize,

    /// How the board file is laid out
    pub board_format: BoardFormat,
}

// =============================================================================
// DEFAULT IMPLEMENTATION
// =============================================================================
impl Default for Config {
    fn default() -> Self {
        let engine = PregelConfig::default();
        Self {
            dictionary: None,
            max_supersteps: engine.max_supersteps,
            parallelism: engine.parallelism,
            board_format: BoardFormat::Grid,
        }
    }
}

// =============================================================================
// CONFIGURATION LOADING
// =============================================================================
impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable                | Field            |
    /// |-------------------------|------------------|
    /// | `BOGGLE_DICTIONARY`     | `dictionary`     |
    /// | `BOGGLE_MAX_SUPERSTEPS` | `max_supersteps` |
    /// | `BOGGLE_PARALLELISM`    | `parallelism`    |
    /// | `BOGGLE_BOARD_FORMAT`   | `board_format`   |
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (silently ignore if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup.
    ///
    /// # Rust Concept: Closures as Parameters
    ///
    /// Taking `impl Fn` lets tests pass a map lookup instead of mutating the
    /// process environment, which is shared by every test thread.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(val) = lookup("BOGGLE_DICTIONARY") {
            config.dictionary = Some(PathBuf::from(val));
        }

        if let Some(val) = lookup("BOGGLE_MAX_SUPERSTEPS") {
            config.max_supersteps = val
                .parse()
                .context("BOGGLE_MAX_SUPERSTEPS must be a positive integer")?;
        }

        if let Some(val) = lookup("BOGGLE_PARALLELISM") {
            config.parallelism = val
                .parse()
                .context("BOGGLE_PARALLELISM must be a positive integer")?;
        }

        if let Some(val) = lookup("BOGGLE_BOARD_FORMAT") {
            config.board_format = parse_board_format(&val)?;
        }

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_supersteps == 0 {
            anyhow::bail!("max_supersteps must be at least 1");
        }

        if self.parallelism == 0 {
            anyhow::bail!("parallelism must be at least 1");
        }

        if let Some(path) = &self.dictionary {
            if path.as_os_str().is_empty() {
                anyhow::bail!("dictionary path cannot be empty");
            }
        }

        Ok(())
    }

    /// Engine settings for this run
    pub fn pregel_config(&self) -> PregelConfig {
        PregelConfig::default()
            .with_max_supersteps(self.max_supersteps)
            .with_parallelism(self.parallelism)
    }
}

fn parse_board_format(value: &str) -> Result<BoardFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "grid" => Ok(BoardFormat::Grid),
        "adjacency" => Ok(BoardFormat::Adjacency),
        other => anyhow::bail!("BOGGLE_BOARD_FORMAT must be 'grid' or 'adjacency', got: {}", other),
    }
}
