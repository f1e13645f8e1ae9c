//! # Output Module
//!
//! Writes the final per-cell word lists, either as `id<TAB>[w1, w2]` lines
//! or as one JSON document.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use boggle_pregel::{FoundWords, RunResult, Termination};

/// Serializable summary of a finished run
#[derive(Debug, Serialize)]
pub struct Report {
    pub run_id: String,
    pub supersteps: usize,
    pub termination: Termination,
    /// Vertex id to words ending there, ordered by id
    pub vertices: BTreeMap<String, FoundWords>,
}

impl From<RunResult<FoundWords>> for Report {
    fn from(result: RunResult<FoundWords>) -> Self {
        Self {
            run_id: result.run_id,
            supersteps: result.supersteps,
            termination: result.termination,
            vertices: result
                .graph
                .into_values()
                .into_iter()
                .map(|(id, words)| (id.0, words))
                .collect(),
        }
    }
}

impl Report {
    /// Total number of words found across all cells
    pub fn word_count(&self) -> usize {
        self.vertices.values().map(Vec::len).sum()
    }

    /// Write one `id<TAB>[words]` line per vertex
    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        for (id, words) in &self.vertices {
            writeln!(out, "{}\t[{}]", id, words.join(", ")).context("Failed to write result line")?;
        }
        Ok(())
    }

    /// Write the whole report as pretty-printed JSON
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self).context("Failed to serialize report")?;
        writeln!(out).context("Failed to write report")?;
        Ok(())
    }
}
