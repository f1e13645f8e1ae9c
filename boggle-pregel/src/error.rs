// src/error.rs
//! Error types for loading dictionaries and boards

use std::path::PathBuf;
use thiserror::Error;

use crate::pregel::PregelError;

/// Dictionary load error
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read dictionary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dictionary {path} contains no words")]
    Empty { path: PathBuf },
}

/// Board load error
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Failed to read board {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Board contains no cells")]
    Empty,

    #[error("Board row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate vertex id on line {line}: {id}")]
    DuplicateId { line: usize, id: String },

    #[error("Invalid board graph: {0}")]
    Graph(#[from] PregelError),
}

/// Top-level error for a Boggle search
#[derive(Error, Debug)]
pub enum BoggleError {
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] PregelError),
}
