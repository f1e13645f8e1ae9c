//! boggle-pregel: Boggle word search on a Pregel-style BSP runtime
//!
//! A board is loaded as a graph of letter cells, a dictionary as an ordered
//! word set, and a vertex program grows candidate paths one cell per
//! superstep, dropping every path no dictionary word starts with.
//!
//! - `pregel`: generic superstep engine, graph arena and message router
//! - `dictionary`: case-normalized word set with prefix queries
//! - `boggle`: board loaders, the path message and the word search program
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use boggle_pregel::{find_words, Board, Dictionary, PregelConfig};
//!
//! let graph = Board::from_rows(&["CAT", "XYZ", "QRS"])?.to_graph();
//! let dictionary = Arc::new(Dictionary::from_words(["cat"]));
//!
//! let result = find_words(graph, dictionary, PregelConfig::default()).await?;
//! for (id, words) in result.into_values() {
//!     println!("{}\t{:?}", id, words);
//! }
//! ```

pub mod error;
pub mod dictionary;
pub mod pregel;
pub mod boggle;

// Re-exports for convenience
pub use error::{BoardError, BoggleError, DictionaryError};
pub use dictionary::{Dictionary, BUILTIN_WORDS};
pub use pregel::{
    BoxedProgram, ComputeContext, ComputeResult, Graph, PregelConfig, PregelError, PregelRuntime,
    RunResult, Termination, VertexId, VertexMessage, VertexProgram,
};
pub use boggle::{
    find_words, load_graph, parse_adjacency, Board, BoardFormat, BoggleComputation, FoundWords,
    PathMessage, PathOutcome,
};
