//! Boggle word search on the Pregel runtime
//!
//! Every board cell is a vertex whose value collects the dictionary words
//! whose final letter lands on that cell.

pub mod board;
pub mod computation;
pub mod message;

pub use board::{load_graph, parse_adjacency, Board, BoardFormat};
pub use computation::{vertex_letter, BoggleComputation, FoundWords, PathOutcome};
pub use message::PathMessage;

use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::pregel::{Graph, PregelConfig, PregelError, PregelRuntime, RunResult};

/// Run a word search over `graph` and return the final per-cell values
pub async fn find_words(
    graph: Graph<FoundWords>,
    dictionary: Arc<Dictionary>,
    config: PregelConfig,
) -> Result<RunResult<FoundWords>, PregelError> {
    let mut runtime = PregelRuntime::<FoundWords, PathMessage>::with_config(config);
    runtime
        .run(graph, Arc::new(BoggleComputation::new(dictionary)))
        .await
}
