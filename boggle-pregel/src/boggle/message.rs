//! Candidate-path message exchanged between board cells

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::pregel::{VertexId, VertexMessage};

/// A partial word and the cells it was traced through, in order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathMessage {
    /// Lowercase letters collected along the path
    pub partial_word: String,
    /// Vertex ids of the path, first cell first
    pub visited_path: Vec<VertexId>,
}

impl VertexMessage for PathMessage {}

impl PathMessage {
    /// Create a message
    pub fn new(partial_word: impl Into<String>, visited_path: Vec<VertexId>) -> Self {
        Self {
            partial_word: partial_word.into(),
            visited_path,
        }
    }

    /// The one-cell path a vertex sends in superstep 0
    pub fn seed(letter: impl Into<String>, origin: VertexId) -> Self {
        Self::new(letter, vec![origin])
    }

    /// Continue the path through `via` with the already-extended word
    pub fn extend(&self, candidate: impl Into<String>, via: VertexId) -> Self {
        let mut visited_path = Vec::with_capacity(self.visited_path.len() + 1);
        visited_path.extend(self.visited_path.iter().cloned());
        visited_path.push(via);
        Self::new(candidate, visited_path)
    }

    /// Whether `id` is already on the path
    pub fn visited(&self, id: &VertexId) -> bool {
        self.visited_path.contains(id)
    }

    /// Whether any id appears twice on the path
    pub fn has_duplicate_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.visited_path.len());
        !self.visited_path.iter().all(|id| seen.insert(id))
    }

    /// Last cell on the path
    pub fn last(&self) -> Option<&VertexId> {
        self.visited_path.last()
    }
}
