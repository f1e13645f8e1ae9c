//! Boggle vertex program: prefix-pruned path search over a dictionary
//!
//! Each cell seeds its own letter to every neighbor in superstep 0. From then
//! on a cell receiving a path appends its letter and either records a word,
//! forwards the longer path to unvisited neighbors, or drops it.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::message::PathMessage;
use crate::dictionary::Dictionary;
use crate::pregel::{ComputeContext, ComputeResult, PregelError, VertexId, VertexProgram};

/// Words found ending at a cell, in discovery order, duplicates kept
pub type FoundWords = Vec<String>;

/// What happens to one incoming path at the receiving cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// The receiving cell is already on the path
    Revisit,
    /// The extended path spells a dictionary word
    Word(String),
    /// The extended path is a prefix of some word
    Continue(String),
    /// Nothing in the dictionary starts with the extended path
    DeadEnd,
}

impl PathOutcome {
    /// Whether this outcome lets the vertex halt
    pub fn halts(&self) -> bool {
        !matches!(self, PathOutcome::Continue(_))
    }
}

/// The Boggle word search vertex program
///
/// The dictionary is injected at construction and shared read-only by every
/// concurrent computation.
#[derive(Debug, Clone)]
pub struct BoggleComputation {
    dictionary: Arc<Dictionary>,
}

impl BoggleComputation {
    /// Create the program over a loaded dictionary
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    /// The dictionary this program searches
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Classify an incoming path at the cell `id` carrying `letter`
    pub fn classify(&self, id: &VertexId, letter: &str, message: &PathMessage) -> PathOutcome {
        if message.visited(id) {
            return PathOutcome::Revisit;
        }

        let candidate = format!("{}{}", message.partial_word, letter);
        if self.dictionary.contains(&candidate) {
            PathOutcome::Word(candidate)
        } else if self.dictionary.has_prefix_match(&candidate) {
            PathOutcome::Continue(candidate)
        } else {
            PathOutcome::DeadEnd
        }
    }
}

/// Lowercase letter of a cell: the first character of its id
pub fn vertex_letter(id: &VertexId) -> Option<String> {
    id.as_str().chars().next().map(|c| c.to_lowercase().collect())
}

#[async_trait]
impl VertexProgram<FoundWords, PathMessage> for BoggleComputation {
    async fn compute(
        &self,
        ctx: &mut ComputeContext<'_, FoundWords, PathMessage>,
    ) -> Result<ComputeResult<FoundWords>, PregelError> {
        let id = ctx.id().clone();
        let letter = vertex_letter(&id)
            .ok_or_else(|| PregelError::vertex_error(id.clone(), "vertex id is empty, no letter"))?;
        let mut words = ctx.value.clone();

        if ctx.is_first_superstep() {
            // A one-letter word is a complete path of length one
            if self.dictionary.contains(&letter) {
                debug!(vertex = %id, word = %letter, "Word found");
                words.push(letter.clone());
            }
            let neighbors = ctx.neighbors.to_vec();
            ctx.broadcast(neighbors, PathMessage::seed(letter, id));
            return Ok(ComputeResult::halt(words));
        }

        let messages = ctx.messages;
        let neighbors = ctx.neighbors;
        let mut vote_to_halt = true;

        for message in messages {
            if message.has_duplicate_ids() {
                return Err(PregelError::invariant_violation(
                    id,
                    format!(
                        "path for '{}' visits a cell twice: {:?}",
                        message.partial_word, message.visited_path
                    ),
                ));
            }

            match self.classify(&id, &letter, message) {
                PathOutcome::Revisit | PathOutcome::DeadEnd => {}
                PathOutcome::Word(word) => {
                    debug!(vertex = %id, word = %word, "Word found");
                    words.push(word);
                }
                PathOutcome::Continue(candidate) => {
                    vote_to_halt = false;
                    let next = message.extend(candidate, id.clone());
                    for neighbor in neighbors.iter().filter(|n| !message.visited(n)) {
                        ctx.send_message(neighbor, next.clone());
                    }
                }
            }
        }

        Ok(ComputeResult::with_vote(words, vote_to_halt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_MESSAGES: &[PathMessage] = &[];

    fn program(words: &[&str]) -> BoggleComputation {
        BoggleComputation::new(Arc::new(Dictionary::from_words(words.iter().copied())))
    }

    fn ids(list: &[&str]) -> Vec<VertexId> {
        list.iter().map(|s| VertexId::new(*s)).collect()
    }

    #[test]
    fn test_vertex_letter() {
        assert_eq!(vertex_letter(&VertexId::new("C_0_0")).as_deref(), Some("c"));
        assert_eq!(vertex_letter(&VertexId::new("a")).as_deref(), Some("a"));
        assert_eq!(vertex_letter(&VertexId::new("")), None);
    }

    #[test]
    fn test_classify_outcomes() {
        let p = program(&["cat", "cats"]);
        let t = VertexId::new("T");

        let ca = PathMessage::new("ca", ids(&["C", "A"]));
        assert_eq!(p.classify(&t, "t", &ca), PathOutcome::Word("cat".into()));

        let c = PathMessage::new("c", ids(&["C"]));
        let a = VertexId::new("A");
        assert_eq!(p.classify(&a, "a", &c), PathOutcome::Continue("ca".into()));

        let x = VertexId::new("X");
        assert_eq!(p.classify(&x, "x", &c), PathOutcome::DeadEnd);

        let cat = PathMessage::new("ca", ids(&["C", "A", "T"]));
        assert_eq!(p.classify(&t, "t", &cat), PathOutcome::Revisit);
    }

    #[test]
    fn test_outcome_halts() {
        assert!(PathOutcome::Revisit.halts());
        assert!(PathOutcome::DeadEnd.halts());
        assert!(PathOutcome::Word("a".into()).halts());
        assert!(!PathOutcome::Continue("a".into()).halts());
    }

    #[tokio::test]
    async fn test_superstep_zero_seeds_every_neighbor() {
        let p = program(&["cat"]);
        let value = FoundWords::new();
        let neighbors = ids(&["A_0_1", "T_1_0"]);
        let mut ctx = ComputeContext::new(VertexId::new("C_0_0"), &value, &neighbors, NO_MESSAGES, 0);

        let result = p.compute(&mut ctx).await.unwrap();
        assert!(result.votes_to_halt());
        assert!(result.value.is_empty());

        let outbox = ctx.into_outbox();
        assert_eq!(outbox.len(), 2);
        for n in &neighbors {
            assert_eq!(
                outbox[n],
                vec![PathMessage::seed("c", VertexId::new("C_0_0"))]
            );
        }
    }

    #[tokio::test]
    async fn test_superstep_zero_records_single_letter_word() {
        let p = program(&["a"]);
        let value = FoundWords::new();
        let neighbors = ids(&["B"]);
        let mut ctx = ComputeContext::new(VertexId::new("A"), &value, &neighbors, NO_MESSAGES, 0);

        let result = p.compute(&mut ctx).await.unwrap();
        assert_eq!(result.value, vec!["a".to_string()]);
        // Seeds still go out
        assert_eq!(ctx.outgoing_count(), 1);
    }

    #[tokio::test]
    async fn test_prefix_continue_skips_visited_neighbors() {
        let p = program(&["cats"]);
        let value = FoundWords::new();
        let neighbors = ids(&["C", "T", "X"]);
        let messages = vec![PathMessage::new("c", ids(&["C"]))];
        let mut ctx = ComputeContext::new(VertexId::new("A"), &value, &neighbors, &messages, 1);

        let result = p.compute(&mut ctx).await.unwrap();
        assert!(!result.votes_to_halt());

        let outbox = ctx.into_outbox();
        assert!(!outbox.contains_key(&VertexId::new("C")));
        let expected = PathMessage::new("ca", ids(&["C", "A"]));
        assert_eq!(outbox[&VertexId::new("T")], vec![expected.clone()]);
        assert_eq!(outbox[&VertexId::new("X")], vec![expected]);
    }

    #[tokio::test]
    async fn test_word_match_appends_without_dedup_and_halts() {
        let p = program(&["ab"]);
        let value = vec!["ab".to_string()];
        let neighbors = ids(&["A", "A2"]);
        let messages = vec![
            PathMessage::new("a", ids(&["A"])),
            PathMessage::new("a", ids(&["A2"])),
        ];
        let mut ctx = ComputeContext::new(VertexId::new("B"), &value, &neighbors, &messages, 1);

        let result = p.compute(&mut ctx).await.unwrap();
        assert!(result.votes_to_halt());
        assert_eq!(result.value, vec!["ab", "ab", "ab"]);
        assert_eq!(ctx.outgoing_count(), 0);
    }

    #[tokio::test]
    async fn test_dead_end_halts() {
        let p = program(&["ab"]);
        let value = FoundWords::new();
        let neighbors = ids(&["B"]);
        let messages = vec![PathMessage::new("b", ids(&["B"]))];
        let mut ctx = ComputeContext::new(VertexId::new("A"), &value, &neighbors, &messages, 1);

        let result = p.compute(&mut ctx).await.unwrap();
        assert!(result.votes_to_halt());
        assert!(result.value.is_empty());
        assert_eq!(ctx.outgoing_count(), 0);
    }

    #[tokio::test]
    async fn test_no_messages_after_first_superstep_halts() {
        let p = program(&["ab"]);
        let value = FoundWords::new();
        let mut ctx = ComputeContext::new(VertexId::new("A"), &value, &[], NO_MESSAGES, 3);

        let result = p.compute(&mut ctx).await.unwrap();
        assert!(result.votes_to_halt());
    }

    #[tokio::test]
    async fn test_one_continue_keeps_vertex_active() {
        let p = program(&["abc"]);
        let value = FoundWords::new();
        let neighbors = ids(&["A", "C"]);
        let messages = vec![
            PathMessage::new("z", ids(&["Z"])),
            PathMessage::new("a", ids(&["A"])),
        ];
        let mut ctx = ComputeContext::new(VertexId::new("B"), &value, &neighbors, &messages, 1);

        let result = p.compute(&mut ctx).await.unwrap();
        assert!(!result.votes_to_halt());
    }

    #[tokio::test]
    async fn test_duplicate_path_is_invariant_violation() {
        let p = program(&["abab"]);
        let value = FoundWords::new();
        let messages = vec![PathMessage::new("aba", ids(&["A", "B", "A"]))];
        let mut ctx = ComputeContext::new(VertexId::new("B"), &value, &[], &messages, 3);

        let err = p.compute(&mut ctx).await.unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[tokio::test]
    async fn test_empty_id_is_vertex_error() {
        let p = program(&["a"]);
        let value = FoundWords::new();
        let mut ctx = ComputeContext::new(VertexId::new(""), &value, &[], NO_MESSAGES, 0);

        let err = p.compute(&mut ctx).await.unwrap_err();
        assert!(matches!(err, PregelError::VertexError { .. }));
    }
}
