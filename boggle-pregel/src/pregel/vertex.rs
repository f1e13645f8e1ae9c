//! Vertex abstractions for Pregel runtime
//!
//! A vertex program is the per-vertex compute function. The same program runs
//! independently for every vertex in each superstep; all state it needs is
//! handed in through [`ComputeContext`] and all effects leave through
//! [`ComputeResult`] and the context outbox.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::error::PregelError;
use super::message::VertexMessage;

/// Unique identifier for a vertex in the graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub String);

impl VertexId {
    /// Create a new VertexId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&VertexId> for VertexId {
    fn from(id: &VertexId) -> Self {
        id.clone()
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vertex execution state (Pregel's "vote to halt" mechanism)
///
/// - `Active`: Vertex will compute in the next superstep
/// - `Halted`: Vertex has voted to halt (will reactivate on message receipt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VertexState {
    /// Vertex is active and will compute in next superstep
    #[default]
    Active,
    /// Vertex has voted to halt (will reactivate on message receipt)
    Halted,
}

impl VertexState {
    /// Check if the vertex is active
    pub fn is_active(&self) -> bool {
        matches!(self, VertexState::Active)
    }

    /// Check if the vertex is halted (can be reactivated)
    pub fn is_halted(&self) -> bool {
        matches!(self, VertexState::Halted)
    }
}

/// Context provided to a vertex during computation
///
/// Provides access to:
/// - The vertex id, its current value and its neighbor ids
/// - Incoming messages addressed to this vertex this superstep
/// - Outbox for sending messages (delivered next superstep)
/// - Current superstep number
pub struct ComputeContext<'a, V, M: VertexMessage> {
    /// Messages received from other vertices
    pub messages: &'a [M],
    /// Current superstep number (0-indexed)
    pub superstep: usize,
    /// Current value of this vertex
    pub value: &'a V,
    /// Ids of adjacent vertices
    pub neighbors: &'a [VertexId],
    /// Outgoing messages (target vertex -> messages)
    outbox: HashMap<VertexId, Vec<M>>,
    /// Current vertex ID
    vertex_id: VertexId,
}

impl<'a, V, M: VertexMessage> ComputeContext<'a, V, M> {
    /// Create a new compute context
    pub fn new(
        vertex_id: VertexId,
        value: &'a V,
        neighbors: &'a [VertexId],
        messages: &'a [M],
        superstep: usize,
    ) -> Self {
        Self {
            messages,
            superstep,
            value,
            neighbors,
            outbox: HashMap::new(),
            vertex_id,
        }
    }

    /// Get the current vertex ID
    pub fn id(&self) -> &VertexId {
        &self.vertex_id
    }

    /// Send a message to another vertex
    ///
    /// Messages will be delivered at the start of the next superstep.
    pub fn send_message(&mut self, target: impl Into<VertexId>, message: M) {
        let target = target.into();
        self.outbox.entry(target).or_default().push(message);
    }

    /// Send a message to multiple targets
    pub fn broadcast(&mut self, targets: impl IntoIterator<Item = impl Into<VertexId>>, message: M) {
        for target in targets {
            self.send_message(target.into(), message.clone());
        }
    }

    /// Check if this is the first superstep
    pub fn is_first_superstep(&self) -> bool {
        self.superstep == 0
    }

    /// Check if any messages were received
    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Get the count of received messages
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Count of messages queued in the outbox so far
    pub fn outgoing_count(&self) -> usize {
        self.outbox.values().map(Vec::len).sum()
    }

    /// Consume the context and return the outbox
    pub fn into_outbox(self) -> HashMap<VertexId, Vec<M>> {
        self.outbox
    }
}

/// The per-vertex compute function driven by the runtime
///
/// # Type Parameters
///
/// - `V`: The per-vertex value type
/// - `M`: The message type used for vertex communication
///
/// # Example
///
/// ```ignore
/// struct CountMessages;
///
/// #[async_trait]
/// impl VertexProgram<usize, Ping> for CountMessages {
///     async fn compute(
///         &self,
///         ctx: &mut ComputeContext<'_, usize, Ping>,
///     ) -> Result<ComputeResult<usize>, PregelError> {
///         if ctx.is_first_superstep() {
///             let neighbors = ctx.neighbors.to_vec();
///             ctx.broadcast(neighbors, Ping);
///         }
///         Ok(ComputeResult::halt(ctx.value + ctx.message_count()))
///     }
/// }
/// ```
#[async_trait]
pub trait VertexProgram<V, M>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
    M: VertexMessage,
{
    /// Execute the vertex's computation
    ///
    /// Called once per superstep for every vertex that is active or has
    /// incoming messages. Returns the new vertex value and the halt vote.
    async fn compute(
        &self,
        ctx: &mut ComputeContext<'_, V, M>,
    ) -> Result<ComputeResult<V>, PregelError>;
}

/// Result of a vertex computation
#[derive(Debug, Clone)]
pub struct ComputeResult<V> {
    /// New vertex value (possibly unchanged)
    pub value: V,
    /// New vertex state
    pub state: VertexState,
}

impl<V> ComputeResult<V> {
    /// Create a result that keeps the vertex active
    pub fn active(value: V) -> Self {
        Self {
            value,
            state: VertexState::Active,
        }
    }

    /// Create a result that votes to halt
    pub fn halt(value: V) -> Self {
        Self {
            value,
            state: VertexState::Halted,
        }
    }

    /// Create a result from an explicit halt vote
    pub fn with_vote(value: V, vote_to_halt: bool) -> Self {
        if vote_to_halt {
            Self::halt(value)
        } else {
            Self::active(value)
        }
    }

    /// Whether the vertex voted to halt
    pub fn votes_to_halt(&self) -> bool {
        self.state.is_halted()
    }
}

/// Shared vertex program for dynamic dispatch
pub type BoxedProgram<V, M> = Arc<dyn VertexProgram<V, M>>;
