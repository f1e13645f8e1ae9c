//! Error types for Pregel runtime
//!
//! Every variant aborts the run. Vertex programs are pure functions of their
//! inputs, so a failed computation would fail the same way on a retry.

use super::vertex::VertexId;
use thiserror::Error;

/// Errors that can occur during Pregel runtime execution
#[derive(Debug, Error)]
pub enum PregelError {
    /// A core invariant of the engine or router was broken
    #[error("Invariant violation in {vertex_id}: {message}")]
    InvariantViolation { vertex_id: VertexId, message: String },

    /// Error during vertex computation
    #[error("Vertex error in {vertex_id}: {message}")]
    VertexError {
        vertex_id: VertexId,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An edge references a vertex that is not part of the graph
    #[error("Vertex {vertex_id} lists unknown neighbor {neighbor}")]
    UnknownVertex { vertex_id: VertexId, neighbor: VertexId },

    /// Messages were addressed to a vertex that does not exist
    #[error("Message delivery failed: {count} message(s) addressed to unknown vertex {target}")]
    MessageDelivery { target: VertexId, count: usize },

    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PregelError {
    /// Create an invariant violation error
    pub fn invariant_violation(vertex_id: impl Into<VertexId>, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            vertex_id: vertex_id.into(),
            message: message.into(),
        }
    }

    /// Create a vertex error with a message
    pub fn vertex_error(vertex_id: impl Into<VertexId>, message: impl Into<String>) -> Self {
        Self::VertexError {
            vertex_id: vertex_id.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a vertex error with source
    pub fn vertex_error_with_source(
        vertex_id: impl Into<VertexId>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::VertexError {
            vertex_id: vertex_id.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a config error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Check if the error is recoverable
    ///
    /// Always false: the runtime has no retry path.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Check if the error signals a broken engine invariant
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, PregelError::InvariantViolation { .. })
    }
}
