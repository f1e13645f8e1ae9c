//! Message bound for Pregel vertex communication
//!
//! Vertices communicate by sending messages to each other. A message sent in
//! superstep S is delivered at the start of superstep S + 1 and dropped after
//! it has been consumed.

/// Trait bound for vertex messages
pub trait VertexMessage: Clone + Send + Sync + 'static {}

impl VertexMessage for () {}

impl VertexMessage for String {}
