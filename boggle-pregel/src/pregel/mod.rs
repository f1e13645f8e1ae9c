//! Pregel Runtime for vertex-centric graph computation
//!
//! This module implements a bulk-synchronous parallel (BSP) runtime in the
//! style of Pregel. Key concepts:
//!
//! - **Vertex**: Graph cell with an id, a value and neighbor ids
//! - **Vertex program**: The compute function run for each vertex
//! - **Superstep**: Synchronized execution phase
//! - **Message**: Communication between vertices, delivered one superstep later
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PregelRuntime                             │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐                     │
//! │  │Superstep│→ │Superstep│→ │Superstep│→ ...                │
//! │  │    0    │  │    1    │  │    2    │                     │
//! │  └─────────┘  └─────────┘  └─────────┘                     │
//! │       │            │            │                           │
//! │       ▼            ▼            ▼                           │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │ Per-Superstep: Deliver → Compute → Apply → Barrier  │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Halting
//!
//! Every vertex is active in superstep 0. A vertex that votes to halt is
//! skipped until a message arrives for it. The run ends when no vertex is
//! active and no message is pending, or when `max_supersteps` is reached.

pub mod vertex;
pub mod message;
pub mod config;
pub mod error;
pub mod graph;
pub mod router;
pub mod runtime;

// Re-exports
pub use vertex::{BoxedProgram, ComputeContext, ComputeResult, VertexId, VertexProgram, VertexState};
pub use message::VertexMessage;
pub use config::PregelConfig;
pub use error::PregelError;
pub use graph::{Graph, VertexEntry};
pub use router::{MessageRouter, RouterHandle};
pub use runtime::{PregelRuntime, RunResult, Termination};
