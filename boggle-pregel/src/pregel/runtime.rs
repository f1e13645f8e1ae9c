//! Pregel Runtime - Core execution engine for vertex programs
//!
//! The runtime executes a vertex program over a graph through synchronized
//! supersteps. Each superstep follows the sequence:
//! Deliver → Compute → Apply → Barrier.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::config::PregelConfig;
use super::error::PregelError;
use super::graph::Graph;
use super::message::VertexMessage;
use super::router::{MessageRouter, RouterHandle};
use super::vertex::{BoxedProgram, ComputeContext, ComputeResult, VertexId};

/// How a run came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Termination {
    /// No vertex active and no message pending
    Natural,
    /// The superstep bound was reached first
    Forced,
}

/// Result of a run
#[derive(Debug, Clone)]
pub struct RunResult<V> {
    /// Final graph, values as left by the last completed superstep
    pub graph: Graph<V>,
    /// Number of supersteps executed
    pub supersteps: usize,
    /// Natural or forced termination
    pub termination: Termination,
    /// Identifier attached to this run's log events
    pub run_id: String,
}

impl<V> RunResult<V> {
    /// Whether the run halted on its own
    pub fn is_natural(&self) -> bool {
        self.termination == Termination::Natural
    }

    /// Consume the result into the id -> value mapping
    pub fn into_values(self) -> std::collections::BTreeMap<VertexId, V> {
        self.graph.into_values()
    }
}

type TaskOutput<V> = (VertexId, Result<ComputeResult<V>, PregelError>);

/// Pregel Runtime for executing vertex programs
///
/// Owns the message router and the superstep counter for the duration of a
/// run; the graph is moved in and handed back in the [`RunResult`].
pub struct PregelRuntime<V, M>
where
    V: Clone + Send + Sync + 'static,
    M: VertexMessage,
{
    /// Configuration for the runtime
    config: PregelConfig,
    /// Message queues between supersteps
    router: MessageRouter<M>,
    /// Unique identifier for the current run (used in log events)
    run_id: String,
    /// Value type marker
    _value_marker: std::marker::PhantomData<V>,
}

impl<V, M> PregelRuntime<V, M>
where
    V: Clone + Send + Sync + 'static,
    M: VertexMessage,
{
    /// Create a new runtime with default configuration
    pub fn new() -> Self {
        Self::with_config(PregelConfig::default())
    }

    /// Create a new runtime with custom configuration
    pub fn with_config(config: PregelConfig) -> Self {
        Self {
            config,
            router: MessageRouter::new(),
            run_id: uuid::Uuid::new_v4().to_string(),
            _value_marker: std::marker::PhantomData,
        }
    }

    /// Set the run ID reported in log events
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    /// Get the run ID
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the configuration
    pub fn config(&self) -> &PregelConfig {
        &self.config
    }

    /// Run the program over the graph until it halts or the bound is reached
    ///
    /// Every vertex is active in superstep 0. Reaching `max_supersteps` is not
    /// an error: the result carries [`Termination::Forced`] and whatever
    /// values the vertices hold at that point.
    pub async fn run(
        &mut self,
        mut graph: Graph<V>,
        program: BoxedProgram<V, M>,
    ) -> Result<RunResult<V>, PregelError> {
        self.config.validate()?;
        graph.validate()?;
        graph.activate_all();
        self.router = MessageRouter::new();

        info!(
            run_id = %self.run_id,
            vertices = graph.len(),
            max_supersteps = self.config.max_supersteps,
            "Starting run"
        );

        let mut superstep = 0;

        loop {
            if self.should_terminate(&graph) {
                info!(run_id = %self.run_id, supersteps = superstep, "Run halted naturally");
                return Ok(self.finish(graph, superstep, Termination::Natural));
            }

            if superstep >= self.config.max_supersteps {
                warn!(
                    run_id = %self.run_id,
                    supersteps = superstep,
                    active = graph.active_count(),
                    pending = self.router.pending_count(),
                    "Superstep bound reached, stopping run"
                );
                return Ok(self.finish(graph, superstep, Termination::Forced));
            }

            self.execute_superstep(superstep, &mut graph, &program).await?;

            superstep += 1;
        }
    }

    fn finish(&self, graph: Graph<V>, supersteps: usize, termination: Termination) -> RunResult<V> {
        RunResult {
            graph,
            supersteps,
            termination,
            run_id: self.run_id.clone(),
        }
    }

    /// Check if the run should terminate
    pub(crate) fn should_terminate(&self, graph: &Graph<V>) -> bool {
        graph.active_count() == 0 && !self.router.has_pending()
    }

    /// Execute a single superstep
    pub(crate) async fn execute_superstep(
        &mut self,
        superstep: usize,
        graph: &mut Graph<V>,
        program: &BoxedProgram<V, M>,
    ) -> Result<(), PregelError> {
        // 1. Deliver messages sent during the previous superstep
        let mut inboxes = self.deliver_messages(graph)?;
        let delivered: usize = inboxes.values().map(Vec::len).sum();

        // 2. Schedule active vertices plus halted ones that received messages
        let scheduled: Vec<VertexId> = graph
            .vertices()
            .filter(|entry| entry.active || inboxes.contains_key(&entry.id))
            .map(|entry| entry.id.clone())
            .collect();

        // 3. Compute in parallel; outboxes go straight to the router
        let results = self
            .compute_vertices(superstep, graph, scheduled, &mut inboxes, program)
            .await?;
        let computed = results.len();

        // 4. Apply new values and halt votes
        for (vid, result) in results {
            if let Some(entry) = graph.vertex_mut(&vid) {
                entry.active = !result.votes_to_halt();
                entry.value = result.value;
            }
        }

        // 5. Barrier: messages sent this superstep become deliverable
        let sent = self.router.advance().await;

        if self.config.tracing_enabled {
            debug!(
                run_id = %self.run_id,
                superstep,
                computed,
                delivered,
                sent,
                active = graph.active_count(),
                "Superstep complete"
            );
        }

        Ok(())
    }

    /// Drain the router into per-vertex inboxes
    ///
    /// Messages addressed to ids outside the graph abort the run.
    fn deliver_messages(&mut self, graph: &Graph<V>) -> Result<HashMap<VertexId, Vec<M>>, PregelError> {
        let mut inboxes = HashMap::new();
        for id in graph.ids() {
            let messages = self.router.drain(id);
            if !messages.is_empty() {
                inboxes.insert(id.clone(), messages);
            }
        }

        let undelivered = self.router.take_inbound();
        if let Some((target, messages)) = undelivered.into_iter().find(|(_, q)| !q.is_empty()) {
            return Err(PregelError::MessageDelivery {
                target,
                count: messages.len(),
            });
        }

        Ok(inboxes)
    }

    /// Compute all scheduled vertices in parallel
    async fn compute_vertices(
        &self,
        superstep: usize,
        graph: &Graph<V>,
        scheduled: Vec<VertexId>,
        inboxes: &mut HashMap<VertexId, Vec<M>>,
        program: &BoxedProgram<V, M>,
    ) -> Result<Vec<(VertexId, ComputeResult<V>)>, PregelError> {
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism));
        let mut handles: Vec<(VertexId, JoinHandle<TaskOutput<V>>)> = Vec::with_capacity(scheduled.len());

        for vertex_id in scheduled {
            let Some(entry) = graph.vertex(&vertex_id) else {
                continue;
            };
            let value = entry.value.clone();
            let neighbors = entry.neighbors.clone();
            let messages = inboxes.remove(&vertex_id).unwrap_or_default();
            let program = Arc::clone(program);
            let sender: RouterHandle<M> = self.router.handle();
            let sem_clone = Arc::clone(&semaphore);
            let vid = vertex_id.clone();

            let handle = tokio::spawn(async move {
                // Acquire semaphore permit for parallelism control
                let _permit = match sem_clone.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return (
                            vid.clone(),
                            Err(PregelError::vertex_error_with_source(vid, "semaphore closed", e)),
                        )
                    }
                };

                let mut ctx = ComputeContext::new(vid.clone(), &value, &neighbors, &messages, superstep);
                let result = program.compute(&mut ctx).await;

                if result.is_ok() {
                    sender.send_all(ctx.into_outbox()).await;
                }

                (vid, result)
            });

            handles.push((vertex_id, handle));
        }

        // Join everything before the barrier
        let mut results = Vec::with_capacity(handles.len());
        let mut handles = handles.into_iter();

        while let Some((vertex_id, handle)) = handles.next() {
            let outcome = match handle.await {
                Ok((vid, Ok(result))) => Ok((vid, result)),
                Ok((_, Err(e))) => Err(e),
                Err(e) => Err(PregelError::vertex_error_with_source(
                    vertex_id.clone(),
                    "task join error",
                    e,
                )),
            };

            match outcome {
                Ok(pair) => results.push(pair),
                Err(e) => {
                    error!(run_id = %self.run_id, superstep, vertex = %vertex_id, error = %e, "Vertex computation failed");
                    for (_, rest) in handles {
                        rest.abort();
                    }
                    return Err(e);
                }
            }
        }

        Ok(results)
    }
}

impl<V, M> Default for PregelRuntime<V, M>
where
    V: Clone + Send + Sync + 'static,
    M: VertexMessage,
{
    fn default() -> Self {
        Self::new()
    }
}
