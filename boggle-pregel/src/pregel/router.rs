//! Message router with one-superstep delivery delay
//!
//! Messages sent during superstep S are buffered in an outbound map and only
//! become deliverable after [`MessageRouter::advance`] runs at the barrier
//! between S and S + 1. Worker tasks send through cloned [`RouterHandle`]s;
//! the runtime alone advances and drains.
//!
//! No combiner is applied. Duplicate messages are kept as separate entries and
//! delivery order per target is unspecified.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::message::VertexMessage;
use super::vertex::VertexId;

type Queues<M> = HashMap<VertexId, Vec<M>>;

/// Sending side of the router, safe to share across concurrent computations
pub struct RouterHandle<M: VertexMessage> {
    outbound: Arc<Mutex<Queues<M>>>,
}

impl<M: VertexMessage> Clone for RouterHandle<M> {
    fn clone(&self) -> Self {
        Self {
            outbound: Arc::clone(&self.outbound),
        }
    }
}

impl<M: VertexMessage> RouterHandle<M> {
    /// Enqueue a message for delivery in the next superstep
    pub async fn send(&self, target: impl Into<VertexId>, message: M) {
        let mut outbound = self.outbound.lock().await;
        outbound.entry(target.into()).or_default().push(message);
    }

    /// Enqueue a whole outbox under a single lock acquisition
    pub async fn send_all(&self, outbox: HashMap<VertexId, Vec<M>>) {
        if outbox.is_empty() {
            return;
        }
        let mut outbound = self.outbound.lock().await;
        for (target, messages) in outbox {
            outbound.entry(target).or_default().extend(messages);
        }
    }
}

/// Per-target message queues for the BSP runtime
pub struct MessageRouter<M: VertexMessage> {
    /// Deliverable in the current superstep
    inbound: Queues<M>,
    /// Sent during the current superstep, deliverable after the barrier
    outbound: Arc<Mutex<Queues<M>>>,
}

impl<M: VertexMessage> Default for MessageRouter<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: VertexMessage> MessageRouter<M> {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            inbound: HashMap::new(),
            outbound: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get a sending handle for worker tasks
    pub fn handle(&self) -> RouterHandle<M> {
        RouterHandle {
            outbound: Arc::clone(&self.outbound),
        }
    }

    /// Enqueue a message for the next superstep
    pub async fn send(&self, target: impl Into<VertexId>, message: M) {
        self.handle().send(target, message).await;
    }

    /// Barrier: make everything sent so far deliverable
    ///
    /// Anything still undrained from the previous superstep is discarded, so
    /// a message is never delivered twice. Returns the number of messages now
    /// deliverable.
    pub async fn advance(&mut self) -> usize {
        let sent = std::mem::take(&mut *self.outbound.lock().await);
        self.inbound = sent;
        self.pending_count()
    }

    /// Remove and return every message queued for `target` this superstep
    pub fn drain(&mut self, target: &VertexId) -> Vec<M> {
        self.inbound.remove(target).unwrap_or_default()
    }

    /// Check whether any message is deliverable this superstep
    pub fn has_pending(&self) -> bool {
        self.inbound.values().any(|q| !q.is_empty())
    }

    /// Number of messages deliverable this superstep
    pub fn pending_count(&self) -> usize {
        self.inbound.values().map(Vec::len).sum()
    }

    /// Targets with deliverable messages
    pub fn pending_targets(&self) -> impl Iterator<Item = &VertexId> {
        self.inbound
            .iter()
            .filter(|(_, q)| !q.is_empty())
            .map(|(id, _)| id)
    }

    /// Remove everything deliverable this superstep
    pub fn take_inbound(&mut self) -> HashMap<VertexId, Vec<M>> {
        std::mem::take(&mut self.inbound)
    }
}
