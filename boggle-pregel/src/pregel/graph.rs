//! Graph model: an id-keyed arena of vertices
//!
//! Edges are stored as id references on each vertex, never as links between
//! vertex objects, so cycles in the graph are ordinary data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::PregelError;
use super::vertex::VertexId;

/// A vertex in the arena: value, adjacency and activity flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexEntry<V> {
    /// Vertex identifier
    pub id: VertexId,
    /// Per-vertex value, mutated only from this vertex's compute result
    pub value: V,
    /// Adjacent vertex ids (no duplicates)
    pub neighbors: Vec<VertexId>,
    /// Whether the vertex takes part in the next superstep
    pub active: bool,
}

impl<V> VertexEntry<V> {
    fn new(id: VertexId, value: V) -> Self {
        Self {
            id,
            value,
            neighbors: Vec::new(),
            active: true,
        }
    }

    fn link(&mut self, neighbor: VertexId) {
        if !self.neighbors.contains(&neighbor) {
            self.neighbors.push(neighbor);
        }
    }
}

/// Graph of vertices keyed by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph<V> {
    vertices: BTreeMap<VertexId, VertexEntry<V>>,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            vertices: BTreeMap::new(),
        }
    }
}

impl<V> Graph<V> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex with an initial value
    ///
    /// Re-adding an existing id replaces its value and keeps its edges.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>, value: V) -> &mut Self {
        let id = id.into();
        match self.vertices.get_mut(&id) {
            Some(entry) => entry.value = value,
            None => {
                self.vertices
                    .insert(id.clone(), VertexEntry::new(id, value));
            }
        }
        self
    }

    /// Add an undirected edge between two existing vertices
    pub fn add_edge(
        &mut self,
        a: impl Into<VertexId>,
        b: impl Into<VertexId>,
    ) -> Result<&mut Self, PregelError> {
        let a = a.into();
        let b = b.into();
        if !self.vertices.contains_key(&b) {
            return Err(PregelError::UnknownVertex {
                vertex_id: a,
                neighbor: b,
            });
        }
        let Some(entry) = self.vertices.get_mut(&a) else {
            return Err(PregelError::UnknownVertex {
                vertex_id: b,
                neighbor: a,
            });
        };
        entry.link(b.clone());
        if let Some(entry) = self.vertices.get_mut(&b) {
            entry.link(a);
        }
        Ok(self)
    }

    /// Add a directed adjacency entry without checking the target exists
    ///
    /// Used by loaders that list adjacency per vertex; run
    /// [`Graph::validate`] once loading is done.
    pub fn add_neighbor(&mut self, id: impl Into<VertexId>, neighbor: impl Into<VertexId>) {
        if let Some(entry) = self.vertices.get_mut(&id.into()) {
            entry.link(neighbor.into());
        }
    }

    /// Check that every neighbor id names a vertex in the graph
    pub fn validate(&self) -> Result<(), PregelError> {
        for entry in self.vertices.values() {
            if let Some(missing) = entry
                .neighbors
                .iter()
                .find(|n| !self.vertices.contains_key(*n))
            {
                return Err(PregelError::UnknownVertex {
                    vertex_id: entry.id.clone(),
                    neighbor: missing.clone(),
                });
            }
        }
        Ok(())
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check whether a vertex exists
    pub fn contains(&self, id: &VertexId) -> bool {
        self.vertices.contains_key(id)
    }

    /// Look up a vertex
    pub fn vertex(&self, id: &VertexId) -> Option<&VertexEntry<V>> {
        self.vertices.get(id)
    }

    pub(crate) fn vertex_mut(&mut self, id: &VertexId) -> Option<&mut VertexEntry<V>> {
        self.vertices.get_mut(id)
    }

    /// Value of a vertex
    pub fn value(&self, id: &VertexId) -> Option<&V> {
        self.vertices.get(id).map(|e| &e.value)
    }

    /// Neighbor ids of a vertex
    pub fn neighbors(&self, id: &VertexId) -> Option<&[VertexId]> {
        self.vertices.get(id).map(|e| e.neighbors.as_slice())
    }

    /// Iterate vertices in id order
    pub fn vertices(&self) -> impl Iterator<Item = &VertexEntry<V>> {
        self.vertices.values()
    }

    /// Iterate vertex ids in order
    pub fn ids(&self) -> impl Iterator<Item = &VertexId> {
        self.vertices.keys()
    }

    /// Number of vertices whose active flag is set
    pub fn active_count(&self) -> usize {
        self.vertices.values().filter(|e| e.active).count()
    }

    /// Mark every vertex active (superstep 0)
    pub(crate) fn activate_all(&mut self) {
        for entry in self.vertices.values_mut() {
            entry.active = true;
        }
    }

    /// Consume the graph into the id -> value mapping
    pub fn into_values(self) -> BTreeMap<VertexId, V> {
        self.vertices
            .into_iter()
            .map(|(id, entry)| (id, entry.value))
            .collect()
    }
}

impl<V: Clone> Graph<V> {
    /// Clone out the id -> value mapping
    pub fn values(&self) -> BTreeMap<VertexId, V> {
        self.vertices
            .iter()
            .map(|(id, entry)| (id.clone(), entry.value.clone()))
            .collect()
    }
}
