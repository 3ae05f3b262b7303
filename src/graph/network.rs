//! Graph model: immutable vertex set + edge set + mode.
//!
//! [`Graph`] wraps a `petgraph::DiGraph` with an id ↔ `NodeIndex` mapping.
//! Dense node indices double as the arena index of the derived
//! [`Adjacency`] views consumed by the traversal and metrics layers.
//!
//! Undirected edges are stored once (in the orientation first supplied);
//! the mode decides how an edge contributes to each view.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

use super::models::{Edge, Mode, VertexId};
use super::traversal::bfs_distances;
use crate::error::GraphError;

/// Which neighbor relation an [`Adjacency`] encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacencyKind {
    /// Every edge counted in both directions, regardless of mode.
    Undirected,
    /// Edges followed from→to; symmetric when the graph is undirected.
    Directed,
}

/// Neighbor lists keyed by dense vertex index.
///
/// Each list is sorted ascending and free of duplicates and self-references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    lists: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Build from raw lists, sorting and deduplicating each one.
    pub fn from_lists(mut lists: Vec<Vec<usize>>) -> Self {
        for (i, list) in lists.iter_mut().enumerate() {
            list.retain(|&j| j != i);
            list.sort_unstable();
            list.dedup();
        }
        Self { lists }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.lists.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.neighbors(from).binary_search(&to).is_ok()
    }
}

/// Immutable graph snapshot.
#[derive(Debug, Clone)]
pub struct Graph {
    graph: DiGraph<VertexId, ()>,
    id_to_index: HashMap<VertexId, NodeIndex>,
    mode: Mode,
}

impl Graph {
    /// Build a graph, dropping input that does not fit the model.
    ///
    /// Duplicate vertex ids keep their first occurrence. Edges referencing an
    /// unknown vertex, self-loops and duplicate edges (under the mode's
    /// equality rule) are dropped and logged.
    pub fn new(
        vertices: impl IntoIterator<Item = VertexId>,
        edges: impl IntoIterator<Item = Edge>,
        mode: Mode,
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut id_to_index = HashMap::new();
        for v in vertices {
            if id_to_index.contains_key(&v) {
                tracing::debug!("Ignoring duplicate vertex {}", v);
                continue;
            }
            id_to_index.insert(v, graph.add_node(v));
        }

        let mut result = Self {
            graph,
            id_to_index,
            mode,
        };
        let mut seen = HashSet::new();
        for edge in edges {
            match result.check_edge(&edge) {
                Ok((a, b)) => {
                    if seen.insert(edge.key(mode)) {
                        result.graph.add_edge(a, b, ());
                    } else {
                        tracing::debug!("Ignoring duplicate edge {}", edge.label(mode));
                    }
                }
                Err(e) => tracing::warn!("Dropping edge {}: {}", edge.label(mode), e),
            }
        }
        result
    }

    /// Build a graph, rejecting dangling references, self-loops and repeated
    /// vertex ids. Duplicate edges are still merged.
    pub fn try_new(
        vertices: impl IntoIterator<Item = VertexId>,
        edges: impl IntoIterator<Item = Edge>,
        mode: Mode,
    ) -> Result<Self, GraphError> {
        let vertices: Vec<VertexId> = vertices.into_iter().collect();
        let mut unique = HashSet::with_capacity(vertices.len());
        if let Some(&dup) = vertices.iter().find(|v| !unique.insert(**v)) {
            return Err(GraphError::DuplicateVertex(dup));
        }

        let edges: Vec<Edge> = edges.into_iter().collect();
        let checker = Self::new(vertices.iter().copied(), std::iter::empty(), mode);
        for edge in &edges {
            checker.check_edge(edge)?;
        }
        Ok(Self::new(vertices, edges, mode))
    }

    fn check_edge(&self, edge: &Edge) -> Result<(NodeIndex, NodeIndex), GraphError> {
        if edge.is_self_loop() {
            return Err(GraphError::SelfLoop(edge.from));
        }
        let lookup = |missing: VertexId| {
            self.get_index(missing).ok_or(GraphError::UnknownVertex {
                from: edge.from,
                to: edge.to,
                missing,
            })
        };
        Ok((lookup(edge.from)?, lookup(edge.to)?))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Vertex ids in insertion order.
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.graph.node_weights().copied().collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct edges after deduplication.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.id_to_index.contains_key(&v)
    }

    /// Dense index of a vertex.
    pub fn get_index(&self, v: VertexId) -> Option<NodeIndex> {
        self.id_to_index.get(&v).copied()
    }

    /// Vertex id at a dense index.
    pub fn id_at(&self, index: usize) -> Option<VertexId> {
        self.graph.node_weight(NodeIndex::new(index)).copied()
    }

    /// Stored edges in insertion order.
    pub fn edges(&self) -> Vec<Edge> {
        self.graph
            .edge_references()
            .map(|e| Edge::new(self.graph[e.source()], self.graph[e.target()]))
            .collect()
    }

    /// Underlying petgraph storage.
    pub fn inner(&self) -> &DiGraph<VertexId, ()> {
        &self.graph
    }

    /// Neighbors of `v`, sorted by insertion order of the neighbor.
    ///
    /// With `directed = true` this follows the mode-respecting view (out
    /// neighbors in directed mode), otherwise the direction-agnostic view.
    /// Unknown vertices have no neighbors.
    pub fn neighbors(&self, v: VertexId, directed: bool) -> Vec<VertexId> {
        let Some(idx) = self.get_index(v) else {
            return Vec::new();
        };
        let kind = if directed {
            AdjacencyKind::Directed
        } else {
            AdjacencyKind::Undirected
        };
        self.neighbor_indices(idx, kind)
            .into_iter()
            .filter_map(|i| self.id_at(i))
            .collect()
    }

    fn neighbor_indices(&self, idx: NodeIndex, kind: AdjacencyKind) -> Vec<usize> {
        let follow_direction = kind == AdjacencyKind::Directed && self.mode.is_directed();
        let mut list: Vec<usize> = if follow_direction {
            self.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|n| n.index())
                .collect()
        } else {
            self.graph.neighbors_undirected(idx).map(|n| n.index()).collect()
        };
        list.sort_unstable();
        list.dedup();
        list
    }

    /// Derive a fresh adjacency view.
    pub fn adjacency(&self, kind: AdjacencyKind) -> Adjacency {
        let lists = self
            .graph
            .node_indices()
            .map(|idx| self.neighbor_indices(idx, kind))
            .collect();
        Adjacency::from_lists(lists)
    }

    /// Hop distances from `source` along the mode-respecting view.
    ///
    /// Returns `None` for an unknown source; unreachable vertices are absent.
    pub fn distances_from(&self, source: VertexId) -> Option<HashMap<VertexId, u32>> {
        let idx = self.get_index(source)?;
        let adjacency = self.adjacency(AdjacencyKind::Directed);
        let distances = bfs_distances(&adjacency, idx.index());
        Some(
            distances
                .reachable()
                .filter_map(|(i, d)| self.id_at(i).map(|v| (v, d)))
                .collect(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
