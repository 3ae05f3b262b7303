//! Network metrics engine.
//!
//! Computes degree statistics, clustering coefficients, shortest-path
//! statistics and closeness / betweenness centrality for small hand-built
//! graphs, directed or undirected.
//!
//! ## Architecture
//!
//! ```text
//! (vertices, edges, mode) ──► network::Graph (petgraph::DiGraph)
//!                                   │
//!                  ┌────────────────┴────────────────┐
//!        undirected Adjacency             mode-respecting Adjacency
//!                  │                                  │
//!      degree, clustering                traversal (BFS / Brandes BFS)
//!                  │                                  │
//!                  │                 path stats, closeness, betweenness
//!                  └────────────────┬────────────────┘
//!                                   │
//!                       engine ──► MetricsSnapshot
//! ```
//!
//! ## Modules
//!
//! - [`models`]: Value types (VertexId, Mode, Edge, Fraction, MetricsSnapshot)
//! - [`network`]: Immutable `Graph` and derived `Adjacency` views
//! - [`traversal`]: Breadth-first distances and shortest-path DAGs
//! - [`algorithms`]: Degree, clustering, path statistics, closeness, betweenness
//! - [`engine`]: `compute_metrics` / `compute_snapshot` entry points

pub mod algorithms;
pub mod engine;
pub mod models;
pub mod network;
pub mod traversal;

// Re-export primary types for convenience
pub use engine::{compute_metrics, compute_snapshot};
pub use models::{Edge, Fraction, GraphSpec, MetricsSnapshot, Mode, VertexId, VertexMetrics};
pub use network::{Adjacency, AdjacencyKind, Graph};
