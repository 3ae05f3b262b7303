//! Metrics engine: the single entry point for a metrics snapshot.
//!
//! [`compute_snapshot`] runs every layer against one immutable [`Graph`]:
//!
//! 1. **Views**: derive the undirected and mode-respecting adjacency
//! 2. **Local structure**: degree and clustering (undirected view)
//! 3. **Traversal**: one BFS per source (mode-respecting view)
//! 4. **Global**: path statistics and closeness from the BFS results,
//!    Brandes betweenness, connected components
//!
//! Nothing is cached between calls, so two calls on the same graph return
//! identical snapshots.

use std::time::Instant;

use super::algorithms::{
    average_clustering, betweenness, closeness, degrees, local_clustering, path_summary,
};
use super::models::{Edge, MetricsSnapshot, Mode, VertexId, VertexMetrics};
use super::network::{AdjacencyKind, Graph};
use super::traversal::{bfs_distances, Distances};

/// Build a graph from raw input and compute its metrics.
///
/// Invalid edges (unknown endpoint, self-loop) are dropped and duplicates are
/// merged, see [`Graph::new`].
pub fn compute_metrics(vertices: &[VertexId], edges: &[Edge], mode: Mode) -> MetricsSnapshot {
    let graph = Graph::new(vertices.iter().copied(), edges.iter().copied(), mode);
    compute_snapshot(&graph)
}

/// Compute the full metrics snapshot of `graph`.
pub fn compute_snapshot(graph: &Graph) -> MetricsSnapshot {
    let start = Instant::now();
    let mode = graph.mode();

    // 1. Adjacency views
    let undirected = graph.adjacency(AdjacencyKind::Undirected);
    let directed = graph.adjacency(AdjacencyKind::Directed);

    // 2. Degree + clustering
    let degree = degrees(graph, &undirected);
    let clustering = local_clustering(&undirected);

    // 3. Per-source distances
    let distances: Vec<Distances> = (0..directed.len())
        .map(|s| bfs_distances(&directed, s))
        .collect();

    // 4. Path statistics, closeness, betweenness
    let paths = path_summary(mode, &distances);
    let close = closeness(&distances);
    let between = betweenness(mode, &directed);
    let component_count = petgraph::algo::connected_components(graph.inner());

    // 5. Assemble per-vertex records in insertion order
    let vertices: Vec<VertexMetrics> = graph
        .vertex_ids()
        .into_iter()
        .enumerate()
        .map(|(i, id)| VertexMetrics {
            id,
            degree: degree[i].degree,
            in_degree: degree[i].in_degree,
            out_degree: degree[i].out_degree,
            local_clustering: clustering[i],
            closeness_raw: close[i].raw,
            closeness_normalized: close[i].normalized,
            betweenness_raw: between[i].raw,
            betweenness_normalized: between[i].normalized,
        })
        .collect();

    let edge_count = graph.edge_count();
    let density = if paths.all_pairs > 0 {
        edge_count as f64 / paths.all_pairs as f64
    } else {
        0.0
    };

    tracing::debug!(
        mode = %mode,
        vertices = vertices.len(),
        edges = edge_count,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Computed metrics snapshot"
    );

    MetricsSnapshot {
        mode,
        vertex_count: vertices.len(),
        edge_count,
        average_path_length: paths.average_path_length,
        average_clustering: average_clustering(&clustering),
        diameter: paths.diameter,
        reachable_pair_count: paths.reachable_pairs,
        all_pairs_count: paths.all_pairs,
        component_count,
        density,
        vertices,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(raw: u32) -> VertexId {
        VertexId::new(raw).unwrap()
    }

    fn edge(a: u32, b: u32) -> Edge {
        Edge::new(vid(a), vid(b))
    }

    #[test]
    fn test_compute_all_empty_graph() {
        let snapshot = compute_metrics(&[], &[], Mode::Undirected);
        assert_eq!(snapshot.vertex_count, 0);
        assert!(snapshot.vertices.is_empty());
        assert_eq!(snapshot.all_pairs_count, 0);
        assert_eq!(snapshot.component_count, 0);
        assert!(snapshot.average_clustering.abs() < f64::EPSILON);
        assert!(snapshot.density.abs() < f64::EPSILON);
    }

    #[test]
    fn test_compute_assembles_per_vertex_in_order() {
        let snapshot = compute_metrics(
            &[vid(3), vid(1), vid(2)],
            &[edge(1, 2), edge(2, 3)],
            Mode::Undirected,
        );
        let order: Vec<u32> = snapshot.vertices.iter().map(|m| m.id.get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(snapshot.vertex(vid(2)).unwrap().degree, 2);
        assert!((snapshot.vertex(vid(2)).unwrap().betweenness_normalized - 1.0).abs() < 1e-12);
        assert_eq!(snapshot.edge_count, 2);
        assert!((snapshot.density - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_drops_invalid_edges() {
        let snapshot = compute_metrics(
            &[vid(1), vid(2)],
            &[edge(1, 2), edge(1, 5), edge(2, 2)],
            Mode::Directed,
        );
        assert_eq!(snapshot.edge_count, 1);
        assert_eq!(snapshot.reachable_pair_count, 1);
        assert!(!snapshot.is_connected());
    }

    #[test]
    fn test_compute_counts_components() {
        let snapshot = compute_metrics(
            &[vid(1), vid(2), vid(3), vid(4), vid(5)],
            &[edge(1, 2), edge(3, 4)],
            Mode::Directed,
        );
        assert_eq!(snapshot.component_count, 3);
    }
}
