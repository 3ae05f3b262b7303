//! Network metrics algorithms.
//!
//! Implements the local and global layers of the metrics engine:
//! - **Degree**: plain, in and out degree per vertex
//! - **Clustering coefficient**: local triangle density on the undirected view
//! - **Path statistics**: average shortest-path length, diameter, reachable pairs
//! - **Closeness centrality**: exact fractions from per-source distance sums
//! - **Betweenness centrality**: Brandes' dependency accumulation
//!
//! Results are `Vec`s indexed by dense vertex index (see [`Graph::get_index`]).

use petgraph::Direction;

use super::models::{Fraction, Mode};
use super::network::{Adjacency, Graph};
use super::traversal::{shortest_paths, Distances};

// ============================================================================
// Degree
// ============================================================================

/// Degree counts for one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Degree {
    pub degree: usize,
    pub in_degree: usize,
    pub out_degree: usize,
}

/// Compute degree counts for every vertex.
///
/// `degree` is the size of the undirected neighbor set. In undirected mode
/// in/out degree mirror it; in directed mode they count edges by endpoint.
pub fn degrees(graph: &Graph, undirected: &Adjacency) -> Vec<Degree> {
    let g = graph.inner();
    g.node_indices()
        .map(|idx| {
            let degree = undirected.neighbors(idx.index()).len();
            match graph.mode() {
                Mode::Undirected => Degree {
                    degree,
                    in_degree: degree,
                    out_degree: degree,
                },
                Mode::Directed => Degree {
                    degree,
                    in_degree: g.neighbors_directed(idx, Direction::Incoming).count(),
                    out_degree: g.neighbors_directed(idx, Direction::Outgoing).count(),
                },
            }
        })
        .collect()
}

// ============================================================================
// Clustering Coefficient
// ============================================================================

/// Compute the local clustering coefficient for each vertex.
///
/// coefficient = linked neighbor pairs / (k * (k-1) / 2), with 0 for k < 2.
/// Always evaluated on the undirected view, so direction never affects
/// triangle closure.
pub fn local_clustering(undirected: &Adjacency) -> Vec<f64> {
    (0..undirected.len())
        .map(|v| {
            let neighbors = undirected.neighbors(v);
            let k = neighbors.len();
            if k < 2 {
                return 0.0;
            }

            let mut linked = 0usize;
            for (i, &a) in neighbors.iter().enumerate() {
                for &b in &neighbors[i + 1..] {
                    if undirected.contains(a, b) {
                        linked += 1;
                    }
                }
            }

            let possible = k * (k - 1) / 2;
            linked as f64 / possible as f64
        })
        .collect()
}

/// Arithmetic mean of the local coefficients (0 for an empty graph).
pub fn average_clustering(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

// ============================================================================
// Path statistics
// ============================================================================

/// Aggregate shortest-path statistics over all distinct vertex pairs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathSummary {
    /// Sum of distances over reachable pairs
    pub distance_sum: u64,
    /// Reachable distinct pairs
    pub reachable_pairs: u64,
    /// All distinct pairs for the mode
    pub all_pairs: u64,
    /// Largest distance over reachable pairs (0 if none)
    pub diameter: u32,
    /// `distance_sum / reachable_pairs` (0 if none)
    pub average_path_length: f64,
}

/// Number of distinct vertex pairs: ordered when directed, unordered otherwise.
pub fn all_pairs_count(mode: Mode, vertex_count: usize) -> u64 {
    let n = vertex_count as u64;
    let ordered = n * n.saturating_sub(1);
    match mode {
        Mode::Directed => ordered,
        Mode::Undirected => ordered / 2,
    }
}

/// Fold per-source distances into graph-level path statistics.
///
/// `distances[s]` must come from a BFS rooted at dense index `s`. In
/// undirected mode each unordered pair is counted once (target index greater
/// than source); in directed mode every reachable ordered pair counts.
pub fn path_summary(mode: Mode, distances: &[Distances]) -> PathSummary {
    let mut summary = PathSummary {
        all_pairs: all_pairs_count(mode, distances.len()),
        ..PathSummary::default()
    };

    for (s, from_s) in distances.iter().enumerate() {
        let counted = from_s.reachable().filter(|&(t, _)| match mode {
            Mode::Directed => t != s,
            Mode::Undirected => t > s,
        });
        for (_, d) in counted {
            summary.distance_sum += u64::from(d);
            summary.reachable_pairs += 1;
            summary.diameter = summary.diameter.max(d);
        }
    }

    if summary.reachable_pairs > 0 {
        summary.average_path_length =
            summary.distance_sum as f64 / summary.reachable_pairs as f64;
    }
    summary
}

// ============================================================================
// Closeness Centrality
// ============================================================================

/// Closeness of one vertex as exact fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Closeness {
    pub raw: Fraction,
    pub normalized: Fraction,
}

/// Compute closeness centrality from per-source distances.
///
/// With S the distance sum and R the reachable count from v (v excluded):
/// raw = 1/S, normalized = R / ((V-1) * S), V-1 floored at 1. A vertex that
/// reaches nothing gets 0/1 for both.
pub fn closeness(distances: &[Distances]) -> Vec<Closeness> {
    let others = (distances.len() as u64).saturating_sub(1).max(1);
    distances
        .iter()
        .map(|from_v| {
            let (reachable, sum) = from_v.reach();
            match (Fraction::new(1, sum), Fraction::new(reachable, others * sum)) {
                (Some(raw), Some(normalized)) => Closeness { raw, normalized },
                _ => Closeness::default(),
            }
        })
        .collect()
}

// ============================================================================
// Betweenness Centrality (Brandes)
// ============================================================================

/// Betweenness of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Betweenness {
    pub raw: f64,
    pub normalized: f64,
}

/// Normalization factor applied to raw betweenness.
///
/// Directed: 1/((V-1)(V-2)); undirected: 2/((V-1)(V-2)); 0 when V <= 2.
pub fn betweenness_scale(mode: Mode, vertex_count: usize) -> f64 {
    if vertex_count <= 2 {
        return 0.0;
    }
    let pairs = ((vertex_count - 1) * (vertex_count - 2)) as f64;
    match mode {
        Mode::Directed => 1.0 / pairs,
        Mode::Undirected => 2.0 / pairs,
    }
}

/// Compute betweenness centrality for every vertex with Brandes' algorithm.
///
/// `adjacency` is the mode-respecting view (symmetric when undirected).
/// One augmented BFS plus one reverse-order accumulation pass per source:
/// O(V·E) overall. Undirected totals are halved because every pair is
/// reached from both endpoints.
pub fn betweenness(mode: Mode, adjacency: &Adjacency) -> Vec<Betweenness> {
    let n = adjacency.len();
    let mut raw = vec![0.0f64; n];
    let mut delta = vec![0.0f64; n];

    for s in 0..n {
        let paths = shortest_paths(adjacency, s);
        delta.iter_mut().for_each(|d| *d = 0.0);

        // Accumulation phase: pop vertices farthest-first
        for &w in paths.order.iter().rev() {
            let coefficient = (1.0 + delta[w]) / paths.sigma[w];
            for &v in &paths.predecessors[w] {
                delta[v] += paths.sigma[v] * coefficient;
            }
            if w != s {
                raw[w] += delta[w];
            }
        }
    }

    if mode == Mode::Undirected {
        raw.iter_mut().for_each(|b| *b /= 2.0);
    }

    let scale = betweenness_scale(mode, n);
    raw.into_iter()
        .map(|raw| Betweenness {
            raw,
            normalized: raw * scale,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::{Edge, VertexId};
    use crate::graph::network::AdjacencyKind;
    use crate::graph::traversal::bfs_distances;

    fn make_graph(n: u32, edges: &[(u32, u32)], mode: Mode) -> Graph {
        let vertices = (1..=n).filter_map(VertexId::new);
        let edges = edges.iter().map(|&(a, b)| {
            Edge::new(VertexId::new(a).unwrap(), VertexId::new(b).unwrap())
        });
        Graph::new(vertices, edges, mode)
    }

    /// Build a star graph: center 1 linked to leaves 2..=n+1
    fn make_star_graph(n_leaves: u32, mode: Mode) -> Graph {
        let edges: Vec<(u32, u32)> = (2..=n_leaves + 1).map(|leaf| (1, leaf)).collect();
        make_graph(n_leaves + 1, &edges, mode)
    }

    /// Build a path 1 - 2 - ... - n
    fn make_chain_graph(n: u32, mode: Mode) -> Graph {
        let edges: Vec<(u32, u32)> = (1..n).map(|i| (i, i + 1)).collect();
        make_graph(n, &edges, mode)
    }

    fn make_complete_graph(n: u32) -> Graph {
        let mut edges = Vec::new();
        for a in 1..=n {
            for b in (a + 1)..=n {
                edges.push((a, b));
            }
        }
        make_graph(n, &edges, Mode::Undirected)
    }

    fn all_distances(graph: &Graph) -> Vec<Distances> {
        let adj = graph.adjacency(AdjacencyKind::Directed);
        (0..adj.len()).map(|s| bfs_distances(&adj, s)).collect()
    }

    fn frac(n: u64, d: u64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    // --- Degree Tests ---

    #[test]
    fn test_degrees_undirected_mirror() {
        let g = make_star_graph(3, Mode::Undirected);
        let d = degrees(&g, &g.adjacency(AdjacencyKind::Undirected));
        assert_eq!(
            d[0],
            Degree {
                degree: 3,
                in_degree: 3,
                out_degree: 3
            }
        );
        assert!(d[1..].iter().all(|x| x.degree == 1 && x.in_degree == 1));
    }

    #[test]
    fn test_degrees_directed_reciprocal() {
        let g = make_graph(3, &[(1, 2), (2, 1), (2, 3)], Mode::Directed);
        let d = degrees(&g, &g.adjacency(AdjacencyKind::Undirected));
        // vertex 2: neighbors {1, 3}, in from 1, out to 1 and 3
        assert_eq!(d[1].degree, 2);
        assert_eq!(d[1].in_degree, 1);
        assert_eq!(d[1].out_degree, 2);
        assert_eq!(d[0].degree, 1);
        assert_eq!(d[0].in_degree + d[0].out_degree, 2);
    }

    // --- Clustering Tests ---

    #[test]
    fn test_clustering_triangle_all_one() {
        let g = make_graph(3, &[(1, 2), (2, 3), (3, 1)], Mode::Undirected);
        let cc = local_clustering(&g.adjacency(AdjacencyKind::Undirected));
        assert!(cc.iter().all(|&c| (c - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_clustering_star_center_zero() {
        let g = make_star_graph(4, Mode::Undirected);
        let cc = local_clustering(&g.adjacency(AdjacencyKind::Undirected));
        assert!(cc.iter().all(|&c| c.abs() < f64::EPSILON));
    }

    #[test]
    fn test_clustering_partial() {
        // 1 linked to 2, 3, 4; only 2-3 closes a triangle → 1/3
        let g = make_graph(4, &[(1, 2), (1, 3), (1, 4), (2, 3)], Mode::Undirected);
        let cc = local_clustering(&g.adjacency(AdjacencyKind::Undirected));
        assert!((cc[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((cc[1] - 1.0).abs() < f64::EPSILON);
        assert!(cc[3].abs() < f64::EPSILON);
    }

    #[test]
    fn test_clustering_ignores_direction() {
        let directed = make_graph(3, &[(1, 2), (2, 3), (3, 1)], Mode::Directed);
        let cc = local_clustering(&directed.adjacency(AdjacencyKind::Undirected));
        assert!(cc.iter().all(|&c| (c - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_clustering_complete_graph() {
        let g = make_complete_graph(6);
        let cc = local_clustering(&g.adjacency(AdjacencyKind::Undirected));
        assert!(cc.iter().all(|&c| (c - 1.0).abs() < f64::EPSILON));
        assert!((average_clustering(&cc) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_clustering_empty() {
        assert!(average_clustering(&[]).abs() < f64::EPSILON);
    }

    // --- Path Statistics Tests ---

    #[test]
    fn test_path_summary_chain_undirected() {
        let g = make_chain_graph(4, Mode::Undirected);
        let ps = path_summary(Mode::Undirected, &all_distances(&g));
        // pairs: 1+2+3 + 1+2 + 1 = 10 over 6 pairs
        assert_eq!(ps.distance_sum, 10);
        assert_eq!(ps.reachable_pairs, 6);
        assert_eq!(ps.all_pairs, 6);
        assert_eq!(ps.diameter, 3);
        assert!((ps.average_path_length - 10.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_path_summary_directed_counts_ordered_pairs() {
        let g = make_graph(3, &[(1, 2), (2, 1)], Mode::Directed);
        let ps = path_summary(Mode::Directed, &all_distances(&g));
        assert_eq!(ps.reachable_pairs, 2);
        assert_eq!(ps.all_pairs, 6);
        assert_eq!(ps.diameter, 1);
    }

    #[test]
    fn test_path_summary_no_edges() {
        let g = make_graph(4, &[], Mode::Undirected);
        let ps = path_summary(Mode::Undirected, &all_distances(&g));
        assert_eq!(ps.reachable_pairs, 0);
        assert_eq!(ps.diameter, 0);
        assert!(ps.average_path_length.abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_pairs_count_degenerate() {
        assert_eq!(all_pairs_count(Mode::Directed, 0), 0);
        assert_eq!(all_pairs_count(Mode::Undirected, 1), 0);
        assert_eq!(all_pairs_count(Mode::Undirected, 5), 10);
        assert_eq!(all_pairs_count(Mode::Directed, 5), 20);
    }

    // --- Closeness Tests ---

    #[test]
    fn test_closeness_chain_exact_fractions() {
        let g = make_chain_graph(3, Mode::Undirected);
        let c = closeness(&all_distances(&g));
        // end vertex: S = 1 + 2 = 3, R = 2 → 1/3 and 2/(2*3)
        assert_eq!(c[0].raw, frac(1, 3));
        assert_eq!(c[0].normalized, frac(2, 6));
        // middle vertex: S = 2, R = 2 → 1/2 and 2/4
        assert_eq!(c[1].raw, frac(1, 2));
        assert_eq!(c[1].normalized, frac(2, 4));
        assert_eq!(c[1].normalized.reduced(), frac(1, 2));
    }

    #[test]
    fn test_closeness_isolated_vertex_zero() {
        let g = make_graph(3, &[(1, 2)], Mode::Undirected);
        let c = closeness(&all_distances(&g));
        assert_eq!(c[2].raw, Fraction::ZERO);
        assert_eq!(c[2].normalized, Fraction::ZERO);
        // partial reach: R = 1, S = 1, V-1 = 2
        assert_eq!(c[0].normalized, frac(1, 2));
    }

    #[test]
    fn test_closeness_directed_sink() {
        let g = make_chain_graph(3, Mode::Directed);
        let c = closeness(&all_distances(&g));
        assert_eq!(c[2].raw, Fraction::ZERO);
        assert_eq!(c[0].raw, frac(1, 3));
    }

    // --- Betweenness Tests ---

    #[test]
    fn test_betweenness_chain_middle_highest() {
        let g = make_chain_graph(5, Mode::Undirected);
        let bc = betweenness(Mode::Undirected, &g.adjacency(AdjacencyKind::Directed));
        // middle of a 5-path lies on 2*2 = 4 pair paths
        assert!((bc[2].raw - 4.0).abs() < 1e-12);
        assert!((bc[1].raw - 3.0).abs() < 1e-12);
        assert!(bc[0].raw.abs() < f64::EPSILON);
        assert!((bc[2].normalized - 4.0 * 2.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_betweenness_star_center() {
        let g = make_star_graph(4, Mode::Undirected);
        let bc = betweenness(Mode::Undirected, &g.adjacency(AdjacencyKind::Directed));
        // center is on all C(4,2) = 6 leaf pairs and normalizes to 1
        assert!((bc[0].raw - 6.0).abs() < 1e-12);
        assert!((bc[0].normalized - 1.0).abs() < 1e-12);
        assert!(bc[1..].iter().all(|b| b.raw.abs() < f64::EPSILON));
    }

    #[test]
    fn test_betweenness_splits_between_equal_paths() {
        // square 1-2-3-4-1: each vertex is half of the one opposite pair path
        let g = make_graph(4, &[(1, 2), (2, 3), (3, 4), (4, 1)], Mode::Undirected);
        let bc = betweenness(Mode::Undirected, &g.adjacency(AdjacencyKind::Directed));
        assert!(bc.iter().all(|b| (b.raw - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_betweenness_directed_no_halving() {
        let g = make_chain_graph(3, Mode::Directed);
        let bc = betweenness(Mode::Directed, &g.adjacency(AdjacencyKind::Directed));
        assert!((bc[1].raw - 1.0).abs() < f64::EPSILON);
        assert!((bc[1].normalized - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_betweenness_scale_small_graphs() {
        assert!(betweenness_scale(Mode::Undirected, 2).abs() < f64::EPSILON);
        assert!(betweenness_scale(Mode::Directed, 0).abs() < f64::EPSILON);
        assert!((betweenness_scale(Mode::Undirected, 3) - 1.0).abs() < f64::EPSILON);
        assert!((betweenness_scale(Mode::Directed, 4) - 1.0 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_betweenness_dependency_conservation() {
        // Σ_v δ_s(v) = Σ_t (d(s,t) - 1) for every source s
        let g = make_graph(
            6,
            &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1), (2, 6), (6, 4)],
            Mode::Directed,
        );
        let adj = g.adjacency(AdjacencyKind::Directed);
        let bc = betweenness(Mode::Directed, &adj);
        let dists = all_distances(&g);
        let ps = path_summary(Mode::Directed, &dists);
        let total: f64 = bc.iter().map(|b| b.raw).sum();
        let expected = (ps.distance_sum - ps.reachable_pairs) as f64;
        assert!((total - expected).abs() < 1e-9);
    }
}
