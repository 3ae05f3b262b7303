//! Breadth-first traversal over an [`Adjacency`] view.
//!
//! Two flavours share the same FIFO frontier:
//! - [`bfs_distances`]: hop distances only (path statistics, closeness)
//! - [`shortest_paths`]: distances plus shortest-path counts, predecessor
//!   lists and discovery order (Brandes' betweenness)

use std::collections::VecDeque;

use super::network::Adjacency;

/// Hop distances from one source, indexed by dense vertex index.
///
/// Unreachable vertices hold `None`; there is no "infinity" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distances {
    source: usize,
    dist: Vec<Option<u32>>,
}

impl Distances {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.dist.get(index).copied().flatten()
    }

    /// `(index, distance)` for every reachable vertex, source included.
    pub fn reachable(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (i, d)))
    }

    /// Reachable vertices other than the source, with their distance sum.
    pub fn reach(&self) -> (u64, u64) {
        self.reachable()
            .filter(|&(i, _)| i != self.source)
            .fold((0, 0), |(count, sum), (_, d)| (count + 1, sum + u64::from(d)))
    }
}

/// Single-source hop distances.
///
/// A source outside the adjacency yields an empty (all-unreachable) result.
pub fn bfs_distances(adjacency: &Adjacency, source: usize) -> Distances {
    let n = adjacency.len();
    let mut dist = vec![None; n];
    if source >= n {
        return Distances { source, dist };
    }

    let mut queue = VecDeque::with_capacity(n);
    dist[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let Some(d) = dist[current] else { continue };
        for &next in adjacency.neighbors(current) {
            if dist[next].is_none() {
                dist[next] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }

    Distances { source, dist }
}

/// Shortest-path DAG rooted at one source.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub source: usize,
    /// Hop distance per vertex (`None` = unreachable)
    pub dist: Vec<Option<u32>>,
    /// Number of distinct shortest paths from the source (σ)
    pub sigma: Vec<f64>,
    /// Immediate predecessors on some shortest path
    pub predecessors: Vec<Vec<usize>>,
    /// Vertices in non-decreasing distance order (BFS discovery order)
    pub order: Vec<usize>,
}

/// Augmented BFS producing σ, predecessor lists and discovery order.
pub fn shortest_paths(adjacency: &Adjacency, source: usize) -> ShortestPaths {
    let n = adjacency.len();
    let mut paths = ShortestPaths {
        source,
        dist: vec![None; n],
        sigma: vec![0.0; n],
        predecessors: vec![Vec::new(); n],
        order: Vec::with_capacity(n),
    };
    if source >= n {
        return paths;
    }

    let mut queue = VecDeque::with_capacity(n);
    paths.dist[source] = Some(0);
    paths.sigma[source] = 1.0;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        paths.order.push(v);
        let Some(dv) = paths.dist[v] else { continue };
        for &w in adjacency.neighbors(v) {
            // First visit?
            if paths.dist[w].is_none() {
                paths.dist[w] = Some(dv + 1);
                queue.push_back(w);
            }
            // Shortest path to w via v?
            if paths.dist[w] == Some(dv + 1) {
                paths.sigma[w] += paths.sigma[v];
                paths.predecessors[w].push(v);
            }
        }
    }

    paths
}

// ============================================================================
// Tests
// ============================================================================
