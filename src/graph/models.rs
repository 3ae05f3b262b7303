//! Network metrics data models.
//!
//! Defines the value types shared by every layer of the engine:
//!
//! ## Input types
//! - [`VertexId`]: opaque positive vertex identifier
//! - [`Mode`]: directed / undirected interpretation of the edge set
//! - [`Edge`]: ordered `(from, to)` pair of vertex ids
//! - [`GraphSpec`]: serde document describing a graph (JSON or YAML)
//!
//! ## Output types
//! - [`Fraction`]: exact numerator/denominator pair used for closeness
//! - [`VertexMetrics`]: per-vertex degree, clustering and centrality scores
//! - [`MetricsSnapshot`]: complete result of one metrics computation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::GraphError;

// ============================================================================
// Input types
// ============================================================================

/// Identifier of a vertex. Always a positive integer.
///
/// Ordering is numeric. The engine itself reports vertices in insertion order,
/// so the numeric order carries no meaning for the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(NonZeroU32);

impl VertexId {
    /// Create an id, returning `None` for zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw integer value.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for VertexId {
    type Error = GraphError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| GraphError::InvalidVertexId(raw.to_string()))
    }
}

impl FromStr for VertexId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| GraphError::InvalidVertexId(trimmed.to_string()))
    }
}

/// How edges are interpreted for one graph snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// `(a, b)` and `(b, a)` are the same edge.
    #[default]
    Undirected,
    /// `(a, b)` and `(b, a)` are distinct edges.
    Directed,
}

impl Mode {
    pub fn is_directed(self) -> bool {
        matches!(self, Self::Directed)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undirected => write!(f, "undirected"),
            Self::Directed => write!(f, "directed"),
        }
    }
}

impl FromStr for Mode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undirected" | "u" => Ok(Self::Undirected),
            "directed" | "d" => Ok(Self::Directed),
            other => Err(GraphError::InvalidMode(other.to_string())),
        }
    }
}

/// An edge between two vertices, as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
}

impl Edge {
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self { from, to }
    }

    /// Identity of this edge under the equality rule of `mode`.
    ///
    /// Undirected edges are keyed by the unordered pair (smaller id first),
    /// directed edges by the ordered pair.
    pub fn key(&self, mode: Mode) -> (VertexId, VertexId) {
        match mode {
            Mode::Directed => (self.from, self.to),
            Mode::Undirected if self.from <= self.to => (self.from, self.to),
            Mode::Undirected => (self.to, self.from),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Human-readable label: `"1-2"` for undirected, `"1->2"` for directed.
    pub fn label(&self, mode: Mode) -> String {
        let (a, b) = self.key(mode);
        match mode {
            Mode::Undirected => format!("{}-{}", a, b),
            Mode::Directed => format!("{}->{}", a, b),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Edge {
    type Err = GraphError;

    /// Accepts `"1-2"`, `"1->2"` and `"1,2"` (surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (a, b) = trimmed
            .split_once("->")
            .or_else(|| trimmed.split_once('-'))
            .or_else(|| trimmed.split_once(','))
            .ok_or_else(|| GraphError::InvalidEdge(trimmed.to_string()))?;
        let from = a
            .parse::<VertexId>()
            .map_err(|_| GraphError::InvalidEdge(trimmed.to_string()))?;
        let to = b
            .parse::<VertexId>()
            .map_err(|_| GraphError::InvalidEdge(trimmed.to_string()))?;
        Ok(Self { from, to })
    }
}

/// Serializable description of a graph.
///
/// Vertices are either listed explicitly or given as a count `nodes: n`,
/// which expands to the ids `1..=n`. When both are present the explicit list
/// comes first, followed by any counted ids not already listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Edge interpretation; callers fall back to their configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub vertices: Vec<VertexId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u32>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSpec {
    /// Ordered vertex list described by this spec (duplicates preserved).
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        let mut ids = self.vertices.clone();
        if let Some(n) = self.nodes {
            ids.extend((1..=n).filter_map(VertexId::new).filter(|v| !self.vertices.contains(v)));
        }
        ids
    }
}

// ============================================================================
// Output types
// ============================================================================

/// Exact non-negative rational `numerator / denominator`.
///
/// The denominator is always at least 1. Values are kept as produced (not
/// reduced) so `2/4` and `1/2` are distinct representations; use
/// [`Fraction::reduced`] to compare by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFraction")]
pub struct Fraction {
    numerator: u64,
    denominator: u64,
}

#[derive(Deserialize)]
struct RawFraction {
    numerator: u64,
    denominator: u64,
}

impl TryFrom<RawFraction> for Fraction {
    type Error = String;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        Fraction::new(raw.numerator, raw.denominator)
            .ok_or_else(|| "fraction denominator must be at least 1".to_string())
    }
}

impl Fraction {
    /// `0/1`.
    pub const ZERO: Fraction = Fraction {
        numerator: 0,
        denominator: 1,
    };

    /// Returns `None` when `denominator` is zero.
    pub fn new(numerator: u64, denominator: u64) -> Option<Self> {
        (denominator > 0).then_some(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Lowest-terms form of the same value. `0/d` reduces to `0/1`.
    pub fn reduced(&self) -> Self {
        let g = gcd(self.numerator, self.denominator);
        Self {
            numerator: self.numerator / g,
            denominator: self.denominator / g,
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// Per-vertex metrics computed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexMetrics {
    pub id: VertexId,
    /// Number of distinct neighbors, direction ignored
    pub degree: usize,
    /// Incoming edges (equals `degree` in undirected mode)
    pub in_degree: usize,
    /// Outgoing edges (equals `degree` in undirected mode)
    pub out_degree: usize,
    /// Local clustering coefficient (0.0–1.0) on the undirected view
    pub local_clustering: f64,
    /// `1 / S` where S is the distance sum to reachable vertices
    pub closeness_raw: Fraction,
    /// `R / ((V-1) * S)` where R is the reachable vertex count
    pub closeness_normalized: Fraction,
    /// Sum of pair dependencies (halved in undirected mode)
    pub betweenness_raw: f64,
    /// `betweenness_raw` scaled by the mode's normalization factor
    pub betweenness_normalized: f64,
}

/// Complete result of a metrics computation over one graph snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub mode: Mode,
    pub vertex_count: usize,
    pub edge_count: usize,
    /// Per-vertex metrics in vertex insertion order
    pub vertices: Vec<VertexMetrics>,
    /// Mean shortest-path length over reachable distinct pairs
    pub average_path_length: f64,
    /// Mean of the local clustering coefficients
    pub average_clustering: f64,
    /// Longest shortest-path distance over reachable pairs
    pub diameter: u32,
    /// Distinct pairs with a path (ordered when directed, unordered otherwise)
    pub reachable_pair_count: u64,
    /// `V(V-1)` when directed, `V(V-1)/2` when undirected
    pub all_pairs_count: u64,
    /// Weakly connected components
    pub component_count: usize,
    /// `edge_count / all_pairs_count` (0 when there are no pairs)
    pub density: f64,
}

impl MetricsSnapshot {
    /// True when every distinct pair is reachable.
    pub fn is_connected(&self) -> bool {
        self.reachable_pair_count == self.all_pairs_count
    }

    /// Look up the metrics of a single vertex.
    pub fn vertex(&self, id: VertexId) -> Option<&VertexMetrics> {
        self.vertices.iter().find(|m| m.id == id)
    }
}

// ============================================================================
// Tests
// ============================================================================
