//! Caller-side edit state for building a graph by hand.
//!
//! The metrics engine only ever sees immutable [`Graph`] snapshots. An
//! [`EditSession`] owns the mutable part (vertex count, edge list, mode) and
//! builds a fresh snapshot whenever metrics are requested.
//!
//! Vertices are numbered `1..=n`. Edges are kept in insertion order and keyed
//! by the current mode's identity rule; changing the mode rebuilds the edge
//! list under the new rule.

use std::collections::HashSet;
use std::str::FromStr;

use crate::error::GraphError;
use crate::graph::{compute_snapshot, Edge, Graph, MetricsSnapshot, Mode, VertexId};

/// Largest vertex count a session or `nodes` count may ask for.
pub const MAX_NODES: u32 = 1000;

/// Result of a [`EditSession::connect`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Added,
    AlreadyExists,
}

/// Mutable graph under construction.
#[derive(Debug, Clone)]
pub struct EditSession {
    vertex_count: u32,
    mode: Mode,
    edges: Vec<Edge>,
}

impl EditSession {
    pub fn new(vertex_count: u32, mode: Mode) -> Self {
        Self {
            vertex_count,
            mode,
            edges: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertex ids `1..=n`.
    pub fn vertices(&self) -> Vec<VertexId> {
        (1..=self.vertex_count).filter_map(VertexId::new).collect()
    }

    /// Start over with `vertex_count` vertices and no edges.
    pub fn reset(&mut self, vertex_count: u32) {
        self.vertex_count = vertex_count;
        self.edges.clear();
    }

    fn check(&self, edge: &Edge) -> Result<(), GraphError> {
        if edge.is_self_loop() {
            return Err(GraphError::SelfLoop(edge.from));
        }
        for v in [edge.from, edge.to] {
            if v.get() > self.vertex_count {
                return Err(GraphError::UnknownVertex {
                    from: edge.from,
                    to: edge.to,
                    missing: v,
                });
            }
        }
        Ok(())
    }

    /// Add an edge unless an equal one (under the current mode) exists.
    pub fn connect(&mut self, from: VertexId, to: VertexId) -> Result<Connection, GraphError> {
        let edge = Edge::new(from, to);
        self.check(&edge)?;
        let key = edge.key(self.mode);
        if self.edges.iter().any(|e| e.key(self.mode) == key) {
            return Ok(Connection::AlreadyExists);
        }
        self.edges.push(edge);
        Ok(Connection::Added)
    }

    /// Remove the edge equal to `from`-`to` under the current mode.
    pub fn disconnect(&mut self, from: VertexId, to: VertexId) -> bool {
        let key = Edge::new(from, to).key(self.mode);
        let before = self.edges.len();
        self.edges.retain(|e| e.key(self.mode) != key);
        self.edges.len() != before
    }

    /// Remove every edge, returning how many were removed.
    pub fn clear_edges(&mut self) -> usize {
        std::mem::take(&mut self.edges).len()
    }

    /// Switch mode and rebuild the edge list under the new identity rule.
    ///
    /// First occurrences win. Returns the number of edges merged away, which
    /// is only non-zero when reciprocal directed edges collapse into one
    /// undirected edge.
    pub fn set_mode(&mut self, mode: Mode) -> usize {
        self.mode = mode;
        let mut seen = HashSet::with_capacity(self.edges.len());
        let before = self.edges.len();
        self.edges.retain(|e| seen.insert(e.key(mode)));
        let merged = before - self.edges.len();
        if merged > 0 {
            tracing::debug!("Merged {} edges after switching to {} mode", merged, mode);
        }
        merged
    }

    /// Immutable snapshot of the current state.
    pub fn snapshot(&self) -> Graph {
        Graph::new(self.vertices(), self.edges.iter().copied(), self.mode)
    }

    /// Fresh metrics for the current state.
    pub fn metrics(&self) -> MetricsSnapshot {
        compute_snapshot(&self.snapshot())
    }

    /// Apply a command, returning the feedback line for the user.
    pub fn apply(&mut self, command: &SessionCommand) -> Result<Feedback, GraphError> {
        let feedback = match *command {
            SessionCommand::Nodes(n) => {
                self.reset(n);
                Feedback::changed(format!(
                    "Created a network with {} vertices. Connect two vertices to draw an edge.",
                    n
                ))
            }
            SessionCommand::Connect(edge) => {
                let label = edge.label(self.mode);
                match self.connect(edge.from, edge.to)? {
                    Connection::Added => Feedback::changed(format!("Edge {} added.", label)),
                    Connection::AlreadyExists => {
                        Feedback::unchanged(format!("Edge {} already exists.", label))
                    }
                }
            }
            SessionCommand::Disconnect(edge) => {
                let label = edge.label(self.mode);
                if self.disconnect(edge.from, edge.to) {
                    Feedback::changed(format!("Edge {} removed.", label))
                } else {
                    Feedback::unchanged(format!("Edge {} does not exist.", label))
                }
            }
            SessionCommand::Clear => {
                self.clear_edges();
                Feedback::changed("All edges cleared. You can draw new edges.".to_string())
            }
            SessionCommand::Mode(mode) => match self.set_mode(mode) {
                0 => Feedback::changed(format!("Mode set to {}.", mode)),
                merged => Feedback::changed(format!(
                    "Mode set to {}; {} reciprocal edges merged.",
                    mode, merged
                )),
            },
            SessionCommand::Show | SessionCommand::Help | SessionCommand::Quit => {
                Feedback::unchanged(String::new())
            }
        };
        Ok(feedback)
    }
}

/// User-facing outcome of [`EditSession::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    /// Whether the graph structure (or mode) changed
    pub changed: bool,
}

impl Feedback {
    fn changed(message: String) -> Self {
        Self {
            message,
            changed: true,
        }
    }

    fn unchanged(message: String) -> Self {
        Self {
            message,
            changed: false,
        }
    }
}

/// One line of the interactive session protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// `nodes N`: new network with N vertices (1..=MAX_NODES)
    Nodes(u32),
    /// `connect A B`, `connect A-B` or just `A-B`
    Connect(Edge),
    /// `disconnect A B`
    Disconnect(Edge),
    /// `clear`
    Clear,
    /// `mode directed|undirected`
    Mode(Mode),
    /// `show`
    Show,
    /// `help`
    Help,
    /// `quit` / `exit`
    Quit,
}

impl SessionCommand {
    pub const HELP: &'static str = "\
commands:
  nodes N            create a network with vertices 1..=N, N <= 1000 (drops edges)
  connect A B        add an edge (also: connect A-B, or just A-B)
  disconnect A B     remove an edge
  clear              remove all edges
  mode directed      switch edge interpretation (directed|undirected)
  show               print the current metrics
  help               print this help
  quit               leave the session";

    pub fn parse(line: &str) -> Result<Self, GraphError> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(GraphError::InvalidCommand("empty line".to_string()));
        };
        let rest: Vec<&str> = parts.collect();
        let invalid = || GraphError::InvalidCommand(line.trim().to_string());

        let edge_arg = |rest: &[&str]| -> Result<Edge, GraphError> {
            match rest {
                [single] => single.parse(),
                [a, b] => Ok(Edge::new(a.parse()?, b.parse()?)),
                _ => Err(invalid()),
            }
        };

        match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("nodes" | "create", [n]) => match n.parse::<u32>() {
                Ok(n) if (1..=MAX_NODES).contains(&n) => Ok(Self::Nodes(n)),
                Ok(_) => Err(GraphError::InvalidCommand(format!(
                    "nodes expects a count between 1 and {}",
                    MAX_NODES
                ))),
                Err(_) => Err(invalid()),
            },
            ("connect" | "add", args) => edge_arg(args).map(Self::Connect),
            ("disconnect" | "remove", args) => edge_arg(args).map(Self::Disconnect),
            ("clear", []) => Ok(Self::Clear),
            ("mode", [m]) => m.parse().map(Self::Mode),
            ("show", []) => Ok(Self::Show),
            ("help" | "?", []) => Ok(Self::Help),
            ("quit" | "exit", []) => Ok(Self::Quit),
            (_, []) => head.parse().map(Self::Connect).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for SessionCommand {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
