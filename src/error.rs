//! Error types for graph construction and input parsing.
//!
//! The metrics computation itself is infallible: every division hazard is a
//! guard clause returning a documented sentinel. Errors only arise when a
//! caller asks for strict validation or hands in text that does not parse.

use thiserror::Error;

use crate::graph::models::VertexId;

/// Errors raised while building a graph or parsing user input.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint is not a member of the vertex set.
    #[error("edge {from}-{to} references unknown vertex {missing}")]
    UnknownVertex {
        from: VertexId,
        to: VertexId,
        missing: VertexId,
    },

    /// An edge connects a vertex to itself.
    #[error("self-loop on vertex {0} is not supported")]
    SelfLoop(VertexId),

    /// The same vertex id was listed twice.
    #[error("vertex {0} is listed more than once")]
    DuplicateVertex(VertexId),

    /// A vertex id is zero or not an integer.
    #[error("invalid vertex id '{0}' (expected a positive integer)")]
    InvalidVertexId(String),

    /// An edge literal could not be parsed.
    #[error("invalid edge '{0}' (expected A-B, A->B or A,B)")]
    InvalidEdge(String),

    /// A mode literal could not be parsed.
    #[error("invalid mode '{0}' (expected 'directed' or 'undirected')")]
    InvalidMode(String),

    /// An output format literal could not be parsed.
    #[error("invalid output format '{0}' (expected text, json or yaml)")]
    InvalidFormat(String),

    /// A session command line could not be parsed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(raw: u32) -> VertexId {
        VertexId::new(raw).unwrap()
    }

    #[test]
    fn test_unknown_vertex_message() {
        let err = GraphError::UnknownVertex {
            from: vid(1),
            to: vid(9),
            missing: vid(9),
        };
        assert_eq!(err.to_string(), "edge 1-9 references unknown vertex 9");
    }

    #[test]
    fn test_self_loop_message() {
        assert_eq!(
            GraphError::SelfLoop(vid(4)).to_string(),
            "self-loop on vertex 4 is not supported"
        );
    }
}
