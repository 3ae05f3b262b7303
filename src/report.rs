//! Rendering of [`MetricsSnapshot`] for people and for tools.
//!
//! Text output follows the editor's table layout: degree columns (in/out only
//! for directed graphs), closeness as exact fraction strings, and clustering /
//! betweenness as fixed-precision decimals. JSON and YAML serialize the
//! snapshot verbatim.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;
use crate::graph::MetricsSnapshot;

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "table" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(GraphError::InvalidFormat(other.to_string())),
        }
    }
}

/// Render a snapshot in the requested format.
///
/// `precision` is the number of decimals used for real-valued metrics in
/// text output; it does not affect JSON or YAML.
pub fn render(snapshot: &MetricsSnapshot, format: OutputFormat, precision: usize) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot, precision)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(snapshot)?),
    }
}

/// Render the human-readable table plus graph-level summary.
pub fn render_text(snapshot: &MetricsSnapshot, precision: usize) -> String {
    let directed = snapshot.mode.is_directed();
    let p = precision;

    let mut header = vec!["Vertex", "Degree"];
    if directed {
        header.extend(["In", "Out"]);
    }
    header.extend([
        "Clustering",
        "Closeness",
        "Closeness (norm)",
        "Betweenness",
        "Betweenness (norm)",
    ]);

    let rows: Vec<Vec<String>> = snapshot
        .vertices
        .iter()
        .map(|m| {
            let mut row = vec![m.id.to_string(), m.degree.to_string()];
            if directed {
                row.push(m.in_degree.to_string());
                row.push(m.out_degree.to_string());
            }
            row.push(format!("{:.p$}", m.local_clustering));
            row.push(m.closeness_raw.to_string());
            row.push(m.closeness_normalized.to_string());
            row.push(format!("{:.p$}", m.betweenness_raw));
            row.push(format!("{:.p$}", m.betweenness_normalized));
            row
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c, w = *w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 9);
    lines.push(line(&header));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(line(&cells));
    }

    let connectivity = if snapshot.is_connected() {
        "connected"
    } else {
        "disconnected"
    };
    lines.extend([
        String::new(),
        format!(
            "Mode: {}  Vertices: {}  Edges: {}",
            snapshot.mode, snapshot.vertex_count, snapshot.edge_count
        ),
        format!("Average path length: {:.p$}", snapshot.average_path_length),
        format!("Average clustering: {:.p$}", snapshot.average_clustering),
        format!("Diameter: {}", snapshot.diameter),
        format!(
            "Reachable pairs: {} / {} ({})",
            snapshot.reachable_pair_count, snapshot.all_pairs_count, connectivity
        ),
        format!("Components: {}", snapshot.component_count),
        format!("Density: {:.p$}", snapshot.density),
    ]);
    lines.join("\n")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{compute_metrics, Edge, Mode, VertexId};

    fn path_snapshot(mode: Mode) -> MetricsSnapshot {
        let v: Vec<VertexId> = (1..=3).filter_map(VertexId::new).collect();
        let edges = vec![Edge::new(v[0], v[1]), Edge::new(v[1], v[2])];
        compute_metrics(&v, &edges, mode)
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_undirected_hides_in_out() {
        let text = render_text(&path_snapshot(Mode::Undirected), 3);
        let header = text.lines().next().unwrap();
        assert!(header.contains("Degree"));
        assert!(!header.contains("In"));
        assert!(text.contains("Average path length: 1.333"));
        assert!(text.contains("Reachable pairs: 3 / 3 (connected)"));
        assert!(text.contains("1/2"));
    }

    #[test]
    fn test_text_directed_shows_in_out() {
        let text = render_text(&path_snapshot(Mode::Directed), 2);
        let header = text.lines().next().unwrap();
        assert!(header.contains("In"));
        assert!(header.contains("Out"));
        assert!(text.contains("(disconnected)"));
        assert!(text.contains("Density: 0.33"));
    }

    #[test]
    fn test_text_layout_lines() {
        let text = render_text(&path_snapshot(Mode::Undirected), 3);
        let lines: Vec<&str> = text.lines().collect();
        // header + 3 rows + blank + 7 summary lines
        assert_eq!(lines.len(), 12);
        assert!(lines[1].trim_start().starts_with('1'));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Mode: undirected  Vertices: 3  Edges: 2");
        assert_eq!(lines[8], "Diameter: 2");
        assert_eq!(lines[11], "Density: 0.667");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_render_json_roundtrip() {
        let snapshot = path_snapshot(Mode::Undirected);
        let json = render(&snapshot, OutputFormat::Json, 3).unwrap();
        let back: MetricsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_render_yaml_contains_mode() {
        let yaml = render(&path_snapshot(Mode::Directed), OutputFormat::Yaml, 3).unwrap();
        assert!(yaml.contains("mode: directed"));
    }
}
