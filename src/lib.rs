//! Network Metrics
//!
//! A structural metrics engine for small, hand-built graphs:
//! - Degree (plain, in, out) and local / average clustering coefficients
//! - Average shortest-path length, diameter and reachability
//! - Closeness centrality as exact fractions
//! - Betweenness centrality via Brandes' algorithm, directed or undirected
//!
//! The engine is a pure function of an immutable [`graph::Graph`]; the
//! [`session`] module holds the mutable edit state a caller builds it from.

pub mod error;
pub mod graph;
pub mod report;
pub mod session;

pub use error::GraphError;
pub use graph::{compute_metrics, compute_snapshot, Graph, GraphSpec, MetricsSnapshot, Mode};
pub use report::OutputFormat;
pub use session::MAX_NODES;

use anyhow::{ensure, Context, Result};
use graph::Edge;
use serde::Deserialize;
use std::path::Path;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "netmetrics.yaml";

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub report: ReportYamlConfig,
    pub graph: GraphYamlConfig,
}

/// Report rendering section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportYamlConfig {
    /// Decimals for clustering, betweenness and path length
    pub precision: usize,
    pub format: OutputFormat,
}

impl Default for ReportYamlConfig {
    fn default() -> Self {
        Self {
            precision: 3,
            format: OutputFormat::Text,
        }
    }
}

/// Graph construction section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GraphYamlConfig {
    /// Mode used when neither the input nor the command line sets one
    pub mode: Mode,
    /// Reject dangling edges, self-loops and repeated vertices instead of
    /// dropping them
    pub strict: bool,
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub precision: usize,
    pub format: OutputFormat,
    pub default_mode: Mode,
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_yaml(YamlConfig::default())
    }
}

impl Config {
    /// Load `netmetrics.yaml` from the CWD (if present), then apply env vars.
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// An explicit `yaml_path` must exist and parse. Without one, the default
    /// file is tried and silently skipped when missing.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        // 1. Load YAML config (or defaults if file not found)
        let yaml = match yaml_path {
            Some(path) => Self::read_yaml(path)?,
            None => Self::load_yaml(Path::new(DEFAULT_CONFIG_FILE)),
        };

        // 2. Apply env var overrides
        let mut config = Self::from_yaml(yaml);
        if let Some(precision) = env_parse("NETMETRICS_PRECISION") {
            config.precision = precision;
        }
        if let Some(format) = env_parse("NETMETRICS_FORMAT") {
            config.format = format;
        }
        if let Some(mode) = env_parse("NETMETRICS_MODE") {
            config.default_mode = mode;
        }
        if let Some(strict) = env_flag("NETMETRICS_STRICT") {
            config.strict = strict;
        }
        Ok(config)
    }

    fn from_yaml(yaml: YamlConfig) -> Self {
        Self {
            precision: yaml.report.precision,
            format: yaml.report.format,
            default_mode: yaml.graph.mode,
            strict: yaml.graph.strict,
        }
    }

    fn read_yaml(path: &Path) -> Result<YamlConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(path: &Path) -> YamlConfig {
        if !path.exists() {
            tracing::debug!(
                "No config file at {}, using env vars / defaults",
                path.display()
            );
            return YamlConfig::default();
        }
        match Self::read_yaml(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}. Using defaults.", e);
                YamlConfig::default()
            }
        }
    }
}

// ============================================================================
// Graph input
// ============================================================================

/// Read a [`GraphSpec`] from a `.json`, `.yaml` or `.yml` file.
///
/// Files without a YAML extension are parsed as JSON. A `nodes` count above
/// [`MAX_NODES`] is rejected.
pub fn load_graph_spec(path: &Path) -> Result<GraphSpec> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let spec: GraphSpec = if is_yaml {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML graph {}", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON graph {}", path.display()))?
    };
    if let Some(n) = spec.nodes {
        ensure!(
            n <= MAX_NODES,
            "{} declares {} nodes (at most {} supported)",
            path.display(),
            n,
            MAX_NODES
        );
    }
    Ok(spec)
}

/// Command-line adjustments applied on top of a loaded spec and config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeOverrides {
    /// Vertices `1..=n`; combined with the file's count by taking the larger
    pub nodes: Option<u32>,
    /// Appended after the file's edges
    pub edges: Vec<Edge>,
    /// Replaces the file's mode when set
    pub mode: Option<Mode>,
    pub format: Option<OutputFormat>,
    pub precision: Option<usize>,
    /// Turns strict construction on; never turns it off
    pub strict: bool,
}

impl ComputeOverrides {
    /// Mode selected by a `--directed` / `--undirected` flag pair.
    pub fn mode_from_flags(directed: bool, undirected: bool) -> Option<Mode> {
        match (directed, undirected) {
            (true, _) => Some(Mode::Directed),
            (false, true) => Some(Mode::Undirected),
            (false, false) => None,
        }
    }

    pub fn apply(self, spec: &mut GraphSpec, config: &mut Config) {
        if let Some(n) = self.nodes {
            spec.nodes = Some(spec.nodes.map_or(n, |existing| existing.max(n)));
        }
        spec.edges.extend(self.edges);
        if let Some(mode) = self.mode {
            spec.mode = Some(mode);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        config.strict |= self.strict;
    }
}

/// Build the graph a spec describes, using the configured default mode when
/// the spec names none and the configured strictness.
pub fn build_graph(spec: GraphSpec, config: &Config) -> Result<Graph, GraphError> {
    let mode = spec.mode.unwrap_or(config.default_mode);
    let vertices = spec.vertex_ids();
    if config.strict {
        Graph::try_new(vertices, spec.edges, mode)
    } else {
        Ok(Graph::new(vertices, spec.edges, mode))
    }
}

/// Parse a boolean env var. Accepts `true`/`false`, `1`/`0`, `yes`/`no` and
/// `on`/`off` in any case; anything else is ignored with a warning.
fn env_flag(key: &str) -> Option<bool> {
    let raw = std::env::var(key).ok()?;
    let flag = parse_flag(&raw);
    if flag.is_none() {
        tracing::warn!("Ignoring invalid value '{}' for {}", raw, key);
    }
    flag
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse an env var, ignoring (with a warning) values that do not parse.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid value '{}' for {}", raw, key);
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
