//! Network Metrics - CLI
//!
//! Compute structural metrics for a graph given on the command line or in a
//! JSON / YAML file, or build one interactively.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use network_metrics::graph::Edge;
use network_metrics::report::render;
use network_metrics::session::{EditSession, SessionCommand};
use network_metrics::{
    build_graph, compute_snapshot, load_graph_spec, ComputeOverrides, Config, GraphSpec, Mode,
    OutputFormat, MAX_NODES,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "netmetrics")]
#[command(about = "Structural metrics for small hand-built graphs")]
struct Cli {
    /// Config file (defaults to ./netmetrics.yaml when present)
    #[arg(long, global = true, env = "NETMETRICS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a metrics snapshot once and print it
    Compute {
        /// Graph file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Add vertices 1..=N
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_NODES)))]
        nodes: Option<u32>,

        /// Edge as A-B, A->B or A,B (repeatable)
        #[arg(short = 'e', long = "edge")]
        edges: Vec<Edge>,

        /// Interpret edges as directed
        #[arg(long, conflicts_with = "undirected")]
        directed: bool,

        /// Interpret edges as undirected
        #[arg(long)]
        undirected: bool,

        /// Output format (text, json, yaml)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Decimals for real-valued metrics in text output
        #[arg(short, long)]
        precision: Option<usize>,

        /// Reject dangling edges, self-loops and repeated vertices
        #[arg(long)]
        strict: bool,
    },

    /// Build a graph interactively, one command per line
    Session {
        /// Initial number of vertices
        #[arg(
            short,
            long,
            default_value = "5",
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_NODES))
        )]
        nodes: u32,

        /// Start in directed mode
        #[arg(long)]
        directed: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,network_metrics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Compute {
            input,
            nodes,
            edges,
            directed,
            undirected,
            format,
            precision,
            strict,
        } => {
            let mut spec = match input {
                Some(path) => load_graph_spec(&path)?,
                None => GraphSpec::default(),
            };
            ComputeOverrides {
                nodes,
                edges,
                mode: ComputeOverrides::mode_from_flags(directed, undirected),
                format,
                precision,
                strict,
            }
            .apply(&mut spec, &mut config);
            run_compute(&config, spec)
        }
        Commands::Session { nodes, directed } => {
            let mode = if directed {
                Mode::Directed
            } else {
                config.default_mode
            };
            run_session(&config, EditSession::new(nodes, mode))
        }
    }
}

fn run_compute(config: &Config, spec: GraphSpec) -> Result<()> {
    let graph = build_graph(spec, config)?;
    tracing::info!(
        "Computing metrics for {} vertices, {} edges ({} mode)",
        graph.vertex_count(),
        graph.edge_count(),
        graph.mode()
    );

    let snapshot = compute_snapshot(&graph);
    println!("{}", render(&snapshot, config.format, config.precision)?);
    Ok(())
}

fn run_session(config: &Config, mut session: EditSession) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!(
        "Network with {} vertices ({} mode). Type 'help' for commands.",
        session.vertex_count(),
        session.mode()
    );
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            print!("> ");
            stdout.flush()?;
            continue;
        }

        match SessionCommand::parse(&line) {
            Ok(SessionCommand::Quit) => break,
            Ok(SessionCommand::Help) => println!("{}", SessionCommand::HELP),
            Ok(SessionCommand::Show) => {
                println!("{}", render(&session.metrics(), config.format, config.precision)?);
            }
            Ok(command) => match session.apply(&command) {
                Ok(feedback) => {
                    println!("{}", feedback.message);
                    if feedback.changed {
                        println!(
                            "{}",
                            render(&session.metrics(), config.format, config.precision)?
                        );
                    }
                }
                Err(e) => println!("error: {}", e),
            },
            Err(e) => println!("error: {}", e),
        }

        print!("> ");
        stdout.flush()?;
    }

    Ok(())
}
