//! wordgraph CLI binary.
//!
//! Loads a corpus file, builds its word graph and runs one query against it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rapid_wordgraph::graph::export::{write_edge_list, write_nodes};
use rapid_wordgraph::{
    EdgeSelection, FileSink, WalkStop, WordGraphConfig, WordGraphError, WordGraphSession,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "wordgraph",
    version,
    about = "Query the word-adjacency graph of a text corpus"
)]
struct Cli {
    /// Corpus text file
    #[arg(short, long, default_value = "input.txt")]
    input: PathBuf,

    /// JSON config file (fields: min_token_length, seed, edge_selection, parallel_threshold)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Random-walk edge policy, overrides the config file
    #[arg(long, value_enum)]
    edge_selection: Option<EdgeSelectionArg>,

    /// Enable info logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print nodes and edges of the corpus graph
    Graph {
        /// Print the adjacency snapshot as JSON
        #[arg(long)]
        json: bool,
        /// Also write one word per line to this file
        #[arg(long)]
        nodes_out: Option<PathBuf>,
        /// Also write `source target weight` lines to this file
        #[arg(long)]
        edges_out: Option<PathBuf>,
    },
    /// List bridge words from WORD1 to WORD2
    Bridge { word1: String, word2: String },
    /// Insert bridge words into new text
    Generate { text: String },
    /// List every shortest path from WORD1 to WORD2
    Shortest { word1: String, word2: String },
    /// Run a random walk and save it
    Walk {
        /// Output file for the walk
        #[arg(short, long, default_value = "random_walk.txt")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EdgeSelectionArg {
    Uniform,
    Weighted,
}

impl From<EdgeSelectionArg> for EdgeSelection {
    fn from(arg: EdgeSelectionArg) -> Self {
        match arg {
            EdgeSelectionArg::Uniform => EdgeSelection::Uniform,
            EdgeSelectionArg::Weighted => EdgeSelection::Weighted,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<WordGraphConfig> {
    let mut config = match &cli.config {
        Some(path) => WordGraphConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WordGraphConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(selection) = cli.edge_selection {
        config = config.with_edge_selection(selection.into());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let corpus = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading corpus {}", cli.input.display()))?;

    info!("wordgraph v{}", rapid_wordgraph::VERSION);
    let mut session = WordGraphSession::new(&corpus, config)?;

    match cli.command {
        Command::Graph {
            json,
            nodes_out,
            edges_out,
        } => {
            let graph = session.graph();
            if json {
                println!("{}", session.snapshot().to_json()?);
            } else {
                let nodes: Vec<&str> = graph.nodes().collect();
                println!("Nodes: {}", nodes.join(", "));
                let edges: Vec<String> = graph
                    .edges()
                    .map(|(a, b, w)| format!("{a}->{b} ({w})"))
                    .collect();
                println!("Edges: {}", edges.join(", "));
            }
            if let Some(path) = nodes_out {
                let file = File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                write_nodes(graph, BufWriter::new(file))?;
            }
            if let Some(path) = edges_out {
                let file = File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                write_edge_list(graph, BufWriter::new(file))?;
            }
        }
        Command::Bridge { word1, word2 } => match session.bridge_words(&word1, &word2) {
            Ok(bridges) if bridges.is_empty() => {
                println!("No bridge words from \"{word1}\" to \"{word2}\"!");
            }
            Ok(bridges) => {
                println!(
                    "The bridge words from \"{word1}\" to \"{word2}\" are: {}",
                    bridges.join(", ")
                );
            }
            Err(WordGraphError::NodeNotFound { words }) => {
                println!("No {} in the graph!", quoted(&words));
            }
            Err(e) => return Err(e.into()),
        },
        Command::Generate { text } => {
            println!("{}", session.generate_new_text(&text).join(" "));
        }
        Command::Shortest { word1, word2 } => match session.shortest_paths(&word1, &word2) {
            Ok(paths) if paths.is_empty() => {
                println!("\"{word1}\" and \"{word2}\" are unreachable!");
            }
            Ok(paths) => {
                println!("Shortest path length: {}", paths[0].cost);
                for (i, path) in paths.iter().enumerate() {
                    println!("Path {}: {}", i + 1, path.arrow_joined());
                }
            }
            Err(WordGraphError::NodeNotFound { words }) => {
                println!("No {} in the graph!", quoted(&words));
            }
            Err(e) => return Err(e.into()),
        },
        Command::Walk { out } => {
            let mut sink = FileSink::new(&out);
            let walk = session.random_walk_into(&mut sink)?;
            println!("{}", walk.sentence());
            match &walk.stop {
                WalkStop::DeadEnd => info!("walk stopped at a dead end"),
                WalkStop::RepeatedEdge { from, to } => {
                    info!(%from, %to, "walk stopped on a repeated edge")
                }
            }
            println!("Written to {}", out.display());
        }
    }

    Ok(())
}

fn quoted(words: &[String]) -> String {
    words
        .iter()
        .map(|w| format!("\"{w}\""))
        .collect::<Vec<_>>()
        .join(" or ")
}
