use anyhow::bail;
use clap::Parser;
use digraph::{random_graph_with_rng, Console, DirectedGraph, GraphFile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Interactive editor for directed graphs with integer edge costs
#[derive(Parser, Debug)]
#[command(name = "digraph")]
#[command(about = "Edit, generate and save directed graphs", long_about = None)]
struct Args {
    /// Graph file to load before opening the menu
    #[arg(short, long, conflicts_with = "nodes")]
    load: Option<PathBuf>,

    /// Start from a random graph with this many nodes
    #[arg(long, requires = "edges")]
    nodes: Option<usize>,

    /// Number of edges for the random starting graph
    #[arg(long, requires = "nodes")]
    edges: Option<usize>,

    /// Seed for random generation
    #[arg(long)]
    seed: Option<u64>,

    /// Show the graph in the menu from the start
    #[arg(long)]
    show: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting digraph v{}", env!("CARGO_PKG_VERSION"));

    let mut graph = match (&args.load, args.nodes, args.edges) {
        (Some(path), _, _) => GraphFile::new(path).load()?,
        (None, Some(nodes), Some(edges)) => {
            if edges > nodes.saturating_mul(nodes) {
                bail!("cannot place {} distinct edges between {} nodes", edges, nodes);
            }
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            random_graph_with_rng(&mut rng, nodes, edges)
        }
        _ => DirectedGraph::new(),
    };
    graph.set_hidden(!args.show);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), graph);
    if let Some(seed) = args.seed {
        // keep the menu's generator distinct from the startup one
        console = console.with_seed(seed.wrapping_add(1));
    }
    console.run()?;

    info!("Shutting down...");
    Ok(())
}
