use clap::Parser;
use pathbench::{BenchConfig, Selection};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Measure network transit time to a shortest-path server.
///
/// The target is read from the HOST environment variable (`host:port`).
#[derive(Parser, Debug)]
#[command(name = "pathbench")]
#[command(about = "Latency benchmark for shortest-path servers", long_about = None)]
struct Args {
    /// Node list, identifiers separated by single spaces
    #[arg(long, default_value = pathbench::config::DEFAULT_NODES_FILE)]
    nodes: PathBuf,

    /// Number of queries to send
    #[arg(short = 'n', long, default_value_t = pathbench::config::DEFAULT_SAMPLES)]
    samples: usize,

    /// Seed for endpoint sampling (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Fixed origin for every query (requires --destination)
    #[arg(long, requires = "destination")]
    origin: Option<String>,

    /// Fixed destination for every query (requires --origin)
    #[arg(long, requires = "origin")]
    destination: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pathbench=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // fatal errors are reported once, by anyhow on exit
    let config = build_config(args)?;

    tracing::info!(
        "Benchmarking {} with {} queries ({:?})",
        config.host,
        config.samples,
        config.selection
    );

    let report = pathbench::execute(&config).await?;
    report.print();
    Ok(())
}

fn build_config(args: Args) -> pathbench::BenchResult<BenchConfig> {
    let mut config = BenchConfig::from_env()?;
    config.nodes_file = args.nodes;
    config.samples = args.samples;
    config.seed = args.seed;
    config.selection = Selection::from_pair(args.origin, args.destination)?;
    config.validate()?;
    Ok(config)
}
