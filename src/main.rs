//! Throughput benchmark of catalog-to-CIRS transformations.
//!
//! Prints two lines on stdout, the transforms per second into one fixed frame and into
//! one random frame per source. `--recompute` adds a third line, the fixed frame with its
//! geometry recomputed for every source. Diagnostics go to stderr.

use clap::{ArgAction, Parser};

use cirs_bench::benchmark::run_benchmark;
use cirs_bench::cirs_errors::CirsError;
use cirs_bench::config::BenchConfig;
use cirs_bench::constants::DEFAULT_SOURCE_COUNT;
use cirs_bench::transform::CirsTransformer;

#[derive(Parser, Debug)]
#[command(name = "cirs-bench")]
#[command(about = "Benchmark catalog to CIRS apparent place transformations")]
#[command(version)]
struct Cli {
    /// Number of synthetic catalog sources
    #[arg(default_value_t = DEFAULT_SOURCE_COUNT)]
    sources: usize,

    /// Seed of the random generator (catalog and random frames)
    #[arg(long)]
    seed: Option<u64>,

    /// Also time the fixed frame with its geometry recomputed for every source
    #[arg(long)]
    recompute: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), CirsError> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(level)
        .init();

    let config = BenchConfig::builder()
        .n_sources(cli.sources)
        .maybe_seed(cli.seed)
        .recompute_frame_phase(cli.recompute)
        .build()?;

    let mut transformer = CirsTransformer::new();
    let report = run_benchmark(&config, &mut transformer)?;
    tracing::debug!(
        geometry_builds = transformer.geometry_builds(),
        "frame geometries computed"
    );

    println!("{report}");
    Ok(())
}
