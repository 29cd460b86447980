use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

mod chart;
mod samples;

/// Where the benchmark harness drops its results table.
const RESULTS_PATH: &str = "results/results.json";
/// Where the rendered chart goes.
const PLOT_PATH: &str = "plots/plot.svg";

const CHART_TITLE: &str = "Search latency by input size";

/// Renders the benchmark results chart with cache-size annotations
#[derive(Debug, Parser)]
#[command(name = "latency-plot")]
struct Cli {
    /// Benchmark results JSON; when the file is absent the run is a
    /// silent no-op
    #[arg(long, default_value = RESULTS_PATH)]
    results: PathBuf,

    /// Output SVG path
    #[arg(long, default_value = PLOT_PATH)]
    out: PathBuf,

    /// Fixed y-axis upper bound; defaults to 1.1x the data maximum
    #[arg(long)]
    ymax: Option<f64>,

    /// Verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if !cli.results.exists() {
        debug!("no results at {}, nothing to plot", cli.results.display());
        return Ok(());
    }

    let samples = samples::load(&cli.results)?;
    if samples.is_empty() {
        warn!("results file {} is empty, skipping plot", cli.results.display());
        return Ok(());
    }
    let series = samples::median_by_scheme(&samples);

    let caches = cache_topology::read().context("failed to read CPU cache topology")?;

    if let Some(parent) = cli.out.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    chart::render(&series, CHART_TITLE, &caches, &cli.out, cli.ymax)?;

    info!("wrote {}", cli.out.display());
    Ok(())
}
