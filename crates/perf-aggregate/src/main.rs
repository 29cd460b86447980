use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod aggregate;
mod counters;
mod parse;
mod report;

use aggregate::aggregate;

/// Sums hardware event counts from `perf script` output for one function
#[derive(Debug, Parser)]
#[command(name = "perf-aggregate")]
struct Cli {
    /// Text output captured from `perf script`
    perf_script: PathBuf,

    /// Function whose samples to aggregate; namespace prefixes and
    /// `+offset` suffixes in the log are stripped before comparison
    function: String,

    /// Verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Usage problems exit with status 1, not clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let counters = aggregate(&cli.perf_script, &cli.function)?;
    let percent = counters.l1_miss_percent()?;
    print!("{}", report::render(&counters, percent));

    Ok(())
}
