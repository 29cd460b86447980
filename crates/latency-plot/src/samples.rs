use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One measured benchmark data point.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkSample {
    /// Input size in bytes
    pub size: u64,
    /// Inverse throughput in nanoseconds
    pub latency: f64,
    /// Name of the search scheme that produced this sample
    pub scheme_name: String,
}

/// Median latency per input size for one scheme, sorted by size.
#[derive(Debug, PartialEq)]
pub struct SchemeSeries {
    pub scheme: String,
    pub points: Vec<(u64, f64)>,
}

/// Loads the results table from a JSON array of sample records.
pub fn load(path: &Path) -> Result<Vec<BenchmarkSample>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open results file {}", path.display()))?;
    let samples = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed results JSON in {}", path.display()))?;
    Ok(samples)
}

/// Groups samples by scheme and reduces each (scheme, size) group to its
/// median latency. Schemes come back in lexicographic order so series
/// colors and legend entries are stable across runs.
pub fn median_by_scheme(samples: &[BenchmarkSample]) -> Vec<SchemeSeries> {
    let mut grouped: BTreeMap<&str, BTreeMap<u64, Vec<f64>>> = BTreeMap::new();
    for sample in samples {
        grouped
            .entry(&sample.scheme_name)
            .or_default()
            .entry(sample.size)
            .or_default()
            .push(sample.latency);
    }

    grouped
        .into_iter()
        .map(|(scheme, by_size)| SchemeSeries {
            scheme: scheme.to_string(),
            points: by_size
                .into_iter()
                .map(|(size, mut latencies)| (size, median(&mut latencies)))
                .collect(),
        })
        .collect()
}

// Groups are built by pushing at least one sample, so `values` is never
// empty here.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
