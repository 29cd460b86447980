use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::counters::EventCounters;
use crate::parse::{leaf_name, split_fields};

// 0-indexed columns of the `perf script` sample format.
const COUNT_FIELD: usize = 3;
const EVENT_FIELD: usize = 4;
const SYMBOL_FIELD: usize = 6;

/// Errors that can occur while aggregating a perf script log
#[derive(Error, Debug)]
pub enum AggregateError {
    /// The log file was missing or unreadable
    #[error("failed to read perf script output at {path}: {source}")]
    FileAccess {
        /// Path of the log file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A line had too few fields to carry a symbol
    #[error("line {line}: expected at least 7 fields, found {found}")]
    MissingField {
        /// 1-indexed line number in the log
        line: usize,
        /// Number of fields the split produced
        found: usize,
    },

    /// A matching line carried a non-integer event count
    #[error("line {line}: bad event count {text:?}: {source}")]
    BadCount {
        /// 1-indexed line number in the log
        line: usize,
        /// The offending field text
        text: String,
        /// Underlying parse error
        source: ParseIntError,
    },
}

/// Sums the hardware event counts attributed to `target_function`.
///
/// Scans the log once, line by line. A line contributes when the leaf
/// name of its symbol column equals `target_function`; its count column
/// is then added to the accumulator named by its event column. Lines for
/// other functions are filtered out, as are blank lines and symbols with
/// no resolvable leaf name. Structurally broken lines fail the whole run:
/// the log is trusted tool output, so a short line or a non-numeric count
/// means something upstream went wrong.
pub fn aggregate(path: &Path, target_function: &str) -> Result<EventCounters, AggregateError> {
    let file = File::open(path).map_err(|source| AggregateError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut counters = EventCounters::new();
    let mut matched = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AggregateError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line);
        let symbol = *fields.get(SYMBOL_FIELD).ok_or(AggregateError::MissingField {
            line: index + 1,
            found: fields.len(),
        })?;

        let Some(leaf) = leaf_name(symbol) else {
            continue;
        };
        if leaf != target_function {
            continue;
        }

        let text = fields[COUNT_FIELD];
        let count: u64 = text.parse().map_err(|source| AggregateError::BadCount {
            line: index + 1,
            text: text.to_string(),
            source,
        })?;
        counters.record(fields[EVENT_FIELD], count);
        matched += 1;
    }

    debug!("aggregated {matched} samples for {target_function}");
    Ok(counters)
}
