use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading the cache hierarchy
#[derive(Error, Debug)]
pub enum TopologyError {
    /// A sysfs size file was missing or unreadable
    #[error("failed to read cache size from {path}: {source}")]
    Io {
        /// Path of the size file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A size file held something other than `<decimal>K`
    #[error("malformed cache size string {0:?}")]
    MalformedSize(String),
}

/// One level of the data-cache hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLevel {
    /// Capacity of this cache level in bytes
    pub bytes: u64,
    /// Human-readable level name ("L1", "L2", "L3")
    pub label: &'static str,
}

/// Where the kernel exposes cpu0's cache descriptions.
pub const SYSFS_CACHE_DIR: &str = "/sys/devices/system/cpu/cpu0/cache";

// index1 is the L1 instruction cache; only the data caches matter here.
const LEVELS: [(usize, &'static str); 3] = [(0, "L1"), (2, "L2"), (3, "L3")];

/// Reads the data-cache hierarchy of the running machine.
///
/// Returns the levels in `[L1, L2, L3]` order. Any missing or unreadable
/// size file fails the whole read; there is no partial result.
///
/// # Errors
///
/// * [`TopologyError::Io`] when a size file cannot be read
/// * [`TopologyError::MalformedSize`] when a size string does not parse
pub fn read() -> Result<Vec<CacheLevel>, TopologyError> {
    read_from(Path::new(SYSFS_CACHE_DIR))
}

/// Reads the cache hierarchy from an alternate sysfs-style root.
///
/// `cache_dir` must contain `index{0,2,3}/size` files in the same layout
/// the kernel uses under [`SYSFS_CACHE_DIR`].
pub fn read_from(cache_dir: &Path) -> Result<Vec<CacheLevel>, TopologyError> {
    LEVELS
        .iter()
        .map(|&(index, label)| {
            let path = cache_dir.join(format!("index{index}/size"));
            let text = fs::read_to_string(&path).map_err(|source| TopologyError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(CacheLevel {
                bytes: parse_size(&text)?,
                label,
            })
        })
        .collect()
}

/// Parses a sysfs cache size string into a byte count.
///
/// The kernel prints these as a decimal number of kibibytes with a `K`
/// suffix and a trailing newline, e.g. `"32K\n"` for a 32 KiB cache.
pub fn parse_size(text: &str) -> Result<u64, TopologyError> {
    let trimmed = text.trim_end();
    let kib: u64 = trimmed
        .strip_suffix('K')
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| TopologyError::MalformedSize(trimmed.to_string()))?;
    Ok(kib * 1024)
}
