use thiserror::Error;

/// Returned when the miss percentage is requested but no load events were
/// aggregated for the target function.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("no L1-dcache-loads samples were aggregated; cannot compute a miss percentage")]
pub struct ZeroL1Loads;

/// Accumulated hardware event counts for one target function.
///
/// The set of tracked events is fixed; [`EventCounters::record`] silently
/// drops anything outside it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventCounters {
    /// L1 data-cache load operations
    pub l1_dcache_loads: u64,
    /// L1 data-cache loads that missed
    pub l1_dcache_load_misses: u64,
    /// Retired branch instructions
    pub branch_instructions: u64,
    /// Mispredicted branches
    pub branch_misses: u64,
}

impl EventCounters {
    /// Creates a new zeroed counter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` to the accumulator named by `event`.
    ///
    /// Event names outside the tracked set are ignored.
    pub fn record(&mut self, event: &str, count: u64) {
        match event {
            "L1-dcache-loads" => self.l1_dcache_loads += count,
            "L1-dcache-load-misses" => self.l1_dcache_load_misses += count,
            "branch-instructions" => self.branch_instructions += count,
            "branch-misses" => self.branch_misses += count,
            _ => {}
        }
    }

    /// Percentage of L1 data-cache loads that missed, rounded to two
    /// decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`ZeroL1Loads`] when no load events were recorded; callers
    /// decide how to surface that rather than receiving a silent zero.
    pub fn l1_miss_percent(&self) -> Result<f64, ZeroL1Loads> {
        if self.l1_dcache_loads == 0 {
            return Err(ZeroL1Loads);
        }
        let percent = self.l1_dcache_load_misses as f64 / self.l1_dcache_loads as f64 * 100.0;
        Ok((percent * 100.0).round() / 100.0)
    }
}
