use std::fmt::Write;

use crate::counters::EventCounters;

/// Rows of the report in the order `perf stat` prints these events.
fn rows(counters: &EventCounters) -> [(u64, &'static str); 4] {
    [
        (counters.l1_dcache_loads, "L1-dcache-loads"),
        (counters.l1_dcache_load_misses, "L1-dcache-load-misses"),
        (counters.branch_instructions, "branch-instructions"),
        (counters.branch_misses, "branch-misses"),
    ]
}

/// Renders the counter table.
///
/// Counts are right-aligned to 15 columns with thousands separators,
/// event names left-aligned to 30; the load-miss row carries the miss
/// percentage as a trailing annotation.
pub fn render(counters: &EventCounters, l1_miss_percent: f64) -> String {
    let mut out = String::new();
    for (count, event) in rows(counters) {
        let _ = write!(out, "{:>15}     {:<30}", group_thousands(count), event);
        if event == "L1-dcache-load-misses" {
            let _ = write!(
                out,
                "     #   {l1_miss_percent:>6.2}% of all L1 cache accesses"
            );
        }
        out.push('\n');
    }
    out
}

/// Formats an integer with comma thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, digit) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
