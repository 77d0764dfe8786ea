//! Human-readable run summary

use crate::stats::WorkloadStats;
use crate::workload::DEVICE_POOL_SIZE;
use std::fmt;

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Print the summary of a generated workload to stdout
pub fn print_summary(stats: &WorkloadStats, destination: &str, seed: Option<u64>) {
    print!("{}", Summary { stats, destination, seed });
}

/// Render the summary of a generated workload
pub fn format_summary(stats: &WorkloadStats, destination: &str, seed: Option<u64>) -> String {
    Summary { stats, destination, seed }.to_string()
}

/// Summary of one run
///
/// Displays:
/// - Destination and seed
/// - Phase and thread totals
/// - Device usage of the fullest phase
/// - Pattern and block size breakdown
struct Summary<'a> {
    stats: &'a WorkloadStats,
    destination: &'a str,
    seed: Option<u64>,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "                  WORKLOAD GENERATED")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;

        writeln!(f, "Output: {}", self.destination)?;
        match self.seed {
            Some(seed) => writeln!(f, "Seed:   {}", seed)?,
            None => writeln!(f, "Seed:   (entropy)")?,
        }
        writeln!(f)?;

        writeln!(f, "Phases:  {}", stats.phases())?;
        writeln!(
            f,
            "Threads: {} ({:.2} per phase)",
            stats.total_threads(),
            stats.mean_threads()
        )?;
        writeln!(
            f,
            "Devices: {} records, peak {} / {} in one phase",
            stats.device_records(),
            stats.peak_devices(),
            DEVICE_POOL_SIZE
        )?;
        writeln!(f)?;

        let total = stats.device_records();
        writeln!(f, "Patterns:")?;
        for (name, count) in [
            ("STREAMING", stats.patterns.streaming),
            ("STRIDED", stats.patterns.strided),
            ("IRREGULAR", stats.patterns.irregular),
        ] {
            writeln!(f, "  {:<10} {:>6} ({:.1}%)", name, count, percent(count, total))?;
        }
        writeln!(f, "  In-place:  {:>6} ({:.1}%)", stats.in_place, percent(stats.in_place, total))?;
        writeln!(f)?;

        if !stats.block_sizes.is_empty() {
            writeln!(f, "Block sizes:")?;
            for (size, count) in &stats.block_sizes {
                writeln!(f, "  {:<5} {}", size.as_str(), count)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", RULE)
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}
