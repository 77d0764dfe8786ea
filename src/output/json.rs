//! JSON run summary export
//!
//! Writes a machine-readable record of a generation run: when it ran, how it
//! was seeded, where the workload went and the statistics gathered while
//! streaming it.
//!
//! # Example output
//!
//! ```json
//! {
//!   "tool": "cfgsynth",
//!   "version": "0.1.0",
//!   "generated_at": "2026-10-17T09:30:00Z",
//!   "seed": 42,
//!   "output": "cfg_synth0.txt",
//!   "stats": {
//!     "threads_per_phase": [3, 12],
//!     "devices_per_phase": [9, 12],
//!     "patterns": { "streaming": 7, "strided": 8, "irregular": 6 },
//!     "block_sizes": { "K4": 2, "M1": 13 },
//!     "in_place": 10,
//!     "access_factor_total": 5
//!   }
//! }
//! ```

use crate::stats::WorkloadStats;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Summary of one generation run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
    /// Seed used, `None` for an entropy-seeded run
    pub seed: Option<u64>,
    /// Workload destination (`stdout` or a path)
    pub output: String,
    pub stats: WorkloadStats,
}

impl RunSummary {
    pub fn new(output: String, seed: Option<u64>, stats: WorkloadStats) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
            seed,
            output,
            stats,
        }
    }
}

/// Write `summary` as pretty-printed JSON to `path`
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, summary)
        .context("Failed to serialize run summary")?;
    writeln!(writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write summary file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::tables::SizeLabel;
    use std::fs;

    fn sample_stats() -> WorkloadStats {
        let mut stats = WorkloadStats::new();
        stats.record_phase(2);
        stats.record_thread(SizeLabel::K4, 3);
        stats.record_thread(SizeLabel::M1, 4);
        stats
    }

    #[test]
    fn test_summary_fields() {
        let summary = RunSummary::new("cfg_synth0.txt".to_string(), Some(42), sample_stats());
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["tool"], "cfgsynth");
        assert_eq!(json["seed"], 42);
        assert_eq!(json["output"], "cfg_synth0.txt");
        assert_eq!(json["stats"]["threads_per_phase"], serde_json::json!([2]));
        assert_eq!(json["stats"]["devices_per_phase"], serde_json::json!([7]));
        assert_eq!(json["stats"]["block_sizes"]["M1"], 1);
    }

    #[test]
    fn test_summary_without_seed() {
        let summary = RunSummary::new("stdout".to_string(), None, WorkloadStats::new());
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["seed"].is_null());
    }

    #[test]
    fn test_write_summary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = RunSummary::new("cfg_synth3.txt".to_string(), Some(1), sample_stats());

        write_summary(&path, &summary).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["output"], "cfg_synth3.txt");
        assert!(content.ends_with('\n'));
    }
}
