//! Generation statistics
//!
//! Tallies gathered while the generator streams a workload. Nothing here
//! re-reads the artifact; the generator records each phase, thread and device
//! as it emits them.
//!
//! # Example
//!
//! ```
//! use cfgsynth::stats::WorkloadStats;
//! use cfgsynth::workload::tables::SizeLabel;
//!
//! let mut stats = WorkloadStats::new();
//! stats.record_phase(2);
//! stats.record_thread(SizeLabel::K4, 3);
//! stats.record_thread(SizeLabel::M1, 1);
//!
//! assert_eq!(stats.phases(), 1);
//! assert_eq!(stats.total_threads(), 2);
//! assert_eq!(stats.devices_per_phase, vec![4]);
//! ```

use crate::workload::tables::{AccessPattern, SizeLabel};
use crate::workload::DeviceAccess;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-pattern device record counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatternCounts {
    pub streaming: u64,
    pub strided: u64,
    pub irregular: u64,
}

impl PatternCounts {
    fn add(&mut self, pattern: AccessPattern) {
        match pattern {
            AccessPattern::Streaming => self.streaming += 1,
            AccessPattern::Strided => self.strided += 1,
            AccessPattern::Irregular => self.irregular += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.streaming + self.strided + self.irregular
    }
}

/// Statistics of one generated workload
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkloadStats {
    /// Thread count of every phase, in order
    pub threads_per_phase: Vec<usize>,
    /// Devices assigned in every phase, in order
    pub devices_per_phase: Vec<usize>,
    /// Device records by access pattern
    pub patterns: PatternCounts,
    /// Thread groups by block size
    pub block_sizes: BTreeMap<SizeLabel, u64>,
    /// Device records flagged in-place
    pub in_place: u64,
    /// Sum of access factors over irregular devices
    pub access_factor_total: u64,
}

impl WorkloadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new phase with `thread_count` threads
    pub fn record_phase(&mut self, thread_count: usize) {
        self.threads_per_phase.push(thread_count);
        self.devices_per_phase.push(0);
    }

    /// Record a thread of the current phase
    pub fn record_thread(&mut self, size: SizeLabel, ndev: usize) {
        *self.block_sizes.entry(size).or_insert(0) += 1;
        if let Some(devices) = self.devices_per_phase.last_mut() {
            *devices += ndev;
        }
    }

    /// Record one emitted device
    pub fn record_device(&mut self, device: &DeviceAccess) {
        self.patterns.add(device.pattern);
        if device.in_place {
            self.in_place += 1;
        }
        self.access_factor_total += device.access_factor as u64;
    }

    pub fn phases(&self) -> usize {
        self.threads_per_phase.len()
    }

    pub fn total_threads(&self) -> usize {
        self.threads_per_phase.iter().sum()
    }

    pub fn device_records(&self) -> u64 {
        self.patterns.total()
    }

    /// Largest number of devices used by a single phase
    pub fn peak_devices(&self) -> usize {
        self.devices_per_phase.iter().copied().max().unwrap_or(0)
    }

    /// Average threads per phase (0.0 when empty)
    pub fn mean_threads(&self) -> f64 {
        if self.threads_per_phase.is_empty() {
            return 0.0;
        }
        self.total_threads() as f64 / self.phases() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(pattern: AccessPattern, access_factor: u32, in_place: bool) -> DeviceAccess {
        DeviceAccess {
            device_id: 0,
            pattern,
            access_factor,
            burst_len: 4,
            cb_factor: 1,
            reuse_factor: 1,
            ld_st_ratio: 1,
            stride_len: 0,
            in_place,
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = WorkloadStats::new();
        assert_eq!(stats.phases(), 0);
        assert_eq!(stats.device_records(), 0);
        assert_eq!(stats.peak_devices(), 0);
        assert_eq!(stats.mean_threads(), 0.0);
    }

    #[test]
    fn test_stats_phase_accounting() {
        let mut stats = WorkloadStats::new();

        stats.record_phase(2);
        stats.record_thread(SizeLabel::K1, 5);
        stats.record_thread(SizeLabel::K1, 7);
        stats.record_phase(1);
        stats.record_thread(SizeLabel::M8, 3);

        assert_eq!(stats.phases(), 2);
        assert_eq!(stats.total_threads(), 3);
        assert_eq!(stats.devices_per_phase, vec![12, 3]);
        assert_eq!(stats.peak_devices(), 12);
        assert_eq!(stats.block_sizes.get(&SizeLabel::K1), Some(&2));
        assert_eq!(stats.block_sizes.get(&SizeLabel::M8), Some(&1));
        assert!((stats.mean_threads() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_device_accounting() {
        let mut stats = WorkloadStats::new();

        stats.record_device(&device(AccessPattern::Irregular, 3, true));
        stats.record_device(&device(AccessPattern::Streaming, 0, false));
        stats.record_device(&device(AccessPattern::Irregular, 1, true));

        assert_eq!(stats.patterns.irregular, 2);
        assert_eq!(stats.patterns.streaming, 1);
        assert_eq!(stats.patterns.strided, 0);
        assert_eq!(stats.device_records(), 3);
        assert_eq!(stats.in_place, 2);
        assert_eq!(stats.access_factor_total, 4);
    }
}
