//! Workload model
//!
//! Structures describing a generated workload: the fixed harness topology
//! written in the header, and the phase / thread / device hierarchy sampled
//! by the generator.
//!
//! # Hierarchy
//!
//! - **WorkloadSpec**: header plus an ordered list of phases
//! - **Phase**: one simulation interval with its own thread assignment
//! - **ThreadGroup**: one thread, its block size and the devices it drives
//! - **DeviceAccess**: access parameters of one device within a thread

pub mod tables;

use serde::Serialize;
use std::fmt;
use tables::{AccessPattern, SizeLabel};

/// Grid width of the harness mesh
pub const GRID_WIDTH: u32 = 5;

/// Grid height of the harness mesh
pub const GRID_HEIGHT: u32 = 5;

/// Tiles holding special devices (reported in the header only)
pub const SPECIAL_DEVICES: [u32; 4] = [0, 3, 20, 23];

/// Tiles holding general devices
pub const GENERAL_DEVICES: [u32; 12] = [1, 2, 5, 8, 10, 11, 12, 13, 15, 18, 21, 22];

/// Number of device ids available to each phase
///
/// Ids are positions `0..DEVICE_POOL_SIZE` into [`GENERAL_DEVICES`].
pub const DEVICE_POOL_SIZE: usize = GENERAL_DEVICES.len();

/// Upper bound of the sampled phase count
pub const MAX_PHASES: usize = 100;

/// Upper bound of the sampled thread count per phase
pub const MAX_THREADS: usize = 12;

/// Fixed harness topology written before any phase data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    pub grid_width: u32,
    pub grid_height: u32,
    pub special_devices: Vec<u32>,
    pub general_devices: Vec<u32>,
}

impl Topology {
    /// The 5x5 mesh with 4 special and 12 general devices
    pub fn standard() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            special_devices: SPECIAL_DEVICES.to_vec(),
            general_devices: GENERAL_DEVICES.to_vec(),
        }
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::standard()
    }
}

/// Complete generated workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadSpec {
    pub topology: Topology,
    pub phases: Vec<Phase>,
}

impl WorkloadSpec {
    /// Number of phases
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Iterate over every device record of every phase
    pub fn devices(&self) -> impl Iterator<Item = &DeviceAccess> {
        self.phases.iter().flat_map(|p| p.devices())
    }
}

/// One simulation phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub threads: Vec<ThreadGroup>,
}

impl Phase {
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Devices assigned across all threads of this phase
    pub fn device_count(&self) -> usize {
        self.threads.iter().map(|t| t.ndev()).sum()
    }

    pub fn devices(&self) -> impl Iterator<Item = &DeviceAccess> {
        self.threads.iter().flat_map(|t| t.devices.iter())
    }
}

/// One thread's workload within a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadGroup {
    /// Block size shared by every device of the thread
    pub size: SizeLabel,
    pub devices: Vec<DeviceAccess>,
}

impl ThreadGroup {
    pub fn ndev(&self) -> usize {
        self.devices.len()
    }
}

/// Access parameters of one device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceAccess {
    /// Pool id, unique within a phase
    pub device_id: u32,
    pub pattern: AccessPattern,
    /// Access intensity, nonzero only for irregular access
    pub access_factor: u32,
    pub burst_len: u32,
    pub cb_factor: u32,
    pub reuse_factor: u32,
    pub ld_st_ratio: u32,
    /// Stride in bytes, zero unless strided
    pub stride_len: u32,
    pub in_place: bool,
}

impl fmt::Display for DeviceAccess {
    /// Renders the 9-token device line of the workload file
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            self.device_id,
            self.pattern,
            self.access_factor,
            self.burst_len,
            self.cb_factor,
            self.reuse_factor,
            self.ld_st_ratio,
            self.stride_len,
            u8::from(self.in_place),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_device() -> DeviceAccess {
        DeviceAccess {
            device_id: 7,
            pattern: AccessPattern::Strided,
            access_factor: 0,
            burst_len: 32,
            cb_factor: 8,
            reuse_factor: 1,
            ld_st_ratio: 2,
            stride_len: 256,
            in_place: true,
        }
    }

    #[test]
    fn test_device_line_has_nine_tokens() {
        let line = sample_device().to_string();
        assert_eq!(line, "7 STRIDED 0 32 8 1 2 256 1");
        assert_eq!(line.split_whitespace().count(), 9);
    }

    #[test]
    fn test_standard_topology() {
        let topo = Topology::standard();
        assert_eq!((topo.grid_width, topo.grid_height), (5, 5));
        assert_eq!(topo.special_devices, vec![0, 3, 20, 23]);
        assert_eq!(topo.general_devices.len(), DEVICE_POOL_SIZE);
    }

    #[test]
    fn test_special_and_general_tiles_disjoint() {
        for tile in SPECIAL_DEVICES {
            assert!(!GENERAL_DEVICES.contains(&tile));
        }
        for tile in SPECIAL_DEVICES.iter().chain(GENERAL_DEVICES.iter()) {
            assert!(*tile < GRID_WIDTH * GRID_HEIGHT);
        }
    }

    #[test]
    fn test_phase_counts() {
        let phase = Phase {
            threads: vec![
                ThreadGroup {
                    size: SizeLabel::K4,
                    devices: vec![sample_device()],
                },
                ThreadGroup {
                    size: SizeLabel::M2,
                    devices: vec![
                        DeviceAccess { device_id: 1, ..sample_device() },
                        DeviceAccess { device_id: 2, ..sample_device() },
                    ],
                },
            ],
        };
        assert_eq!(phase.thread_count(), 2);
        assert_eq!(phase.device_count(), 3);
        assert_eq!(phase.devices().count(), 3);
    }
}
