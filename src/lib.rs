//! cfgsynth - synthetic workload generator for multi-device traffic simulation
//!
//! cfgsynth writes workload description files for a traffic-simulation harness
//! that models concurrent device memory access on a 5x5 mesh. A workload is a
//! random number of phases; each phase runs a random number of threads, and
//! each thread drives a random subset of the 12 general devices with sampled,
//! mutually constrained access parameters.
//!
//! # Architecture
//!
//! - **Generator**: constrained-random sampler streaming records in order
//! - **Random sources**: injectable, seedable or scripted for reproducibility
//! - **Output**: record sinks (text file, in-memory model) and run summaries
//! - **Targets**: collision-free naming and atomic file commit

pub mod config;
pub mod distribution;
pub mod generator;
pub mod output;
pub mod stats;
pub mod target;
pub mod workload;

// Re-export commonly used types
pub use config::Config;
pub use generator::{GenerateError, WorkloadGenerator};
pub use workload::WorkloadSpec;

/// Result type used throughout cfgsynth
pub type Result<T> = anyhow::Result<T>;
