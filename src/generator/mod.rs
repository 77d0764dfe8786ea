//! Constrained-random workload generator
//!
//! Samples a complete workload and streams it, record by record, into a
//! [`RecordSink`]. All randomness comes from an injected [`RandomSource`] and is
//! consumed in a fixed order, so a seeded source reproduces the same file.
//!
//! # Sampling
//!
//! For every phase the device pool is refilled and a thread count is drawn.
//! Each thread takes a device count that leaves at least one device for every
//! later thread, and a block size whose log2 seeds the thread's *log-size
//! budget*. Irregular access intensity and load/store ratios spend that budget,
//! so later devices of a thread get less aggressive parameters.
//!
//! Draw order per device: pool pick, pattern, access factor (irregular only),
//! burst length (non-irregular only), compute-bound factor, reuse factor,
//! load/store ratio (only when it has a choice), stride (strided only),
//! in-place flag.
//!
//! # Example
//!
//! ```
//! use cfgsynth::distribution::uniform::XoshiroSource;
//! use cfgsynth::generator::WorkloadGenerator;
//! use cfgsynth::output::TextSink;
//!
//! let mut generator = WorkloadGenerator::new(XoshiroSource::with_seed(1));
//! let mut sink = TextSink::new(Vec::new());
//! let stats = generator.generate(&mut sink).unwrap();
//!
//! let text = String::from_utf8(sink.finish().unwrap()).unwrap();
//! assert!(text.starts_with("5 5\n4\n0 3 20 23\n"));
//! assert!(stats.phases() >= 1);
//! ```

pub mod error;
pub mod pool;

pub use error::{GenerateError, Location};

use crate::distribution::RandomSource;
use crate::output::collect::SpecCollector;
use crate::output::{Record, RecordSink};
use crate::stats::WorkloadStats;
use crate::workload::tables::{
    index_of, AccessPattern, SizeLabel, BURST_LENS, CB_FACTORS, IN_PLACE_FLAGS, LD_ST_RATIOS,
    REUSE_FACTORS, STRIDE_LENS,
};
use crate::workload::{
    DeviceAccess, WorkloadSpec, GENERAL_DEVICES, GRID_HEIGHT, GRID_WIDTH, MAX_PHASES, MAX_THREADS,
    SPECIAL_DEVICES,
};
use pool::DevicePool;
use tracing::{debug, trace};

/// log2 of the smallest block size; the budget above it is spendable
const BASE_LOG_SIZE: i64 = 10;

/// Largest access factor an irregular device may take
const MAX_ACCESS_FACTOR: i64 = 4;

/// Load/store ratios are picked among at most this many leading entries
const MAX_LD_ST_CHOICES: i64 = 2;

/// Compute-bound factors available beyond the burst length index
const CB_WINDOW: usize = 3;

/// Irregular access always uses the shortest burst
const IRREGULAR_BURST_LEN: u32 = BURST_LENS[0];

type Result<T> = std::result::Result<T, GenerateError>;

/// Upper bound of a thread's device count
///
/// Reserves one device for each thread after `thread`.
pub fn device_count_bound(pool_len: usize, thread_count: usize, thread: usize) -> i64 {
    pool_len as i64 - (thread_count as i64 - (thread as i64 + 1))
}

/// Workload generator over a random source
pub struct WorkloadGenerator<R: RandomSource> {
    rng: R,
    pool: DevicePool,
}

impl<R: RandomSource> WorkloadGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            pool: DevicePool::new(),
        }
    }

    /// Give back the random source
    pub fn into_source(self) -> R {
        self.rng
    }

    /// Sample a workload and stream it into `sink`
    ///
    /// Any error aborts the run; whatever reached the sink must be discarded.
    pub fn generate<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<WorkloadStats> {
        let mut stats = WorkloadStats::new();

        let phase_count =
            self.sample_inclusive(1, MAX_PHASES as i64, "phase_count", Location::header())?;
        self.write_header(sink, phase_count)?;
        debug!(phases = phase_count, "sampled phase count");

        for phase in 0..phase_count {
            self.generate_phase(phase, sink, &mut stats)?;
        }

        Ok(stats)
    }

    /// Sample a workload into memory
    ///
    /// The collector checks every announced count against the records that
    /// follow it, so a stream that breaks the file grammar fails here.
    pub fn generate_spec(&mut self) -> Result<(WorkloadSpec, WorkloadStats)> {
        let mut collector = SpecCollector::new();
        let stats = self.generate(&mut collector)?;
        // Trailing counts are only settled once the stream has ended
        let spec = collector
            .into_spec()
            .map_err(|source| GenerateError::Sink {
                location: Location::header(),
                source,
            })?;
        Ok((spec, stats))
    }

    fn write_header<S: RecordSink + ?Sized>(&mut self, sink: &mut S, phase_count: usize) -> Result<()> {
        let header = [
            Record::Grid {
                width: GRID_WIDTH,
                height: GRID_HEIGHT,
            },
            Record::SpecialCount(SPECIAL_DEVICES.len()),
            Record::SpecialDevices(&SPECIAL_DEVICES),
            Record::GeneralCount(GENERAL_DEVICES.len()),
            Record::GeneralDevices(&GENERAL_DEVICES),
            Record::PhaseCount(phase_count),
        ];
        for record in &header {
            emit(sink, record, Location::header())?;
        }
        Ok(())
    }

    fn generate_phase<S: RecordSink + ?Sized>(
        &mut self,
        phase: usize,
        sink: &mut S,
        stats: &mut WorkloadStats,
    ) -> Result<()> {
        let location = Location::phase(phase);

        self.pool.reset();
        let thread_count = self.sample_inclusive(1, MAX_THREADS as i64, "thread_count", location)?;
        emit(sink, &Record::ThreadCount(thread_count), location)?;
        stats.record_phase(thread_count);
        debug!(phase, threads = thread_count, "phase");

        for thread in 0..thread_count {
            self.generate_thread(location.thread(thread), thread, thread_count, sink, stats)?;
        }

        Ok(())
    }

    fn generate_thread<S: RecordSink + ?Sized>(
        &mut self,
        location: Location,
        thread: usize,
        thread_count: usize,
        sink: &mut S,
        stats: &mut WorkloadStats,
    ) -> Result<()> {
        let bound = device_count_bound(self.pool.len(), thread_count, thread);
        let ndev = self.sample_inclusive(1, bound, "ndev", location)?;
        emit(sink, &Record::DeviceCount(ndev), location)?;

        let size = SizeLabel::ALL[self.choose_below(SizeLabel::ALL.len() as i64, "size", location)?];
        emit(sink, &Record::BlockSize(size), location)?;
        stats.record_thread(size, ndev);

        let mut log_size = size.log2_bytes();
        debug!(thread, ndev, %size, "thread");

        for device in 0..ndev {
            let location = location.device(device);
            let access = self.sample_device(location, ndev, &mut log_size)?;
            trace!(%location, log_size, "{}", access);
            emit(sink, &Record::Device(access), location)?;
            stats.record_device(&access);
        }

        Ok(())
    }

    /// Sample one device, spending from the thread's `log_size` budget
    fn sample_device(
        &mut self,
        location: Location,
        ndev: usize,
        log_size: &mut i64,
    ) -> Result<DeviceAccess> {
        let device_id = self
            .pool
            .take(&mut self.rng)
            .ok_or(GenerateError::InvalidBound {
                location,
                field: "device_id",
                bound: 0,
            })?;

        let pattern =
            AccessPattern::ALL[self.choose_below(AccessPattern::ALL.len() as i64, "pattern", location)?];
        let irregular = pattern == AccessPattern::Irregular;

        // Budget left after the block size pays for concurrency and device position
        let headroom =
            |log_size: i64| log_size - BASE_LOG_SIZE - ndev as i64 - (device_id as i64 + 1);

        let access_factor = if irregular {
            let upper = headroom(*log_size).clamp(0, MAX_ACCESS_FACTOR);
            let factor = self.sample_inclusive(0, upper, "access_factor", location)?;
            *log_size -= factor as i64;
            factor as u32
        } else {
            0
        };

        let burst_len = if irregular {
            IRREGULAR_BURST_LEN
        } else {
            BURST_LENS[self.choose_below(BURST_LENS.len() as i64, "burst_len", location)?]
        };

        let burst_index = index_of("burst_len", &BURST_LENS, burst_len)
            .map_err(|source| GenerateError::UnknownEnumerationValue { location, source })?;
        let cb_upper = (burst_index + CB_WINDOW).min(CB_FACTORS.len());
        let cb_factor = CB_FACTORS[self.choose_below(cb_upper as i64, "cb_factor", location)?];

        let reuse_factor =
            REUSE_FACTORS[self.choose_below(REUSE_FACTORS.len() as i64, "reuse_factor", location)?];

        let ld_st_upper = headroom(*log_size).min(MAX_LD_ST_CHOICES);
        let ld_st_ratio = if ld_st_upper <= 0 || irregular {
            LD_ST_RATIOS[0]
        } else {
            let idx = self.choose_below(ld_st_upper, "ld_st_ratio", location)?;
            *log_size -= idx as i64;
            LD_ST_RATIOS[idx]
        };

        let stride_len = if pattern == AccessPattern::Strided {
            STRIDE_LENS[self.choose_below(STRIDE_LENS.len() as i64, "stride_len", location)?]
        } else {
            0
        };

        let in_place =
            IN_PLACE_FLAGS[self.choose_below(IN_PLACE_FLAGS.len() as i64, "in_place", location)?] == 1;

        Ok(DeviceAccess {
            device_id,
            pattern,
            access_factor,
            burst_len,
            cb_factor,
            reuse_factor,
            ld_st_ratio,
            stride_len,
            in_place,
        })
    }

    /// Uniform value in `[low, high]`; fails when the range is empty
    fn sample_inclusive(
        &mut self,
        low: usize,
        high: i64,
        field: &'static str,
        location: Location,
    ) -> Result<usize> {
        if high < low as i64 {
            return Err(GenerateError::InvalidBound {
                location,
                field,
                bound: high,
            });
        }
        Ok(self.rng.next_in_range(low, high as usize))
    }

    /// Uniform index among the first `upper` table entries
    fn choose_below(&mut self, upper: i64, field: &'static str, location: Location) -> Result<usize> {
        if upper <= 0 {
            return Err(GenerateError::InvalidBound {
                location,
                field,
                bound: upper,
            });
        }
        Ok(self.rng.next_index(upper as usize))
    }
}

fn emit<S: RecordSink + ?Sized>(sink: &mut S, record: &Record, location: Location) -> Result<()> {
    sink.write_record(record)
        .map_err(|source| GenerateError::Sink { location, source })
}
