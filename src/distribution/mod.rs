//! Random sources for the workload sampler
//!
//! The generator never touches a global RNG. Every draw goes through a
//! [`RandomSource`], consumed in a fixed order, so a seeded or scripted source
//! reproduces a workload exactly.
//!
//! # Sources
//!
//! - **Uniform**: xoshiro256++ backed source, seeded or from entropy
//! - **Sequential**: replays a scripted list of draws (tests, fixtures)
//!
//! # Example
//!
//! ```
//! use cfgsynth::distribution::{RandomSource, uniform::XoshiroSource};
//!
//! let mut rng = XoshiroSource::with_seed(7);
//! let idx = rng.next_index(14);
//! assert!(idx < 14);
//!
//! let threads = rng.next_in_range(1, 12);
//! assert!((1..=12).contains(&threads));
//! ```

/// Source of uniform integer draws
///
/// Implementations must be uniform over the requested range. Ranges must be
/// non-empty: `len > 0` and `low <= high`.
pub trait RandomSource {
    /// Uniform index in `[0, len)`
    fn next_index(&mut self, len: usize) -> usize;

    /// Uniform integer in `[low, high]` (inclusive)
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        debug_assert!(low <= high, "empty range {}..={}", low, high);
        low + self.next_index(high.saturating_sub(low) + 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }

    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        (**self).next_in_range(low, high)
    }
}

pub mod sequential;
pub mod uniform;
