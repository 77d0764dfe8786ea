//! Per-phase device pool
//!
//! Ids are drawn without replacement; the pool is refilled at the start of
//! every phase.

use crate::distribution::RandomSource;
use crate::workload::DEVICE_POOL_SIZE;

/// Device ids still available in the current phase
#[derive(Debug, Clone)]
pub struct DevicePool {
    ids: Vec<u32>,
}

impl DevicePool {
    /// Full pool `0..DEVICE_POOL_SIZE`
    pub fn new() -> Self {
        Self {
            ids: (0..DEVICE_POOL_SIZE as u32).collect(),
        }
    }

    /// Refill to the full pool, keeping ascending order
    pub fn reset(&mut self) {
        self.ids.clear();
        self.ids.extend(0..DEVICE_POOL_SIZE as u32);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Remove one id chosen uniformly at random
    ///
    /// Remaining ids keep their relative order. Returns `None` when empty.
    pub fn take<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<u32> {
        if self.ids.is_empty() {
            return None;
        }
        let idx = rng.next_index(self.ids.len());
        Some(self.ids.remove(idx))
    }
}

impl Default for DevicePool {
    fn default() -> Self {
        Self::new()
    }
}
