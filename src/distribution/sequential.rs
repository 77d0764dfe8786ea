//! Scripted random source
//!
//! Replays a fixed list of raw draws in order. Each draw is reduced into the
//! requested range (`draw % len`) and the script wraps around when exhausted,
//! so any script drives the generator to completion.

use crate::distribution::RandomSource;

/// Source that replays scripted draws
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<usize>,
    /// Position of the next draw
    cursor: usize,
    /// Total draws handed out
    consumed: usize,
}

impl ScriptedSource {
    /// Create a source replaying `draws`
    pub fn new(draws: Vec<usize>) -> Self {
        Self {
            draws,
            cursor: 0,
            consumed: 0,
        }
    }

    /// Number of draws handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedSource {
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index drawn from an empty range");
        self.consumed += 1;
        if len == 0 || self.draws.is_empty() {
            return 0;
        }

        let draw = self.draws[self.cursor];

        self.cursor += 1;
        if self.cursor >= self.draws.len() {
            self.cursor = 0;
        }

        draw % len
    }
}
