use crate::foundation::constants::{
    COORDINATION_ACTIVE_PHASE_BLOCKS, COORDINATION_DURATION_BLOCKS, COORDINATION_FREQUENCY_BLOCKS,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single coordination window. The coordination block is the first
/// block of the window.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CoordinationWindow {
    coordination_block: u64,
}

impl CoordinationWindow {
    pub const fn new(coordination_block: u64) -> Self {
        Self { coordination_block }
    }

    pub const fn coordination_block(&self) -> u64 {
        self.coordination_block
    }

    /// Ordinal of this window on the chain. Index `0` is the sentinel for
    /// an invalid window whose block is not a positive multiple of the
    /// coordination frequency.
    pub fn index(&self) -> u64 {
        if self.coordination_block > 0 && self.coordination_block % COORDINATION_FREQUENCY_BLOCKS == 0 {
            self.coordination_block / COORDINATION_FREQUENCY_BLOCKS
        } else {
            0
        }
    }

    /// Block at which the active phase of this window ends.
    pub const fn active_phase_end_block(&self) -> u64 {
        self.coordination_block + COORDINATION_ACTIVE_PHASE_BLOCKS
    }

    /// Block at which this window ends.
    pub const fn end_block(&self) -> u64 {
        self.coordination_block + COORDINATION_DURATION_BLOCKS
    }

    /// Strict ordering against a possibly-absent previous window. Equal
    /// windows are not "after" each other, which is what deduplicates a
    /// block stream that repeats blocks.
    pub fn is_after(&self, other: Option<&CoordinationWindow>) -> bool {
        match other {
            None => true,
            Some(other) => self.coordination_block > other.coordination_block,
        }
    }
}

impl fmt::Display for CoordinationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordination_block)
    }
}
