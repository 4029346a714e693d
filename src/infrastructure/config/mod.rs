use crate::domain::coordination::ChecklistParams;
use crate::foundation::constants::{
    COORDINATION_ACTIVE_PHASE_BLOCKS, COORDINATION_FREQUENCY_BLOCKS,
    COORDINATION_PASSIVE_PHASE_BLOCKS, COORDINATION_SAFE_BLOCK_SHIFT, DEFAULT_BLOCK_TIME_MILLIS,
};
use serde::{Deserialize, Serialize};

/// Coordination tunables, provided by the surrounding process as a plain
/// value. The core performs no file loading, reads no environment, and
/// persists nothing.
///
/// The window cadence fields default to the protocol constants and must
/// be identical across the fleet; they exist so test networks and future
/// deployments can retune the protocol in one place.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CoordinationConfig {
    /// Number of blocks between two consecutive coordination windows.
    #[serde(default = "default_frequency_blocks")]
    pub frequency_blocks: u64,
    /// Length of the active phase in blocks.
    #[serde(default = "default_active_phase_blocks")]
    pub active_phase_blocks: u64,
    /// Length of the passive phase in blocks.
    #[serde(default = "default_passive_phase_blocks")]
    pub passive_phase_blocks: u64,
    /// Backward shift from the coordination block to the safe block used
    /// as the seed ingredient.
    #[serde(default = "default_safe_block_shift")]
    pub safe_block_shift: u64,
    /// Expected wall-clock time of one block, used to translate the
    /// active-phase deadline into a timeout.
    #[serde(default = "default_block_time_millis")]
    pub block_time_millis: u64,
    /// Actions checklist tunables.
    #[serde(default)]
    pub checklist: ChecklistParams,
}

fn default_frequency_blocks() -> u64 {
    COORDINATION_FREQUENCY_BLOCKS
}

fn default_active_phase_blocks() -> u64 {
    COORDINATION_ACTIVE_PHASE_BLOCKS
}

fn default_passive_phase_blocks() -> u64 {
    COORDINATION_PASSIVE_PHASE_BLOCKS
}

fn default_safe_block_shift() -> u64 {
    COORDINATION_SAFE_BLOCK_SHIFT
}

fn default_block_time_millis() -> u64 {
    DEFAULT_BLOCK_TIME_MILLIS
}

impl Default for CoordinationConfig {
    fn default() -> Self {
        Self {
            frequency_blocks: default_frequency_blocks(),
            active_phase_blocks: default_active_phase_blocks(),
            passive_phase_blocks: default_passive_phase_blocks(),
            safe_block_shift: default_safe_block_shift(),
            block_time_millis: default_block_time_millis(),
            checklist: ChecklistParams::default(),
        }
    }
}

impl CoordinationConfig {
    /// Total window length in blocks.
    pub fn window_duration_blocks(&self) -> u64 {
        self.active_phase_blocks + self.passive_phase_blocks
    }
}
