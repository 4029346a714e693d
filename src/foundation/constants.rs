//! Protocol-wide constants for wallet coordination.

/// Number of blocks between two consecutive coordination windows.
pub const COORDINATION_FREQUENCY_BLOCKS: u64 = 900;

/// Number of blocks in the active phase of a coordination window.
///
/// Communication between the coordination leader and their followers is
/// only allowed during the active phase.
pub const COORDINATION_ACTIVE_PHASE_BLOCKS: u64 = 80;

/// Number of blocks in the passive phase of a coordination window.
///
/// No communication happens during the passive phase. Participants
/// validate the coordination outcome and prepare for execution of the
/// proposed wallet action.
pub const COORDINATION_PASSIVE_PHASE_BLOCKS: u64 = 20;

/// Total number of blocks in a single coordination window.
pub const COORDINATION_DURATION_BLOCKS: u64 =
    COORDINATION_ACTIVE_PHASE_BLOCKS + COORDINATION_PASSIVE_PHASE_BLOCKS;

/// Number of blocks by which the coordination block is shifted back to
/// obtain the safe block whose hash seeds the coordination. The
/// coordination block itself is too recent to be treated as final on
/// chains with short-range reorgs.
pub const COORDINATION_SAFE_BLOCK_SHIFT: u64 = 32;

/// Modulus of the seed draw deciding heartbeat inclusion. With residue
/// [`HEARTBEAT_SEED_RESIDUE`], a heartbeat lands on a window with
/// probability `1 / HEARTBEAT_SEED_MODULUS`.
pub const HEARTBEAT_SEED_MODULUS: u64 = 8;

/// Residue of the seed draw that selects a heartbeat for the window.
pub const HEARTBEAT_SEED_RESIDUE: u64 = 0;

/// Every `FULL_WINDOW_PERIOD`-th window carries the complete sweep
/// action set instead of the redemption-only checklist.
pub const FULL_WINDOW_PERIOD: u64 = 16;

/// Expected wall-clock time of a single block, used to translate
/// block-denominated deadlines into timeouts.
pub const DEFAULT_BLOCK_TIME_MILLIS: u64 = 12_000;

/// Validity horizon of a redemption proposal, in blocks.
pub const REDEMPTION_PROPOSAL_VALIDITY_BLOCKS: u64 = 600;

/// Validity horizon of a deposit sweep proposal, in blocks.
pub const DEPOSIT_SWEEP_PROPOSAL_VALIDITY_BLOCKS: u64 = 1200;

/// Validity horizon of a moving funds proposal, in blocks.
pub const MOVING_FUNDS_PROPOSAL_VALIDITY_BLOCKS: u64 = 650;

/// Validity horizon of a moved funds sweep proposal, in blocks.
pub const MOVED_FUNDS_SWEEP_PROPOSAL_VALIDITY_BLOCKS: u64 = 650;

/// Validity horizon of a heartbeat proposal, in blocks.
pub const HEARTBEAT_PROPOSAL_VALIDITY_BLOCKS: u64 = 300;
