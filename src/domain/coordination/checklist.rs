use crate::domain::action::WalletActionType;
use crate::foundation::constants::{FULL_WINDOW_PERIOD, HEARTBEAT_SEED_MODULUS, HEARTBEAT_SEED_RESIDUE};
use crate::foundation::Hash32;
use serde::{Deserialize, Serialize};

/// Tunables of the actions checklist. All nodes of a deployment must run
/// with identical values, otherwise followers reject leader proposals.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChecklistParams {
    /// Heartbeats land on a window with probability
    /// `1 / heartbeat_seed_modulus`; `0` disables heartbeats.
    #[serde(default = "default_heartbeat_seed_modulus")]
    pub heartbeat_seed_modulus: u64,
    /// Residue of the seed draw that selects a heartbeat.
    #[serde(default = "default_heartbeat_seed_residue")]
    pub heartbeat_seed_residue: u64,
    /// Every `full_window_period`-th window carries the complete sweep
    /// action set; `0` disables full windows.
    #[serde(default = "default_full_window_period")]
    pub full_window_period: u64,
}

fn default_heartbeat_seed_modulus() -> u64 {
    HEARTBEAT_SEED_MODULUS
}

fn default_heartbeat_seed_residue() -> u64 {
    HEARTBEAT_SEED_RESIDUE
}

fn default_full_window_period() -> u64 {
    FULL_WINDOW_PERIOD
}

impl Default for ChecklistParams {
    fn default() -> Self {
        Self {
            heartbeat_seed_modulus: default_heartbeat_seed_modulus(),
            heartbeat_seed_residue: default_heartbeat_seed_residue(),
            full_window_period: default_full_window_period(),
        }
    }
}

/// Ordered list of candidate wallet actions for the window. The leader
/// proposes the first action on the checklist its proposal generator can
/// turn into a non-noop proposal; followers reject proposals whose
/// action is not listed.
///
/// Window index `0` marks an invalid window and yields an empty
/// checklist. Redemption leads every valid window. Full windows carry
/// the sweep set and never a heartbeat; otherwise a heartbeat is
/// appended when the seed draw `first_8_seed_bytes_be % modulus` hits
/// the configured residue.
pub fn actions_checklist(
    window_index: u64,
    seed: &Hash32,
    params: &ChecklistParams,
) -> Vec<WalletActionType> {
    if window_index == 0 {
        return Vec::new();
    }

    let mut actions = vec![WalletActionType::Redemption];

    if params.full_window_period > 0 && window_index % params.full_window_period == 0 {
        actions.push(WalletActionType::DepositSweep);
        actions.push(WalletActionType::MovedFundsSweep);
        actions.push(WalletActionType::MovingFunds);
        return actions;
    }

    if params.heartbeat_seed_modulus > 0 {
        let mut seed_prefix = [0u8; 8];
        seed_prefix.copy_from_slice(&seed[..8]);
        let draw = u64::from_be_bytes(seed_prefix);
        if draw % params.heartbeat_seed_modulus == params.heartbeat_seed_residue {
            actions.push(WalletActionType::Heartbeat);
        }
    }

    actions
}
