use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a wallet action a coordination window can settle on.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[repr(u8)]
pub enum WalletActionType {
    /// No action. The result of a window in which no valid leader
    /// proposal was observed.
    #[default]
    Noop = 0,
    Heartbeat = 1,
    DepositSweep = 2,
    Redemption = 3,
    MovedFundsSweep = 4,
    MovingFunds = 5,
}

impl fmt::Display for WalletActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WalletActionType::Noop => "Noop",
            WalletActionType::Heartbeat => "Heartbeat",
            WalletActionType::DepositSweep => "DepositSweep",
            WalletActionType::Redemption => "Redemption",
            WalletActionType::MovedFundsSweep => "MovedFundsSweep",
            WalletActionType::MovingFunds => "MovingFunds",
        };
        write!(f, "{name}")
    }
}
