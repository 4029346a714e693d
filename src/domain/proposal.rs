use crate::domain::action::WalletActionType;
use crate::foundation::constants::{
    DEPOSIT_SWEEP_PROPOSAL_VALIDITY_BLOCKS, HEARTBEAT_PROPOSAL_VALIDITY_BLOCKS,
    MOVED_FUNDS_SWEEP_PROPOSAL_VALIDITY_BLOCKS, MOVING_FUNDS_PROPOSAL_VALIDITY_BLOCKS,
    REDEMPTION_PROPOSAL_VALIDITY_BLOCKS,
};
use crate::foundation::{Hash32, WalletPublicKeyHash};
use serde::{Deserialize, Serialize};

/// Raw Bitcoin script bytes.
pub type Script = Vec<u8>;

/// Action proposal raised by the coordination leader for the given
/// wallet. The tag discriminates the variant on the wire; each variant
/// carries its own parameters. Bitcoin transaction hashes are kept in
/// the internal (non-reversed) byte order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CoordinationProposal {
    Noop,
    Redemption(RedemptionProposal),
    DepositSweep(DepositSweepProposal),
    MovingFunds(MovingFundsProposal),
    MovedFundsSweep(MovedFundsSweepProposal),
    Heartbeat(HeartbeatProposal),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RedemptionProposal {
    pub redeemers_output_scripts: Vec<Script>,
    pub redemption_tx_fee: u64,
}

/// Reference to a revealed deposit: the Bitcoin funding transaction and
/// the output created for the deposit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DepositKey {
    pub funding_tx_hash: Hash32,
    pub funding_output_index: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DepositSweepProposal {
    pub sweep_tx_fee: u64,
    pub deposits_keys: Vec<DepositKey>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MovingFundsProposal {
    pub target_wallets: Vec<WalletPublicKeyHash>,
    pub moving_funds_tx_fee: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MovedFundsSweepProposal {
    pub moving_funds_tx_hash: Hash32,
    pub moving_funds_tx_output_index: u32,
    pub sweep_tx_fee: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatProposal {
    pub message: Vec<u8>,
}

impl CoordinationProposal {
    pub fn action_type(&self) -> WalletActionType {
        match self {
            CoordinationProposal::Noop => WalletActionType::Noop,
            CoordinationProposal::Redemption(_) => WalletActionType::Redemption,
            CoordinationProposal::DepositSweep(_) => WalletActionType::DepositSweep,
            CoordinationProposal::MovingFunds(_) => WalletActionType::MovingFunds,
            CoordinationProposal::MovedFundsSweep(_) => WalletActionType::MovedFundsSweep,
            CoordinationProposal::Heartbeat(_) => WalletActionType::Heartbeat,
        }
    }

    /// Number of blocks for which the proposal stays valid after the
    /// coordination window. A noop proposal has no validity horizon and
    /// must never be handed to the downstream signing executor.
    pub fn validity_blocks(&self) -> Option<u64> {
        match self {
            CoordinationProposal::Noop => None,
            CoordinationProposal::Redemption(_) => Some(REDEMPTION_PROPOSAL_VALIDITY_BLOCKS),
            CoordinationProposal::DepositSweep(_) => Some(DEPOSIT_SWEEP_PROPOSAL_VALIDITY_BLOCKS),
            CoordinationProposal::MovingFunds(_) => Some(MOVING_FUNDS_PROPOSAL_VALIDITY_BLOCKS),
            CoordinationProposal::MovedFundsSweep(_) => {
                Some(MOVED_FUNDS_SWEEP_PROPOSAL_VALIDITY_BLOCKS)
            }
            CoordinationProposal::Heartbeat(_) => Some(HEARTBEAT_PROPOSAL_VALIDITY_BLOCKS),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, CoordinationProposal::Noop)
    }
}
