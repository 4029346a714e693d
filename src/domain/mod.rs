//! Domain layer: pure protocol logic, no I/O.

pub mod action;
pub mod coordination;
pub mod fault;
pub mod proposal;
pub mod wallet;
pub mod window;

pub use action::WalletActionType;
pub use fault::{CoordinationFault, CoordinationFaultType};
pub use proposal::{
    CoordinationProposal, DepositKey, DepositSweepProposal, HeartbeatProposal,
    MovedFundsSweepProposal, MovingFundsProposal, RedemptionProposal, Script,
};
pub use wallet::Wallet;
pub use window::CoordinationWindow;
