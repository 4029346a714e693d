use crate::domain::proposal::CoordinationProposal;
use crate::foundation::{MemberIndex, WalletPublicKeyHash};
use serde::{Deserialize, Serialize};

/// The single message of the coordination protocol, sent at most once
/// per window by the leader. Field order is the wire order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CoordinationMessage {
    /// Seat index the leader speaks through; the lowest seat the leader
    /// operator controls.
    pub sender_id: MemberIndex,
    pub coordination_block: u64,
    pub wallet_public_key_hash: WalletPublicKeyHash,
    pub proposal: CoordinationProposal,
}
