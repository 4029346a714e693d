use crate::domain::action::WalletActionType;
use crate::domain::proposal::CoordinationProposal;
use crate::foundation::{Result, WalletPublicKeyHash};
use async_trait::async_trait;

/// Input of a proposal generation round: the coordinated wallet and the
/// window's action checklist, in priority order.
#[derive(Clone, Debug)]
pub struct ProposalRequest {
    pub wallet_public_key_hash: WalletPublicKeyHash,
    pub actions_checklist: Vec<WalletActionType>,
}

/// Produces action proposals for the coordination leader. Implemented
/// outside the core against chain and Bitcoin state; the core treats
/// proposals as opaque beyond their action type.
///
/// The generator walks the checklist in order and returns the first
/// viable proposal, or [`CoordinationProposal::Noop`] when no listed
/// action can be proposed. Must be safe for concurrent calls from
/// multiple wallet executors.
#[async_trait]
pub trait ProposalGenerator: Send + Sync {
    async fn generate(&self, request: &ProposalRequest) -> Result<CoordinationProposal>;
}

/// Generator proposing nothing, ever. Stands in for wallets with no
/// actionable state and keeps heartbeat-only deployments honest.
pub struct NoopProposalGenerator;

#[async_trait]
impl ProposalGenerator for NoopProposalGenerator {
    async fn generate(&self, _request: &ProposalRequest) -> Result<CoordinationProposal> {
        Ok(CoordinationProposal::Noop)
    }
}
