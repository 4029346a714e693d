use crate::domain::fault::CoordinationFault;
use crate::domain::proposal::CoordinationProposal;
use crate::domain::wallet::Wallet;
use crate::domain::window::CoordinationWindow;
use crate::foundation::OperatorAddress;
use std::fmt;

/// Outcome of the coordination procedure executed for the given wallet
/// in the given coordination window. The proposal is `Noop` exactly when
/// no valid leader proposal was observed before the active phase ended.
#[derive(Clone, Debug)]
pub struct CoordinationResult {
    pub wallet: Wallet,
    pub window: CoordinationWindow,
    pub leader: OperatorAddress,
    pub proposal: CoordinationProposal,
    pub faults: Vec<CoordinationFault>,
}

impl fmt::Display for CoordinationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wallet [{}], window [{}], leader [{}], proposal [{}], faults [",
            self.wallet,
            self.window,
            self.leader,
            self.proposal.action_type(),
        )?;
        for (i, fault) in self.faults.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{fault}")?;
        }
        write!(f, "]")
    }
}
