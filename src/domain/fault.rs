use crate::foundation::OperatorAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attributable deviation from honest leader behavior, consumable by
/// downstream slashing. The coordination core records faults but does
/// not enforce anything.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CoordinationFaultType {
    /// The leader missed their turn to propose a wallet action.
    LeaderIdleness,
    /// The leader's proposal turned out to be invalid.
    LeaderMistake,
    /// A non-leader operator raised their own proposal.
    LeaderImpersonation,
}

impl fmt::Display for CoordinationFaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinationFaultType::LeaderIdleness => "LeaderIdleness",
            CoordinationFaultType::LeaderMistake => "LeaderMistake",
            CoordinationFaultType::LeaderImpersonation => "LeaderImpersonation",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CoordinationFault {
    /// Address of the operator responsible for the fault.
    pub culprit: OperatorAddress,
    pub fault_type: CoordinationFaultType,
}

impl fmt::Display for CoordinationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operator [{}], fault [{}]", self.culprit, self.fault_type)
    }
}
