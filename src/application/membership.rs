use crate::foundation::{MemberIndex, OperatorAddress};
use crate::infrastructure::chain::Signing;
use crate::infrastructure::transport::SenderFilter;
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

/// Validates message senders against the signing group roster using the
/// shared seat table. Read-only after construction and shared across
/// executors.
pub struct MembershipValidator {
    /// Roster in seat order; index `i` holds the operator of seat `i+1`.
    operators: Vec<OperatorAddress>,
    /// Unique operator addresses, for the channel-level filter.
    members: HashSet<OperatorAddress>,
    signing: Arc<dyn Signing>,
}

impl MembershipValidator {
    pub fn new(operators: Vec<OperatorAddress>, signing: Arc<dyn Signing>) -> Self {
        let members = operators.iter().cloned().collect();
        Self { operators, members, signing }
    }

    /// Whether the holder of the given network public key is a member of
    /// the group, under any seat.
    pub fn is_in_group(&self, public_key: &[u8]) -> bool {
        match self.signing.public_key_to_address(public_key) {
            Ok(address) => self.members.contains(&address),
            Err(err) => {
                debug!("membership: rejecting unparseable sender key error={}", err);
                false
            }
        }
    }

    /// Whether the holder of the given network public key actually
    /// occupies the given seat. Filters impostors speaking through a
    /// seat they do not control.
    pub fn is_valid_membership(&self, member_index: MemberIndex, public_key: &[u8]) -> bool {
        if member_index == 0 {
            return false;
        }
        let Some(seat_operator) = self.operators.get(usize::from(member_index) - 1) else {
            return false;
        };
        match self.signing.public_key_to_address(public_key) {
            Ok(address) => address == *seat_operator,
            Err(err) => {
                debug!("membership: rejecting unparseable sender key error={}", err);
                false
            }
        }
    }

    /// Channel-level predicate dropping senders from outside the group.
    pub fn sender_filter(self: &Arc<Self>) -> SenderFilter {
        let validator = Arc::clone(self);
        Arc::new(move |public_key: &[u8]| validator.is_in_group(public_key))
    }
}
