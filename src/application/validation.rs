use crate::domain::action::WalletActionType;
use crate::domain::proposal::CoordinationProposal;
use crate::foundation::{CoordinationError, Result};
use std::collections::HashMap;

/// Per-action semantic check of a received proposal.
///
/// The core registers cheap structural validators for every action; the
/// embedding process swaps in validators that additionally check chain
/// and Bitcoin state (e.g. required funding-tx confirmations for deposit
/// sweeps) before the result is executed downstream.
pub trait ProposalValidator: Send + Sync {
    fn validate(&self, proposal: &CoordinationProposal) -> Result<()>;
}

/// Registry of proposal validators, keyed by action type. Adding a new
/// wallet action means registering its validator here and nothing else
/// in the executor.
pub struct ProposalValidators {
    validators: HashMap<WalletActionType, Box<dyn ProposalValidator>>,
}

impl ProposalValidators {
    /// Registry with the structural validators for every known action.
    pub fn structural() -> Self {
        let mut registry = Self { validators: HashMap::new() };
        registry.register(WalletActionType::Redemption, Box::new(RedemptionStructuralValidator));
        registry.register(WalletActionType::DepositSweep, Box::new(DepositSweepStructuralValidator));
        registry.register(WalletActionType::MovingFunds, Box::new(MovingFundsStructuralValidator));
        registry.register(
            WalletActionType::MovedFundsSweep,
            Box::new(MovedFundsSweepStructuralValidator),
        );
        registry.register(WalletActionType::Heartbeat, Box::new(HeartbeatStructuralValidator));
        registry
    }

    /// Replaces or adds the validator for an action.
    pub fn register(&mut self, action: WalletActionType, validator: Box<dyn ProposalValidator>) {
        self.validators.insert(action, validator);
    }

    pub fn validate(&self, proposal: &CoordinationProposal) -> Result<()> {
        let action = proposal.action_type();
        if action == WalletActionType::Noop {
            return Err(CoordinationError::ProposalValidationFailed {
                details: "noop proposal is never submitted for validation".to_string(),
            });
        }
        match self.validators.get(&action) {
            Some(validator) => validator.validate(proposal),
            None => Err(CoordinationError::ProposalValidationFailed {
                details: format!("no validator registered for action {action}"),
            }),
        }
    }
}

fn fail(details: impl Into<String>) -> CoordinationError {
    CoordinationError::ProposalValidationFailed { details: details.into() }
}

struct RedemptionStructuralValidator;

impl ProposalValidator for RedemptionStructuralValidator {
    fn validate(&self, proposal: &CoordinationProposal) -> Result<()> {
        let CoordinationProposal::Redemption(redemption) = proposal else {
            return Err(fail("expected a redemption proposal"));
        };
        if redemption.redeemers_output_scripts.is_empty() {
            return Err(fail("redemption proposal has no output scripts"));
        }
        if redemption.redeemers_output_scripts.iter().any(|script| script.is_empty()) {
            return Err(fail("redemption proposal has an empty output script"));
        }
        if redemption.redemption_tx_fee == 0 {
            return Err(fail("redemption proposal has a zero transaction fee"));
        }
        Ok(())
    }
}

struct DepositSweepStructuralValidator;

impl ProposalValidator for DepositSweepStructuralValidator {
    fn validate(&self, proposal: &CoordinationProposal) -> Result<()> {
        let CoordinationProposal::DepositSweep(sweep) = proposal else {
            return Err(fail("expected a deposit sweep proposal"));
        };
        if sweep.deposits_keys.is_empty() {
            return Err(fail("deposit sweep proposal has no deposits"));
        }
        if sweep.sweep_tx_fee == 0 {
            return Err(fail("deposit sweep proposal has a zero transaction fee"));
        }
        Ok(())
    }
}

struct MovingFundsStructuralValidator;

impl ProposalValidator for MovingFundsStructuralValidator {
    fn validate(&self, proposal: &CoordinationProposal) -> Result<()> {
        let CoordinationProposal::MovingFunds(moving) = proposal else {
            return Err(fail("expected a moving funds proposal"));
        };
        if moving.target_wallets.is_empty() {
            return Err(fail("moving funds proposal has no target wallets"));
        }
        if moving.moving_funds_tx_fee == 0 {
            return Err(fail("moving funds proposal has a zero transaction fee"));
        }
        Ok(())
    }
}

struct MovedFundsSweepStructuralValidator;

impl ProposalValidator for MovedFundsSweepStructuralValidator {
    fn validate(&self, proposal: &CoordinationProposal) -> Result<()> {
        let CoordinationProposal::MovedFundsSweep(sweep) = proposal else {
            return Err(fail("expected a moved funds sweep proposal"));
        };
        if sweep.sweep_tx_fee == 0 {
            return Err(fail("moved funds sweep proposal has a zero transaction fee"));
        }
        Ok(())
    }
}

struct HeartbeatStructuralValidator;

impl ProposalValidator for HeartbeatStructuralValidator {
    fn validate(&self, proposal: &CoordinationProposal) -> Result<()> {
        let CoordinationProposal::Heartbeat(heartbeat) = proposal else {
            return Err(fail("expected a heartbeat proposal"));
        };
        if heartbeat.message.is_empty() {
            return Err(fail("heartbeat proposal has an empty message"));
        }
        Ok(())
    }
}
