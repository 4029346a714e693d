use crate::application::generator::{ProposalGenerator, ProposalRequest};
use crate::application::latch::ProtocolLatch;
use crate::application::membership::MembershipValidator;
use crate::application::validation::ProposalValidators;
use crate::domain::action::WalletActionType;
use crate::domain::coordination::{
    actions_checklist, coordination_leader, coordination_seed, CoordinationResult,
};
use crate::domain::fault::{CoordinationFault, CoordinationFaultType};
use crate::domain::proposal::CoordinationProposal;
use crate::domain::wallet::Wallet;
use crate::domain::window::CoordinationWindow;
use crate::foundation::{
    CoordinationError, Hash32, MemberIndex, OperatorAddress, Result, WalletPublicKeyHash,
};
use crate::infrastructure::chain::{Chain, Signing};
use crate::infrastructure::config::CoordinationConfig;
use crate::infrastructure::transport::{codec, ChannelRecv, ChannelSend};
use crate::infrastructure::transport::{ChannelEnvelope, CoordinationMessage};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Faults accumulated within one window. At most one fault is attributed
/// to a culprit per window; the first recorded one wins.
struct FaultRecorder {
    faults: Vec<CoordinationFault>,
}

impl FaultRecorder {
    fn new() -> Self {
        Self { faults: Vec::new() }
    }

    fn record(&mut self, culprit: OperatorAddress, fault_type: CoordinationFaultType) {
        if self.faults.iter().any(|fault| fault.culprit == culprit) {
            return;
        }
        self.faults.push(CoordinationFault { culprit, fault_type });
    }

    fn into_vec(self) -> Vec<CoordinationFault> {
        self.faults
    }
}

/// Executes the coordination procedure for a single wallet. One
/// executor per coordinated wallet; at most one coordination runs at a
/// time per executor.
pub struct CoordinationExecutor {
    lock: Semaphore,
    chain: Arc<dyn Chain>,
    signing: Arc<dyn Signing>,
    coordinated_wallet: Wallet,
    /// Seats of the signing group controlled by this node, 1-based.
    members_indexes: Vec<MemberIndex>,
    operator_address: OperatorAddress,
    channel_send: Arc<dyn ChannelSend>,
    channel_recv: Arc<dyn ChannelRecv>,
    membership_validator: Arc<MembershipValidator>,
    protocol_latch: Arc<ProtocolLatch>,
    proposal_generator: Arc<dyn ProposalGenerator>,
    proposal_validators: Arc<ProposalValidators>,
    config: CoordinationConfig,
}

impl CoordinationExecutor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain: Arc<dyn Chain>,
        coordinated_wallet: Wallet,
        members_indexes: Vec<MemberIndex>,
        operator_address: OperatorAddress,
        channel_send: Arc<dyn ChannelSend>,
        channel_recv: Arc<dyn ChannelRecv>,
        membership_validator: Arc<MembershipValidator>,
        protocol_latch: Arc<ProtocolLatch>,
        proposal_generator: Arc<dyn ProposalGenerator>,
        proposal_validators: Arc<ProposalValidators>,
        config: CoordinationConfig,
    ) -> Self {
        // The membership filter keeps non-members out of the channel
        // before any coordination starts.
        channel_recv.set_membership_filter(membership_validator.sender_filter());

        let signing = chain.signing();
        Self {
            lock: Semaphore::new(1),
            chain,
            signing,
            coordinated_wallet,
            members_indexes,
            operator_address,
            channel_send,
            channel_recv,
            membership_validator,
            protocol_latch,
            proposal_generator,
            proposal_validators,
            config,
        }
    }

    pub fn wallet_public_key_hash(&self) -> WalletPublicKeyHash {
        self.coordinated_wallet.public_key_hash()
    }

    /// Executes the coordination procedure for the given window.
    ///
    /// Returns [`CoordinationError::ExecutorBusy`] when a coordination
    /// is already in flight for this wallet; the caller must not retry
    /// within the same window. Transient chain failures during seed
    /// derivation surface as [`CoordinationError::SeedDerivationFailed`]
    /// and skip the window without recording faults.
    pub async fn coordinate(&self, window: &CoordinationWindow) -> Result<CoordinationResult> {
        let _permit = self.lock.try_acquire().map_err(|_| CoordinationError::ExecutorBusy)?;
        let _latch = self.protocol_latch.lock();

        let wallet_public_key_hash = self.wallet_public_key_hash();

        let current_block = self
            .chain
            .current_block()
            .await
            .map_err(|err| CoordinationError::chain("current_block", err))?;
        if current_block >= window.coordination_block() + self.config.window_duration_blocks() {
            return Err(CoordinationError::WindowExpired {
                coordination_block: window.coordination_block(),
                current_block,
            });
        }

        let seed = self.derive_coordination_seed(window).await?;

        let leader =
            coordination_leader(&seed, self.coordinated_wallet.signing_group_operators())
                .ok_or(CoordinationError::EmptySigningGroup)?;

        let checklist = actions_checklist(window.index(), &seed, &self.config.checklist);

        info!(
            "coordination: window started block={} index={} wallet={} leader={} checklist={:?}",
            window.coordination_block(),
            window.index(),
            wallet_public_key_hash,
            leader,
            checklist,
        );

        let active_phase_timeout = self.active_phase_timeout(window, current_block);

        let (proposal, faults) = if leader == self.operator_address {
            match tokio::time::timeout(
                active_phase_timeout,
                self.leader_routine(window, &checklist),
            )
            .await
            {
                Ok(proposal) => (proposal?, Vec::new()),
                Err(_elapsed) => {
                    warn!(
                        "coordination: leader routine missed the active phase deadline block={} wallet={}",
                        window.coordination_block(),
                        wallet_public_key_hash,
                    );
                    (CoordinationProposal::Noop, Vec::new())
                }
            }
        } else {
            self.follower_routine(window, &leader, &checklist, active_phase_timeout).await?
        };

        let result = CoordinationResult {
            wallet: self.coordinated_wallet.clone(),
            window: *window,
            leader,
            proposal,
            faults,
        };

        info!("coordination: window completed {}", result);

        Ok(result)
    }

    /// Coordination seed for the window, derived from the safe block
    /// hash read off the chain.
    async fn derive_coordination_seed(&self, window: &CoordinationWindow) -> Result<Hash32> {
        let safe_block =
            window.coordination_block().saturating_sub(self.config.safe_block_shift);
        let safe_block_hash =
            self.chain.block_hash_by_number(safe_block).await.map_err(|err| {
                CoordinationError::SeedDerivationFailed {
                    coordination_block: window.coordination_block(),
                    details: format!("failed to get safe block hash: {err}"),
                }
            })?;

        Ok(coordination_seed(&self.wallet_public_key_hash(), &safe_block_hash))
    }

    /// Wall-clock budget until the active phase ends.
    fn active_phase_timeout(&self, window: &CoordinationWindow, current_block: u64) -> Duration {
        let active_phase_end = window.coordination_block() + self.config.active_phase_blocks;
        let remaining_blocks = active_phase_end.saturating_sub(current_block);
        Duration::from_millis(remaining_blocks.saturating_mul(self.config.block_time_millis))
    }

    /// Produces a proposal for the window's checklist and broadcasts it.
    /// The leader is a participant; the proposal is also returned
    /// locally. The broadcast is best-effort and not retried.
    async fn leader_routine(
        &self,
        window: &CoordinationWindow,
        checklist: &[WalletActionType],
    ) -> Result<CoordinationProposal> {
        let wallet_public_key_hash = self.wallet_public_key_hash();

        let request = ProposalRequest {
            wallet_public_key_hash,
            actions_checklist: checklist.to_vec(),
        };
        let proposal = match self.proposal_generator.generate(&request).await {
            Ok(proposal) => proposal,
            Err(err) => {
                warn!(
                    "coordination: proposal generator failed, proposing noop block={} wallet={} error={}",
                    window.coordination_block(),
                    wallet_public_key_hash,
                    err,
                );
                CoordinationProposal::Noop
            }
        };

        // Multiple controlled seats collapse to a single leadership; the
        // lowest-indexed seat speaks.
        let sender_id = self
            .members_indexes
            .iter()
            .copied()
            .min()
            .ok_or(CoordinationError::NoControlledSeats)?;

        let message = CoordinationMessage {
            sender_id,
            coordination_block: window.coordination_block(),
            wallet_public_key_hash,
            proposal: proposal.clone(),
        };

        if let Err(err) = self.channel_send.send(&message).await {
            warn!(
                "coordination: leader broadcast failed block={} wallet={} error={}",
                window.coordination_block(),
                wallet_public_key_hash,
                err,
            );
        } else {
            info!(
                "coordination: leader proposal broadcast block={} wallet={} sender_id={} action={}",
                window.coordination_block(),
                wallet_public_key_hash,
                sender_id,
                proposal.action_type(),
            );
        }

        Ok(proposal)
    }

    /// Waits for the first acceptable message from the elected leader.
    /// Yields a noop proposal and a `LeaderIdleness` fault when the
    /// active phase ends without one.
    async fn follower_routine(
        &self,
        window: &CoordinationWindow,
        leader: &OperatorAddress,
        checklist: &[WalletActionType],
        active_phase_timeout: Duration,
    ) -> Result<(CoordinationProposal, Vec<CoordinationFault>)> {
        let mut faults = FaultRecorder::new();

        // A leader may conclude a window with an explicit no-op.
        let mut allowed_actions = vec![WalletActionType::Noop];
        allowed_actions.extend_from_slice(checklist);

        let mut subscription = self
            .channel_recv
            .subscribe()
            .await
            .map_err(|err| CoordinationError::transport("subscribe", err))?;

        let deadline = tokio::time::sleep(active_phase_timeout);
        tokio::pin!(deadline);

        loop {
            let envelope = tokio::select! {
                _ = &mut deadline => None,
                envelope = subscription.next() => envelope,
            };

            let Some(envelope) = envelope else {
                // Deadline hit, or the transport went away mid-window.
                // Either way the leader's proposal was not observed.
                faults.record(leader.clone(), CoordinationFaultType::LeaderIdleness);
                return Ok((CoordinationProposal::Noop, faults.into_vec()));
            };

            if let Some(proposal) =
                self.process_follower_message(window, leader, &allowed_actions, envelope, &mut faults)
            {
                return Ok((proposal, faults.into_vec()));
            }
        }
    }

    /// Runs one received envelope through the acceptance pipeline.
    /// Returns the proposal when the envelope is the leader's valid
    /// message; otherwise records any attributable fault and returns
    /// `None` to keep waiting.
    fn process_follower_message(
        &self,
        window: &CoordinationWindow,
        leader: &OperatorAddress,
        allowed_actions: &[WalletActionType],
        envelope: ChannelEnvelope,
        faults: &mut FaultRecorder,
    ) -> Option<CoordinationProposal> {
        let coordination_block = window.coordination_block();

        let sender_address = match self.signing.public_key_to_address(&envelope.sender_public_key)
        {
            Ok(address) => address,
            Err(err) => {
                debug!("coordination: dropping message with unparseable sender key error={}", err);
                return None;
            }
        };

        let message = match codec::decode_coordination_message(&envelope.payload) {
            Ok(message) => message,
            Err(err) => {
                warn!(
                    "coordination: dropping undecodable message block={} sender={} error={}",
                    coordination_block, sender_address, err,
                );
                if sender_address == *leader {
                    faults.record(leader.clone(), CoordinationFaultType::LeaderMistake);
                }
                return None;
            }
        };

        // Own broadcasts loop back through the channel.
        if self.members_indexes.contains(&message.sender_id) {
            return None;
        }

        if !self
            .membership_validator
            .is_valid_membership(message.sender_id, &envelope.sender_public_key)
        {
            debug!(
                "coordination: dropping message with inconsistent membership block={} sender_id={} sender={}",
                coordination_block, message.sender_id, sender_address,
            );
            return None;
        }

        if message.coordination_block != coordination_block {
            debug!(
                "coordination: dropping message for another window expected={} got={}",
                coordination_block, message.coordination_block,
            );
            return None;
        }

        if message.wallet_public_key_hash != self.wallet_public_key_hash() {
            debug!(
                "coordination: dropping message for another wallet block={} wallet={}",
                coordination_block, message.wallet_public_key_hash,
            );
            return None;
        }

        // Membership was already proven, so a non-leader seat here is an
        // operator raising their own proposal.
        let Some(seat_operator) = self.coordinated_wallet.operator_of_seat(message.sender_id)
        else {
            return None;
        };
        if seat_operator != leader {
            warn!(
                "coordination: leader impersonation block={} culprit={}",
                coordination_block, seat_operator,
            );
            faults.record(seat_operator.clone(), CoordinationFaultType::LeaderImpersonation);
            return None;
        }

        let action = message.proposal.action_type();
        if !allowed_actions.contains(&action) {
            warn!(
                "coordination: leader proposed a disallowed action block={} action={}",
                coordination_block, action,
            );
            faults.record(leader.clone(), CoordinationFaultType::LeaderMistake);
            return None;
        }

        if action != WalletActionType::Noop {
            if let Err(err) = self.proposal_validators.validate(&message.proposal) {
                warn!(
                    "coordination: leader proposal failed validation block={} action={} error={}",
                    coordination_block, action, err,
                );
                faults.record(leader.clone(), CoordinationFaultType::LeaderMistake);
                return None;
            }
        }

        info!(
            "coordination: accepted leader proposal block={} wallet={} action={}",
            coordination_block,
            message.wallet_public_key_hash,
            action,
        );

        Some(message.proposal)
    }
}
