use crate::application::executor::CoordinationExecutor;
use crate::application::generator::ProposalGenerator;
use crate::application::latch::ProtocolLatch;
use crate::application::membership::MembershipValidator;
use crate::application::validation::ProposalValidators;
use crate::application::watcher::watch_coordination_windows;
use crate::domain::coordination::CoordinationResult;
use crate::domain::wallet::Wallet;
use crate::domain::window::CoordinationWindow;
use crate::foundation::{CoordinationError, OperatorAddress, Result, WalletPublicKeyHash};
use crate::infrastructure::chain::Chain;
use crate::infrastructure::config::CoordinationConfig;
use crate::infrastructure::transport::{ChannelRecv, ChannelSend};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Supervises the wallet coordinations of a single operator node. Each
/// coordination window fans out to every wallet executor the node
/// controls; results flow to the downstream signing executor through the
/// receiver handed out at construction.
pub struct Node {
    chain: Arc<dyn Chain>,
    operator_address: OperatorAddress,
    config: CoordinationConfig,
    executors: HashMap<WalletPublicKeyHash, Arc<CoordinationExecutor>>,
    results_tx: mpsc::UnboundedSender<CoordinationResult>,
}

impl Node {
    pub fn new(
        chain: Arc<dyn Chain>,
        operator_address: OperatorAddress,
        config: CoordinationConfig,
    ) -> (Self, mpsc::UnboundedReceiver<CoordinationResult>) {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let node = Self {
            chain,
            operator_address,
            config,
            executors: HashMap::new(),
            results_tx,
        };
        (node, results_rx)
    }

    pub fn operator_address(&self) -> &OperatorAddress {
        &self.operator_address
    }

    /// Registers a wallet for coordination. Returns `false` when this
    /// node's operator holds no seat in the wallet's signing group, in
    /// which case the wallet is skipped.
    ///
    /// The broadcast channel pair must belong to the wallet's dedicated
    /// channel; the transport layer hands it out by wallet name.
    pub fn add_wallet(
        &mut self,
        wallet: Wallet,
        channel_send: Arc<dyn ChannelSend>,
        channel_recv: Arc<dyn ChannelRecv>,
        proposal_generator: Arc<dyn ProposalGenerator>,
        proposal_validators: Arc<ProposalValidators>,
    ) -> bool {
        let wallet_public_key_hash = wallet.public_key_hash();

        let members_indexes = wallet.members_by_operator(&self.operator_address);
        if members_indexes.is_empty() {
            info!(
                "node: operator holds no seats in the signing group, skipping wallet={} operator={}",
                wallet_public_key_hash, self.operator_address,
            );
            return false;
        }

        let membership_validator = Arc::new(MembershipValidator::new(
            wallet.signing_group_operators().to_vec(),
            self.chain.signing(),
        ));

        let executor = CoordinationExecutor::new(
            self.chain.clone(),
            wallet,
            members_indexes,
            self.operator_address.clone(),
            channel_send,
            channel_recv,
            membership_validator,
            Arc::new(ProtocolLatch::new()),
            proposal_generator,
            proposal_validators,
            self.config.clone(),
        );

        info!("node: wallet registered for coordination wallet={}", wallet_public_key_hash);
        self.executors.insert(wallet_public_key_hash, Arc::new(executor));
        true
    }

    pub fn wallet_count(&self) -> usize {
        self.executors.len()
    }

    /// Dispatches one coordination window to every registered wallet
    /// executor, each on its own task. A busy executor is reported and
    /// left alone; the supervisor never retries within a window.
    pub fn handle_coordination_window(&self, window: CoordinationWindow) {
        for (wallet_public_key_hash, executor) in &self.executors {
            let wallet_public_key_hash = *wallet_public_key_hash;
            let executor = executor.clone();
            let results_tx = self.results_tx.clone();

            tokio::spawn(async move {
                match executor.coordinate(&window).await {
                    Ok(result) => {
                        info!("node: coordination result {}", result);
                        // Receiver gone means the downstream executor
                        // shut down; nothing to do with the result.
                        let _ = results_tx.send(result);
                    }
                    Err(CoordinationError::ExecutorBusy) => {
                        warn!(
                            "node: coordination executor busy wallet={} window={}",
                            wallet_public_key_hash,
                            window.coordination_block(),
                        );
                    }
                    Err(err) => {
                        warn!(
                            "node: coordination failed, window skipped wallet={} window={} error={}",
                            wallet_public_key_hash,
                            window.coordination_block(),
                            err,
                        );
                    }
                }
            });
        }
    }

    /// Watches the chain for coordination windows and dispatches them
    /// until the block stream ends.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        let blocks = self.chain.watch_blocks().await?;
        let frequency_blocks = self.config.frequency_blocks;
        let node = self.clone();

        watch_coordination_windows(blocks, frequency_blocks, move |window| {
            node.handle_coordination_window(window);
        })
        .await;

        Ok(())
    }
}
