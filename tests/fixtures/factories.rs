#![allow(dead_code)]

use super::constants::{SCENARIO_SAFE_BLOCK_HASH, WALLET_PUBLIC_KEY_HEX};
use async_trait::async_trait;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::sync::{Arc, Once};
use tessera_core::application::generator::{ProposalGenerator, ProposalRequest};
use tessera_core::application::latch::ProtocolLatch;
use tessera_core::application::membership::MembershipValidator;
use tessera_core::application::validation::ProposalValidators;
use tessera_core::application::CoordinationExecutor;
use tessera_core::domain::proposal::{CoordinationProposal, RedemptionProposal};
use tessera_core::domain::Wallet;
use tessera_core::foundation::{BlockHash, OperatorAddress};
use tessera_core::infrastructure::chain::mock::MockChain;
use tessera_core::infrastructure::chain::{Chain, Signing};
use tessera_core::infrastructure::config::CoordinationConfig;
use tessera_core::infrastructure::logging::init_logger;
use tessera_core::infrastructure::transport::mock::{MockChannel, MockHub};
use tessera_core::Result;

static INIT_LOGGING: Once = Once::new();

pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| init_logger("warn"));
}

pub fn wallet_public_key() -> PublicKey {
    let bytes = hex::decode(WALLET_PUBLIC_KEY_HEX).expect("valid wallet key hex");
    PublicKey::from_slice(&bytes).expect("valid wallet public key")
}

/// One operator of the test network: a deterministic network keypair
/// whose secret scalar is the given small integer (fill 1 hashes to
/// address `751e76e8…`, fill 2 to `06afd46b…`, fill 3 to `7dd65592…`),
/// plus its handle to the wallet channel.
pub struct TestOperator {
    pub public_key: Vec<u8>,
    pub address: OperatorAddress,
    pub channel: Arc<MockChannel>,
}

pub fn test_operator(hub: &Arc<MockHub>, channel_name: &str, fill: u8) -> TestOperator {
    let secp = Secp256k1::new();
    let mut secret_bytes = [0u8; 32];
    secret_bytes[31] = fill;
    let secret = SecretKey::from_slice(&secret_bytes).expect("valid secret key");
    let public_key = PublicKey::from_secret_key(&secp, &secret).serialize().to_vec();
    let address = tessera_core::infrastructure::chain::mock::MockSigning
        .public_key_to_address(&public_key)
        .expect("address");
    let channel = Arc::new(MockChannel::new(hub.clone(), channel_name, public_key.clone()));
    TestOperator { public_key, address, channel }
}

/// Fast test timing: 5 ms per block, i.e. a 400 ms active phase.
pub fn fast_config() -> CoordinationConfig {
    CoordinationConfig { block_time_millis: 5, ..CoordinationConfig::default() }
}

/// Chain positioned at the start of window 900, with the scenario safe
/// block hash installed at block 868.
pub fn scenario_chain() -> Arc<MockChain> {
    let chain = Arc::new(MockChain::new());
    chain.set_current_block(900);
    chain.set_block_hash(868, BlockHash::new(SCENARIO_SAFE_BLOCK_HASH));
    chain
}

/// The standard three-operator roster: operators with secret scalars 1
/// and 2 follow; under [`super::constants::SCENARIO_SAFE_BLOCK_HASH`]
/// (`[1u8; 32]`) the SplitMix64 shuffle over the sorted unique address
/// set elects the scalar-3 operator (`7dd65592…`) for window 900.
/// Seats (1-based): `[f1, f2, L, L, f2, f1, f1, f2, L, L]`.
pub fn scenario_roster(
    follower_1: &TestOperator,
    follower_2: &TestOperator,
    leader: &TestOperator,
) -> Vec<OperatorAddress> {
    vec![
        follower_1.address.clone(),
        follower_2.address.clone(),
        leader.address.clone(),
        leader.address.clone(),
        follower_2.address.clone(),
        follower_1.address.clone(),
        follower_1.address.clone(),
        follower_2.address.clone(),
        leader.address.clone(),
        leader.address.clone(),
    ]
}

pub fn build_executor(
    chain: Arc<MockChain>,
    wallet: Wallet,
    operator: &TestOperator,
    generator: Arc<dyn ProposalGenerator>,
    config: CoordinationConfig,
) -> CoordinationExecutor {
    let members_indexes = wallet.members_by_operator(&operator.address);
    build_executor_with_members(chain, wallet, operator, members_indexes, generator, config)
}

pub fn build_executor_with_members(
    chain: Arc<MockChain>,
    wallet: Wallet,
    operator: &TestOperator,
    members_indexes: Vec<u8>,
    generator: Arc<dyn ProposalGenerator>,
    config: CoordinationConfig,
) -> CoordinationExecutor {
    let membership_validator = Arc::new(MembershipValidator::new(
        wallet.signing_group_operators().to_vec(),
        chain.signing(),
    ));
    CoordinationExecutor::new(
        chain,
        wallet,
        members_indexes,
        operator.address.clone(),
        operator.channel.clone(),
        operator.channel.clone(),
        membership_validator,
        Arc::new(ProtocolLatch::new()),
        generator,
        Arc::new(ProposalValidators::structural()),
        config,
    )
}

/// Generator returning a fixed proposal regardless of the checklist.
pub struct StaticProposalGenerator {
    proposal: CoordinationProposal,
}

impl StaticProposalGenerator {
    pub fn new(proposal: CoordinationProposal) -> Self {
        Self { proposal }
    }
}

#[async_trait]
impl ProposalGenerator for StaticProposalGenerator {
    async fn generate(&self, _request: &ProposalRequest) -> Result<CoordinationProposal> {
        Ok(self.proposal.clone())
    }
}

/// The redemption proposal of the follower scenarios: two output
/// scripts and a 10 000 satoshi fee.
pub fn redemption_proposal() -> CoordinationProposal {
    CoordinationProposal::Redemption(RedemptionProposal {
        redeemers_output_scripts: vec![
            hex::decode("00148db50eb52063ea9d98b3eac91489a90f738986f6").expect("script hex"),
            hex::decode("76a9148db50eb52063ea9d98b3eac91489a90f738986f688ac").expect("script hex"),
        ],
        redemption_tx_fee: 10_000,
    })
}
