use crate::fixtures::*;
use std::sync::Arc;
use std::time::Duration;
use tessera_core::domain::fault::CoordinationFaultType;
use tessera_core::domain::proposal::{CoordinationProposal, HeartbeatProposal};
use tessera_core::domain::{CoordinationWindow, Wallet};
use tessera_core::foundation::WalletPublicKeyHash;
use tessera_core::infrastructure::transport::mock::MockHub;
use tessera_core::infrastructure::transport::{ChannelSend, CoordinationMessage};

const CHANNEL: &str = "wallet-aa768412";

/// Leader and follower coordinate the same window end to end: the
/// follower returns the exact proposal the leader broadcast, and records
/// no faults.
#[tokio::test]
async fn follower_accepts_the_leader_proposal() {
    init_test_logging();

    let hub = Arc::new(MockHub::new());
    let follower_1 = test_operator(&hub, CHANNEL, 1);
    let follower_2 = test_operator(&hub, CHANNEL, 2);
    let leader = test_operator(&hub, CHANNEL, 3);

    let roster = scenario_roster(&follower_1, &follower_2, &leader);
    let chain = scenario_chain();

    let proposal = redemption_proposal();

    let follower_executor = build_executor(
        chain.clone(),
        Wallet::new(wallet_public_key(), roster.clone()),
        &follower_1,
        Arc::new(StaticProposalGenerator::new(CoordinationProposal::Noop)),
        fast_config(),
    );
    let leader_executor = build_executor(
        chain.clone(),
        Wallet::new(wallet_public_key(), roster.clone()),
        &leader,
        Arc::new(StaticProposalGenerator::new(proposal.clone())),
        fast_config(),
    );

    let window = CoordinationWindow::new(900);

    let follower_task = tokio::spawn(async move { follower_executor.coordinate(&window).await });

    // Let the follower subscribe before the leader speaks.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let leader_result = leader_executor.coordinate(&window).await.expect("leader result");

    let follower_result =
        follower_task.await.expect("follower task").expect("follower result");

    assert_eq!(leader_result.leader, leader.address);
    assert_eq!(leader_result.proposal, proposal);
    assert!(leader_result.faults.is_empty());

    assert_eq!(follower_result.leader, leader.address);
    assert_eq!(follower_result.proposal, proposal);
    assert!(follower_result.faults.is_empty());
}

/// The follower survives a barrage of malformed and adversarial
/// messages, accepts the eventual valid proposal, and attributes exactly
/// one fault per culprit: a mistake against the leader that garbled a
/// payload, an impersonation against the non-leader that raised its own
/// proposal, and no idleness.
#[tokio::test]
async fn follower_attributes_faults_and_still_accepts_valid_proposal() {
    init_test_logging();

    let hub = Arc::new(MockHub::new());
    let follower_1 = test_operator(&hub, CHANNEL, 1);
    let follower_2 = test_operator(&hub, CHANNEL, 2);
    let leader = test_operator(&hub, CHANNEL, 3);

    let roster = scenario_roster(&follower_1, &follower_2, &leader);
    let chain = scenario_chain();

    let wallet = Wallet::new(wallet_public_key(), roster.clone());
    let wallet_public_key_hash = wallet.public_key_hash();

    let follower_executor = build_executor(
        chain,
        wallet,
        &follower_1,
        Arc::new(StaticProposalGenerator::new(CoordinationProposal::Noop)),
        fast_config(),
    );

    let window = CoordinationWindow::new(900);
    let proposal = redemption_proposal();

    let leader_seat = 3u8;
    let follower_1_seat = 1u8;
    let follower_2_seat = 2u8;

    let adversarial_proposal = proposal.clone();
    let sender_task = tokio::spawn(async move {
        // Give the follower routine time to subscribe.
        tokio::time::sleep(Duration::from_millis(100)).await;

        let noop_message = |sender_id: u8| CoordinationMessage {
            sender_id,
            coordination_block: 900,
            wallet_public_key_hash,
            proposal: CoordinationProposal::Noop,
        };

        // Undecodable payload from the leader.
        leader.channel.send_raw(vec![0xde, 0xad, 0xbe, 0xef]).await.expect("send");

        // The follower's own message loops back.
        follower_1
            .channel
            .send(&noop_message(follower_1_seat))
            .await
            .expect("send");

        // Leader speaking through a seat it does not control.
        leader.channel.send(&noop_message(follower_2_seat)).await.expect("send");

        // Wrong coordination block.
        let mut wrong_block = noop_message(leader_seat);
        wrong_block.coordination_block = 901;
        leader.channel.send(&wrong_block).await.expect("send");

        // Wrong wallet.
        let mut wrong_wallet = noop_message(leader_seat);
        wrong_wallet.wallet_public_key_hash = WalletPublicKeyHash::new([0x01; 20]);
        leader.channel.send(&wrong_wallet).await.expect("send");

        // A non-leader raising their own proposal.
        follower_2.channel.send(&noop_message(follower_2_seat)).await.expect("send");

        // Leader proposing an action outside the window checklist.
        let mut disallowed = noop_message(leader_seat);
        disallowed.proposal = CoordinationProposal::Heartbeat(HeartbeatProposal {
            message: b"heartbeat message".to_vec(),
        });
        leader.channel.send(&disallowed).await.expect("send");

        // Finally, a proper proposal.
        let mut valid = noop_message(leader_seat);
        valid.proposal = adversarial_proposal;
        leader.channel.send(&valid).await.expect("send");

        (leader, follower_2)
    });

    let result = follower_executor.coordinate(&window).await.expect("follower result");
    let (leader, follower_2) = sender_task.await.expect("sender task");

    assert_eq!(result.leader, leader.address);
    assert_eq!(result.proposal, proposal);

    assert_eq!(result.faults.len(), 2);
    assert_eq!(result.faults[0].culprit, leader.address);
    assert_eq!(result.faults[0].fault_type, CoordinationFaultType::LeaderMistake);
    assert_eq!(result.faults[1].culprit, follower_2.address);
    assert_eq!(result.faults[1].fault_type, CoordinationFaultType::LeaderImpersonation);
    assert!(result
        .faults
        .iter()
        .all(|fault| fault.fault_type != CoordinationFaultType::LeaderIdleness));
}

/// A silent leader costs the window: the follower resolves to a noop
/// proposal and records a single idleness fault against the leader.
#[tokio::test]
async fn follower_records_idleness_when_the_leader_stays_silent() {
    init_test_logging();

    let hub = Arc::new(MockHub::new());
    let follower_1 = test_operator(&hub, CHANNEL, 1);
    let follower_2 = test_operator(&hub, CHANNEL, 2);
    let leader = test_operator(&hub, CHANNEL, 3);

    let roster = scenario_roster(&follower_1, &follower_2, &leader);
    let chain = scenario_chain();

    let follower_executor = build_executor(
        chain,
        Wallet::new(wallet_public_key(), roster),
        &follower_1,
        Arc::new(StaticProposalGenerator::new(CoordinationProposal::Noop)),
        fast_config(),
    );

    let window = CoordinationWindow::new(900);
    let result = follower_executor.coordinate(&window).await.expect("follower result");

    assert_eq!(result.proposal, CoordinationProposal::Noop);
    assert_eq!(result.faults.len(), 1);
    assert_eq!(result.faults[0].culprit, leader.address);
    assert_eq!(result.faults[0].fault_type, CoordinationFaultType::LeaderIdleness);
}
