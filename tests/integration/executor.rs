use crate::fixtures::*;
use std::sync::Arc;
use std::time::Duration;
use tessera_core::domain::proposal::CoordinationProposal;
use tessera_core::domain::{CoordinationWindow, Wallet};
use tessera_core::foundation::ErrorCode;
use tessera_core::infrastructure::chain::mock::MockChain;
use tessera_core::infrastructure::transport::mock::MockHub;
use tessera_core::CoordinationError;

const CHANNEL: &str = "wallet-aa768412";

fn follower_setup() -> (Arc<MockChain>, tessera_core::application::CoordinationExecutor) {
    let hub = Arc::new(MockHub::new());
    let follower_1 = test_operator(&hub, CHANNEL, 1);
    let follower_2 = test_operator(&hub, CHANNEL, 2);
    let leader = test_operator(&hub, CHANNEL, 3);

    let roster = scenario_roster(&follower_1, &follower_2, &leader);
    let chain = scenario_chain();

    let executor = build_executor(
        chain.clone(),
        Wallet::new(wallet_public_key(), roster),
        &follower_1,
        Arc::new(StaticProposalGenerator::new(CoordinationProposal::Noop)),
        fast_config(),
    );
    (chain, executor)
}

/// Of two concurrent coordinations on the same executor exactly one
/// runs; the other is turned away with `ExecutorBusy`. Repeated with
/// staggered start offsets.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn second_concurrent_coordination_is_turned_away() {
    init_test_logging();

    let (_chain, executor) = follower_setup();
    let executor = Arc::new(executor);
    let window = CoordinationWindow::new(900);

    for round in 0u64..5 {
        let first = {
            let executor = executor.clone();
            tokio::spawn(async move { executor.coordinate(&window).await })
        };
        let second = {
            let executor = executor.clone();
            let offset = Duration::from_millis(round * 7);
            tokio::spawn(async move {
                tokio::time::sleep(offset).await;
                executor.coordinate(&window).await
            })
        };

        let outcomes = [first.await.expect("task"), second.await.expect("task")];

        let completed = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        let busy = outcomes
            .iter()
            .filter(|outcome| {
                matches!(outcome, Err(CoordinationError::ExecutorBusy))
            })
            .count();

        assert_eq!(completed, 1, "round {round}");
        assert_eq!(busy, 1, "round {round}");
    }
}

/// A missing safe block hash is a transient chain failure: the window is
/// skipped with a retriable seed derivation error and no result.
#[tokio::test]
async fn missing_safe_block_hash_skips_the_window() {
    init_test_logging();

    let hub = Arc::new(MockHub::new());
    let follower_1 = test_operator(&hub, CHANNEL, 1);
    let follower_2 = test_operator(&hub, CHANNEL, 2);
    let leader = test_operator(&hub, CHANNEL, 3);
    let roster = scenario_roster(&follower_1, &follower_2, &leader);

    // A chain that never recorded the safe block hash.
    let chain = Arc::new(MockChain::new());
    chain.set_current_block(900);

    let executor = build_executor(
        chain,
        Wallet::new(wallet_public_key(), roster),
        &follower_1,
        Arc::new(StaticProposalGenerator::new(CoordinationProposal::Noop)),
        fast_config(),
    );

    let window = CoordinationWindow::new(900);
    let err = executor.coordinate(&window).await.expect_err("seed failure");
    assert_eq!(err.code(), ErrorCode::SeedDerivationFailed);
}

/// Coordination is only eligible until the window's end block.
#[tokio::test]
async fn expired_window_is_rejected() {
    init_test_logging();

    let (chain, executor) = follower_setup();
    chain.set_current_block(1000);

    let window = CoordinationWindow::new(900);
    let err = executor.coordinate(&window).await.expect_err("expired window");
    assert_eq!(err.code(), ErrorCode::WindowExpired);
}
