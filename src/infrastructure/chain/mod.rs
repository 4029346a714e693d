//! Interface to the on-chain state provider.
//!
//! The coordination core never talks to a concrete chain. It consumes
//! this trait, which the embedding process backs with its connector; the
//! in-tree [`mock::MockChain`] backs it in tests.

pub mod mock;

use crate::foundation::{BlockHash, OperatorAddress, Result};
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use std::sync::Arc;

/// Lazy, unbounded stream of new block numbers. Monotone, but it may
/// skip blocks and may deliver the same block more than once; consumers
/// dedupe. The stream ends when the subscription is dropped or the
/// connector shuts down.
pub type BlockStream = BoxStream<'static, u64>;

/// Operator identity operations of the chain.
pub trait Signing: Send + Sync {
    /// Canonical operator address for a serialized network public key.
    fn public_key_to_address(&self, public_key: &[u8]) -> Result<OperatorAddress>;
}

#[async_trait]
pub trait Chain: Send + Sync {
    async fn current_block(&self) -> Result<u64>;

    async fn watch_blocks(&self) -> Result<BlockStream>;

    /// 32-byte hash of the block with the given number. Fails when the
    /// block is unknown or the connector is temporarily unavailable.
    async fn block_hash_by_number(&self, block: u64) -> Result<BlockHash>;

    fn signing(&self) -> Arc<dyn Signing>;
}
