use super::{BlockStream, Chain, Signing};
use crate::domain::wallet::hash160;
use crate::foundation::{BlockHash, CoordinationError, OperatorAddress, Result};
use async_trait::async_trait;
use log::warn;
use secp256k1::PublicKey;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// In-memory chain used by tests: programmable block hashes, a settable
/// current block, and a broadcast-backed block feed.
pub struct MockChain {
    current_block: AtomicU64,
    block_hashes: Mutex<HashMap<u64, BlockHash>>,
    blocks_tx: broadcast::Sender<u64>,
    signing: Arc<MockSigning>,
}

impl MockChain {
    pub fn new() -> Self {
        let (blocks_tx, _) = broadcast::channel(1024);
        Self {
            current_block: AtomicU64::new(0),
            block_hashes: Mutex::new(HashMap::new()),
            blocks_tx,
            signing: Arc::new(MockSigning),
        }
    }

    pub fn set_block_hash(&self, block: u64, hash: BlockHash) {
        if let Ok(mut hashes) = self.block_hashes.lock() {
            hashes.insert(block, hash);
        }
    }

    pub fn set_current_block(&self, block: u64) {
        self.current_block.store(block, Ordering::SeqCst);
    }

    /// Advances the current block and feeds it to every block watcher.
    pub fn push_block(&self, block: u64) {
        self.current_block.store(block, Ordering::SeqCst);
        // No receivers is fine; a chain does not care who watches.
        let _ = self.blocks_tx.send(block);
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Chain for MockChain {
    async fn current_block(&self) -> Result<u64> {
        Ok(self.current_block.load(Ordering::SeqCst))
    }

    async fn watch_blocks(&self) -> Result<BlockStream> {
        let mut receiver = self.blocks_tx.subscribe();
        let stream = async_stream::stream! {
            loop {
                match receiver.recv().await {
                    Ok(block) => yield block,
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("mock chain: block watcher lagged skipped={}", skipped);
                    }
                }
            }
        };
        Ok(Box::pin(stream))
    }

    async fn block_hash_by_number(&self, block: u64) -> Result<BlockHash> {
        self.block_hashes
            .lock()
            .map_err(|_| CoordinationError::chain("get_block_hash", "block hash store poisoned"))?
            .get(&block)
            .copied()
            .ok_or_else(|| {
                CoordinationError::chain("get_block_hash", format!("no hash recorded for block {block}"))
            })
    }

    fn signing(&self) -> Arc<dyn Signing> {
        self.signing.clone()
    }
}

/// Address scheme of the mock chain: hex-encoded HASH160 of the
/// compressed public key.
pub struct MockSigning;

impl Signing for MockSigning {
    fn public_key_to_address(&self, public_key: &[u8]) -> Result<OperatorAddress> {
        let key = PublicKey::from_slice(public_key)?;
        Ok(OperatorAddress::new(hex::encode(hash160(&key.serialize()))))
    }
}
