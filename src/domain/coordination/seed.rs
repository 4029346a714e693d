use crate::foundation::{BlockHash, Hash32, WalletPublicKeyHash};
use sha2::{Digest, Sha256};

/// Coordination seed for a (wallet, window) pair:
/// `SHA-256(wallet_public_key_hash ‖ safe_block_hash)`.
///
/// The safe block hash belongs to the block shifted
/// `COORDINATION_SAFE_BLOCK_SHIFT` positions before the coordination
/// block, deep enough that its hash cannot be reversed by a short-range
/// reorg. Every honest node reads the same hash from the chain, so the
/// seed is equal across the group.
pub fn coordination_seed(
    wallet_public_key_hash: &WalletPublicKeyHash,
    safe_block_hash: &BlockHash,
) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(wallet_public_key_hash.as_bytes());
    hasher.update(safe_block_hash.as_bytes());
    hasher.finalize().into()
}
