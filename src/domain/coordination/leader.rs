use crate::foundation::{Hash32, OperatorAddress};
use std::collections::BTreeSet;

/// SplitMix64 (Steele, Lea, Flood 2014). The leader shuffle is
/// consensus-critical: every node must produce bit-identical output for
/// the same seed across releases and platforms, so the generator is
/// pinned here instead of delegated to a PRNG crate with no stream
/// stability guarantee. Shuffling does not require secure randomness;
/// the seed itself is unpredictable until the safe block is finalized.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Coordination leader for the given seed and signing group roster.
///
/// The roster is first reduced to the unique operator set (an operator
/// may control multiple seats) and sorted ascending by the canonical
/// address encoding, which normalizes whatever order the chain returned.
/// A Fisher-Yates shuffle driven by the first 8 seed bytes (big-endian)
/// then picks element 0. Returns `None` for an empty roster.
pub fn coordination_leader(
    seed: &Hash32,
    signing_group_operators: &[OperatorAddress],
) -> Option<OperatorAddress> {
    let mut unique_operators: Vec<OperatorAddress> = signing_group_operators
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if unique_operators.is_empty() {
        return None;
    }

    let mut seed_prefix = [0u8; 8];
    seed_prefix.copy_from_slice(&seed[..8]);
    let mut rng = SplitMix64::new(u64::from_be_bytes(seed_prefix));

    for i in (1..unique_operators.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        unique_operators.swap(i, j);
    }

    unique_operators.into_iter().next()
}
