use crate::foundation::{MemberIndex, OperatorAddress, WalletPublicKeyHash};
use ripemd::Ripemd160;
use secp256k1::PublicKey;
use sha2::{Digest, Sha256};
use std::fmt;

/// Bitcoin HASH160: RIPEMD-160 over SHA-256.
pub fn hash160(bytes: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(bytes);
    let ripe = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripe);
    out
}

/// A coordinated wallet: its ECDSA public key and the signing group
/// roster behind it. The roster is the ordered list of operator
/// addresses holding seats; duplicates are permitted and meaningful,
/// an operator may control multiple seats.
#[derive(Clone, Debug)]
pub struct Wallet {
    public_key: PublicKey,
    signing_group_operators: Vec<OperatorAddress>,
}

impl Wallet {
    pub fn new(public_key: PublicKey, signing_group_operators: Vec<OperatorAddress>) -> Self {
        Self { public_key, signing_group_operators }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signing_group_operators(&self) -> &[OperatorAddress] {
        &self.signing_group_operators
    }

    pub fn group_size(&self) -> usize {
        self.signing_group_operators.len()
    }

    /// 20-byte Bitcoin public key hash of the wallet: HASH160 of the
    /// compressed SEC1 serialization.
    pub fn public_key_hash(&self) -> WalletPublicKeyHash {
        WalletPublicKeyHash::new(hash160(&self.public_key.serialize()))
    }

    /// 1-based seat indexes held by the given operator, in roster order.
    pub fn members_by_operator(&self, operator: &OperatorAddress) -> Vec<MemberIndex> {
        self.signing_group_operators
            .iter()
            .enumerate()
            .filter(|(_, candidate)| *candidate == operator)
            .map(|(position, _)| (position + 1) as MemberIndex)
            .collect()
    }

    /// Operator holding the given 1-based seat, if the seat exists.
    pub fn operator_of_seat(&self, seat: MemberIndex) -> Option<&OperatorAddress> {
        if seat == 0 {
            return None;
        }
        self.signing_group_operators.get(usize::from(seat) - 1)
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.public_key_hash())
    }
}
