//! Digest primitives for script commitments.
//!
//! Pubkey and multisig templates are identified by the Hash160 of each
//! public key, and script-hash templates by the Hash160 of the redeem
//! script. Both halves of the composition are exposed.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length in bytes of a Hash160 digest.
pub const HASH160_LEN: usize = 20;

/// A Hash160 digest, as carried by pubkey-hash and script-hash templates.
pub type Hash160 = [u8; HASH160_LEN];

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute the RIPEMD-160 digest of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let digest = Ripemd160::digest(data);
    let mut output = [0u8; 20];
    output.copy_from_slice(&digest);
    output
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// # Arguments
/// * `data` - Public key or serialized script bytes.
///
/// # Returns
/// The 20-byte digest.
pub fn hash160(data: &[u8]) -> Hash160 {
    ripemd160(&sha256(data))
}
