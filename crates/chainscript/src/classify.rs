//! Standard template matching and capture extraction.
//!
//! Templates are tried in a fixed priority order and the first match wins.
//! Matching is purely structural: opcodes are compared by value and pushes
//! by length, nothing is executed.

use chainscript_primitives::hash::{hash160, Hash160};

use crate::chunk::ScriptChunk;
use crate::opcodes::*;
use crate::policy::{Policy, HASH160_LEN, MAX_PUBKEY_LEN, MIN_PUBKEY_LEN};
use crate::ScriptType;

/// The value a standard template commits to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Pubkey-hash, script-hash, or the Hash160 of a bare public key.
    Hash(Hash160),
    /// Hash160 of each multisig public key, in script order.
    Hashes(Vec<Hash160>),
}

impl Capture {
    /// Return the single hash, if this is not a multisig capture.
    pub fn as_hash(&self) -> Option<&Hash160> {
        match self {
            Capture::Hash(hash) => Some(hash),
            Capture::Hashes(_) => None,
        }
    }

    /// Return the multisig key hashes, if this is a multisig capture.
    pub fn as_hashes(&self) -> Option<&[Hash160]> {
        match self {
            Capture::Hash(_) => None,
            Capture::Hashes(hashes) => Some(hashes.as_slice()),
        }
    }
}

type Matcher = fn(&[ScriptChunk], &Policy) -> bool;

/// Templates in priority order.
const TEMPLATES: [(Matcher, ScriptType); 5] = [
    (is_pubkey_hash, ScriptType::PubkeyHash),
    (is_pubkey, ScriptType::Pubkey),
    (is_script_hash, ScriptType::ScriptHash),
    (is_multisig, ScriptType::Multisig),
    (is_null_data, ScriptType::NullData),
];

/// Classify chunks under the default policy.
pub fn classify(chunks: &[ScriptChunk]) -> ScriptType {
    classify_with(chunks, &Policy::default())
}

/// Classify chunks against the standard templates.
///
/// # Arguments
/// * `chunks` - Decoded script chunks.
/// * `policy` - Limits for policy-dependent templates.
///
/// # Returns
/// The first matching template, or `ScriptType::Nonstandard`.
pub fn classify_with(chunks: &[ScriptChunk], policy: &Policy) -> ScriptType {
    TEMPLATES
        .iter()
        .find(|(matcher, _)| matcher(chunks, policy))
        .map(|(_, script_type)| *script_type)
        .unwrap_or(ScriptType::Nonstandard)
}

/// Extract the value the script's template commits to.
///
/// Pubkey-hash and script-hash return their hash verbatim; pubkey and
/// multisig return the Hash160 of their keys. Nulldata and nonstandard
/// scripts have no capture.
pub fn capture(chunks: &[ScriptChunk]) -> Option<Capture> {
    match classify(chunks) {
        ScriptType::PubkeyHash => hash_at(chunks, 2).map(Capture::Hash),
        ScriptType::Pubkey => chunks[0].data().map(|key| Capture::Hash(hash160(key))),
        ScriptType::ScriptHash => hash_at(chunks, 1).map(Capture::Hash),
        ScriptType::Multisig => Some(Capture::Hashes(
            multisig_keys(chunks)
                .iter()
                .filter_map(ScriptChunk::data)
                .map(hash160)
                .collect(),
        )),
        ScriptType::NullData | ScriptType::Nonstandard => None,
    }
}

fn hash_at(chunks: &[ScriptChunk], index: usize) -> Option<Hash160> {
    chunks.get(index)?.data()?.try_into().ok()
}

/// The key pushes between the two small integers of a multisig script.
fn multisig_keys(chunks: &[ScriptChunk]) -> &[ScriptChunk] {
    &chunks[1..chunks.len() - 2]
}

fn is_small_int(chunk: &ScriptChunk) -> bool {
    chunk.opcode().is_some_and(is_small_int_op)
}

fn is_hash160(chunk: &ScriptChunk) -> bool {
    chunk.data().is_some_and(|data| data.len() == HASH160_LEN)
}

fn is_pubkey_push(chunk: &ScriptChunk) -> bool {
    chunk
        .data()
        .is_some_and(|data| (MIN_PUBKEY_LEN..=MAX_PUBKEY_LEN).contains(&data.len()))
}

fn is_pubkey_hash(chunks: &[ScriptChunk], _: &Policy) -> bool {
    chunks.len() == 5
        && chunks[0].is_op(OP_DUP)
        && chunks[1].is_op(OP_HASH160)
        && is_hash160(&chunks[2])
        && chunks[3].is_op(OP_EQUALVERIFY)
        && chunks[4].is_op(OP_CHECKSIG)
}

fn is_pubkey(chunks: &[ScriptChunk], _: &Policy) -> bool {
    chunks.len() == 2 && is_pubkey_push(&chunks[0]) && chunks[1].is_op(OP_CHECKSIG)
}

fn is_script_hash(chunks: &[ScriptChunk], _: &Policy) -> bool {
    chunks.len() == 3
        && chunks[0].is_op(OP_HASH160)
        && is_hash160(&chunks[1])
        && chunks[2].is_op(OP_EQUAL)
}

fn is_multisig(chunks: &[ScriptChunk], _: &Policy) -> bool {
    let n = chunks.len();
    n > 3
        && is_small_int(&chunks[0])
        && chunks[n - 1].is_op(OP_CHECKMULTISIG)
        && is_small_int(&chunks[n - 2])
        && multisig_keys(chunks).iter().all(is_pubkey_push)
}

fn is_null_data(chunks: &[ScriptChunk], policy: &Policy) -> bool {
    chunks.len() == 2
        && chunks[0].is_op(OP_RETURN)
        && chunks[1]
            .data()
            .is_some_and(|data| data.len() <= policy.max_null_data_len)
}
