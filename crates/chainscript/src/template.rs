//! Constructors for the standard locking and unlocking templates.
//!
//! Each constructor assembles chunks through a `ScriptBuilder` and encodes
//! them once. Only multisig outputs have preconditions; everything else
//! takes its inputs as given.

use chainscript_primitives::hash::{hash160, Hash160};

use crate::builder::ScriptBuilder;
use crate::chunk::ScriptChunk;
use crate::opcodes::*;
use crate::policy::MAX_MULTISIG_PUBKEYS;
use crate::{Script, ScriptError};

/// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn pubkey_hash_output(hash: &Hash160) -> Script {
    let mut builder = ScriptBuilder::new();
    builder
        .push(ScriptChunk::Op(OP_DUP))
        .push(ScriptChunk::Op(OP_HASH160))
        .append_data(hash)
        .push(ScriptChunk::Op(OP_EQUALVERIFY))
        .push(ScriptChunk::Op(OP_CHECKSIG));
    builder.finish()
}

/// `<signature> <pubkey>`
pub fn pubkey_hash_input(signature: &[u8], pubkey: &[u8]) -> Script {
    let mut builder = ScriptBuilder::new();
    builder.append_data(signature).append_data(pubkey);
    builder.finish()
}

/// `<pubkey> OP_CHECKSIG`
pub fn pubkey_output(pubkey: &[u8]) -> Script {
    let mut builder = ScriptBuilder::new();
    builder.append_data(pubkey).push(ScriptChunk::Op(OP_CHECKSIG));
    builder.finish()
}

/// `<signature>`
pub fn pubkey_input(signature: &[u8]) -> Script {
    let mut builder = ScriptBuilder::new();
    builder.append_data(signature);
    builder.finish()
}

/// `OP_HASH160 <hash> OP_EQUAL`
pub fn script_hash_output(hash: &Hash160) -> Script {
    let mut builder = ScriptBuilder::new();
    builder
        .push(ScriptChunk::Op(OP_HASH160))
        .append_data(hash)
        .push(ScriptChunk::Op(OP_EQUAL));
    builder.finish()
}

/// Script-hash output paying to the Hash160 of `redeem_script`.
pub fn script_hash_output_for(redeem_script: &Script) -> Script {
    script_hash_output(&hash160(redeem_script.to_bytes()))
}

/// Spend a script-hash output: the redeem script's own unlocking chunks,
/// followed by the serialized redeem script as a single push.
///
/// # Arguments
/// * `unlocking` - Script satisfying the redeem script (e.g. `multisig_input`).
/// * `redeem_script` - The script whose hash the output commits to.
pub fn script_hash_input(unlocking: &Script, redeem_script: &Script) -> Script {
    let mut builder = ScriptBuilder::new();
    for chunk in unlocking.chunks() {
        builder.push(chunk.clone());
    }
    builder.append_data(redeem_script.to_bytes());
    builder.finish()
}

/// `OP_m <pubkey>... OP_n OP_CHECKMULTISIG`
///
/// # Arguments
/// * `required` - Number of signatures needed to spend (m).
/// * `pubkeys` - Public keys, in the order they appear in the script.
///
/// # Returns
/// The m-of-n output, or an error if there are no keys, more than
/// `MAX_MULTISIG_PUBKEYS` keys, `required` is zero, or `required` exceeds
/// the key count.
pub fn multisig_output<K: AsRef<[u8]>>(required: usize, pubkeys: &[K]) -> Result<Script, ScriptError> {
    let keys = pubkeys.len();
    let violation = if keys == 0 {
        Some(ScriptError::MissingPublicKeys)
    } else if keys > MAX_MULTISIG_PUBKEYS {
        Some(ScriptError::TooManyPublicKeys(keys))
    } else if required == 0 {
        Some(ScriptError::MissingRequiredSignatures)
    } else if required > keys {
        Some(ScriptError::TooManyRequiredSignatures { required, keys })
    } else {
        None
    };
    if let Some(err) = violation {
        log::debug!("multisig output rejected: {}", err);
        return Err(err);
    }

    let mut builder = ScriptBuilder::new();
    builder.append_small_int(required as u8)?;
    for pubkey in pubkeys {
        builder.append_data(pubkey.as_ref());
    }
    builder
        .append_small_int(keys as u8)?
        .push(ScriptChunk::Op(OP_CHECKMULTISIG));
    Ok(builder.finish())
}

/// `OP_0 <signature>...`
///
/// The leading `OP_0` is consumed by the extra pop in OP_CHECKMULTISIG and
/// must be present for the spend to validate.
/// The returned script keeps `Op(OP_0)` as its first chunk; the same bytes
/// decoded with `Script::from_bytes` start with an empty `Data` push instead.
pub fn multisig_input<S: AsRef<[u8]>>(signatures: &[S]) -> Script {
    let mut builder = ScriptBuilder::new();
    builder.push(ScriptChunk::Op(OP_0));
    for signature in signatures {
        builder.append_data(signature.as_ref());
    }
    builder.finish()
}

/// `OP_RETURN <data>`
///
/// Payloads above the policy's nulldata bound are still built; they just
/// classify as nonstandard.
pub fn null_data_output(data: &[u8]) -> Script {
    let mut builder = ScriptBuilder::new();
    builder.push(ScriptChunk::Op(OP_RETURN)).append_data(data);
    builder.finish()
}
