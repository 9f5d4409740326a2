//! Classification policy and template size limits.
//!
//! Only the nulldata payload bound is a relay policy; the other limits are
//! fixed by the template shapes themselves.

/// Largest OP_RETURN payload classified as nulldata by default.
pub const MAX_NULL_DATA_LEN: usize = 40;

/// Length of the hash in pubkey-hash and script-hash templates.
pub const HASH160_LEN: usize = chainscript_primitives::hash::HASH160_LEN;

/// Shortest push accepted as a public key (compressed).
pub const MIN_PUBKEY_LEN: usize = 33;

/// Longest push accepted as a public key (uncompressed).
pub const MAX_PUBKEY_LEN: usize = 65;

/// Most public keys a built multisig output may carry.
pub const MAX_MULTISIG_PUBKEYS: usize = 15;

/// Tunable classification limits.
///
/// Deserializes from a partial document; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Largest OP_RETURN payload accepted as nulldata.
    pub max_null_data_len: usize,
}

impl Policy {
    /// Policy with a different nulldata payload bound.
    pub fn with_max_null_data_len(max_null_data_len: usize) -> Self {
        Policy { max_null_data_len }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            max_null_data_len: MAX_NULL_DATA_LEN,
        }
    }
}
