//! Standard output template classification tags.

use std::fmt;

/// The template a script matches.
///
/// Serializes as its lowercase tag (`"pubkeyhash"`, `"nulldata"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    /// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
    PubkeyHash,
    /// `<pubkey> OP_CHECKSIG`.
    Pubkey,
    /// `OP_HASH160 <20 bytes> OP_EQUAL`.
    ScriptHash,
    /// `OP_m <pubkey>... OP_n OP_CHECKMULTISIG`.
    Multisig,
    /// `OP_RETURN <small data>`.
    NullData,
    /// Anything else.
    Nonstandard,
}

impl ScriptType {
    /// Return the lowercase tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::PubkeyHash => "pubkeyhash",
            ScriptType::Pubkey => "pubkey",
            ScriptType::ScriptHash => "scripthash",
            ScriptType::Multisig => "multisig",
            ScriptType::NullData => "nulldata",
            ScriptType::Nonstandard => "nonstandard",
        }
    }

    /// Return true for every type except `Nonstandard`.
    pub fn is_standard(&self) -> bool {
        !matches!(self, ScriptType::Nonstandard)
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
