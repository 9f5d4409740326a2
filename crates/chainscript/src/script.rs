//! Script type - raw bytes together with their decoded chunks.
//!
//! A `Script` is either decoded from external bytes, which are kept verbatim,
//! or produced by `ScriptBuilder`/`from_chunks`, whose bytes are the canonical
//! encoding. It is never mutated afterwards; build a new one instead.

use std::fmt;

use crate::chunk::{decode_script, encode_chunks, ScriptChunk};
use crate::classify::{capture, classify_with, Capture};
use crate::builder::ScriptBuilder;
use crate::opcodes::string_to_opcode;
use crate::policy::Policy;
use crate::{ScriptError, ScriptType};

/// A locking or unlocking script.
///
/// Equality compares the byte form.
#[derive(Clone)]
pub struct Script {
    bytes: Vec<u8>,
    chunks: Vec<ScriptChunk>,
}

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script {
            bytes: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Decode a script from raw bytes.
    ///
    /// Never fails; see `decode_script` for how malformed pushes are handled.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script {
            bytes: bytes.to_vec(),
            chunks: decode_script(bytes),
        }
    }

    /// Decode a script from a hex string (e.g. "76a914...88ac").
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script::from_bytes(&hex::decode(hex_str)?))
    }

    /// Build a script from chunks, encoding them canonically.
    ///
    /// Instructions are checked like `ScriptBuilder::append_chunk`: an `Op`
    /// in the push range would encode to bytes that decode differently.
    pub fn from_chunks(chunks: Vec<ScriptChunk>) -> Result<Self, ScriptError> {
        let mut builder = ScriptBuilder::new();
        for chunk in chunks {
            builder.append_chunk(chunk)?;
        }
        Ok(builder.finish())
    }

    /// Encode chunks that have already passed the builder's opcode check.
    pub(crate) fn from_checked_chunks(chunks: Vec<ScriptChunk>) -> Self {
        Script {
            bytes: encode_chunks(&chunks),
            chunks,
        }
    }

    /// Parse a space-separated ASM string.
    ///
    /// Known opcode names become instructions; every other token must be hex
    /// and becomes a data push.
    ///
    /// # Arguments
    /// * `asm` - e.g. "OP_DUP OP_HASH160 <hex> OP_EQUALVERIFY OP_CHECKSIG".
    ///
    /// # Returns
    /// A `Script`, or an error on a bad hex token or a push opcode name.
    pub fn from_asm(asm: &str) -> Result<Self, ScriptError> {
        let mut builder = ScriptBuilder::new();
        for token in asm.split_whitespace() {
            match string_to_opcode(token) {
                Some(op) => {
                    builder.append_opcode(op)?;
                }
                None => {
                    let data = hex::decode(token).map_err(|_| ScriptError::InvalidOpcodeData)?;
                    builder.append_data(&data);
                }
            }
        }
        Ok(builder.finish())
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Return the script bytes, exactly as decoded or built.
    pub fn to_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encode the script bytes as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Re-encode the chunks with minimal push prefixes.
    ///
    /// Differs from `to_bytes` only for decoded scripts that used a longer
    /// push form than necessary or ended in a truncated push.
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        encode_chunks(&self.chunks)
    }

    /// Return true if the stored bytes are already canonical.
    pub fn is_canonical(&self) -> bool {
        self.to_canonical_bytes() == self.bytes
    }

    /// Render the chunks as a space-separated ASM string.
    pub fn to_asm(&self) -> String {
        self.chunks
            .iter()
            .map(ScriptChunk::to_asm_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Return the decoded chunks.
    pub fn chunks(&self) -> &[ScriptChunk] {
        &self.chunks
    }

    /// Return the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the script is empty (zero bytes).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    /// Classify the script under the default policy.
    pub fn script_type(&self) -> ScriptType {
        self.script_type_with(&Policy::default())
    }

    /// Classify the script under `policy`.
    pub fn script_type_with(&self, policy: &Policy) -> ScriptType {
        classify_with(&self.chunks, policy)
    }

    /// Extract the hash (or hashes) the script's template commits to.
    pub fn capture(&self) -> Option<Capture> {
        capture(&self.chunks)
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Script {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Script {}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
