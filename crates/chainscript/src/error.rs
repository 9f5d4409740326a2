/// Error types for script operations.
///
/// Decoding and classification never fail; these cover hex/ASM input and
/// builder contract violations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Invalid data token encountered during ASM parsing.
    #[error("invalid opcode data")]
    InvalidOpcodeData,

    /// A push opcode was appended as an instruction.
    #[error("use append_data for push data opcodes: {0}")]
    InvalidOpcodeType(String),

    /// Value out of the small integer range 0..=16.
    #[error("not a small integer: {0}")]
    InvalidSmallInt(u8),

    /// Multisig output requested with no public keys.
    #[error("missing public keys")]
    MissingPublicKeys,

    /// Multisig output requested with more public keys than allowed.
    #[error("too many public keys: {0}")]
    TooManyPublicKeys(usize),

    /// Multisig output requested with zero required signatures.
    #[error("missing number of required signatures")]
    MissingRequiredSignatures,

    /// Required signature count exceeds the number of keys.
    #[error("{required} required signatures cannot exceed {keys} public keys")]
    TooManyRequiredSignatures {
        /// Requested signature threshold.
        required: usize,
        /// Number of public keys supplied.
        keys: usize,
    },
}
