//! Incremental script construction.

use crate::chunk::ScriptChunk;
use crate::opcodes::*;
use crate::{Script, ScriptError};

/// Accumulates chunks and encodes them once on `finish`.
///
/// ```
/// use chainscript::builder::ScriptBuilder;
/// use chainscript::opcodes::*;
///
/// let mut builder = ScriptBuilder::new();
/// builder
///     .append_opcode(OP_RETURN)
///     .unwrap()
///     .append_data(b"hello");
/// assert_eq!(builder.finish().to_hex(), "6a0568656c6c6f");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptBuilder {
    chunks: Vec<ScriptChunk>,
}

impl ScriptBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        ScriptBuilder { chunks: Vec::new() }
    }

    /// Append a non-push instruction.
    ///
    /// `OP_0` is accepted. The direct push lengths and `OP_PUSHDATA1/2/4`
    /// are rejected: they only make sense together with data, so use
    /// `append_data` for those.
    pub fn append_opcode(&mut self, op: u8) -> Result<&mut Self, ScriptError> {
        if (OP_DATA_1..=OP_PUSHDATA4).contains(&op) {
            log::debug!("rejected push opcode 0x{:02x} passed as an instruction", op);
            return Err(ScriptError::InvalidOpcodeType(format!("0x{:02x}", op)));
        }
        Ok(self.push(ScriptChunk::Op(op)))
    }

    /// Append `OP_0` or `OP_1..=OP_16` for `n`.
    pub fn append_small_int(&mut self, n: u8) -> Result<&mut Self, ScriptError> {
        let op = small_int_op(n).ok_or(ScriptError::InvalidSmallInt(n))?;
        Ok(self.push(ScriptChunk::Op(op)))
    }

    /// Append a data push. The prefix is chosen at encode time.
    pub fn append_data(&mut self, data: &[u8]) -> &mut Self {
        self.push(ScriptChunk::Data(data.to_vec()))
    }

    /// Append an already-built chunk, applying the same opcode check as
    /// `append_opcode`.
    pub fn append_chunk(&mut self, chunk: ScriptChunk) -> Result<&mut Self, ScriptError> {
        match chunk {
            ScriptChunk::Op(op) => self.append_opcode(op),
            data @ ScriptChunk::Data(_) => Ok(self.push(data)),
        }
    }

    /// Number of chunks appended so far.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Return true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Encode the accumulated chunks into a `Script`.
    pub fn finish(self) -> Script {
        Script::from_checked_chunks(self.chunks)
    }

    pub(crate) fn push(&mut self, chunk: ScriptChunk) -> &mut Self {
        self.chunks.push(chunk);
        self
    }
}
