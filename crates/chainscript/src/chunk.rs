//! Script chunk decoding and canonical encoding.
//!
//! A script chunk is either a standalone opcode or a data push. Decoding
//! never fails: scripts come straight off the chain and may be truncated or
//! garbage, so a push that runs past the end is clamped to what is there.
//! Encoding always picks the shortest push prefix for each data length.

use crate::opcodes::*;

/// A single parsed element of a script.
///
/// `Op(OP_0)` and `Data(vec![])` both encode to `0x00`, and decoding always
/// yields `Data(vec![])`. Compare scripts by bytes, not by chunks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScriptChunk {
    /// A non-push instruction, stored as its opcode byte.
    Op(u8),
    /// A data push. The prefix used on the wire is not kept; re-encoding
    /// always uses the minimal one.
    Data(Vec<u8>),
}

impl ScriptChunk {
    /// Return the opcode byte if this chunk is an instruction.
    pub fn opcode(&self) -> Option<u8> {
        match self {
            ScriptChunk::Op(op) => Some(*op),
            ScriptChunk::Data(_) => None,
        }
    }

    /// Return the pushed bytes if this chunk is a data push.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            ScriptChunk::Op(_) => None,
            ScriptChunk::Data(data) => Some(data.as_slice()),
        }
    }

    /// Return true if this chunk is the instruction `op`.
    pub fn is_op(&self, op: u8) -> bool {
        matches!(self, ScriptChunk::Op(candidate) if *candidate == op)
    }

    /// Number of bytes this chunk occupies in canonical encoding.
    pub fn encoded_len(&self) -> usize {
        match self {
            ScriptChunk::Op(_) => 1,
            ScriptChunk::Data(data) => push_data_prefix_len(data.len()) + data.len(),
        }
    }

    /// Convert this chunk to its ASM token.
    ///
    /// Data renders as lowercase hex, except an empty push which renders as
    /// `OP_0` (the two encode to the same byte). Instructions render by name.
    pub fn to_asm_string(&self) -> String {
        match self {
            ScriptChunk::Data(data) if data.is_empty() => opcode_to_string(OP_0).to_string(),
            ScriptChunk::Data(data) => hex::encode(data),
            ScriptChunk::Op(op) => opcode_to_string(*op).to_string(),
        }
    }
}

/// Decode raw script bytes into chunks.
///
/// Opcodes up to `OP_PUSHDATA4` are pushes: below `OP_PUSHDATA1` the opcode
/// is the length itself, otherwise a 1, 2 or 4 byte big-endian length
/// follows. Everything else is an instruction.
///
/// A push whose declared length exceeds the remaining bytes yields a short
/// chunk; a push whose length field is cut off yields an empty chunk and ends
/// the walk.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// The chunks in script order.
pub fn decode_script(bytes: &[u8]) -> Vec<ScriptChunk> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        pos += 1;

        if !is_push_opcode(op) {
            chunks.push(ScriptChunk::Op(op));
            continue;
        }

        let width = match op {
            OP_PUSHDATA1 => 1,
            OP_PUSHDATA2 => 2,
            OP_PUSHDATA4 => 4,
            _ => 0,
        };
        let length = if width == 0 {
            op as usize
        } else {
            match read_push_length(bytes, pos, width) {
                Some(length) => length,
                None => {
                    log::trace!(
                        "{} at offset {} is missing its length field",
                        opcode_to_string(op),
                        pos - 1
                    );
                    chunks.push(ScriptChunk::Data(Vec::new()));
                    break;
                }
            }
        };
        pos += width;

        let end = pos.saturating_add(length).min(bytes.len());
        if end - pos < length {
            log::trace!(
                "push at offset {} declares {} bytes, only {} available",
                pos,
                length,
                end - pos
            );
        }
        chunks.push(ScriptChunk::Data(bytes[pos..end].to_vec()));
        pos = end;
    }

    chunks
}

/// Read a big-endian push length of `width` bytes at `pos`.
fn read_push_length(bytes: &[u8], pos: usize, width: usize) -> Option<usize> {
    let field = bytes.get(pos..pos.checked_add(width)?)?;
    Some(field.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize))
}

/// Number of prefix bytes the minimal encoding of a `data_len` push needs.
pub fn push_data_prefix_len(data_len: usize) -> usize {
    if data_len < OP_PUSHDATA1 as usize {
        1
    } else if data_len <= 0xFF {
        2
    } else if data_len <= 0xFFFF {
        3
    } else {
        5
    }
}

/// Compute the minimal push prefix for a payload of `data_len` bytes.
///
/// # Arguments
/// * `data_len` - The length of the data to be pushed.
///
/// # Returns
/// The prefix bytes: the length alone below 76, otherwise `OP_PUSHDATA1`,
/// `OP_PUSHDATA2` or `OP_PUSHDATA4` followed by the big-endian length.
pub fn push_data_prefix(data_len: usize) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(push_data_prefix_len(data_len));
    write_push_data_prefix(&mut prefix, data_len);
    prefix
}

fn write_push_data_prefix(buf: &mut Vec<u8>, data_len: usize) {
    if data_len < OP_PUSHDATA1 as usize {
        buf.push(data_len as u8);
    } else if data_len <= 0xFF {
        buf.push(OP_PUSHDATA1);
        buf.push(data_len as u8);
    } else if data_len <= 0xFFFF {
        buf.push(OP_PUSHDATA2);
        buf.extend_from_slice(&(data_len as u16).to_be_bytes());
    } else {
        // Pushes beyond u32::MAX cannot be expressed; no chain data comes close.
        debug_assert!(data_len as u64 <= u32::MAX as u64);
        buf.push(OP_PUSHDATA4);
        buf.extend_from_slice(&(data_len as u32).to_be_bytes());
    }
}

/// Encode chunks into canonical script bytes.
///
/// The output buffer is sized up front from `ScriptChunk::encoded_len`.
/// Value-equal chunk lists always produce identical bytes.
pub fn encode_chunks(chunks: &[ScriptChunk]) -> Vec<u8> {
    let total: usize = chunks.iter().map(ScriptChunk::encoded_len).sum();
    let mut buf = Vec::with_capacity(total);
    for chunk in chunks {
        match chunk {
            ScriptChunk::Op(op) => buf.push(*op),
            ScriptChunk::Data(data) => {
                write_push_data_prefix(&mut buf, data.len());
                buf.extend_from_slice(data);
            }
        }
    }
    debug_assert_eq!(buf.len(), total);
    buf
}

#[cfg(test)]
mod tests {
    //! Tests for chunk decoding and canonical encoding.
    //!
    //! Truncated inputs come from the junk outputs of tx
    //! ebc9fa1196a59e192352d76c0f6e73167046b9d37b8302b6bb6968dfd279b767.

    use super::*;

    fn decode_hex(s: &str) -> Vec<ScriptChunk> {
        decode_script(&hex::decode(s).expect("valid hex"))
    }

    // -----------------------------------------------------------------------
    // decode_script
    // -----------------------------------------------------------------------

    /// Decode a P2PKH output into its five chunks.
    #[test]
    fn test_decode_pubkeyhash() {
        let chunks = decode_hex("76a914badeecfdef0507247fc8f74241d73bc039972d7b88ac");
        assert_eq!(
            chunks,
            vec![
                ScriptChunk::Op(OP_DUP),
                ScriptChunk::Op(OP_HASH160),
                ScriptChunk::Data(hex::decode("badeecfdef0507247fc8f74241d73bc039972d7b").unwrap()),
                ScriptChunk::Op(OP_EQUALVERIFY),
                ScriptChunk::Op(OP_CHECKSIG),
            ]
        );
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_script(&[]).is_empty());
    }

    /// OP_0 is a zero-length push.
    #[test]
    fn test_decode_op_0_is_empty_push() {
        assert_eq!(
            decode_script(&[OP_0, OP_1]),
            vec![ScriptChunk::Data(vec![]), ScriptChunk::Op(OP_1)]
        );
    }

    #[test]
    fn test_decode_pushdata1() {
        let data = b"testing";
        let mut bytes = vec![OP_PUSHDATA1, data.len() as u8];
        bytes.extend_from_slice(data);
        assert_eq!(decode_script(&bytes), vec![ScriptChunk::Data(data.to_vec())]);
    }

    /// OP_PUSHDATA2 lengths are read big-endian.
    #[test]
    fn test_decode_pushdata2_big_endian() {
        let mut bytes = vec![OP_PUSHDATA2, 0x01, 0x00];
        bytes.extend_from_slice(&[0xAB; 256]);
        bytes.push(OP_CHECKSIG);
        let chunks = decode_script(&bytes);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].data().unwrap().len(), 256);
        assert!(chunks[1].is_op(OP_CHECKSIG));
    }

    /// OP_PUSHDATA4 lengths are read big-endian.
    #[test]
    fn test_decode_pushdata4_big_endian() {
        let mut bytes = vec![OP_PUSHDATA4, 0x00, 0x00, 0x00, 0x03];
        bytes.extend_from_slice(b"abc");
        assert_eq!(decode_script(&bytes), vec![ScriptChunk::Data(b"abc".to_vec())]);
    }

    /// A direct push longer than the remaining bytes is clamped.
    #[test]
    fn test_decode_truncated_direct_push() {
        assert_eq!(
            decode_hex("064effffffff"),
            vec![ScriptChunk::Data(hex::decode("4effffffff").unwrap())]
        );
    }

    #[test]
    fn test_decode_truncated_pushdata1() {
        assert_eq!(
            decode_hex("4c05000000"),
            vec![ScriptChunk::Data(vec![0, 0, 0])]
        );
    }

    /// A PUSHDATA opcode with no room for its length field yields one empty push.
    #[test]
    fn test_decode_missing_length_field() {
        assert_eq!(decode_script(&[OP_PUSHDATA1]), vec![ScriptChunk::Data(vec![])]);
        assert_eq!(decode_script(&[OP_PUSHDATA2, 0x01]), vec![ScriptChunk::Data(vec![])]);
        assert_eq!(
            decode_script(&[OP_DUP, OP_PUSHDATA4, 0x00, 0x00]),
            vec![ScriptChunk::Op(OP_DUP), ScriptChunk::Data(vec![])]
        );
    }

    /// A huge declared PUSHDATA4 length must not overflow or panic.
    #[test]
    fn test_decode_huge_declared_length() {
        let chunks = decode_script(&[OP_PUSHDATA4, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert_eq!(chunks, vec![ScriptChunk::Data(vec![0x01])]);
    }

    /// Junk from chain data decodes without panicking.
    #[test]
    fn test_decode_junk() {
        for junk in [
            "0101", "020201", "014c", "034c0201", "044dffff01", "014e", "064effffffff",
            "03630f7ed2f576", "4494c03f4786a2289d", "ec54dc118007b466c596066afdbd8764",
        ] {
            let chunks = decode_hex(junk);
            assert!(!chunks.is_empty(), "{}", junk);
        }
        assert_eq!(decode_hex("014c"), vec![ScriptChunk::Data(vec![OP_PUSHDATA1])]);
    }

    // -----------------------------------------------------------------------
    // push_data_prefix
    // -----------------------------------------------------------------------

    #[test]
    fn test_push_data_prefix_direct() {
        assert_eq!(push_data_prefix(0), vec![0]);
        assert_eq!(push_data_prefix(20), vec![20]);
        assert_eq!(push_data_prefix(75), vec![75]);
    }

    #[test]
    fn test_push_data_prefix_pushdata1() {
        assert_eq!(push_data_prefix(76), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(255), vec![OP_PUSHDATA1, 255]);
    }

    #[test]
    fn test_push_data_prefix_pushdata2() {
        assert_eq!(push_data_prefix(256), vec![OP_PUSHDATA2, 0x01, 0x00]);
        assert_eq!(push_data_prefix(65535), vec![OP_PUSHDATA2, 0xFF, 0xFF]);
    }

    #[test]
    fn test_push_data_prefix_pushdata4() {
        assert_eq!(push_data_prefix(65536), vec![OP_PUSHDATA4, 0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_prefix_len_matches_prefix() {
        for len in [0, 1, 75, 76, 255, 256, 65535, 65536, 1 << 20] {
            assert_eq!(push_data_prefix(len).len(), push_data_prefix_len(len), "{}", len);
        }
    }

    // -----------------------------------------------------------------------
    // encode_chunks
    // -----------------------------------------------------------------------

    #[test]
    fn test_encode_pubkeyhash() {
        let chunks = vec![
            ScriptChunk::Op(OP_DUP),
            ScriptChunk::Op(OP_HASH160),
            ScriptChunk::Data(hex::decode("badeecfdef0507247fc8f74241d73bc039972d7b").unwrap()),
            ScriptChunk::Op(OP_EQUALVERIFY),
            ScriptChunk::Op(OP_CHECKSIG),
        ];
        assert_eq!(
            hex::encode(encode_chunks(&chunks)),
            "76a914badeecfdef0507247fc8f74241d73bc039972d7b88ac"
        );
    }

    /// A non-minimal PUSHDATA1 push re-encodes with a direct length byte.
    #[test]
    fn test_encode_is_minimal() {
        let chunks = decode_hex("4c03616263");
        assert_eq!(hex::encode(encode_chunks(&chunks)), "03616263");
    }

    #[test]
    fn test_encode_empty_push_as_op_0() {
        let chunks = vec![ScriptChunk::Data(vec![]), ScriptChunk::Op(OP_0)];
        assert_eq!(encode_chunks(&chunks), vec![OP_0, OP_0]);
    }

    /// A push past the PUSHDATA2 range takes the 4-byte big-endian form
    /// and decodes back to the same chunks.
    #[test]
    fn test_encode_decode_pushdata4() {
        let payload: Vec<u8> = (0..70_000u32).map(|i| (i % 251) as u8).collect();
        let chunks = vec![
            ScriptChunk::Op(OP_RETURN),
            ScriptChunk::Data(payload),
            ScriptChunk::Op(OP_DROP),
        ];
        let bytes = encode_chunks(&chunks);
        assert_eq!(&bytes[1..6], &[OP_PUSHDATA4, 0x00, 0x01, 0x11, 0x70]);
        assert_eq!(bytes.len(), 1 + 5 + 70_000 + 1);
        assert_eq!(decode_script(&bytes), chunks);
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(ScriptChunk::Op(OP_DUP).encoded_len(), 1);
        assert_eq!(ScriptChunk::Data(vec![0; 20]).encoded_len(), 21);
        assert_eq!(ScriptChunk::Data(vec![0; 80]).encoded_len(), 82);
        assert_eq!(ScriptChunk::Data(vec![0; 300]).encoded_len(), 303);
        assert_eq!(ScriptChunk::Data(vec![0; 70000]).encoded_len(), 70005);
    }

    // -----------------------------------------------------------------------
    // ScriptChunk accessors
    // -----------------------------------------------------------------------

    #[test]
    fn test_chunk_accessors() {
        let op = ScriptChunk::Op(OP_DUP);
        let data = ScriptChunk::Data(vec![1, 2]);
        assert_eq!(op.opcode(), Some(OP_DUP));
        assert_eq!(op.data(), None);
        assert!(op.is_op(OP_DUP));
        assert_eq!(data.opcode(), None);
        assert_eq!(data.data(), Some(&[1u8, 2][..]));
        assert!(!data.is_op(OP_DUP));
    }

    #[test]
    fn test_chunk_to_asm_string() {
        assert_eq!(ScriptChunk::Data(vec![0xAB; 20]).to_asm_string(), "ab".repeat(20));
        assert_eq!(ScriptChunk::Data(vec![]).to_asm_string(), "OP_0");
        assert_eq!(ScriptChunk::Op(OP_DUP).to_asm_string(), "OP_DUP");
    }
}
