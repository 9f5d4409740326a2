/// chainscript - Hash primitives.
///
/// The digests standard output templates commit to:
/// - SHA-256
/// - RIPEMD-160
/// - Hash160, the RIPEMD-160 of a SHA-256

pub mod hash;
