//! Bitcoin-style script codec and standard template classifier.
//!
//! Decodes raw script bytes into chunks, classifies them against the
//! standard output templates (pubkeyhash, pubkey, scripthash, multisig,
//! nulldata), extracts the hashes those templates commit to, and builds
//! scripts back with minimal push encodings.

pub mod builder;
pub mod chunk;
pub mod classify;
pub mod opcodes;
pub mod policy;
pub mod script;
pub mod script_type;
pub mod template;

mod error;
pub use builder::ScriptBuilder;
pub use chunk::ScriptChunk;
pub use classify::Capture;
pub use error::ScriptError;
pub use policy::Policy;
pub use script::Script;
pub use script_type::ScriptType;
