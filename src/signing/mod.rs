//! Transaction Signing
//!
//! 1. Build the signature base (network id, envelope type, transaction XDR)
//! 2. Hash it into the transaction id that signers actually sign
//! 3. Attach decorated signatures to the envelope and verify them
//!
//! Signatures can come from a local `KeyPair`, a hash(x) preimage, or an
//! external signer (hardware or air-gapped) working from a
//! `SignaturePreImage`.

pub mod compiler;
pub mod preimage;

pub use compiler::*;
pub use preimage::*;

use crate::keypair::KeyPairError;
use crate::xdr::XdrError;

/// Error types for signing operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningError {
    #[error(transparent)]
    KeyPair(#[from] KeyPairError),

    #[error(transparent)]
    Xdr(#[from] XdrError),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Envelope already holds the maximum of {max} signatures")]
    TooManySignatures { max: u32 },

    #[error("Hash(x) preimage is {len} bytes; at most {max} allowed")]
    PreimageTooLong { len: usize, max: usize },
}

pub type SigningResult<T> = Result<T, SigningError>;
