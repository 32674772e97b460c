//! Signature Schemes
//!
//! Accounts sign with ed25519. Key handling goes through the
//! `SignatureScheme` trait and never touches `ed25519-dalek` types.

pub mod ed25519;
pub mod traits;

pub use ed25519::Ed25519;
pub use traits::SignatureScheme;

/// Errors raised by a signature scheme on malformed input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemeError {
    #[error("Not a valid {scheme} public key: {reason}")]
    InvalidPublicKey { scheme: &'static str, reason: String },

    #[error("{scheme} signature must be {expected} bytes, got {actual}")]
    SignatureLength {
        scheme: &'static str,
        expected: usize,
        actual: usize,
    },
}
