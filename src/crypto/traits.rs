//! Signature scheme interface

use super::SchemeError;

/// A deterministic signature scheme over fixed-size seeds and keys
pub trait SignatureScheme {
    const NAME: &'static str;

    type Seed: AsRef<[u8]>;
    type PublicKey: AsRef<[u8]> + Copy;
    type Signature: AsRef<[u8]> + Copy;

    /// Every seed is valid, so derivation cannot fail
    fn public_key(seed: &Self::Seed) -> Self::PublicKey;

    fn sign(seed: &Self::Seed, message: &[u8]) -> Self::Signature;

    /// Reject byte strings that are not usable public keys
    fn check_public_key(public_key: &Self::PublicKey) -> Result<(), SchemeError>;

    /// A well-formed but wrong signature yields `Ok(false)`
    fn verify(
        public_key: &Self::PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, SchemeError>;
}
