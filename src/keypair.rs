//! Key Pairs
//!
//! An ed25519 public key with an optional secret seed. Seed-less key pairs
//! verify signatures but refuse to sign.
//!
//! SECURITY: the seed is held in a `Zeroizing` buffer and never appears in
//! `Debug` output or logs.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::crypto::{Ed25519, SignatureScheme};
use crate::strkey::{self, StrKeyError};
use crate::utils::crypto::last_four;
use crate::xdr::{AccountId, DecoratedSignature, MuxedAccount, PublicKey};

/// Key pair errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyPairError {
    #[error("Key pair has no secret seed and cannot sign")]
    MissingSecretKey,

    #[error("Secure random generation failed: {0}")]
    Entropy(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error(transparent)]
    StrKey(#[from] StrKeyError),
}

pub type KeyPairResult<T> = Result<T, KeyPairError>;

#[derive(Clone)]
pub struct KeyPair {
    public_key: [u8; 32],
    seed: Option<Zeroizing<[u8; 32]>>,
}

impl KeyPair {
    /// Fresh key pair from the operating system's secure random source
    pub fn generate() -> KeyPairResult<Self> {
        let mut seed = Zeroizing::new([0u8; 32]);
        OsRng
            .try_fill_bytes(seed.as_mut())
            .map_err(|e| KeyPairError::Entropy(e.to_string()))?;

        let keypair = Self::from_seed(&seed)?;
        crate::log_info!("keypair", "Generated key pair", account = keypair.account_id());
        Ok(keypair)
    }

    /// Full signing key pair from a raw 32-byte seed
    pub fn from_seed(seed: &[u8; 32]) -> KeyPairResult<Self> {
        Ok(Self {
            public_key: Ed25519::public_key(seed),
            seed: Some(Zeroizing::new(*seed)),
        })
    }

    /// Verify-only key pair
    pub fn from_public_key(public_key: &[u8; 32]) -> KeyPairResult<Self> {
        Ed25519::check_public_key(public_key)
            .map_err(|e| KeyPairError::InvalidPublicKey(e.to_string()))?;
        Ok(Self {
            public_key: *public_key,
            seed: None,
        })
    }

    /// Decode an S... secret seed
    pub fn from_secret_seed(secret: &str) -> KeyPairResult<Self> {
        let seed = Zeroizing::new(strkey::decode_secret_seed(secret.trim())?);
        Self::from_seed(&seed)
    }

    /// Decode a G... account id into a verify-only key pair
    pub fn from_account_id(account_id: &str) -> KeyPairResult<Self> {
        let public_key = strkey::decode_account_id(account_id.trim())?;
        Self::from_public_key(&public_key)
    }

    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    pub fn can_sign(&self) -> bool {
        self.seed.is_some()
    }

    /// G... address
    pub fn account_id(&self) -> String {
        strkey::encode_account_id(&self.public_key)
    }

    /// S... secret seed
    pub fn secret_seed(&self) -> KeyPairResult<Zeroizing<String>> {
        let seed = self.seed.as_ref().ok_or(KeyPairError::MissingSecretKey)?;
        Ok(Zeroizing::new(strkey::encode_secret_seed(seed)))
    }

    /// Raw seed bytes
    pub fn raw_seed(&self) -> KeyPairResult<Zeroizing<[u8; 32]>> {
        self.seed.clone().ok_or(KeyPairError::MissingSecretKey)
    }

    /// Last four bytes of the public key
    pub fn signature_hint(&self) -> [u8; 4] {
        last_four(&self.public_key)
    }

    pub fn sign(&self, data: &[u8]) -> KeyPairResult<[u8; 64]> {
        let seed = self.seed.as_ref().ok_or(KeyPairError::MissingSecretKey)?;
        Ok(Ed25519::sign(seed, data))
    }

    /// Malformed signatures verify as false
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        Ed25519::verify(&self.public_key, data, signature).unwrap_or(false)
    }

    /// Signature paired with this key's hint
    pub fn sign_decorated(&self, data: &[u8]) -> KeyPairResult<DecoratedSignature> {
        let signature = self.sign(data)?;
        Ok(DecoratedSignature::new(
            self.signature_hint(),
            signature.to_vec(),
        ))
    }

    /// Signature over a signed-payload signer's payload. The hint is the key
    /// hint XORed with the payload's last four bytes, zero-filled when the
    /// payload is shorter.
    pub fn sign_payload_decorated(&self, payload: &[u8]) -> KeyPairResult<DecoratedSignature> {
        let signature = self.sign(payload)?;

        let tail = &payload[payload.len().saturating_sub(4)..];
        let mut payload_hint = [0u8; 4];
        payload_hint[..tail.len()].copy_from_slice(tail);

        let key_hint = self.signature_hint();
        let mut hint = [0u8; 4];
        for i in 0..4 {
            hint[i] = key_hint[i] ^ payload_hint[i];
        }

        Ok(DecoratedSignature::new(hint, signature.to_vec()))
    }

    pub fn to_xdr_public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.public_key)
    }

    pub fn to_xdr_account_id(&self) -> AccountId {
        self.to_xdr_public_key()
    }

    /// Multiplexed account for this key with the given id
    pub fn to_muxed_account(&self, id: u64) -> MuxedAccount {
        MuxedAccount::new(self.public_key, Some(id))
    }

    pub fn to_xdr_muxed_account(&self) -> MuxedAccount {
        MuxedAccount::Ed25519(self.public_key)
    }
}

/// Equal when the public keys match and both can (or cannot) sign
impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        let keys_match: bool = self.public_key.ct_eq(&other.public_key).into();
        let seeds_match = match (&self.seed, &other.seed) {
            (Some(a), Some(b)) => a.as_slice().ct_eq(b.as_slice()).into(),
            (None, None) => true,
            _ => false,
        };
        keys_match && seeds_match
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("account_id", &self.account_id())
            .field("seed", &self.seed.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "SBXLH5ZCTJR2VKCDFKUQWP2WI4B5HKWDRQQ4TUZLFE47MQ4LZEAHCBLU";
    const ACCOUNT: &str = "GANDFY56NWMYUOFGQDVN7TCYBCTUV4ZWXHCI3FUWKFO5ISLT7X53VTO2";

    #[test]
    fn test_secret_seed_roundtrip() {
        let keypair = KeyPair::from_secret_seed(SEED).unwrap();
        assert!(keypair.can_sign());
        assert_eq!(keypair.account_id(), ACCOUNT);
        assert_eq!(keypair.secret_seed().unwrap().as_str(), SEED);
    }

    #[test]
    fn test_account_id_is_verify_only() {
        let keypair = KeyPair::from_account_id(ACCOUNT).unwrap();
        assert!(!keypair.can_sign());
        assert_eq!(keypair.sign(b"data"), Err(KeyPairError::MissingSecretKey));
        assert_eq!(keypair.secret_seed().unwrap_err(), KeyPairError::MissingSecretKey);
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = KeyPair::from_secret_seed(SEED).unwrap();
        let verifier = KeyPair::from_account_id(ACCOUNT).unwrap();

        let signature = signer.sign(b"hello").unwrap();
        assert!(verifier.verify(b"hello", &signature));
        assert!(!verifier.verify(b"hello!", &signature));
        assert!(!verifier.verify(b"hello", &signature[..63]));
    }

    #[test]
    fn test_other_key_does_not_verify() {
        let a = KeyPair::from_seed(&[1u8; 32]).unwrap();
        let b = KeyPair::from_seed(&[2u8; 32]).unwrap();
        let signature = a.sign(b"message").unwrap();
        assert!(!b.verify(b"message", &signature));
    }

    #[test]
    fn test_generate_produces_distinct_keys() {
        let a = KeyPair::generate().unwrap();
        let b = KeyPair::generate().unwrap();
        assert!(a.can_sign());
        assert_ne!(a.public_key(), b.public_key());
        assert!(strkey::is_valid_account_id(&a.account_id()));
    }

    #[test]
    fn test_wrong_strkey_kind() {
        assert!(matches!(
            KeyPair::from_secret_seed(ACCOUNT),
            Err(KeyPairError::StrKey(StrKeyError::UnexpectedVersion { .. }))
        ));
    }

    #[test]
    fn test_signature_hint() {
        let keypair = KeyPair::from_account_id(ACCOUNT).unwrap();
        assert_eq!(keypair.signature_hint(), [0x73, 0xfd, 0xfb, 0xba]);
    }

    #[test]
    fn test_sign_payload_decorated_hint() {
        let keypair = KeyPair::from_secret_seed(SEED).unwrap();
        let key_hint = keypair.signature_hint();

        let long = keypair.sign_payload_decorated(&[9, 9, 1, 2, 3, 4]).unwrap();
        assert_eq!(
            long.hint,
            [key_hint[0] ^ 1, key_hint[1] ^ 2, key_hint[2] ^ 3, key_hint[3] ^ 4]
        );

        let short = keypair.sign_payload_decorated(&[0xff, 0xff]).unwrap();
        assert_eq!(
            short.hint,
            [key_hint[0] ^ 0xff, key_hint[1] ^ 0xff, key_hint[2], key_hint[3]]
        );
        assert!(keypair.verify(&[0xff, 0xff], &short.signature));
    }

    #[test]
    fn test_debug_redacts_seed() {
        let keypair = KeyPair::from_secret_seed(SEED).unwrap();
        let debug = format!("{:?}", keypair);
        assert!(debug.contains(ACCOUNT));
        assert!(!debug.contains(SEED));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_equality() {
        let full = KeyPair::from_secret_seed(SEED).unwrap();
        let public = KeyPair::from_account_id(ACCOUNT).unwrap();
        assert_eq!(full, full.clone());
        assert_ne!(full, public);
    }

    #[test]
    fn test_xdr_conversions() {
        let keypair = KeyPair::from_account_id(ACCOUNT).unwrap();
        assert_eq!(keypair.to_xdr_account_id().to_string(), ACCOUNT);
        let muxed = keypair.to_muxed_account(7);
        assert_eq!(muxed.id(), Some(7));
        assert_eq!(muxed.ed25519(), keypair.public_key());
    }
}
