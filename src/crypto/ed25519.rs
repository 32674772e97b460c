//! Ed25519 (RFC 8032) over raw 32-byte seeds, the only key material the
//! network knows about.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use super::{SchemeError, SignatureScheme};

pub const SEED_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

pub struct Ed25519;

impl Ed25519 {
    fn verifying_key(public_key: &[u8; PUBLIC_KEY_LEN]) -> Result<VerifyingKey, SchemeError> {
        VerifyingKey::from_bytes(public_key).map_err(|e| SchemeError::InvalidPublicKey {
            scheme: Self::NAME,
            reason: e.to_string(),
        })
    }
}

impl SignatureScheme for Ed25519 {
    const NAME: &'static str = "ed25519";

    type Seed = [u8; SEED_LEN];
    type PublicKey = [u8; PUBLIC_KEY_LEN];
    type Signature = [u8; SIGNATURE_LEN];

    fn public_key(seed: &Self::Seed) -> Self::PublicKey {
        // SigningKey zeroizes its scalar on drop
        SigningKey::from_bytes(seed).verifying_key().to_bytes()
    }

    fn sign(seed: &Self::Seed, message: &[u8]) -> Self::Signature {
        SigningKey::from_bytes(seed).sign(message).to_bytes()
    }

    fn check_public_key(public_key: &Self::PublicKey) -> Result<(), SchemeError> {
        Self::verifying_key(public_key).map(|_| ())
    }

    fn verify(
        public_key: &Self::PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, SchemeError> {
        let verifying_key = Self::verifying_key(public_key)?;
        let bytes: [u8; SIGNATURE_LEN] =
            signature
                .try_into()
                .map_err(|_| SchemeError::SignatureLength {
                    scheme: Self::NAME,
                    expected: SIGNATURE_LEN,
                    actual: signature.len(),
                })?;

        Ok(verifying_key
            .verify(message, &Signature::from_bytes(&bytes))
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "6eb3f7229a63aaa8432aa90b3f564703d3aac38c21c9d32b2939f6438bc90071";
    const PUBLIC: &str = "1a32e3be6d998a38a680eadfcc5808a74af336b9c48d9696515dd44973fdfbba";

    fn seed() -> [u8; 32] {
        hex::decode(SEED).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_known_public_key() {
        assert_eq!(hex::encode(Ed25519::public_key(&seed())), PUBLIC);
    }

    #[test]
    fn test_deterministic_signature() {
        let signature = Ed25519::sign(&seed(), b"hello");
        assert_eq!(
            hex::encode(signature),
            "a387478670b1dc5c1ebcbcb7ec9e386746e8f230c2a4e859186fb0064d945f63\
             9ff24ca0b87ccf66d2ca53cc4284df6e66bebe3a91f35829d5fd21b00eb50b0e"
        );
        assert_eq!(signature, Ed25519::sign(&seed(), b"hello"));
    }

    #[test]
    fn test_sign_verify() {
        let seed = [42u8; 32];
        let pk = Ed25519::public_key(&seed);
        let signature = Ed25519::sign(&seed, b"payload");

        assert!(Ed25519::verify(&pk, b"payload", &signature).unwrap());
        assert!(!Ed25519::verify(&pk, b"payload2", &signature).unwrap());
    }

    #[test]
    fn test_malformed_inputs() {
        let pk = Ed25519::public_key(&[1u8; 32]);
        assert_eq!(
            Ed25519::verify(&pk, b"m", &[0u8; 63]),
            Err(SchemeError::SignatureLength {
                scheme: "ed25519",
                expected: 64,
                actual: 63,
            })
        );
        assert!(Ed25519::check_public_key(&pk).is_ok());
    }
}
