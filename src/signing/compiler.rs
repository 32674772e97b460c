//! Signature Compilation
//!
//! Attaches decorated signatures to envelopes and checks them against
//! candidate keys. Signatures are appended in call order; duplicates and
//! signer weights are left to the network.

use crate::keypair::KeyPair;
use crate::network::NetworkId;
use crate::signing::preimage::{envelope_signature_base, transaction_hash, SignaturePreImage};
use crate::signing::{SigningError, SigningResult};
use crate::utils::crypto::{last_four, sha256};
use crate::xdr::{
    DecoratedSignature, TransactionEnvelope, XdrResult, MAX_SIGNATURES, MAX_SIGNATURE_LEN,
};

/// Sign `signature_base` with `keypair` and append the result.
///
/// The signed message is SHA-256 of the base, not the base itself.
pub fn add_signature(
    envelope: &mut TransactionEnvelope,
    keypair: &KeyPair,
    signature_base: &[u8],
) -> SigningResult<()> {
    ensure_capacity(envelope)?;
    let hash = sha256(signature_base);
    let decorated = keypair.sign_decorated(&hash)?;
    envelope.signatures_mut().push(decorated);

    crate::log_debug!(
        "signing",
        "Added signature",
        account = keypair.account_id(),
        tx_hash = hex::encode(hash),
        total = envelope.signatures().len()
    );
    Ok(())
}

fn ensure_capacity(envelope: &TransactionEnvelope) -> SigningResult<()> {
    if envelope.signatures().len() >= MAX_SIGNATURES as usize {
        return Err(SigningError::TooManySignatures {
            max: MAX_SIGNATURES,
        });
    }
    Ok(())
}

impl TransactionEnvelope {
    pub fn signature_base(&self, network_id: &NetworkId) -> XdrResult<Vec<u8>> {
        envelope_signature_base(self, network_id)
    }

    /// Transaction id on `network_id`
    pub fn hash(&self, network_id: &NetworkId) -> XdrResult<[u8; 32]> {
        transaction_hash(self, network_id)
    }

    pub fn preimage(&self, network_id: &NetworkId) -> XdrResult<SignaturePreImage> {
        SignaturePreImage::for_envelope(self, network_id)
    }

    /// Sign for `network_id` and append the signature
    pub fn sign(&mut self, keypair: &KeyPair, network_id: &NetworkId) -> SigningResult<()> {
        let base = self.signature_base(network_id)?;
        add_signature(self, keypair, &base)
    }

    /// Append a hash(x) signature: the preimage itself, hinted by its hash
    pub fn add_hash_x_signature(&mut self, preimage: &[u8]) -> SigningResult<()> {
        if preimage.len() > MAX_SIGNATURE_LEN as usize {
            return Err(SigningError::PreimageTooLong {
                len: preimage.len(),
                max: MAX_SIGNATURE_LEN as usize,
            });
        }
        ensure_capacity(self)?;

        let hint = last_four(&sha256(preimage));
        self.signatures_mut()
            .push(DecoratedSignature::new(hint, preimage.to_vec()));

        crate::log_debug!(
            "signing",
            "Added hash(x) signature",
            hint = hex::encode(hint),
            total = self.signatures().len()
        );
        Ok(())
    }

    /// Append a signature produced elsewhere, without verification
    pub fn add_decorated_signature(&mut self, signature: DecoratedSignature) -> SigningResult<()> {
        if signature.signature.len() > MAX_SIGNATURE_LEN as usize {
            return Err(SigningError::InvalidSignature(format!(
                "Signature is {} bytes; at most {} allowed",
                signature.signature.len(),
                MAX_SIGNATURE_LEN
            )));
        }
        ensure_capacity(self)?;
        self.signatures_mut().push(signature);
        Ok(())
    }

    /// Append a raw ed25519 signature from an external signer after checking
    /// it against this envelope's hash on `network_id`
    pub fn add_external_signature(
        &mut self,
        public_key: &[u8; 32],
        signature: &[u8],
        network_id: &NetworkId,
    ) -> SigningResult<()> {
        let signer = KeyPair::from_public_key(public_key)?;
        let hash = self.hash(network_id)?;
        if !signer.verify(&hash, signature) {
            crate::log_warn!(
                "signing",
                "Rejected external signature",
                account = signer.account_id(),
                tx_hash = hex::encode(hash)
            );
            return Err(SigningError::InvalidSignature(format!(
                "Signature does not verify for {}",
                signer.account_id()
            )));
        }

        self.add_decorated_signature(DecoratedSignature::new(
            signer.signature_hint(),
            signature.to_vec(),
        ))
    }

    /// Whether any attached signature with `key`'s hint verifies
    pub fn verify_signature(&self, key: &KeyPair, network_id: &NetworkId) -> XdrResult<bool> {
        let hash = self.hash(network_id)?;
        Ok(signed_by(self, key, &hash))
    }

    /// The candidates that produced a valid signature, in candidate order
    pub fn verified_signers<'a>(
        &self,
        network_id: &NetworkId,
        candidates: &'a [KeyPair],
    ) -> XdrResult<Vec<&'a KeyPair>> {
        let hash = self.hash(network_id)?;
        Ok(candidates
            .iter()
            .filter(|key| signed_by(self, key, &hash))
            .collect())
    }
}

fn signed_by(envelope: &TransactionEnvelope, key: &KeyPair, hash: &[u8; 32]) -> bool {
    let hint = key.signature_hint();
    envelope
        .signatures()
        .iter()
        .filter(|sig| sig.hint == hint)
        .any(|sig| key.verify(hash, &sig.signature))
}
