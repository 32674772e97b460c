//! Signature Base and Transaction Hash
//!
//! The signature base is `network_id || envelope_type || transaction`. Its
//! SHA-256 is the transaction id, and the 32-byte id is what every signer
//! signs.

use serde::{Deserialize, Serialize};

use crate::network::NetworkId;
use crate::utils::crypto::sha256;
use crate::xdr::{
    EnvelopeType, TaggedTransaction, TransactionEnvelope, TransactionSignaturePayload, WriteXdr,
    XdrResult,
};

/// Signature base from already-encoded transaction bytes
pub fn build_signature_base(
    network_id: &NetworkId,
    envelope_type: EnvelopeType,
    transaction_xdr: &[u8],
) -> Vec<u8> {
    let mut base = Vec::with_capacity(32 + 4 + transaction_xdr.len());
    base.extend_from_slice(network_id.as_bytes());
    base.extend_from_slice(&envelope_type.discriminant().to_be_bytes());
    base.extend_from_slice(transaction_xdr);
    base
}

/// Signature base of a tagged transaction
pub fn signature_base(network_id: &NetworkId, tagged: &TaggedTransaction) -> XdrResult<Vec<u8>> {
    TransactionSignaturePayload {
        network_id: *network_id.as_bytes(),
        tagged_transaction: tagged.clone(),
    }
    .to_xdr()
}

/// The transaction an envelope's signatures cover.
///
/// V0 envelopes are signed as their V1 upgrade.
pub fn tagged_transaction(envelope: &TransactionEnvelope) -> TaggedTransaction {
    match envelope {
        TransactionEnvelope::TxV0(e) => TaggedTransaction::Tx(e.tx.to_v1()),
        TransactionEnvelope::Tx(e) => TaggedTransaction::Tx(e.tx.clone()),
        TransactionEnvelope::TxFeeBump(e) => TaggedTransaction::TxFeeBump(e.tx.clone()),
    }
}

pub fn envelope_signature_base(
    envelope: &TransactionEnvelope,
    network_id: &NetworkId,
) -> XdrResult<Vec<u8>> {
    signature_base(network_id, &tagged_transaction(envelope))
}

/// SHA-256 of the signature base
pub fn transaction_hash(
    envelope: &TransactionEnvelope,
    network_id: &NetworkId,
) -> XdrResult<[u8; 32]> {
    Ok(sha256(&envelope_signature_base(envelope, network_id)?))
}

/// Everything an external signer needs to sign an envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePreImage {
    /// The 32 bytes to sign
    #[serde(with = "crate::serde_bytes::hex_array")]
    pub hash: [u8; 32],

    /// Full signature base, for signers that display or re-derive the hash
    #[serde(with = "hex")]
    pub base: Vec<u8>,

    pub envelope_type: EnvelopeType,

    /// Signatures already attached
    pub signature_count: usize,

    /// Human-readable description
    pub description: String,
}

impl SignaturePreImage {
    pub fn for_envelope(envelope: &TransactionEnvelope, network_id: &NetworkId) -> XdrResult<Self> {
        let base = envelope_signature_base(envelope, network_id)?;
        let operations = envelope.operations().len();
        Ok(Self {
            hash: sha256(&base),
            base,
            envelope_type: envelope.envelope_type(),
            signature_count: envelope.signatures().len(),
            description: format!(
                "{} envelope from {} with {} operation{}",
                envelope.envelope_type().name(),
                envelope.source_account(),
                operations,
                if operations == 1 { "" } else { "s" }
            ),
        })
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Hash as lowercase hex, the form used as transaction id
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}
