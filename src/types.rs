//! Shared types for Stellar Wire
//!
//! Request and response structures that cross the FFI and CLI boundary.
//! All of them serialize to JSON.

use serde::{Deserialize, Serialize};

use crate::error::{WireError, WireResult};
use crate::network::{Network, NetworkId};
use crate::strkey::VersionByte;
use crate::tx::format_amount;
use crate::xdr::{EnvelopeType, Memo, Operation, OperationBody, TransactionEnvelope, XdrResult};

// =============================================================================
// Keys & Addresses
// =============================================================================

/// Freshly generated key pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPairResponse {
    pub account_id: String,
    pub secret_seed: String,
    pub public_key_hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeAddressRequest {
    pub version: VersionByte,
    pub payload_hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeAddressRequest {
    pub address: String,
}

/// A decoded StrKey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedAddress {
    pub version: VersionByte,
    pub version_byte: u8,
    pub payload_hex: String,
}

// =============================================================================
// Networks
// =============================================================================

/// Network selection: a short name (`testnet`, `public`, ...) or a full
/// passphrase. The passphrase wins when both are given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSelector {
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub passphrase: Option<String>,
}

impl NetworkSelector {
    pub fn resolve(&self, default: Network) -> WireResult<Network> {
        if let Some(passphrase) = &self.passphrase {
            if passphrase.trim().is_empty() {
                return Err(WireError::invalid_input("Network passphrase must not be empty"));
            }
            return Ok(Network::custom(passphrase.clone()));
        }
        match &self.network {
            Some(name) => Network::from_name(name)
                .ok_or_else(|| WireError::invalid_input(format!("Unknown network: {}", name))),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdResponse {
    pub passphrase: String,
    pub network_id: NetworkId,
}

impl From<&Network> for NetworkIdResponse {
    fn from(network: &Network) -> Self {
        Self {
            passphrase: network.passphrase().to_string(),
            network_id: *network.id(),
        }
    }
}

// =============================================================================
// Envelopes
// =============================================================================

/// An envelope as base64 XDR plus the network it is meant for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeRequest {
    pub envelope: String,
    #[serde(flatten)]
    pub network: NetworkSelector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignRequest {
    pub envelope: String,
    pub secret_seed: String,
    #[serde(flatten)]
    pub network: NetworkSelector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub envelope: String,
    pub account_id: String,
    #[serde(flatten)]
    pub network: NetworkSelector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelopeResponse {
    /// Base64 XDR with the new signature appended
    pub envelope: String,
    pub tx_hash: String,
    pub signature_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub tx_hash: String,
}

/// One operation in an envelope summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSummary {
    #[serde(rename = "type")]
    pub operation_type: String,
    pub source_account: Option<String>,
    pub amount: Option<String>,
}

impl From<&Operation> for OperationSummary {
    fn from(op: &Operation) -> Self {
        let amount = match &op.body {
            OperationBody::CreateAccount(o) => Some(o.starting_balance),
            OperationBody::Payment(o) => Some(o.amount),
            OperationBody::PathPaymentStrictReceive(o) => Some(o.dest_amount),
            OperationBody::PathPaymentStrictSend(o) => Some(o.send_amount),
            OperationBody::ManageSellOffer(o) => Some(o.amount),
            OperationBody::ManageBuyOffer(o) => Some(o.buy_amount),
            OperationBody::CreatePassiveSellOffer(o) => Some(o.amount),
            OperationBody::Clawback(o) => Some(o.amount),
            OperationBody::LiquidityPoolWithdraw(o) => Some(o.amount),
            _ => None,
        };
        Self {
            operation_type: op.operation_type().name().to_string(),
            source_account: op.source_account.map(|a| a.to_string()),
            amount: amount.map(format_amount),
        }
    }
}

/// Human-oriented view of an envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeSummary {
    pub envelope_type: EnvelopeType,
    pub tx_hash: String,
    pub source_account: String,
    /// Total fee in stroops; for fee bumps the outer fee
    pub fee: i64,
    pub seq_num: i64,
    pub memo: Memo,
    pub operations: Vec<OperationSummary>,
    pub signature_count: usize,
}

impl EnvelopeSummary {
    pub fn from_envelope(envelope: &TransactionEnvelope, network_id: &NetworkId) -> XdrResult<Self> {
        let (fee, seq_num, memo) = match envelope {
            TransactionEnvelope::TxV0(e) => (i64::from(e.tx.fee), e.tx.seq_num, e.tx.memo.clone()),
            TransactionEnvelope::Tx(e) => (i64::from(e.tx.fee), e.tx.seq_num, e.tx.memo.clone()),
            TransactionEnvelope::TxFeeBump(e) => {
                let inner = &e.tx.inner().tx;
                (e.tx.fee, inner.seq_num, inner.memo.clone())
            }
        };

        Ok(Self {
            envelope_type: envelope.envelope_type(),
            tx_hash: hex::encode(envelope.hash(network_id)?),
            source_account: envelope.source_account().to_string(),
            fee,
            seq_num,
            memo,
            operations: envelope.operations().iter().map(OperationSummary::from).collect(),
            signature_count: envelope.signatures().len(),
        })
    }
}

// =============================================================================
// Response Wrapper
// =============================================================================

/// JSON envelope returned by every FFI function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<WireError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: WireError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"code":"internal","message":"Serialization failed"}}"#.to_string()
        })
    }
}
