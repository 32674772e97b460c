//! Transactions and envelopes
//!
//! The envelope union is distinguished by its leading [`EnvelopeType`]
//! discriminant: legacy V0, V1 and fee-bump envelopes are all accepted.

use serde::{Deserialize, Serialize};

use super::operations::Operation;
use super::types::*;
use super::{ReadXdr, WriteXdr, XdrError, XdrReader, XdrResult, XdrWriter};

pub const MAX_OPERATIONS: u32 = 100;
pub const MAX_SIGNATURES: u32 = 20;

xdr_enum! {
    /// Domain separation tag for everything that gets hashed and signed
    pub enum EnvelopeType {
        TxV0 = 0,
        Scp = 1,
        Tx = 2,
        Auth = 3,
        ScpValue = 4,
        TxFeeBump = 5,
        OpId = 6,
        PoolRevokeOpId = 7,
        ContractId = 8,
        SorobanAuthorization = 9,
    }
}

/// Reserved extension point; only version 0 exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionPoint {
    #[default]
    V0,
}

impl WriteXdr for ExtensionPoint {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_discriminant(0);
        Ok(())
    }
}

impl ReadXdr for ExtensionPoint {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_discriminant()? {
            (0, _) => Ok(ExtensionPoint::V0),
            (value, offset) => Err(XdrError::UnknownDiscriminant {
                type_name: "ExtensionPoint",
                value,
                offset,
            }),
        }
    }
}

/// Transaction extension; arm 1 carries smart-contract resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionExt {
    #[default]
    V0,
}

impl WriteXdr for TransactionExt {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_discriminant(0);
        Ok(())
    }
}

impl ReadXdr for TransactionExt {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_discriminant()? {
            (0, _) => Ok(TransactionExt::V0),
            (1, offset) => Err(XdrError::Unsupported {
                type_name: "TransactionExt",
                value: 1,
                offset,
            }),
            (value, offset) => Err(XdrError::UnknownDiscriminant {
                type_name: "TransactionExt",
                value,
                offset,
            }),
        }
    }
}

fn write_operations(w: &mut XdrWriter, operations: &[Operation]) -> XdrResult<()> {
    w.write_var_array(operations, MAX_OPERATIONS)
}

fn write_signatures(w: &mut XdrWriter, signatures: &[DecoratedSignature]) -> XdrResult<()> {
    w.write_var_array(signatures, MAX_SIGNATURES)
}

/// A transaction as signed since protocol 13
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub source_account: MuxedAccount,
    /// Total fee in stroops across all operations
    pub fee: u32,
    pub seq_num: i64,
    pub cond: Preconditions,
    pub memo: Memo,
    pub operations: Vec<Operation>,
    pub ext: TransactionExt,
}

impl WriteXdr for Transaction {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.source_account.write_xdr(w)?;
        self.fee.write_xdr(w)?;
        self.seq_num.write_xdr(w)?;
        self.cond.write_xdr(w)?;
        self.memo.write_xdr(w)?;
        write_operations(w, &self.operations)?;
        self.ext.write_xdr(w)
    }
}

impl ReadXdr for Transaction {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            source_account: MuxedAccount::read_xdr(r)?,
            fee: r.read_u32()?,
            seq_num: r.read_i64()?,
            cond: r.nested(Preconditions::read_xdr)?,
            memo: Memo::read_xdr(r)?,
            operations: r.read_var_array(MAX_OPERATIONS)?,
            ext: TransactionExt::read_xdr(r)?,
        })
    }
}

/// Pre-protocol-13 transaction with a bare ed25519 source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV0 {
    #[serde(with = "crate::serde_bytes::hex_array")]
    pub source_account_ed25519: Uint256,
    pub fee: u32,
    pub seq_num: i64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Vec<Operation>,
    pub ext: ExtensionPoint,
}

impl TransactionV0 {
    /// The equivalent V1 transaction; this is what V0 envelopes are signed as
    pub fn to_v1(&self) -> Transaction {
        Transaction {
            source_account: MuxedAccount::Ed25519(self.source_account_ed25519),
            fee: self.fee,
            seq_num: self.seq_num,
            cond: match self.time_bounds {
                Some(bounds) => Preconditions::Time(bounds),
                None => Preconditions::None,
            },
            memo: self.memo.clone(),
            operations: self.operations.clone(),
            ext: TransactionExt::V0,
        }
    }
}

impl WriteXdr for TransactionV0 {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.source_account_ed25519.write_xdr(w)?;
        self.fee.write_xdr(w)?;
        self.seq_num.write_xdr(w)?;
        self.time_bounds.write_xdr(w)?;
        self.memo.write_xdr(w)?;
        write_operations(w, &self.operations)?;
        self.ext.write_xdr(w)
    }
}

impl ReadXdr for TransactionV0 {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            source_account_ed25519: r.read_fixed_opaque()?,
            fee: r.read_u32()?,
            seq_num: r.read_i64()?,
            time_bounds: r.read_option()?,
            memo: Memo::read_xdr(r)?,
            operations: r.read_var_array(MAX_OPERATIONS)?,
            ext: ExtensionPoint::read_xdr(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV0Envelope {
    pub tx: TransactionV0,
    pub signatures: Vec<DecoratedSignature>,
}

impl WriteXdr for TransactionV0Envelope {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.tx.write_xdr(w)?;
        write_signatures(w, &self.signatures)
    }
}

impl ReadXdr for TransactionV0Envelope {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            tx: r.nested(TransactionV0::read_xdr)?,
            signatures: r.read_var_array(MAX_SIGNATURES)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV1Envelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionV1Envelope {
    pub fn new(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }
}

impl WriteXdr for TransactionV1Envelope {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.tx.write_xdr(w)?;
        write_signatures(w, &self.signatures)
    }
}

impl ReadXdr for TransactionV1Envelope {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            tx: r.nested(Transaction::read_xdr)?,
            signatures: r.read_var_array(MAX_SIGNATURES)?,
        })
    }
}

/// The transaction wrapped by a fee bump; only V1 envelopes can be wrapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBumpTransactionInnerTx {
    Tx(TransactionV1Envelope),
}

impl WriteXdr for FeeBumpTransactionInnerTx {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            FeeBumpTransactionInnerTx::Tx(envelope) => {
                EnvelopeType::Tx.write_xdr(w)?;
                envelope.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for FeeBumpTransactionInnerTx {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_discriminant()? {
            (2, _) => Ok(FeeBumpTransactionInnerTx::Tx(
                r.nested(TransactionV1Envelope::read_xdr)?,
            )),
            (value, offset) => Err(XdrError::UnknownDiscriminant {
                type_name: "FeeBumpTransactionInnerTx",
                value,
                offset,
            }),
        }
    }
}

xdr_struct! {
    /// Pays a higher fee on behalf of an already-signed inner transaction
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FeeBumpTransaction {
        pub fee_source: MuxedAccount,
        pub fee: i64,
        pub inner_tx: FeeBumpTransactionInnerTx,
        pub ext: ExtensionPoint,
    }
}

impl FeeBumpTransaction {
    pub fn inner(&self) -> &TransactionV1Envelope {
        let FeeBumpTransactionInnerTx::Tx(inner) = &self.inner_tx;
        inner
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBumpTransactionEnvelope {
    pub tx: FeeBumpTransaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl WriteXdr for FeeBumpTransactionEnvelope {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.tx.write_xdr(w)?;
        write_signatures(w, &self.signatures)
    }
}

impl ReadXdr for FeeBumpTransactionEnvelope {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            tx: r.nested(FeeBumpTransaction::read_xdr)?,
            signatures: r.read_var_array(MAX_SIGNATURES)?,
        })
    }
}

/// Signed container submitted to the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionEnvelope {
    TxV0(TransactionV0Envelope),
    Tx(TransactionV1Envelope),
    TxFeeBump(FeeBumpTransactionEnvelope),
}

impl TransactionEnvelope {
    pub fn envelope_type(&self) -> EnvelopeType {
        match self {
            TransactionEnvelope::TxV0(_) => EnvelopeType::TxV0,
            TransactionEnvelope::Tx(_) => EnvelopeType::Tx,
            TransactionEnvelope::TxFeeBump(_) => EnvelopeType::TxFeeBump,
        }
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        match self {
            TransactionEnvelope::TxV0(e) => &e.signatures,
            TransactionEnvelope::Tx(e) => &e.signatures,
            TransactionEnvelope::TxFeeBump(e) => &e.signatures,
        }
    }

    pub fn signatures_mut(&mut self) -> &mut Vec<DecoratedSignature> {
        match self {
            TransactionEnvelope::TxV0(e) => &mut e.signatures,
            TransactionEnvelope::Tx(e) => &mut e.signatures,
            TransactionEnvelope::TxFeeBump(e) => &mut e.signatures,
        }
    }

    /// Account paying the fee: the fee source for fee bumps, else the tx source
    pub fn source_account(&self) -> MuxedAccount {
        match self {
            TransactionEnvelope::TxV0(e) => MuxedAccount::Ed25519(e.tx.source_account_ed25519),
            TransactionEnvelope::Tx(e) => e.tx.source_account,
            TransactionEnvelope::TxFeeBump(e) => e.tx.fee_source,
        }
    }

    /// Operations of the (inner) transaction
    pub fn operations(&self) -> &[Operation] {
        match self {
            TransactionEnvelope::TxV0(e) => &e.tx.operations,
            TransactionEnvelope::Tx(e) => &e.tx.operations,
            TransactionEnvelope::TxFeeBump(e) => &e.tx.inner().tx.operations,
        }
    }
}

impl From<TransactionV1Envelope> for TransactionEnvelope {
    fn from(envelope: TransactionV1Envelope) -> Self {
        TransactionEnvelope::Tx(envelope)
    }
}

impl WriteXdr for TransactionEnvelope {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.envelope_type().write_xdr(w)?;
        match self {
            TransactionEnvelope::TxV0(e) => e.write_xdr(w),
            TransactionEnvelope::Tx(e) => e.write_xdr(w),
            TransactionEnvelope::TxFeeBump(e) => e.write_xdr(w),
        }
    }
}

impl ReadXdr for TransactionEnvelope {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let (value, offset) = r.read_discriminant()?;
        match EnvelopeType::from_discriminant(value) {
            Some(EnvelopeType::TxV0) => Ok(TransactionEnvelope::TxV0(
                r.nested(TransactionV0Envelope::read_xdr)?,
            )),
            Some(EnvelopeType::Tx) => Ok(TransactionEnvelope::Tx(
                r.nested(TransactionV1Envelope::read_xdr)?,
            )),
            Some(EnvelopeType::TxFeeBump) => Ok(TransactionEnvelope::TxFeeBump(
                r.nested(FeeBumpTransactionEnvelope::read_xdr)?,
            )),
            _ => Err(XdrError::UnknownDiscriminant {
                type_name: "TransactionEnvelope",
                value,
                offset,
            }),
        }
    }
}

/// The transaction as it appears inside the signature payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggedTransaction {
    Tx(Transaction),
    TxFeeBump(FeeBumpTransaction),
}

impl TaggedTransaction {
    pub fn envelope_type(&self) -> EnvelopeType {
        match self {
            TaggedTransaction::Tx(_) => EnvelopeType::Tx,
            TaggedTransaction::TxFeeBump(_) => EnvelopeType::TxFeeBump,
        }
    }
}

impl WriteXdr for TaggedTransaction {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.envelope_type().write_xdr(w)?;
        match self {
            TaggedTransaction::Tx(tx) => tx.write_xdr(w),
            TaggedTransaction::TxFeeBump(tx) => tx.write_xdr(w),
        }
    }
}

impl ReadXdr for TaggedTransaction {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let (value, offset) = r.read_discriminant()?;
        match EnvelopeType::from_discriminant(value) {
            Some(EnvelopeType::Tx) => Ok(TaggedTransaction::Tx(r.nested(Transaction::read_xdr)?)),
            Some(EnvelopeType::TxFeeBump) => Ok(TaggedTransaction::TxFeeBump(
                r.nested(FeeBumpTransaction::read_xdr)?,
            )),
            _ => Err(XdrError::UnknownDiscriminant {
                type_name: "TaggedTransaction",
                value,
                offset,
            }),
        }
    }
}

xdr_struct! {
    /// Network id followed by the tagged transaction: the signature base
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionSignaturePayload {
        #[serde(with = "crate::serde_bytes::hex_array")]
        pub network_id: Hash,
        pub tagged_transaction: TaggedTransaction,
    }
}
