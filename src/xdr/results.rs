//! Server-returned transaction results
//!
//! Decodes the result blobs returned after submission. Error arms of the
//! operation results are void except for the path-payment missing issuer.
//! Success payloads are decoded where they are small and self-contained;
//! offer and path-payment successes are reported as unsupported.

use serde::{Deserialize, Serialize};

use super::operations::OperationType;
use super::types::*;
use super::{ReadXdr, WriteXdr, XdrError, XdrReader, XdrResult, XdrWriter};

xdr_enum! {
    pub enum TransactionResultCode {
        FeeBumpInnerSuccess = 1,
        Success = 0,
        Failed = -1,
        TooEarly = -2,
        TooLate = -3,
        MissingOperation = -4,
        BadSeq = -5,
        BadAuth = -6,
        InsufficientBalance = -7,
        NoAccount = -8,
        InsufficientFee = -9,
        BadAuthExtra = -10,
        InternalError = -11,
        NotSupported = -12,
        FeeBumpInnerFailed = -13,
        BadSponsorship = -14,
        BadMinSeqAgeOrGap = -15,
        Malformed = -16,
        SorobanInvalid = -17,
    }
}

xdr_enum! {
    pub enum OperationResultCode {
        OpInner = 0,
        OpBadAuth = -1,
        OpNoAccount = -2,
        OpNotSupported = -3,
        OpTooManySubentries = -4,
        OpExceededWorkLimit = -5,
        OpTooManySponsoring = -6,
    }
}

/// Result code of a path payment whose destination asset has no issuer
pub const PATH_PAYMENT_NO_ISSUER: i32 = -9;

xdr_struct! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct InflationPayout {
        pub destination: AccountId,
        pub amount: i64,
    }
}

/// Payload following an operation-specific result code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationResultPayload {
    Void,
    /// Balance moved by a successful account merge
    SourceAccountBalance(i64),
    InflationPayouts(Vec<InflationPayout>),
    /// Id of a newly created claimable balance
    ClaimableBalanceId(ClaimableBalanceId),
    /// Hash of a successful host function's return value and events
    HostFunctionSuccess(#[serde(with = "crate::serde_bytes::hex_array")] Hash),
    /// Asset whose issuer was missing along a payment path
    NoIssuer(Asset),
}

/// Operation-specific outcome: the operation type, its own result code and
/// whatever that code carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationInnerResult {
    pub operation_type: OperationType,
    pub code: i32,
    pub payload: OperationResultPayload,
}

impl OperationInnerResult {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

fn is_path_payment(op_type: OperationType) -> bool {
    matches!(
        op_type,
        OperationType::PathPaymentStrictReceive | OperationType::PathPaymentStrictSend
    )
}

/// Payload of a success code (0) for `op_type`
fn read_success_payload(
    r: &mut XdrReader<'_>,
    op_type: OperationType,
    offset: usize,
) -> XdrResult<OperationResultPayload> {
    Ok(match op_type {
        OperationType::AccountMerge => OperationResultPayload::SourceAccountBalance(r.read_i64()?),
        OperationType::Inflation => {
            OperationResultPayload::InflationPayouts(r.read_var_array(u32::MAX)?)
        }
        OperationType::CreateClaimableBalance => {
            OperationResultPayload::ClaimableBalanceId(ClaimableBalanceId::read_xdr(r)?)
        }
        OperationType::InvokeHostFunction => {
            OperationResultPayload::HostFunctionSuccess(r.read_fixed_opaque()?)
        }
        OperationType::PathPaymentStrictReceive
        | OperationType::PathPaymentStrictSend
        | OperationType::ManageSellOffer
        | OperationType::CreatePassiveSellOffer
        | OperationType::ManageBuyOffer => {
            return Err(XdrError::Unsupported {
                type_name: "OperationInnerResult",
                value: 0,
                offset,
            })
        }
        OperationType::CreateAccount
        | OperationType::Payment
        | OperationType::SetOptions
        | OperationType::ChangeTrust
        | OperationType::AllowTrust
        | OperationType::ManageData
        | OperationType::BumpSequence
        | OperationType::ClaimClaimableBalance
        | OperationType::BeginSponsoringFutureReserves
        | OperationType::EndSponsoringFutureReserves
        | OperationType::RevokeSponsorship
        | OperationType::Clawback
        | OperationType::ClawbackClaimableBalance
        | OperationType::SetTrustLineFlags
        | OperationType::LiquidityPoolDeposit
        | OperationType::LiquidityPoolWithdraw
        | OperationType::ExtendFootprintTtl
        | OperationType::RestoreFootprint => OperationResultPayload::Void,
    })
}

impl WriteXdr for OperationInnerResult {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.operation_type.write_xdr(w)?;
        w.write_i32(self.code);
        match &self.payload {
            OperationResultPayload::Void => Ok(()),
            OperationResultPayload::SourceAccountBalance(balance) => balance.write_xdr(w),
            OperationResultPayload::InflationPayouts(payouts) => {
                w.write_var_array(payouts, u32::MAX)
            }
            OperationResultPayload::ClaimableBalanceId(id) => id.write_xdr(w),
            OperationResultPayload::HostFunctionSuccess(hash) => hash.write_xdr(w),
            OperationResultPayload::NoIssuer(asset) => asset.write_xdr(w),
        }
    }
}

impl ReadXdr for OperationInnerResult {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let operation_type = OperationType::read_xdr(r)?;
        let (code, offset) = r.read_discriminant()?;
        let payload = match code {
            0 => read_success_payload(r, operation_type, offset)?,
            PATH_PAYMENT_NO_ISSUER if is_path_payment(operation_type) => {
                OperationResultPayload::NoIssuer(Asset::read_xdr(r)?)
            }
            // Remaining failure codes are void
            _ => OperationResultPayload::Void,
        };
        Ok(Self {
            operation_type,
            code,
            payload,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationResult {
    OpInner(OperationInnerResult),
    OpBadAuth,
    OpNoAccount,
    OpNotSupported,
    OpTooManySubentries,
    OpExceededWorkLimit,
    OpTooManySponsoring,
}

impl OperationResult {
    pub fn code(&self) -> OperationResultCode {
        match self {
            OperationResult::OpInner(_) => OperationResultCode::OpInner,
            OperationResult::OpBadAuth => OperationResultCode::OpBadAuth,
            OperationResult::OpNoAccount => OperationResultCode::OpNoAccount,
            OperationResult::OpNotSupported => OperationResultCode::OpNotSupported,
            OperationResult::OpTooManySubentries => OperationResultCode::OpTooManySubentries,
            OperationResult::OpExceededWorkLimit => OperationResultCode::OpExceededWorkLimit,
            OperationResult::OpTooManySponsoring => OperationResultCode::OpTooManySponsoring,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::OpInner(inner) if inner.is_success())
    }
}

impl WriteXdr for OperationResult {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.code().write_xdr(w)?;
        match self {
            OperationResult::OpInner(inner) => inner.write_xdr(w),
            _ => Ok(()),
        }
    }
}

impl ReadXdr for OperationResult {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match OperationResultCode::read_xdr(r)? {
            OperationResultCode::OpInner => {
                OperationResult::OpInner(r.nested(OperationInnerResult::read_xdr)?)
            }
            OperationResultCode::OpBadAuth => OperationResult::OpBadAuth,
            OperationResultCode::OpNoAccount => OperationResult::OpNoAccount,
            OperationResultCode::OpNotSupported => OperationResult::OpNotSupported,
            OperationResultCode::OpTooManySubentries => OperationResult::OpTooManySubentries,
            OperationResultCode::OpExceededWorkLimit => OperationResult::OpExceededWorkLimit,
            OperationResultCode::OpTooManySponsoring => OperationResult::OpTooManySponsoring,
        })
    }
}

/// Outcome of the transaction wrapped by a fee bump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerTransactionResult {
    pub fee_charged: i64,
    pub code: TransactionResultCode,
    pub results: Vec<OperationResult>,
}

fn carries_operation_results(code: TransactionResultCode) -> bool {
    matches!(
        code,
        TransactionResultCode::Success | TransactionResultCode::Failed
    )
}

fn is_fee_bump_code(code: TransactionResultCode) -> bool {
    matches!(
        code,
        TransactionResultCode::FeeBumpInnerSuccess | TransactionResultCode::FeeBumpInnerFailed
    )
}

impl WriteXdr for InnerTransactionResult {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        if is_fee_bump_code(self.code) {
            return Err(XdrError::invalid(
                "InnerTransactionResult",
                format!("{} cannot be nested in a fee bump", self.code.name()),
            ));
        }
        if !carries_operation_results(self.code) && !self.results.is_empty() {
            return Err(XdrError::invalid(
                "InnerTransactionResult",
                format!("{} carries no operation results", self.code.name()),
            ));
        }
        self.fee_charged.write_xdr(w)?;
        self.code.write_xdr(w)?;
        if carries_operation_results(self.code) {
            w.write_var_array(&self.results, u32::MAX)?;
        }
        w.write_discriminant(0);
        Ok(())
    }
}

impl ReadXdr for InnerTransactionResult {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let fee_charged = r.read_i64()?;
        let (value, offset) = r.read_discriminant()?;
        let code = match TransactionResultCode::from_discriminant(value) {
            Some(code) if !is_fee_bump_code(code) => code,
            _ => {
                return Err(XdrError::UnknownDiscriminant {
                    type_name: "InnerTransactionResult",
                    value,
                    offset,
                })
            }
        };
        let results = if carries_operation_results(code) {
            r.read_var_array(u32::MAX)?
        } else {
            Vec::new()
        };
        super::transaction::ExtensionPoint::read_xdr(r)?;
        Ok(Self {
            fee_charged,
            code,
            results,
        })
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct InnerTransactionResultPair {
        #[serde(with = "crate::serde_bytes::hex_array")]
        pub transaction_hash: Hash,
        pub result: InnerTransactionResult,
    }
}

/// Body of a transaction result, keyed by [`TransactionResultCode`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionResultResult {
    /// Success or failure with per-operation results
    Operations {
        code: TransactionResultCode,
        results: Vec<OperationResult>,
    },
    /// Fee-bump outcome with the inner transaction's result
    FeeBumpInner {
        code: TransactionResultCode,
        inner: Box<InnerTransactionResultPair>,
    },
    Void(TransactionResultCode),
}

impl TransactionResultResult {
    pub fn code(&self) -> TransactionResultCode {
        match self {
            TransactionResultResult::Operations { code, .. }
            | TransactionResultResult::FeeBumpInner { code, .. }
            | TransactionResultResult::Void(code) => *code,
        }
    }

    /// Whether the arm is the one its code selects on the wire
    fn arm_matches_code(&self) -> bool {
        match self {
            TransactionResultResult::Operations { code, .. } => carries_operation_results(*code),
            TransactionResultResult::FeeBumpInner { code, .. } => is_fee_bump_code(*code),
            TransactionResultResult::Void(code) => {
                !carries_operation_results(*code) && !is_fee_bump_code(*code)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub fee_charged: i64,
    pub result: TransactionResultResult,
}

impl TransactionResult {
    pub fn is_success(&self) -> bool {
        matches!(
            self.result.code(),
            TransactionResultCode::Success | TransactionResultCode::FeeBumpInnerSuccess
        )
    }

    /// Per-operation results, looking through a fee bump
    pub fn operation_results(&self) -> &[OperationResult] {
        match &self.result {
            TransactionResultResult::Operations { results, .. } => results,
            TransactionResultResult::FeeBumpInner { inner, .. } => &inner.result.results,
            TransactionResultResult::Void(_) => &[],
        }
    }
}

impl WriteXdr for TransactionResult {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        if !self.result.arm_matches_code() {
            return Err(XdrError::invalid(
                "TransactionResult",
                format!("{} does not select this result arm", self.result.code().name()),
            ));
        }
        self.fee_charged.write_xdr(w)?;
        self.result.code().write_xdr(w)?;
        match &self.result {
            TransactionResultResult::Operations { results, .. } => {
                w.write_var_array(results, u32::MAX)?
            }
            TransactionResultResult::FeeBumpInner { inner, .. } => inner.write_xdr(w)?,
            TransactionResultResult::Void(_) => {}
        }
        w.write_discriminant(0);
        Ok(())
    }
}

impl ReadXdr for TransactionResult {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let fee_charged = r.read_i64()?;
        let code = TransactionResultCode::read_xdr(r)?;
        let result = match code {
            TransactionResultCode::Success | TransactionResultCode::Failed => {
                TransactionResultResult::Operations {
                    code,
                    results: r.read_var_array(u32::MAX)?,
                }
            }
            code if is_fee_bump_code(code) => TransactionResultResult::FeeBumpInner {
                code,
                inner: r.nested(Box::<InnerTransactionResultPair>::read_xdr)?,
            },
            other => TransactionResultResult::Void(other),
        };
        super::transaction::ExtensionPoint::read_xdr(r)?;
        Ok(Self {
            fee_charged,
            result,
        })
    }
}
