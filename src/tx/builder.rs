//! Transaction Builder
//!
//! Assembles unsigned transactions and fee-bump wrappers. The builder picks
//! the smallest preconditions arm that expresses what was set.

use super::{BuildError, BuildResult};
use crate::xdr::{
    ExtensionPoint, FeeBumpTransaction, FeeBumpTransactionEnvelope, FeeBumpTransactionInnerTx,
    LedgerBounds, Memo, MuxedAccount, Operation, Preconditions, PreconditionsV2, SignerKey,
    TimeBounds, Transaction, TransactionEnvelope, TransactionExt, TransactionV1Envelope,
    MAX_EXTRA_SIGNERS, MAX_OPERATIONS,
};

/// Minimum per-operation fee accepted by the network, in stroops
pub const BASE_FEE: u32 = 100;

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: MuxedAccount,
    current_sequence: i64,
    base_fee: u32,
    memo: Memo,
    time_bounds: Option<TimeBounds>,
    ledger_bounds: Option<LedgerBounds>,
    min_seq_num: Option<i64>,
    min_seq_age: u64,
    min_seq_ledger_gap: u32,
    extra_signers: Vec<SignerKey>,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    /// `current_sequence` is the source account's sequence number as last
    /// seen on the ledger; the built transaction uses the next one.
    pub fn new(source: impl Into<MuxedAccount>, current_sequence: i64) -> Self {
        Self {
            source: source.into(),
            current_sequence,
            base_fee: BASE_FEE,
            memo: Memo::None,
            time_bounds: None,
            ledger_bounds: None,
            min_seq_num: None,
            min_seq_age: 0,
            min_seq_ledger_gap: 0,
            extra_signers: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Per-operation fee in stroops
    pub fn base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn time_bounds(mut self, min_time: u64, max_time: u64) -> Self {
        self.time_bounds = Some(TimeBounds { min_time, max_time });
        self
    }

    /// Expire `seconds` from now; zero means no upper bound
    pub fn set_timeout(mut self, seconds: u64) -> Self {
        let min_time = self.time_bounds.map(|b| b.min_time).unwrap_or(0);
        let max_time = if seconds == 0 {
            0
        } else {
            let now = chrono::Utc::now().timestamp().max(0) as u64;
            now.saturating_add(seconds)
        };
        self.time_bounds = Some(TimeBounds { min_time, max_time });
        self
    }

    pub fn ledger_bounds(mut self, min_ledger: u32, max_ledger: u32) -> Self {
        self.ledger_bounds = Some(LedgerBounds {
            min_ledger,
            max_ledger,
        });
        self
    }

    pub fn min_sequence_number(mut self, min_seq_num: i64) -> Self {
        self.min_seq_num = Some(min_seq_num);
        self
    }

    /// Seconds that must pass after the source's sequence number last changed
    pub fn min_sequence_age(mut self, seconds: u64) -> Self {
        self.min_seq_age = seconds;
        self
    }

    /// Ledgers that must close after the source's sequence number last changed
    pub fn min_sequence_ledger_gap(mut self, gap: u32) -> Self {
        self.min_seq_ledger_gap = gap;
        self
    }

    pub fn extra_signer(mut self, signer: SignerKey) -> Self {
        self.extra_signers.push(signer);
        self
    }

    pub fn add_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn build(self) -> BuildResult<Transaction> {
        let count = self.operations.len();
        if count == 0 {
            return Err(BuildError::NoOperations);
        }
        if count > MAX_OPERATIONS as usize {
            return Err(BuildError::TooManyOperations {
                count,
                max: MAX_OPERATIONS,
            });
        }
        if self.extra_signers.len() > MAX_EXTRA_SIGNERS as usize {
            return Err(BuildError::TooManyExtraSigners {
                count: self.extra_signers.len(),
                max: MAX_EXTRA_SIGNERS,
            });
        }
        if let Some(bounds) = self.time_bounds {
            if bounds.max_time != 0 && bounds.min_time > bounds.max_time {
                return Err(BuildError::InvalidTimeBounds {
                    min: bounds.min_time,
                    max: bounds.max_time,
                });
            }
        }
        if let Some(bounds) = self.ledger_bounds {
            if bounds.max_ledger != 0 && bounds.min_ledger > bounds.max_ledger {
                return Err(BuildError::InvalidLedgerBounds {
                    min: bounds.min_ledger,
                    max: bounds.max_ledger,
                });
            }
        }

        let fee = u32::try_from(count)
            .ok()
            .and_then(|n| self.base_fee.checked_mul(n))
            .ok_or_else(|| {
                BuildError::FeeOverflow(format!("{} x {} operations", self.base_fee, count))
            })?;
        let seq_num = self
            .current_sequence
            .checked_add(1)
            .ok_or(BuildError::SequenceOverflow(self.current_sequence))?;

        let cond = self.preconditions();
        crate::log_debug!(
            "builder",
            "Built transaction",
            source = self.source,
            seq_num = seq_num,
            fee = fee,
            operations = count
        );

        Ok(Transaction {
            source_account: self.source,
            fee,
            seq_num,
            cond,
            memo: self.memo,
            operations: self.operations,
            ext: TransactionExt::V0,
        })
    }

    pub fn build_envelope(self) -> BuildResult<TransactionEnvelope> {
        Ok(TransactionEnvelope::Tx(TransactionV1Envelope::new(self.build()?)))
    }

    fn preconditions(&self) -> Preconditions {
        let needs_v2 = self.ledger_bounds.is_some()
            || self.min_seq_num.is_some()
            || self.min_seq_age != 0
            || self.min_seq_ledger_gap != 0
            || !self.extra_signers.is_empty();

        if needs_v2 {
            Preconditions::V2(PreconditionsV2 {
                time_bounds: self.time_bounds,
                ledger_bounds: self.ledger_bounds,
                min_seq_num: self.min_seq_num,
                min_seq_age: self.min_seq_age,
                min_seq_ledger_gap: self.min_seq_ledger_gap,
                extra_signers: self.extra_signers.clone(),
            })
        } else if let Some(bounds) = self.time_bounds {
            Preconditions::Time(bounds)
        } else {
            Preconditions::None
        }
    }
}

/// Wrap `inner` in a fee bump paid by `fee_source`.
///
/// The fee covers the inner operations plus the fee bump itself and may not
/// be lower than what the inner transaction already offers. V0 inner
/// envelopes are upgraded; their signatures stay valid.
pub fn build_fee_bump(
    fee_source: impl Into<MuxedAccount>,
    base_fee: i64,
    inner: TransactionEnvelope,
) -> BuildResult<FeeBumpTransactionEnvelope> {
    let inner = match inner {
        TransactionEnvelope::TxV0(e) => TransactionV1Envelope {
            tx: e.tx.to_v1(),
            signatures: e.signatures,
        },
        TransactionEnvelope::Tx(e) => e,
        TransactionEnvelope::TxFeeBump(_) => return Err(BuildError::NestedFeeBump),
    };

    let operations = inner.tx.operations.len() as i64;
    let fee = base_fee
        .checked_mul(operations + 1)
        .ok_or_else(|| BuildError::FeeOverflow(format!("{} x {} operations", base_fee, operations + 1)))?;
    let minimum = i64::from(inner.tx.fee);
    if fee < minimum {
        return Err(BuildError::FeeTooLow { fee, minimum });
    }

    Ok(FeeBumpTransactionEnvelope {
        tx: FeeBumpTransaction {
            fee_source: fee_source.into(),
            fee,
            inner_tx: FeeBumpTransactionInnerTx::Tx(inner),
            ext: ExtensionPoint::V0,
        },
        signatures: Vec::new(),
    })
}
