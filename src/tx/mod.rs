//! Transaction Module
//!
//! Builds unsigned transactions and fee bumps, and converts amounts between
//! decimal strings and stroops.

mod amount;
mod builder;

pub use amount::*;
pub use builder::*;

use crate::xdr::XdrError;

/// Errors raised while assembling a transaction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("Transaction has no operations")]
    NoOperations,

    #[error("Transaction has {count} operations; at most {max} allowed")]
    TooManyOperations { count: usize, max: u32 },

    #[error("Transaction has {count} extra signers; at most {max} allowed")]
    TooManyExtraSigners { count: usize, max: u32 },

    #[error("Fee overflows: {0}")]
    FeeOverflow(String),

    #[error("Fee {fee} is lower than the inner transaction fee {minimum}")]
    FeeTooLow { fee: i64, minimum: i64 },

    #[error("Sequence number {0} cannot be incremented")]
    SequenceOverflow(i64),

    #[error("Invalid time bounds: min {min} is after max {max}")]
    InvalidTimeBounds { min: u64, max: u64 },

    #[error("Invalid ledger bounds: min {min} is after max {max}")]
    InvalidLedgerBounds { min: u32, max: u32 },

    #[error("Fee bump transactions cannot wrap another fee bump")]
    NestedFeeBump,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    Xdr(#[from] XdrError),
}

pub type BuildResult<T> = Result<T, BuildError>;
