//! XDR codec errors
//!
//! Decode-side variants carry the byte offset at which the problem was
//! detected so malformed server blobs can be diagnosed.

/// XDR encoding/decoding error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XdrError {
    #[error("Unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Non-zero padding at offset {offset}")]
    NonZeroPadding { offset: usize },

    #[error("Invalid bool value {value} at offset {offset}")]
    InvalidBool { offset: usize, value: u32 },

    #[error("Invalid optional flag {value} at offset {offset}")]
    InvalidOptionalFlag { offset: usize, value: u32 },

    #[error("Unknown {type_name} discriminant {value} at offset {offset}")]
    UnknownDiscriminant {
        type_name: &'static str,
        value: i32,
        offset: usize,
    },

    #[error("Unsupported {type_name} arm {value} at offset {offset}")]
    Unsupported {
        type_name: &'static str,
        value: i32,
        offset: usize,
    },

    #[error("Length {len} at offset {offset} exceeds declared maximum {max}")]
    LengthExceedsMax { offset: usize, len: u32, max: u32 },

    #[error("Length {len} at offset {offset} exceeds remaining input of {remaining} bytes")]
    LengthExceedsRemaining {
        offset: usize,
        len: u32,
        remaining: usize,
    },

    #[error("Decoding length limit exceeded at offset {offset}")]
    LengthLimitExceeded { offset: usize },

    #[error("Nesting depth limit exceeded at offset {offset}")]
    DepthLimitExceeded { offset: usize },

    #[error("Invalid UTF-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("{remaining} trailing bytes after offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },

    #[error("{type_name} of length {len} exceeds maximum {max}")]
    ValueTooLong {
        type_name: &'static str,
        len: usize,
        max: u32,
    },

    #[error("Invalid {type_name}: {reason}")]
    InvalidValue {
        type_name: &'static str,
        reason: String,
    },

    #[error("Invalid base64: {0}")]
    Base64(String),
}

impl XdrError {
    /// Byte offset of a decode failure, if the error has one
    pub fn offset(&self) -> Option<usize> {
        match self {
            XdrError::UnexpectedEof { offset, .. }
            | XdrError::NonZeroPadding { offset }
            | XdrError::InvalidBool { offset, .. }
            | XdrError::InvalidOptionalFlag { offset, .. }
            | XdrError::UnknownDiscriminant { offset, .. }
            | XdrError::Unsupported { offset, .. }
            | XdrError::LengthExceedsMax { offset, .. }
            | XdrError::LengthExceedsRemaining { offset, .. }
            | XdrError::LengthLimitExceeded { offset }
            | XdrError::DepthLimitExceeded { offset }
            | XdrError::InvalidUtf8 { offset }
            | XdrError::TrailingBytes { offset, .. } => Some(*offset),
            XdrError::ValueTooLong { .. } | XdrError::InvalidValue { .. } | XdrError::Base64(_) => {
                None
            }
        }
    }

    pub(crate) fn invalid(type_name: &'static str, reason: impl Into<String>) -> Self {
        XdrError::InvalidValue {
            type_name,
            reason: reason.into(),
        }
    }
}

pub type XdrResult<T> = Result<T, XdrError>;
