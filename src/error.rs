//! Unified error types for Stellar Wire
//!
//! Each layer has its own typed error (`StrKeyError`, `XdrError`,
//! `KeyPairError`, `SigningError`, `BuildError`). They all convert into
//! `WireError`, the serializable form used at the FFI and CLI boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::keypair::KeyPairError;
use crate::signing::SigningError;
use crate::strkey::StrKeyError;
use crate::tx::BuildError;
use crate::xdr::XdrError;

/// Main error type for boundary operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl WireError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_transaction(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTransaction, msg)
    }

    pub fn invalid_signature(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSignature, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for WireError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // StrKey errors
    ChecksumMismatch,
    UnknownVersion,
    InvalidStrKey,

    // XDR errors
    MalformedXdr,

    // Key errors
    MissingSecretKey,
    EntropyFailure,
    InvalidPublicKey,

    // Signing errors
    InvalidSignature,
    InvalidTransaction,

    // Input errors
    InvalidInput,
    ParseError,
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Result type alias for boundary operations
pub type WireResult<T> = Result<T, WireError>;

// Conversions from layer errors

impl From<StrKeyError> for WireError {
    fn from(e: StrKeyError) -> Self {
        let code = match e {
            StrKeyError::ChecksumMismatch { .. } => ErrorCode::ChecksumMismatch,
            StrKeyError::UnknownVersion(_) => ErrorCode::UnknownVersion,
            _ => ErrorCode::InvalidStrKey,
        };
        WireError::new(code, e.to_string())
    }
}

impl From<XdrError> for WireError {
    fn from(e: XdrError) -> Self {
        let err = WireError::new(ErrorCode::MalformedXdr, e.to_string());
        match e.offset() {
            Some(offset) => err.with_details(format!("byte offset {}", offset)),
            None => err,
        }
    }
}

impl From<KeyPairError> for WireError {
    fn from(e: KeyPairError) -> Self {
        match e {
            KeyPairError::MissingSecretKey => {
                WireError::new(ErrorCode::MissingSecretKey, e.to_string())
            }
            KeyPairError::Entropy(_) => WireError::new(ErrorCode::EntropyFailure, e.to_string()),
            KeyPairError::InvalidPublicKey(_) => {
                WireError::new(ErrorCode::InvalidPublicKey, e.to_string())
            }
            KeyPairError::StrKey(inner) => inner.into(),
        }
    }
}

impl From<SigningError> for WireError {
    fn from(e: SigningError) -> Self {
        match e {
            SigningError::KeyPair(inner) => inner.into(),
            SigningError::Xdr(inner) => inner.into(),
            SigningError::InvalidSignature(_) => {
                WireError::new(ErrorCode::InvalidSignature, e.to_string())
            }
            _ => WireError::new(ErrorCode::InvalidTransaction, e.to_string()),
        }
    }
}

impl From<BuildError> for WireError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Xdr(inner) => inner.into(),
            BuildError::InvalidAmount(_) => WireError::invalid_input(e.to_string()),
            _ => WireError::new(ErrorCode::InvalidTransaction, e.to_string()),
        }
    }
}

impl From<serde_json::Error> for WireError {
    fn from(e: serde_json::Error) -> Self {
        WireError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for WireError {
    fn from(e: hex::FromHexError) -> Self {
        WireError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<base64::DecodeError> for WireError {
    fn from(e: base64::DecodeError) -> Self {
        WireError::parse_error(format!("Invalid base64: {}", e))
    }
}

impl From<std::io::Error> for WireError {
    fn from(e: std::io::Error) -> Self {
        WireError::new(ErrorCode::Internal, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = WireError::invalid_transaction("Too many signatures")
            .with_details("limit is 20");

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("invalid_transaction"));
        assert!(json.contains("Too many signatures"));
        assert!(json.contains("limit is 20"));
    }

    #[test]
    fn test_display() {
        let err = WireError::invalid_input("bad").with_details("why");
        assert_eq!(err.to_string(), "[InvalidInput] bad (why)");
    }

    #[test]
    fn test_strkey_codes() {
        let checksum: WireError = StrKeyError::ChecksumMismatch {
            expected: 1,
            computed: 2,
        }
        .into();
        assert_eq!(checksum.code, ErrorCode::ChecksumMismatch);

        let version: WireError = StrKeyError::UnknownVersion(0xff).into();
        assert_eq!(version.code, ErrorCode::UnknownVersion);

        let other: WireError = StrKeyError::InvalidBase32("bad".into()).into();
        assert_eq!(other.code, ErrorCode::InvalidStrKey);
    }

    #[test]
    fn test_xdr_offset_in_details() {
        let err: WireError = XdrError::UnexpectedEof {
            offset: 12,
            needed: 4,
            remaining: 1,
        }
        .into();
        assert_eq!(err.code, ErrorCode::MalformedXdr);
        assert_eq!(err.details.as_deref(), Some("byte offset 12"));
    }

    #[test]
    fn test_keypair_codes_pass_through() {
        let err: WireError = KeyPairError::MissingSecretKey.into();
        assert_eq!(err.code, ErrorCode::MissingSecretKey);

        let nested: WireError = SigningError::KeyPair(KeyPairError::StrKey(
            StrKeyError::TooShort(2),
        ))
        .into();
        assert_eq!(nested.code, ErrorCode::InvalidStrKey);
    }
}
