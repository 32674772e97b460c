//! StrKey Codec
//!
//! Stellar's checksummed text encoding for keys and addresses:
//! `base32(version_byte || payload || crc16_xmodem_le)`, RFC 4648 alphabet,
//! uppercase, no padding.
//!
//! | Kind           | Version byte | Prefix | Payload                         |
//! |----------------|--------------|--------|---------------------------------|
//! | Account ID     | 6 << 3       | G      | ed25519 public key (32)         |
//! | Secret seed    | 18 << 3      | S      | ed25519 seed (32)               |
//! | Pre-auth tx    | 19 << 3      | T      | transaction hash (32)           |
//! | SHA-256 hash   | 23 << 3      | X      | hash(x) signer (32)             |
//! | Muxed account  | 12 << 3      | M      | ed25519 key (32) + id (8, BE)   |
//! | Signed payload | 15 << 3      | P      | ed25519 key + var-opaque<64>    |

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};

use crate::utils::crypto::crc16_xmodem;

/// Maximum payload carried by a signed-payload signer
pub const MAX_SIGNED_PAYLOAD_LEN: usize = 64;

/// Recognized StrKey version bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionByte {
    AccountId,
    SecretSeed,
    PreAuthTx,
    Sha256Hash,
    MuxedAccount,
    SignedPayload,
}

impl VersionByte {
    pub const ALL: [VersionByte; 6] = [
        VersionByte::AccountId,
        VersionByte::SecretSeed,
        VersionByte::PreAuthTx,
        VersionByte::Sha256Hash,
        VersionByte::MuxedAccount,
        VersionByte::SignedPayload,
    ];

    /// Raw version byte value
    pub const fn byte(self) -> u8 {
        match self {
            VersionByte::AccountId => 6 << 3,
            VersionByte::SecretSeed => 18 << 3,
            VersionByte::PreAuthTx => 19 << 3,
            VersionByte::Sha256Hash => 23 << 3,
            VersionByte::MuxedAccount => 12 << 3,
            VersionByte::SignedPayload => 15 << 3,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.byte() == byte)
    }

    /// First character of every string of this kind
    pub fn prefix(self) -> char {
        match self {
            VersionByte::AccountId => 'G',
            VersionByte::SecretSeed => 'S',
            VersionByte::PreAuthTx => 'T',
            VersionByte::Sha256Hash => 'X',
            VersionByte::MuxedAccount => 'M',
            VersionByte::SignedPayload => 'P',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VersionByte::AccountId => "account id",
            VersionByte::SecretSeed => "secret seed",
            VersionByte::PreAuthTx => "pre-auth tx",
            VersionByte::Sha256Hash => "sha256 hash",
            VersionByte::MuxedAccount => "muxed account",
            VersionByte::SignedPayload => "signed payload",
        }
    }

    /// Whether a decoded payload length is acceptable for this kind
    fn accepts_payload_len(self, len: usize) -> bool {
        match self {
            VersionByte::MuxedAccount => len == 40,
            // ed25519 + length prefix + 1..=64 bytes padded to 4
            VersionByte::SignedPayload => {
                (32 + 4 + 4..=32 + 4 + MAX_SIGNED_PAYLOAD_LEN).contains(&len) && len % 4 == 0
            }
            _ => len == 32,
        }
    }
}

impl fmt::Display for VersionByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// StrKey decoding and encoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrKeyError {
    #[error("Invalid base32 encoding: {0}")]
    InvalidBase32(String),

    #[error("StrKey too short: {0} decoded bytes")]
    TooShort(usize),

    #[error("Unknown version byte 0x{0:02x}")]
    UnknownVersion(u8),

    #[error("Invalid payload length {len} for {kind}")]
    InvalidLength { kind: VersionByte, len: usize },

    #[error("Checksum mismatch: expected {expected:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { expected: u16, computed: u16 },

    #[error("Expected {expected} StrKey, got {actual}")]
    UnexpectedVersion {
        expected: VersionByte,
        actual: VersionByte,
    },

    #[error("Invalid signed payload: {0}")]
    InvalidSignedPayload(String),
}

pub type StrKeyResult<T> = Result<T, StrKeyError>;

/// Encode `payload` under `version`, validating the payload length
pub fn encode(version: VersionByte, payload: &[u8]) -> StrKeyResult<String> {
    if !version.accepts_payload_len(payload.len()) {
        return Err(StrKeyError::InvalidLength {
            kind: version,
            len: payload.len(),
        });
    }
    if version == VersionByte::SignedPayload {
        // Re-parse so malformed inner layouts are never emitted
        SignedPayload::from_strkey_payload(payload)?;
    }
    Ok(encode_unchecked(version, payload))
}

fn encode_unchecked(version: VersionByte, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 3);
    data.push(version.byte());
    data.extend_from_slice(payload);

    let checksum = crc16_xmodem(&data);
    data.extend_from_slice(&checksum.to_le_bytes());

    BASE32_NOPAD.encode(&data)
}

/// Decode any recognized StrKey into its version and payload
pub fn decode(s: &str) -> StrKeyResult<(VersionByte, Vec<u8>)> {
    let decoded = BASE32_NOPAD
        .decode(s.as_bytes())
        .map_err(|e| StrKeyError::InvalidBase32(e.to_string()))?;

    if decoded.len() < 3 {
        return Err(StrKeyError::TooShort(decoded.len()));
    }

    let version =
        VersionByte::from_byte(decoded[0]).ok_or(StrKeyError::UnknownVersion(decoded[0]))?;

    let checksum_pos = decoded.len() - 2;
    let payload = &decoded[1..checksum_pos];
    if !version.accepts_payload_len(payload.len()) {
        return Err(StrKeyError::InvalidLength {
            kind: version,
            len: payload.len(),
        });
    }

    let expected = u16::from_le_bytes([decoded[checksum_pos], decoded[checksum_pos + 1]]);
    let computed = crc16_xmodem(&decoded[..checksum_pos]);
    if expected != computed {
        return Err(StrKeyError::ChecksumMismatch { expected, computed });
    }

    if version == VersionByte::SignedPayload {
        SignedPayload::from_strkey_payload(payload)?;
    }

    Ok((version, payload.to_vec()))
}

/// Decode a StrKey that must be of the `expected` kind
pub fn decode_expecting(expected: VersionByte, s: &str) -> StrKeyResult<Vec<u8>> {
    let (actual, payload) = decode(s)?;
    if actual != expected {
        return Err(StrKeyError::UnexpectedVersion { expected, actual });
    }
    Ok(payload)
}

fn decode_32(expected: VersionByte, s: &str) -> StrKeyResult<[u8; 32]> {
    let payload = decode_expecting(expected, s)?;
    payload
        .as_slice()
        .try_into()
        .map_err(|_| StrKeyError::InvalidLength {
            kind: expected,
            len: payload.len(),
        })
}

// MARK: - Typed helpers

/// Encode an account ID (G...)
pub fn encode_account_id(key: &[u8; 32]) -> String {
    encode_unchecked(VersionByte::AccountId, key)
}

/// Decode an account ID (G...)
pub fn decode_account_id(s: &str) -> StrKeyResult<[u8; 32]> {
    decode_32(VersionByte::AccountId, s)
}

/// Encode a secret seed (S...)
pub fn encode_secret_seed(seed: &[u8; 32]) -> String {
    encode_unchecked(VersionByte::SecretSeed, seed)
}

/// Decode a secret seed (S...)
pub fn decode_secret_seed(s: &str) -> StrKeyResult<[u8; 32]> {
    decode_32(VersionByte::SecretSeed, s)
}

/// Encode a pre-auth transaction hash (T...)
pub fn encode_pre_auth_tx(hash: &[u8; 32]) -> String {
    encode_unchecked(VersionByte::PreAuthTx, hash)
}

/// Decode a pre-auth transaction hash (T...)
pub fn decode_pre_auth_tx(s: &str) -> StrKeyResult<[u8; 32]> {
    decode_32(VersionByte::PreAuthTx, s)
}

/// Encode a hash(x) signer (X...)
pub fn encode_sha256_hash(hash: &[u8; 32]) -> String {
    encode_unchecked(VersionByte::Sha256Hash, hash)
}

/// Decode a hash(x) signer (X...)
pub fn decode_sha256_hash(s: &str) -> StrKeyResult<[u8; 32]> {
    decode_32(VersionByte::Sha256Hash, s)
}

/// Encode a muxed account (M...): ed25519 key followed by the big-endian id
pub fn encode_muxed_account(key: &[u8; 32], id: u64) -> String {
    let mut data = [0u8; 40];
    data[..32].copy_from_slice(key);
    data[32..].copy_from_slice(&id.to_be_bytes());
    encode_unchecked(VersionByte::MuxedAccount, &data)
}

/// Decode a muxed account (M...)
pub fn decode_muxed_account(s: &str) -> StrKeyResult<([u8; 32], u64)> {
    let data = decode_expecting(VersionByte::MuxedAccount, s)?;
    let mut key = [0u8; 32];
    key.copy_from_slice(&data[..32]);
    let mut id = [0u8; 8];
    id.copy_from_slice(&data[32..40]);
    Ok((key, u64::from_be_bytes(id)))
}

/// Encode a signed-payload signer (P...)
pub fn encode_signed_payload(signed: &SignedPayload) -> StrKeyResult<String> {
    let payload = signed.to_strkey_payload()?;
    Ok(encode_unchecked(VersionByte::SignedPayload, &payload))
}

/// Decode a signed-payload signer (P...)
pub fn decode_signed_payload(s: &str) -> StrKeyResult<SignedPayload> {
    let data = decode_expecting(VersionByte::SignedPayload, s)?;
    SignedPayload::from_strkey_payload(&data)
}

pub fn is_valid_account_id(s: &str) -> bool {
    decode_account_id(s).is_ok()
}

pub fn is_valid_secret_seed(s: &str) -> bool {
    decode_secret_seed(s).is_ok()
}

// MARK: - Signed payload

/// An ed25519 key paired with a payload it must sign (CAP-40 signer)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedPayload {
    #[serde(with = "crate::serde_bytes::hex_array")]
    pub ed25519: [u8; 32],
    #[serde(with = "hex")]
    pub payload: Vec<u8>,
}

impl SignedPayload {
    pub fn new(ed25519: [u8; 32], payload: Vec<u8>) -> StrKeyResult<Self> {
        let signed = Self { ed25519, payload };
        signed.check_payload()?;
        Ok(signed)
    }

    fn check_payload(&self) -> StrKeyResult<()> {
        if self.payload.is_empty() || self.payload.len() > MAX_SIGNED_PAYLOAD_LEN {
            return Err(StrKeyError::InvalidSignedPayload(format!(
                "payload must be 1..={} bytes, got {}",
                MAX_SIGNED_PAYLOAD_LEN,
                self.payload.len()
            )));
        }
        Ok(())
    }

    /// ed25519 || u32 length (BE) || payload || zero padding
    fn to_strkey_payload(&self) -> StrKeyResult<Vec<u8>> {
        self.check_payload()?;
        let padded = (self.payload.len() + 3) / 4 * 4;
        let mut data = Vec::with_capacity(32 + 4 + padded);
        data.extend_from_slice(&self.ed25519);
        data.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        data.extend_from_slice(&self.payload);
        data.resize(32 + 4 + padded, 0);
        Ok(data)
    }

    fn from_strkey_payload(data: &[u8]) -> StrKeyResult<Self> {
        if data.len() < 32 + 4 {
            return Err(StrKeyError::InvalidSignedPayload(format!(
                "{} bytes is too short",
                data.len()
            )));
        }
        let mut ed25519 = [0u8; 32];
        ed25519.copy_from_slice(&data[..32]);

        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&data[32..36]);
        let len = u32::from_be_bytes(len_bytes) as usize;
        if len == 0 || len > MAX_SIGNED_PAYLOAD_LEN {
            return Err(StrKeyError::InvalidSignedPayload(format!(
                "declared payload length {} out of range",
                len
            )));
        }

        let padded = (len + 3) / 4 * 4;
        if data.len() != 36 + padded {
            return Err(StrKeyError::InvalidSignedPayload(format!(
                "declared length {} does not match {} remaining bytes",
                len,
                data.len() - 36
            )));
        }
        if data[36 + len..].iter().any(|b| *b != 0) {
            return Err(StrKeyError::InvalidSignedPayload(
                "non-zero padding".to_string(),
            ));
        }

        Ok(Self {
            ed25519,
            payload: data[36..36 + len].to_vec(),
        })
    }
}

// MARK: - Parsed value

/// A decoded StrKey of any recognized kind
#[derive(Clone, PartialEq, Eq)]
pub enum StrKey {
    AccountId([u8; 32]),
    SecretSeed([u8; 32]),
    PreAuthTx([u8; 32]),
    Sha256Hash([u8; 32]),
    MuxedAccount { ed25519: [u8; 32], id: u64 },
    SignedPayload(SignedPayload),
}

impl StrKey {
    pub fn version(&self) -> VersionByte {
        match self {
            StrKey::AccountId(_) => VersionByte::AccountId,
            StrKey::SecretSeed(_) => VersionByte::SecretSeed,
            StrKey::PreAuthTx(_) => VersionByte::PreAuthTx,
            StrKey::Sha256Hash(_) => VersionByte::Sha256Hash,
            StrKey::MuxedAccount { .. } => VersionByte::MuxedAccount,
            StrKey::SignedPayload(_) => VersionByte::SignedPayload,
        }
    }
}

impl FromStr for StrKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (version, payload) = decode(s)?;
        let key32 = || {
            let mut key = [0u8; 32];
            key.copy_from_slice(&payload[..32]);
            key
        };
        Ok(match version {
            VersionByte::AccountId => StrKey::AccountId(key32()),
            VersionByte::SecretSeed => StrKey::SecretSeed(key32()),
            VersionByte::PreAuthTx => StrKey::PreAuthTx(key32()),
            VersionByte::Sha256Hash => StrKey::Sha256Hash(key32()),
            VersionByte::MuxedAccount => {
                let mut id = [0u8; 8];
                id.copy_from_slice(&payload[32..40]);
                StrKey::MuxedAccount {
                    ed25519: key32(),
                    id: u64::from_be_bytes(id),
                }
            }
            VersionByte::SignedPayload => {
                StrKey::SignedPayload(SignedPayload::from_strkey_payload(&payload)?)
            }
        })
    }
}

impl fmt::Display for StrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = match self {
            StrKey::AccountId(key) => encode_account_id(key),
            StrKey::SecretSeed(seed) => encode_secret_seed(seed),
            StrKey::PreAuthTx(hash) => encode_pre_auth_tx(hash),
            StrKey::Sha256Hash(hash) => encode_sha256_hash(hash),
            StrKey::MuxedAccount { ed25519, id } => encode_muxed_account(ed25519, *id),
            StrKey::SignedPayload(signed) => {
                encode_signed_payload(signed).map_err(|_| fmt::Error)?
            }
        };
        f.write_str(&encoded)
    }
}

impl fmt::Debug for StrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrKey::SecretSeed(_) => f.write_str("StrKey::SecretSeed([REDACTED])"),
            other => write!(f, "StrKey::{:?}({})", other.version(), other),
        }
    }
}
