//! Network Identifier
//!
//! A network is identified by the SHA-256 hash of its passphrase. The id is
//! prefixed to every signature base, so a transaction signed for one network
//! can never be replayed on another.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::crypto::sha256;

pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";
pub const STANDALONE_PASSPHRASE: &str = "Standalone Network ; February 2017";

lazy_static::lazy_static! {
    /// Id of the public network
    pub static ref PUBLIC_NETWORK_ID: NetworkId = NetworkId::from_passphrase(PUBLIC_PASSPHRASE);
    /// Id of the test network
    pub static ref TESTNET_NETWORK_ID: NetworkId = NetworkId::from_passphrase(TESTNET_PASSPHRASE);
}

/// SHA-256 of a network passphrase
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkId(#[serde(with = "crate::serde_bytes::hex_array")] [u8; 32]);

impl NetworkId {
    pub fn from_passphrase(passphrase: &str) -> Self {
        NetworkId(sha256(passphrase.as_bytes()))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        NetworkId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkId({})", self.to_hex())
    }
}

impl AsRef<[u8]> for NetworkId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A network passphrase and its derived id
///
/// Deserialization reads only the passphrase; the id is always recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NetworkPassphrase")]
pub struct Network {
    passphrase: String,
    id: NetworkId,
}

#[derive(Deserialize)]
struct NetworkPassphrase {
    passphrase: String,
}

impl From<NetworkPassphrase> for Network {
    fn from(value: NetworkPassphrase) -> Self {
        Self::custom(value.passphrase)
    }
}

impl Network {
    /// Any passphrase, for private networks
    pub fn custom(passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        let id = NetworkId::from_passphrase(&passphrase);
        Self { passphrase, id }
    }

    pub fn public() -> Self {
        Self {
            passphrase: PUBLIC_PASSPHRASE.to_string(),
            id: *PUBLIC_NETWORK_ID,
        }
    }

    pub fn testnet() -> Self {
        Self {
            passphrase: TESTNET_PASSPHRASE.to_string(),
            id: *TESTNET_NETWORK_ID,
        }
    }

    pub fn futurenet() -> Self {
        Self::custom(FUTURENET_PASSPHRASE)
    }

    pub fn standalone() -> Self {
        Self::custom(STANDALONE_PASSPHRASE)
    }

    /// Well-known network by short name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "public" | "pubnet" | "mainnet" => Some(Self::public()),
            "testnet" | "test" => Some(Self::testnet()),
            "futurenet" => Some(Self::futurenet()),
            "standalone" | "local" => Some(Self::standalone()),
            _ => None,
        }
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    pub fn id(&self) -> &NetworkId {
        &self.id
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::testnet()
    }
}

/// Short names resolve to well-known networks; anything else is a passphrase
impl FromStr for Network {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s).unwrap_or_else(|| Self::custom(s)))
    }
}

/// Id of an arbitrary passphrase
pub fn network_id(passphrase: &str) -> NetworkId {
    NetworkId::from_passphrase(passphrase)
}
