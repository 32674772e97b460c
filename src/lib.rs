//! Stellar Wire Library
//!
//! The byte-exact core of a Stellar client: everything needed to turn a
//! transaction into a signed, submittable payload and to read server XDR
//! back into typed values.
//!
//! # Architecture
//!
//! This crate provides:
//! - **strkey**: Checksummed base32 addresses and seeds (G..., S..., M..., ...)
//! - **xdr**: The network's binary encoding and the transaction schema
//! - **network**: Network passphrases and ids
//! - **keypair**: ed25519 key pairs
//! - **signing**: Signature bases, transaction hashes and envelope signing
//! - **tx**: Transaction and fee-bump builders, amount helpers
//! - **ffi**: C-ABI exports with JSON in and out
//!
//! # FFI Usage
//!
//! All public FFI functions are in the `ffi` module and follow this pattern:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `stellar_free_string`)
//!
//! # Security
//!
//! Secret seeds are held in `zeroize` buffers and never logged. Key
//! comparison is constant time.
//!
//! # Example
//!
//! ```rust,ignore
//! use stellar_wire::{KeyPair, Network, TransactionBuilder};
//! use stellar_wire::xdr::{Asset, Operation, WriteXdr};
//!
//! let keypair = KeyPair::from_secret_seed("SB...")?;
//! let mut envelope = TransactionBuilder::new(keypair.to_xdr_account_id(), sequence)
//!     .add_operation(Operation::payment(destination, Asset::Native, 10_000_000))
//!     .set_timeout(30)
//!     .build_envelope()?;
//! envelope.sign(&keypair, Network::testnet().id())?;
//! println!("{}", envelope.to_xdr_base64()?);
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod ffi;
pub mod strkey;
pub mod xdr;
pub mod network;
pub mod crypto;
pub mod keypair;
pub mod signing;
pub mod tx;
pub mod utils;

mod serde_bytes;

// Re-export key types for convenience
pub use error::{ErrorCode, WireError, WireResult};
pub use keypair::{KeyPair, KeyPairError};
pub use network::{network_id, Network, NetworkId, PUBLIC_NETWORK_ID, TESTNET_NETWORK_ID};
pub use signing::{build_signature_base, add_signature, SigningError};
pub use strkey::{StrKey, StrKeyError, VersionByte};
pub use tx::{build_fee_bump, format_amount, parse_amount, BuildError, TransactionBuilder};
pub use utils::config::CodecConfig;
pub use xdr::{Limits, ReadXdr, WriteXdr, XdrError};

// Re-export FFI functions at crate root
pub use ffi::{
    stellar_decode_address,
    stellar_decode_envelope,
    stellar_encode_address,
    stellar_free_string,
    stellar_generate_keypair,
    stellar_network_id,
    stellar_sign_transaction,
    stellar_transaction_hash,
    stellar_verify_transaction,
};
