//! C-ABI Layer
//!
//! Every `extern "C"` export of the crate lives here. Each takes a
//! null-terminated JSON request and returns a JSON `ApiResponse` that the
//! caller releases with `stellar_free_string`. Failures come back as
//! `{"success": false, "error": {...}}`.
//!
//! The plain Rust functions behind the exports are public too, so the
//! same request types can be driven without a C caller.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{WireError, WireResult};
use crate::keypair::KeyPair;
use crate::signing::SignaturePreImage;
use crate::strkey;
use crate::types::*;
use crate::utils::config::CodecConfig;
use crate::xdr::{ReadXdr, TransactionEnvelope, WriteXdr};

// =============================================================================
// Memory Management
// =============================================================================

/// Free a string returned by any stellar_* function
///
/// # Safety
/// The pointer must have been returned by a stellar_* function
#[unsafe(no_mangle)]
pub extern "C" fn stellar_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        let _ = CString::from_raw(s);
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Copy a C string into an owned Rust string
fn parse_input(input: *const c_char) -> WireResult<String> {
    if input.is_null() {
        return Err(WireError::invalid_input("Null input pointer"));
    }

    let c_str = unsafe { CStr::from_ptr(input) };
    c_str
        .to_str()
        .map(str::to_owned)
        .map_err(|_| WireError::invalid_input("Invalid UTF-8 string"))
}

fn parse_request<T: DeserializeOwned>(input: *const c_char) -> WireResult<T> {
    let json = parse_input(input)?;
    serde_json::from_str(&json).map_err(|e| WireError::parse_error(format!("Invalid JSON: {}", e)))
}

/// Serialize a result into a response JSON string
fn respond<T: Serialize>(result: WireResult<T>) -> *mut c_char {
    let json = match result {
        Ok(data) => ApiResponse::ok(data).to_json(),
        Err(e) => ApiResponse::<()>::err(e).to_json(),
    };
    string_to_ptr(json)
}

/// Convert Rust string to C string pointer
fn string_to_ptr(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn decode_envelope(base64: &str, config: &CodecConfig) -> WireResult<TransactionEnvelope> {
    TransactionEnvelope::from_xdr_base64_with_limits(base64, config.limits()).map_err(|e| {
        crate::log_warn!(
            "ffi",
            "Envelope decode failed",
            offset = e.offset().map_or_else(|| "-".to_string(), |o| o.to_string()),
            reason = e
        );
        WireError::from(e)
    })
}

// =============================================================================
// Operations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: String,
}

pub fn encode_address(request: &EncodeAddressRequest) -> WireResult<AddressResponse> {
    let payload = hex::decode(request.payload_hex.trim())?;
    let address = strkey::encode(request.version, &payload)?;
    Ok(AddressResponse { address })
}

pub fn decode_address(request: &DecodeAddressRequest) -> WireResult<DecodedAddress> {
    let (version, payload) = strkey::decode(request.address.trim())?;
    Ok(DecodedAddress {
        version,
        version_byte: version.byte(),
        payload_hex: hex::encode(payload),
    })
}

pub fn network_id(request: &NetworkSelector) -> WireResult<NetworkIdResponse> {
    let config = CodecConfig::standard();
    let network = request.resolve(config.network())?;
    Ok(NetworkIdResponse::from(&network))
}

pub fn generate_keypair() -> WireResult<KeyPairResponse> {
    let keypair = KeyPair::generate()?;
    let secret_seed = keypair.secret_seed()?;
    Ok(KeyPairResponse {
        account_id: keypair.account_id(),
        secret_seed: secret_seed.as_str().to_string(),
        public_key_hex: hex::encode(keypair.public_key()),
    })
}

pub fn sign_transaction(request: &SignRequest) -> WireResult<SignedEnvelopeResponse> {
    let config = CodecConfig::standard();
    let network = request.network.resolve(config.network())?;
    let keypair = KeyPair::from_secret_seed(&request.secret_seed)?;

    let mut envelope = decode_envelope(&request.envelope, &config)?;
    envelope.sign(&keypair, network.id())?;

    Ok(SignedEnvelopeResponse {
        envelope: envelope.to_xdr_base64()?,
        tx_hash: hex::encode(envelope.hash(network.id())?),
        signature_count: envelope.signatures().len(),
    })
}

pub fn verify_transaction(request: &VerifyRequest) -> WireResult<VerifyResponse> {
    let config = CodecConfig::standard();
    let network = request.network.resolve(config.network())?;
    let keypair = KeyPair::from_account_id(&request.account_id)?;

    let envelope = decode_envelope(&request.envelope, &config)?;
    Ok(VerifyResponse {
        valid: envelope.verify_signature(&keypair, network.id())?,
        tx_hash: hex::encode(envelope.hash(network.id())?),
    })
}

pub fn transaction_hash(request: &EnvelopeRequest) -> WireResult<SignaturePreImage> {
    let config = CodecConfig::standard();
    let network = request.network.resolve(config.network())?;
    let envelope = decode_envelope(&request.envelope, &config)?;
    Ok(envelope.preimage(network.id())?)
}

pub fn summarize_envelope(request: &EnvelopeRequest) -> WireResult<EnvelopeSummary> {
    let config = CodecConfig::standard();
    let network = request.network.resolve(config.network())?;
    let envelope = decode_envelope(&request.envelope, &config)?;
    Ok(EnvelopeSummary::from_envelope(&envelope, network.id())?)
}

// =============================================================================
// Exports
// =============================================================================

/// Encode a raw payload as a StrKey
///
/// # Input
/// ```json
/// { "version": "account_id", "payload_hex": "1a32e3be..." }
/// ```
///
/// # Output
/// ```json
/// { "success": true, "data": { "address": "GANDFY56..." } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn stellar_encode_address(input: *const c_char) -> *mut c_char {
    respond(parse_request(input).and_then(|r| encode_address(&r)))
}

/// Decode any StrKey
///
/// # Input
/// ```json
/// { "address": "GANDFY56..." }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn stellar_decode_address(input: *const c_char) -> *mut c_char {
    respond(parse_request(input).and_then(|r| decode_address(&r)))
}

/// Network id of a named network or passphrase
///
/// # Input
/// ```json
/// { "network": "testnet" }
/// ```
/// or
/// ```json
/// { "passphrase": "Standalone Network ; February 2017" }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn stellar_network_id(input: *const c_char) -> *mut c_char {
    respond(parse_request(input).and_then(|r| network_id(&r)))
}

/// Generate a new random key pair
#[unsafe(no_mangle)]
pub extern "C" fn stellar_generate_keypair() -> *mut c_char {
    respond(generate_keypair())
}

/// Sign a base64 envelope and return it with the signature appended
///
/// # Input
/// ```json
/// { "envelope": "AAAAAgAAAA...", "secret_seed": "SB...", "network": "testnet" }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn stellar_sign_transaction(input: *const c_char) -> *mut c_char {
    respond(parse_request(input).and_then(|r| sign_transaction(&r)))
}

/// Check whether an account signed an envelope
///
/// # Input
/// ```json
/// { "envelope": "AAAAAgAAAA...", "account_id": "GA...", "network": "testnet" }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn stellar_verify_transaction(input: *const c_char) -> *mut c_char {
    respond(parse_request(input).and_then(|r| verify_transaction(&r)))
}

/// Transaction hash and signature base for external signers
#[unsafe(no_mangle)]
pub extern "C" fn stellar_transaction_hash(input: *const c_char) -> *mut c_char {
    respond(parse_request(input).and_then(|r| transaction_hash(&r)))
}

/// Decode an envelope into a JSON summary
#[unsafe(no_mangle)]
pub extern "C" fn stellar_decode_envelope(input: *const c_char) -> *mut c_char {
    respond(parse_request(input).and_then(|r| summarize_envelope(&r)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const ACCOUNT: &str = "GANDFY56NWMYUOFGQDVN7TCYBCTUV4ZWXHCI3FUWKFO5ISLT7X53VTO2";
    const PUBLIC_HEX: &str = "1a32e3be6d998a38a680eadfcc5808a74af336b9c48d9696515dd44973fdfbba";

    fn call(f: extern "C" fn(*const c_char) -> *mut c_char, json: &str) -> serde_json::Value {
        let input = CString::new(json).unwrap();
        let output = f(input.as_ptr());
        assert!(!output.is_null());
        let text = unsafe { CStr::from_ptr(output) }.to_str().unwrap().to_string();
        stellar_free_string(output);
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_address_roundtrip() {
        let encoded = call(
            stellar_encode_address,
            &format!(r#"{{"version":"account_id","payload_hex":"{}"}}"#, PUBLIC_HEX),
        );
        assert_eq!(encoded["success"], true);
        assert_eq!(encoded["data"]["address"], ACCOUNT);

        let decoded = call(stellar_decode_address, &format!(r#"{{"address":"{}"}}"#, ACCOUNT));
        assert_eq!(decoded["data"]["version"], "account_id");
        assert_eq!(decoded["data"]["version_byte"], 48);
        assert_eq!(decoded["data"]["payload_hex"], PUBLIC_HEX);
    }

    #[test]
    fn test_bad_checksum_reports_code() {
        let mut corrupted = ACCOUNT.to_string();
        corrupted.replace_range(55..56, "3");
        let result = decode_address(&DecodeAddressRequest { address: corrupted });
        assert_eq!(result.unwrap_err().code, ErrorCode::ChecksumMismatch);
    }

    #[test]
    fn test_invalid_json() {
        let response = call(stellar_decode_address, "not json");
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "parse_error");
    }

    #[test]
    fn test_null_input() {
        let output = stellar_network_id(std::ptr::null());
        let text = unsafe { CStr::from_ptr(output) }.to_str().unwrap().to_string();
        stellar_free_string(output);
        assert!(text.contains("invalid_input"));
    }

    #[test]
    fn test_network_id() {
        let response = call(stellar_network_id, r#"{"network":"testnet"}"#);
        assert_eq!(
            response["data"]["network_id"],
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn test_generate_keypair() {
        let output = stellar_generate_keypair();
        let text = unsafe { CStr::from_ptr(output) }.to_str().unwrap().to_string();
        stellar_free_string(output);
        let response: serde_json::Value = serde_json::from_str(&text).unwrap();

        let account = response["data"]["account_id"].as_str().unwrap();
        let seed = response["data"]["secret_seed"].as_str().unwrap();
        assert!(strkey::is_valid_account_id(account));
        assert_eq!(KeyPair::from_secret_seed(seed).unwrap().account_id(), account);
    }
}
