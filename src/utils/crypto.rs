//! Checksum and Hash Utilities
//!
//! Small, pure helpers shared by the StrKey codec, the network identifier
//! and the signing layer.

use sha2::{Digest, Sha256};

/// CRC16-XModem checksum (poly 0x1021, init 0, no reflection)
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// SHA-256 digest as a fixed array
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Last four bytes of a key or hash, as used for signature hints
pub fn last_four(bytes: &[u8; 32]) -> [u8; 4] {
    let mut hint = [0u8; 4];
    hint.copy_from_slice(&bytes[28..]);
    hint
}
