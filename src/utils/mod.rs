//! Utilities Module
//!
//! Common utilities used across the crate.

pub mod config;
pub mod crypto;
pub mod logging;

pub use config::CodecConfig;
pub use crypto::*;
