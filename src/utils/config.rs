//! Codec Configuration
//!
//! Presets for decoding limits, the default network and log redaction:
//! - `standard()` for trusted callers
//! - `strict()` for envelopes arriving from untrusted peers
//! - `from_env()` for the command line binary

use crate::error::{WireError, WireResult};
use crate::network::Network;
use crate::utils::logging;
use crate::xdr::{Limits, DEFAULT_DEPTH_LIMIT, DEFAULT_LEN_LIMIT};

pub const ENV_NETWORK_PASSPHRASE: &str = "STELLAR_NETWORK_PASSPHRASE";
pub const ENV_MAX_DEPTH: &str = "STELLAR_XDR_MAX_DEPTH";
pub const ENV_MAX_LEN: &str = "STELLAR_XDR_MAX_LEN";
pub const ENV_DEBUG: &str = "STELLAR_WIRE_DEBUG";

/// Configuration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    Standard,
    Strict,
    /// Any preset after manual or environment overrides
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    pub level: ConfigLevel,
    /// Maximum XDR nesting depth
    pub max_depth: u32,
    /// Maximum XDR input length in bytes
    pub max_len: usize,
    /// Passphrase used when a command names no network
    pub network_passphrase: String,
    /// Shorten addresses and hashes in logs; secrets are always hidden
    pub redact_logs: bool,
    pub debug: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl CodecConfig {
    pub fn standard() -> Self {
        Self {
            level: ConfigLevel::Standard,
            max_depth: DEFAULT_DEPTH_LIMIT,
            max_len: DEFAULT_LEN_LIMIT,
            network_passphrase: crate::network::TESTNET_PASSPHRASE.to_string(),
            redact_logs: true,
            debug: false,
        }
    }

    pub fn strict() -> Self {
        Self {
            level: ConfigLevel::Strict,
            max_depth: 64,
            max_len: 256 * 1024,
            ..Self::standard()
        }
    }

    /// Standard preset with overrides from the process environment
    pub fn from_env() -> WireResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Standard preset with overrides from `lookup`
    pub fn from_lookup<F>(lookup: F) -> WireResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::standard();
        let mut overridden = false;

        if let Some(passphrase) = lookup(ENV_NETWORK_PASSPHRASE) {
            config.network_passphrase = passphrase;
            overridden = true;
        }
        if let Some(depth) = lookup(ENV_MAX_DEPTH) {
            config.max_depth = parse_env(ENV_MAX_DEPTH, &depth)?;
            overridden = true;
        }
        if let Some(len) = lookup(ENV_MAX_LEN) {
            config.max_len = parse_env(ENV_MAX_LEN, &len)?;
            overridden = true;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            config.debug = parse_flag(ENV_DEBUG, &debug)?;
        }

        if overridden {
            config.level = ConfigLevel::Custom;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WireResult<()> {
        if self.max_depth == 0 {
            return Err(WireError::invalid_input("XDR depth limit must be non-zero"));
        }
        if self.max_len == 0 {
            return Err(WireError::invalid_input("XDR length limit must be non-zero"));
        }
        if self.network_passphrase.trim().is_empty() {
            return Err(WireError::invalid_input("Network passphrase must not be empty"));
        }
        Ok(())
    }

    /// Decoding limits for this configuration
    pub fn limits(&self) -> Limits {
        Limits::new(self.max_depth, self.max_len)
    }

    /// Default network; short names such as `testnet` are resolved
    pub fn network(&self) -> Network {
        Network::from_name(&self.network_passphrase)
            .unwrap_or_else(|| Network::custom(self.network_passphrase.clone()))
    }

    /// Apply the debug switch to the global logger
    pub fn apply_logging(&self) {
        if self.debug {
            logging::enable_debug();
        }
        logging::set_partial_redaction(self.redact_logs);
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> WireResult<T> {
    value.trim().parse().map_err(|_| {
        WireError::invalid_input(format!("Invalid value for {}", key)).with_details(value.to_string())
    })
}

fn parse_flag(key: &str, value: &str) -> WireResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(WireError::invalid_input(format!("Invalid value for {}", key))
            .with_details(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_presets() {
        let standard = CodecConfig::standard();
        assert_eq!(standard.max_depth, 500);
        assert_eq!(standard.max_len, 10 * 1024 * 1024);
        assert!(standard.redact_logs);
        assert_eq!(standard.network(), Network::testnet());
        assert_eq!(standard.limits(), Limits::default());

        let strict = CodecConfig::strict();
        assert_eq!(strict.level, ConfigLevel::Strict);
        assert_eq!(strict.limits(), Limits::new(64, 256 * 1024));
        assert!(strict.validate().is_ok());
    }

    #[test]
    fn test_empty_environment_is_standard() {
        let config = CodecConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CodecConfig::standard());
    }

    #[test]
    fn test_environment_overrides() {
        let config = CodecConfig::from_lookup(lookup(&[
            (ENV_NETWORK_PASSPHRASE, "public"),
            (ENV_MAX_DEPTH, "32"),
            (ENV_MAX_LEN, "4096"),
            (ENV_DEBUG, "true"),
        ]))
        .unwrap();

        assert_eq!(config.level, ConfigLevel::Custom);
        assert_eq!(config.limits(), Limits::new(32, 4096));
        assert_eq!(config.network(), Network::public());
        assert!(config.debug);
    }

    #[test]
    fn test_custom_passphrase() {
        let config =
            CodecConfig::from_lookup(lookup(&[(ENV_NETWORK_PASSPHRASE, "My Network")])).unwrap();
        assert_eq!(config.network().passphrase(), "My Network");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = CodecConfig::from_lookup(lookup(&[(ENV_MAX_DEPTH, "deep")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = CodecConfig::from_lookup(lookup(&[(ENV_DEBUG, "maybe")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        assert!(CodecConfig::from_lookup(lookup(&[(ENV_MAX_LEN, "0")])).is_err());
        assert!(CodecConfig::from_lookup(lookup(&[(ENV_NETWORK_PASSPHRASE, "  ")])).is_err());
    }
}
