//! Structured Logging with Redaction
//!
//! Log lines go to stderr as
//! `[timestamp] LEVEL [module] message | key=value ...`. Field values are
//! redacted according to their key:
//! - seeds, secrets, signatures and hash(x) preimages are always hidden
//! - StrKey addresses keep their first 6 and last 4 characters
//! - hashes and network ids keep their first 10 and last 6 hex digits
//!
//! Partial redaction can be switched off for local debugging; full
//! redaction cannot.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static PARTIAL_REDACTION: AtomicBool = AtomicBool::new(true);

pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

pub fn disable_debug() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

/// Toggle shortening of addresses and hashes
pub fn set_partial_redaction(enabled: bool) {
    PARTIAL_REDACTION.store(enabled, Ordering::SeqCst);
}

fn partial_redaction() -> bool {
    PARTIAL_REDACTION.load(Ordering::SeqCst)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field value is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redaction {
    None,
    Full,
    Address,
    Hash,
}

/// Key fragments and their redaction, checked in order
const KEY_RULES: &[(&str, Redaction)] = &[
    ("secret", Redaction::Full),
    ("seed", Redaction::Full),
    ("private", Redaction::Full),
    ("signature", Redaction::Full),
    ("preimage", Redaction::Full),
    ("account", Redaction::Address),
    ("address", Redaction::Address),
    ("source", Redaction::Address),
    ("destination", Redaction::Address),
    ("signer", Redaction::Address),
    ("issuer", Redaction::Address),
    ("hash", Redaction::Hash),
    ("network_id", Redaction::Hash),
    ("tx_id", Redaction::Hash),
];

impl Redaction {
    pub fn for_key(key: &str) -> Self {
        let key = key.to_ascii_lowercase();
        KEY_RULES
            .iter()
            .find(|(fragment, _)| key.contains(fragment))
            .map_or(Redaction::None, |(_, rule)| *rule)
    }

    pub fn apply(self, value: &str) -> String {
        match self {
            Redaction::Full => redact_value(value),
            Redaction::Address if partial_redaction() => redact_address(value),
            Redaction::Hash if partial_redaction() => redact_hash(value),
            // Seeds slip through as addresses only if logged under a wrong key
            _ if looks_like_secret_seed(value) => redact_value(value),
            _ => value.to_string(),
        }
    }
}

fn looks_like_secret_seed(value: &str) -> bool {
    let value = value.trim();
    value.len() == 56 && value.starts_with('S')
}

pub fn redact_value(value: &str) -> String {
    match value.len() {
        0 => "[EMPTY]".to_string(),
        1..=4 => "[REDACTED]".to_string(),
        len => format!("[REDACTED:{}chars]", len),
    }
}

/// First 6 and last 4 characters; short or secret-looking values are hidden
pub fn redact_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }
    if looks_like_secret_seed(trimmed) || trimmed.len() <= 13 || !trimmed.is_ascii() {
        return redact_value(trimmed);
    }
    format!("{}...{}", &trimmed[..6], &trimmed[trimmed.len() - 4..])
}

/// First 10 and last 6 characters; short values are shown in full
pub fn redact_hash(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }
    if trimmed.len() <= 20 || !trimmed.is_ascii() {
        return trimmed.to_string();
    }
    format!("{}...{}", &trimmed[..10], &trimmed[trimmed.len() - 6..])
}

/// Structured log entry
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, redacted according to its key
    pub fn field(self, key: &'static str, value: impl fmt::Display) -> Self {
        self.field_with(key, value, Redaction::for_key(key))
    }

    pub fn field_with(mut self, key: &'static str, value: impl fmt::Display, redaction: Redaction) -> Self {
        let value = redaction.apply(&value.to_string());
        self.fields.push((key, value));
        self
    }

    pub fn render(&self, timestamp: &str) -> String {
        let mut line = format!("[{}] {} [{}] {}", timestamp, self.level, self.module, self.message);
        if !self.fields.is_empty() {
            line.push_str(" |");
            for (key, value) in &self.fields {
                line.push(' ');
                line.push_str(key);
                line.push('=');
                line.push_str(value);
            }
        }
        line
    }

    pub fn log(self) {
        if self.level == LogLevel::Debug && !is_debug_enabled() {
            return;
        }
        let timestamp = chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string();
        eprintln!("{}", self.render(&timestamp));
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_entry {
    ($level:ident, $module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::$level,
            $module,
            $msg,
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log_entry!(Debug, $($arg)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log_entry!(Info, $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log_entry!(Warn, $($arg)*) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log_entry!(Error, $($arg)*) };
}
