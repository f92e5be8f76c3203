//! crates/rr_io/src/lib.rs
//! Local, offline I/O for the rules engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - `loader`: balance configs and vote batches from local JSON files.
//! - `canonical_json`: sorted-key compact encoding used for fingerprints.
//! - `hasher`: SHA-256 over canonical bytes, `BalanceId` construction.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for rr_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem read failures.
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// Path rejected before reading (URL-like, not a file).
    #[error("path error: {0}")]
    Path(String),

    /// Input larger than the read limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// JSON parse or shape errors, with a JSON Pointer when known.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Parsed fine but violates a balance/domain rule.
    #[error("invalid: {0}")]
    Invalid(String),

    /// Hashing unavailable or failed.
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column rather than a pointer.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

impl From<rr_core::CoreError> for IoError {
    fn from(e: rr_core::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

pub mod canonical_json;
#[cfg(feature = "hash")]
pub mod hasher;
pub mod loader;

/// Returns true if `s` looks like a URL (any `<scheme>://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}
