//! crates/rr_io/src/hasher.rs
//!
//! SHA-256 over canonical bytes and the balance fingerprint.
//!
//! - Canonical JSON hashing: sorted object keys, array order preserved.
//! - `BAL:` ids derive from the canonical bytes of a *validated* `RulesConfig`,
//!   so reordered keys or whitespace never change the fingerprint.
//! - Hex digests are **lowercase**.

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use rr_core::config::RulesConfig;
use rr_core::ids::BalanceId;

use crate::canonical_json::to_canonical_json_bytes;

/* ----------------------------------- Errors ----------------------------------- */

#[derive(Error, Debug)]
pub enum HashError {
    #[error("JSON serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid hex (expected lowercase 64-hex): {0}")]
    InvalidHex(String),
}

impl From<HashError> for crate::IoError {
    fn from(e: HashError) -> Self {
        crate::IoError::Hash(e.to_string())
    }
}

/* ---------------------------------- Digests ---------------------------------- */

/// SHA-256 of raw bytes as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 of a serializable value's canonical JSON bytes.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, HashError> {
    let v = serde_json::to_value(value)?;
    Ok(sha256_hex(&to_canonical_json_bytes(&v)))
}

/// `BAL:<sha256>` for a balance configuration.
pub fn balance_fingerprint(cfg: &RulesConfig) -> Result<BalanceId, HashError> {
    let hex64 = sha256_canonical(cfg)?;
    BalanceId::from_hex(&hex64).map_err(|_| HashError::InvalidHex(hex64))
}
