//! Loader: read local JSON artifacts (balance config, vote batch), validate
//! them, and return typed values. No network I/O.
//!
//! - Paths that look like URLs are rejected before touching the filesystem.
//! - Reads are bounded by `MAX_BYTES`.
//! - A loaded balance carries its `BAL:` fingerprint when hashing is enabled.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use rr_core::config::RulesConfig;
use rr_core::entities::VoteBatch;
use rr_core::ids::BalanceId;

use crate::{looks_like_url_strict, IoError, IoResult};

/// Upper bound on any single input file.
pub const MAX_BYTES: u64 = 4 * 1024 * 1024;

// ----------------------------- Public types -----------------------------

/// A validated balance configuration and its fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRules {
    pub config: RulesConfig,
    /// `None` when the crate is built without the `hash` feature.
    pub balance_id: Option<BalanceId>,
}

// ----------------------------- Entry points -----------------------------

/// Load a balance configuration from `path`. Missing sections take the
/// reference defaults; unknown keys are rejected.
pub fn load_rules_from_path(path: &Path) -> IoResult<LoadedRules> {
    let bytes = read_bytes_with_limit(path)?;
    let loaded = parse_rules_bytes(&bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "balance config rejected");
        e
    })?;
    debug!(
        path = %path.display(),
        balance_id = loaded.balance_id.as_ref().map(BalanceId::as_str).unwrap_or("-"),
        "balance config loaded"
    );
    Ok(loaded)
}

/// Parse and validate balance bytes already in memory.
pub fn parse_rules_bytes(bytes: &[u8]) -> IoResult<LoadedRules> {
    let config: RulesConfig = parse_typed(bytes)?;
    config.validate()?;
    let balance_id = fingerprint(&config).ok();
    Ok(LoadedRules { config, balance_id })
}

/// Load a vote batch `{ "votes": [...], "privileged_voters": [...] }`.
pub fn load_votes_from_path(path: &Path) -> IoResult<VoteBatch> {
    let bytes = read_bytes_with_limit(path)?;
    let batch: VoteBatch = parse_typed(&bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "vote batch rejected");
        e
    })?;
    debug!(
        path = %path.display(),
        votes = batch.votes.len(),
        privileged = batch.privileged_voters.len(),
        "vote batch loaded"
    );
    Ok(batch)
}

/// `BAL:` fingerprint of a config; errors when hashing is compiled out.
pub fn fingerprint(cfg: &RulesConfig) -> IoResult<BalanceId> {
    #[cfg(feature = "hash")]
    {
        Ok(crate::hasher::balance_fingerprint(cfg)?)
    }
    #[cfg(not(feature = "hash"))]
    {
        let _ = cfg;
        Err(IoError::Hash("hash feature disabled".into()))
    }
}

// ----------------------------- Helpers -----------------------------

fn read_bytes_with_limit(path: &Path) -> Result<Vec<u8>, IoError> {
    let shown = path.to_string_lossy();
    if looks_like_url_strict(&shown) {
        return Err(IoError::Path(format!("URLs are not accepted: {shown}")));
    }
    let meta = std::fs::metadata(path)?;
    if !meta.is_file() {
        return Err(IoError::Path(format!("not a file: {shown}")));
    }
    if meta.len() > MAX_BYTES {
        return Err(IoError::Limit(format!("{shown} is {} bytes (max {MAX_BYTES})", meta.len())));
    }

    let mut buf = Vec::with_capacity(meta.len() as usize);
    // Guard against files that grow between stat and read.
    File::open(path)?.take(MAX_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_BYTES {
        return Err(IoError::Limit(format!("{shown} exceeds {MAX_BYTES} bytes")));
    }
    Ok(buf)
}

fn parse_typed<T: DeserializeOwned>(bytes: &[u8]) -> IoResult<T> {
    let v: Value = serde_json::from_slice(bytes)?;
    if !v.is_object() {
        return Err(IoError::Json { pointer: "/".into(), msg: "expected a JSON object".into() });
    }
    serde_json::from_value(v).map_err(|e| IoError::Json { pointer: "/".into(), msg: e.to_string() })
}
