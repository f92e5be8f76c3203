//! rr_core: core value types, balance configuration, and integer rounding.
//!
//! This crate is **I/O-free**. It defines the stable types shared by the rules
//! engine (`rr_rules`), the loaders (`rr_io`) and the CLI (`rr_cli`).
//!
//! - Token ids: `SubjectId`, `VoterId`, `SlotId`
//! - Balance fingerprint: `BalanceId` (`BAL:` + 64-hex)
//! - Entities: `Vote`, `Polarity`, `VoteBatch`
//! - Balance constants: `RulesConfig` and its per-component sections
//! - Integer-first money/percent rounding helpers
//! - Deterministic ordering helpers
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod config;
pub mod determinism;
pub mod entities;
pub mod ids;
pub mod rounding;

/// Whole currency units (auction prices, fees, payouts).
pub type Money = u64;

pub mod errors {
    use core::fmt;

    /// Minimal error set for token parsing and configuration validation.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidToken,
        InvalidId,
        InvalidHex,
        /// A balance constant is outside its domain; names the offending key.
        DomainOutOfRange(&'static str),
        /// A threshold table is empty, unordered, or does not start at zero.
        InvalidTable(&'static str),
        DuplicateSlot,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::InvalidId => write!(f, "invalid id"),
                CoreError::InvalidHex => write!(f, "invalid hex"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::InvalidTable(k) => write!(f, "invalid threshold table: {k}"),
                CoreError::DuplicateSlot => write!(f, "duplicate slot id"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub use config::RulesConfig;
pub use errors::CoreError;
