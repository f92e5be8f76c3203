//! crates/rr_core/src/ids.rs
//! Token ids for subjects, voters and slots, plus the balance fingerprint id.
//! ASCII-only, strict shapes; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const HEX64_LEN: usize = 64;
const TOKEN_MAX_LEN: usize = 64;

/// Token shape: ^[A-Za-z0-9_.:-]{1,64}$ (covers UUIDs and slugs).
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let len = s.len();
    if len == 0 || len > TOKEN_MAX_LEN {
        return false;
    }
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-'))
}

/// Lowercase hex, exactly 64 chars.
#[inline]
pub fn is_lower_hex64(s: &str) -> bool {
    s.len() == HEX64_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

macro_rules! def_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_valid_token(s) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidToken) }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                if is_valid_token(&s) { Ok(Self(s)) } else { Err(CoreError::InvalidToken) }
            }
        }

        impl From<$name> for String {
            fn from(t: $name) -> String { t.0 }
        }
    };
}

def_token!(
    /// Something that can be voted on (a song, a setlist entry, a poll option).
    SubjectId
);
def_token!(
    /// The player casting a vote.
    VoterId
);
def_token!(
    /// A named performance window at a venue (e.g. `headline`).
    SlotId
);

/// "BAL:" + 64-hex (lowercase). Fingerprint of a canonicalized `RulesConfig`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct BalanceId(String);

impl BalanceId {
    pub fn as_str(&self) -> &str { &self.0 }

    /// Build from a raw lowercase 64-hex digest.
    pub fn from_hex(hex64: &str) -> Result<Self, CoreError> {
        if is_lower_hex64(hex64) {
            Ok(Self(format!("BAL:{hex64}")))
        } else {
            Err(CoreError::InvalidHex)
        }
    }

    /// The digest part without the `BAL:` prefix.
    pub fn digest(&self) -> &str { &self.0[4..] }
}

impl fmt::Display for BalanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BalanceId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("BAL:").ok_or(CoreError::InvalidId)?;
        if is_lower_hex64(rest) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidId) }
    }
}

impl TryFrom<String> for BalanceId {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<BalanceId> for String {
    fn from(id: BalanceId) -> String { id.0 }
}
