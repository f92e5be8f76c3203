//! crates/rr_core/src/entities.rs
//! Vote records as supplied by the caller's persistence layer.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{SubjectId, VoterId};

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Polarity {
    Up,
    Down,
}

/// One ballot on one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vote {
    pub subject_id: SubjectId,
    pub polarity: Polarity,
    pub voter_id: VoterId,
}

impl Vote {
    pub fn new(subject_id: SubjectId, polarity: Polarity, voter_id: VoterId) -> Self {
        Self { subject_id, polarity, voter_id }
    }
}

/// A batch of votes plus the set of voters whose ballots carry extra weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoteBatch {
    pub votes: Vec<Vote>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub privileged_voters: BTreeSet<VoterId>,
}
