//! Weighted up/down voting (deterministic, integers-only).
//!
//! Inputs:
//! - `votes`: one record per ballot `{ subject_id, polarity, voter_id }`
//! - `privileged`: voters whose ballots weigh `rules.privileged_weight`
//!
//! Output:
//! - `BTreeMap<SubjectId, VoteTally>`, **sparse**: subjects without votes are
//!   absent. Use `tally_for` for a default-filled lookup.
//!
//! Notes:
//! - Pure fold of commutative additions: any permutation of `votes` yields the
//!   same map.
//! - Every record counts; one-vote-per-voter is enforced upstream.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::Serialize;

use rr_core::config::VotingRules;
use rr_core::determinism::cmp_desc_then_id;
use rr_core::entities::{Polarity, Vote};
use rr_core::ids::{SubjectId, VoterId};

/// Per-subject totals. `upvotes`/`downvotes` are weighted; the privileged
/// counters are raw ballot counts kept for audit display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VoteTally {
    pub upvotes: u64,
    pub downvotes: u64,
    pub weighted_score: i64,
    pub privileged_upvotes: u64,
    pub privileged_downvotes: u64,
}

impl VoteTally {
    fn add(&mut self, polarity: Polarity, weight: u64, privileged: bool) {
        match polarity {
            Polarity::Up => {
                self.upvotes += weight;
                self.privileged_upvotes += u64::from(privileged);
            }
            Polarity::Down => {
                self.downvotes += weight;
                self.privileged_downvotes += u64::from(privileged);
            }
        }
        self.weighted_score = self.upvotes as i64 - self.downvotes as i64;
    }
}

/// Weight of one ballot from `voter`.
#[inline]
pub fn vote_weight(voter: &VoterId, privileged: &BTreeSet<VoterId>, rules: &VotingRules) -> u64 {
    if privileged.contains(voter) {
        u64::from(rules.privileged_weight)
    } else {
        1
    }
}

/// Fold votes into per-subject tallies.
pub fn aggregate_votes(
    votes: &[Vote],
    privileged: &BTreeSet<VoterId>,
    rules: &VotingRules,
) -> BTreeMap<SubjectId, VoteTally> {
    let mut out: BTreeMap<SubjectId, VoteTally> = BTreeMap::new();
    for v in votes {
        let is_privileged = privileged.contains(&v.voter_id);
        let weight = vote_weight(&v.voter_id, privileged, rules);
        out.entry(v.subject_id.clone())
            .or_default()
            .add(v.polarity, weight, is_privileged);
    }
    out
}

/// Dense lookup: an absent subject reads as an all-zero tally.
pub fn tally_for(tallies: &BTreeMap<SubjectId, VoteTally>, subject: &SubjectId) -> VoteTally {
    tallies.get(subject).copied().unwrap_or_default()
}

/// Subjects ordered by weighted score desc, then upvotes desc, then id asc.
pub fn rank_subjects(tallies: &BTreeMap<SubjectId, VoteTally>) -> Vec<(SubjectId, VoteTally)> {
    let mut ranked: Vec<(SubjectId, VoteTally)> =
        tallies.iter().map(|(id, t)| (id.clone(), *t)).collect();
    ranked.sort_by(|(ia, ta), (ib, tb)| {
        cmp_desc_then_id((ta.weighted_score, ta.upvotes), ia, (tb.weighted_score, tb.upvotes), ib)
    });
    ranked
}
