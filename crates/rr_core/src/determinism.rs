//! Determinism utilities: stable total orders for ids.
//!
//! Ranked output (subjects by score) breaks ties through these helpers so
//! it never depends on input order.

use core::cmp::Ordering;

use crate::ids::SubjectId;

/// Provide a **total**, stable order for values that must sort canonically.
pub trait StableOrd {
    fn stable_cmp(&self, other: &Self) -> Ordering;
}

impl StableOrd for SubjectId {
    #[inline]
    fn stable_cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

/// Order by a primary key descending, then by the canonical id order.
#[inline]
pub fn cmp_desc_then_id<K: Ord, T: StableOrd>(ka: K, a: &T, kb: K, b: &T) -> Ordering {
    match kb.cmp(&ka) {
        Ordering::Equal => a.stable_cmp(b),
        o => o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(s: &str) -> SubjectId {
        s.parse().unwrap()
    }

    #[test]
    fn desc_then_id_breaks_ties_by_id() {
        let (a, b) = (sid("a"), sid("b"));
        assert_eq!(cmp_desc_then_id(5, &a, 5, &b), Ordering::Less);
        assert_eq!(cmp_desc_then_id(3, &a, 5, &b), Ordering::Greater);
    }
}
