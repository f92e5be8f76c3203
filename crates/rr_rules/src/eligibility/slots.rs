//! crates/rr_rules/src/eligibility/slots.rs
//! Slot gates (fame, prestige), slot multipliers, and the booking lockout window.
//!
//! Eligibility is the conjunction of `fame >= min_fame` and
//! `prestige >= min_prestige`. Both clauses are always evaluated and every
//! failing clause is reported on its own, so a caller can show all unmet
//! requirements at once.

use core::fmt;

use chrono::{DateTime, Duration, Utc};

#[cfg(feature = "serde")]
use serde::Serialize;

use rr_core::config::{SlotRequirement, SlotTable};
use rr_core::ids::SlotId;
use rr_core::rounding::scale_round;
use rr_core::Money;

// ---------------- Types -------------------------------------------------------------------------

/// One failed gate, with the threshold and the observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "requirement", rename_all = "snake_case"))]
pub enum UnmetRequirement {
    Fame { required: u64, actual: u64 },
    Prestige { required: u32, actual: u32 },
}

impl fmt::Display for UnmetRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmetRequirement::Fame { required, actual } => {
                write!(f, "requires {required} fame (band has {actual})")
            }
            UnmetRequirement::Prestige { required, actual } => {
                write!(f, "requires venue prestige {required} (venue has {actual})")
            }
        }
    }
}

/// Outcome of the slot gates for one band at one venue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SlotEligibility {
    pub slot_id: SlotId,
    pub eligible: bool,
    /// Fame clause first, then prestige. Empty iff `eligible`.
    pub unmet: Vec<UnmetRequirement>,
}

impl SlotEligibility {
    /// Human-readable reason per unmet requirement.
    pub fn unmet_reasons(&self) -> Vec<String> {
        self.unmet.iter().map(ToString::to_string).collect()
    }
}

// ---------------- Gates -------------------------------------------------------------------------

/// Evaluate both gates of `slot` and collect every failure.
pub fn evaluate_slot_eligibility(actor_fame: u64, venue_prestige: u32, slot: &SlotRequirement) -> SlotEligibility {
    let mut unmet = Vec::with_capacity(2);
    if actor_fame < slot.min_fame {
        unmet.push(UnmetRequirement::Fame { required: slot.min_fame, actual: actor_fame });
    }
    if venue_prestige < slot.min_prestige {
        unmet.push(UnmetRequirement::Prestige { required: slot.min_prestige, actual: venue_prestige });
    }
    SlotEligibility {
        slot_id: slot.slot_id.clone(),
        eligible: unmet.is_empty(),
        unmet,
    }
}

/// Slots the band may book at this venue, in table order.
pub fn eligible_slots(actor_fame: u64, venue_prestige: u32, slots: &SlotTable) -> Vec<&SlotRequirement> {
    slots
        .iter()
        .filter(|s| evaluate_slot_eligibility(actor_fame, venue_prestige, s).eligible)
        .collect()
}

// ---------------- Multipliers -------------------------------------------------------------------

/// `round(base_payment × payment_multiplier)`.
pub fn slot_payout(base_payment: Money, slot: &SlotRequirement) -> Money {
    scale_round(base_payment, slot.payment_multiplier)
}

/// `round(base_attendance × attendance_multiplier)`, never above venue capacity.
pub fn expected_attendance(base_attendance: u64, capacity: u64, slot: &SlotRequirement) -> u64 {
    scale_round(base_attendance, slot.attendance_multiplier).min(capacity)
}

// ---------------- Lockout -----------------------------------------------------------------------

/// Moment booking for this slot closes: `lockout_minutes` before the gig starts.
pub fn booking_closes_at(gig_start: DateTime<Utc>, slot: &SlotRequirement) -> DateTime<Utc> {
    gig_start - Duration::minutes(i64::from(slot.lockout_minutes))
}

/// Whether booking is already closed at `now`.
pub fn is_booking_locked(gig_start: DateTime<Utc>, now: DateTime<Utc>, slot: &SlotRequirement) -> bool {
    now >= booking_closes_at(gig_start, slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn table() -> SlotTable {
        SlotTable::default()
    }

    fn slot(id: &str) -> SlotRequirement {
        table().get(&id.parse().unwrap()).cloned().expect("default slot")
    }

    #[test]
    fn headline_reports_both_failures() {
        let e = evaluate_slot_eligibility(0, 0, &slot("headline"));
        assert!(!e.eligible);
        assert_eq!(
            e.unmet,
            vec![
                UnmetRequirement::Fame { required: 1000, actual: 0 },
                UnmetRequirement::Prestige { required: 3, actual: 0 },
            ]
        );
        assert_eq!(
            e.unmet_reasons(),
            vec![
                "requires 1000 fame (band has 0)".to_string(),
                "requires venue prestige 3 (venue has 0)".to_string(),
            ]
        );
    }

    #[test]
    fn headline_passes_with_enough_fame_and_prestige() {
        let e = evaluate_slot_eligibility(2000, 5, &slot("headline"));
        assert!(e.eligible);
        assert!(e.unmet.is_empty());
        assert_eq!(e.slot_id.as_str(), "headline");
    }

    #[test]
    fn single_failure_is_reported_alone() {
        let e = evaluate_slot_eligibility(5000, 1, &slot("headline"));
        assert_eq!(e.unmet, vec![UnmetRequirement::Prestige { required: 3, actual: 1 }]);

        // Thresholds are inclusive.
        assert!(evaluate_slot_eligibility(1000, 3, &slot("headline")).eligible);
    }

    #[test]
    fn eligible_slots_in_table_order() {
        let t = table();
        let ids = |f, p| {
            eligible_slots(f, p, &t)
                .into_iter()
                .map(|s| s.slot_id.as_str().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(0, 0), vec!["opening"]);
        assert_eq!(ids(300, 2), vec!["opening", "support"]);
        assert_eq!(ids(5000, 5), vec!["opening", "support", "headline"]);
    }

    #[test]
    fn multipliers_apply() {
        assert_eq!(slot_payout(1000, &slot("support")), 750);
        assert_eq!(slot_payout(1000, &slot("opening")), 500);
        assert_eq!(expected_attendance(400, 1000, &slot("opening")), 240);
        assert_eq!(expected_attendance(2000, 1000, &slot("headline")), 1000);
    }

    #[test]
    fn lockout_window() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).single().unwrap();
        let s = slot("headline");
        assert_eq!(booking_closes_at(start, &s), start - Duration::hours(4));
        assert!(!is_booking_locked(start, start - Duration::hours(5), &s));
        assert!(is_booking_locked(start, start - Duration::hours(4), &s));
        assert!(is_booking_locked(start, start + Duration::minutes(1), &s));
    }
}
