//! Property tests for the rules layer: clamps, totality, monotonicity, exact
//! settlement, bid monotonicity, vote-order independence.

use std::collections::BTreeSet;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use rr_core::entities::{Polarity, Vote};
use rr_core::ids::VoterId;
use rr_rules::market::{is_ending_soon, minimum_next_bid, settle_sale};
use rr_rules::{
    aggregate_votes, classify_stage, compute_adjusted_quality, next_stage_gap, MarketRules,
    ProgressionRules, QualityRules, VotingRules,
};

fn vote_strategy() -> impl Strategy<Value = Vote> {
    (0u8..6, any::<bool>(), 0u8..8).prop_map(|(s, up, v)| {
        Vote::new(
            format!("s{s}").parse().unwrap(),
            if up { Polarity::Up } else { Polarity::Down },
            format!("v{v}").parse().unwrap(),
        )
    })
}

proptest! {
    #[test]
    fn quality_multiplier_stays_in_range(
        base in 0u32..10_000,
        skills in prop::collection::vec(-50.0f64..250.0, 0..12),
    ) {
        let r = compute_adjusted_quality(base, &skills, &QualityRules::default());
        prop_assert!(r.multiplier >= 0.2 && r.multiplier <= 1.0);
        prop_assert_eq!(r.adjusted_quality, (f64::from(base) * r.multiplier).round() as u32);
    }

    #[test]
    fn stage_classification_is_monotone(a in 0.0f64..5000.0, b in 0.0f64..5000.0) {
        let rules = ProgressionRules::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify_stage(lo, &rules).ordinal <= classify_stage(hi, &rules).ordinal);
    }

    #[test]
    fn stage_contains_its_duration(m in 0u32..10_000) {
        let rules = ProgressionRules::default();
        let s = classify_stage(f64::from(m), &rules);
        prop_assert!(s.min_minutes <= m);
        if let Some(max) = s.max_minutes {
            prop_assert!(m <= max);
        }
        let gap = next_stage_gap(f64::from(m), &rules);
        match gap.next_stage {
            Some(next) => {
                prop_assert_eq!(next.ordinal, s.ordinal + 1);
                prop_assert!(gap.minutes_needed > 0.0);
            }
            None => {
                prop_assert_eq!(gap.minutes_needed, 0.0);
            }
        }
    }

    #[test]
    fn settlement_partitions_price_exactly(price in 0u64..1_000_000_000_000) {
        let s = settle_sale(price, &MarketRules::default());
        prop_assert_eq!(s.fee + s.seller_payout, price);
    }

    #[test]
    fn next_bid_always_exceeds_base(
        current in prop::option::of(0u64..1_000_000_000),
        starting in 0u64..1_000_000_000,
    ) {
        let min = minimum_next_bid(current, starting, &MarketRules::default());
        prop_assert!(min > current.unwrap_or(starting));
    }

    #[test]
    fn ending_soon_only_inside_window(offset_ms in -600_000i64..600_000) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap();
        let end = now + Duration::milliseconds(offset_ms);
        let expected = offset_ms > 0 && offset_ms <= 300_000;
        prop_assert_eq!(is_ending_soon(end, now, &MarketRules::default()), expected);
    }

    #[test]
    fn vote_aggregation_ignores_order(
        shuffled in prop::collection::vec(vote_strategy(), 0..40).prop_shuffle(),
    ) {
        let privileged: BTreeSet<VoterId> =
            ["v0", "v3"].iter().map(|s| s.parse().unwrap()).collect();
        let rules = VotingRules::default();

        let mut sorted = shuffled.clone();
        sorted.sort_by(|a, b| {
            (a.subject_id.as_str(), a.polarity, a.voter_id.as_str())
                .cmp(&(b.subject_id.as_str(), b.polarity, b.voter_id.as_str()))
        });

        prop_assert_eq!(
            aggregate_votes(&shuffled, &privileged, &rules),
            aggregate_votes(&sorted, &privileged, &rules)
        );
    }
}
