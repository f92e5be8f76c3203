//! Rehearsal progression: accumulated minutes → named stage + performance modifier.
//!
//! The stage table partitions `[0, ∞)`: a duration belongs to the last stage
//! whose `min_minutes` it reaches. Negative and NaN durations are clamped to 0,
//! so classification is total.

#[cfg(feature = "serde")]
use serde::Serialize;

use rr_core::config::{ProgressionRules, StageDef};

/// A classified stage, borrowed from the rules table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ProgressionStage<'a> {
    pub ordinal: usize,
    pub name: &'a str,
    pub min_minutes: u32,
    /// Inclusive upper bound in whole minutes; `None` for the terminal stage.
    pub max_minutes: Option<u32>,
    pub modifier: f64,
}

/// Distance to the next stage; `next_stage` is `None` at the terminal stage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StageGap<'a> {
    pub next_stage: Option<ProgressionStage<'a>>,
    pub minutes_needed: f64,
}

fn stage_at(stages: &[StageDef], ordinal: usize) -> ProgressionStage<'_> {
    let def = &stages[ordinal];
    ProgressionStage {
        ordinal,
        name: &def.name,
        min_minutes: def.min_minutes,
        max_minutes: stages.get(ordinal + 1).map(|next| next.min_minutes - 1),
        modifier: def.modifier,
    }
}

#[inline]
fn clamp_minutes(total_minutes: f64) -> f64 {
    // `!(x > 0)` also catches NaN.
    if !(total_minutes > 0.0) { 0.0 } else { total_minutes }
}

fn ordinal_for(total_minutes: f64, stages: &[StageDef]) -> usize {
    let m = clamp_minutes(total_minutes);
    // Table starts at 0, so the first stage always matches.
    stages
        .iter()
        .rposition(|s| m >= f64::from(s.min_minutes))
        .unwrap_or(0)
}

/// Classify an accumulated duration.
pub fn classify_stage(total_minutes: f64, rules: &ProgressionRules) -> ProgressionStage<'_> {
    let stages = rules.stages();
    stage_at(stages, ordinal_for(total_minutes, stages))
}

/// Next stage and how many more minutes it takes to reach it.
pub fn next_stage_gap(total_minutes: f64, rules: &ProgressionRules) -> StageGap<'_> {
    let stages = rules.stages();
    let ordinal = ordinal_for(total_minutes, stages);
    if ordinal + 1 >= stages.len() {
        return StageGap { next_stage: None, minutes_needed: 0.0 };
    }
    let next = stage_at(stages, ordinal + 1);
    // Classification clamps NaN to stage 0; the distance stays NaN.
    let from = if total_minutes.is_nan() { total_minutes } else { clamp_minutes(total_minutes) };
    StageGap {
        next_stage: Some(next),
        minutes_needed: f64::from(next.min_minutes) - from,
    }
}

/// Performance modifier for an accumulated duration.
pub fn stage_modifier(total_minutes: f64, rules: &ProgressionRules) -> f64 {
    classify_stage(total_minutes, rules).modifier
}

/// Look up a stage by its display name (exact match).
pub fn stage_by_name<'a>(name: &str, rules: &'a ProgressionRules) -> Option<ProgressionStage<'a>> {
    let stages = rules.stages();
    stages
        .iter()
        .position(|s| s.name == name)
        .map(|i| stage_at(stages, i))
}

/// Render minutes as `"Xh Ym"`, dropping a zero hour part or a zero minute part.
pub fn format_minutes(minutes: u64) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ProgressionRules {
        ProgressionRules::default()
    }

    #[test]
    fn boundaries_are_exact() {
        let r = rules();
        assert_eq!(classify_stage(0.0, &r).ordinal, 0);
        assert_eq!(classify_stage(59.0, &r).ordinal, 0);
        assert_eq!(classify_stage(59.9, &r).ordinal, 0);
        assert_eq!(classify_stage(60.0, &r).ordinal, 1);
        assert_eq!(classify_stage(299.0, &r).ordinal, 1);
        assert_eq!(classify_stage(300.0, &r).ordinal, 2);
        assert_eq!(classify_stage(899.0, &r).ordinal, 2);
        assert_eq!(classify_stage(900.0, &r).ordinal, 3);
        assert_eq!(classify_stage(1799.0, &r).ordinal, 3);
        assert_eq!(classify_stage(1800.0, &r).ordinal, 4);
        assert_eq!(classify_stage(1.0e9, &r).ordinal, 4);
    }

    #[test]
    fn stage_bounds_are_reported() {
        let r = rules();
        let s = classify_stage(120.0, &r);
        assert_eq!(s.name, "Learning");
        assert_eq!((s.min_minutes, s.max_minutes), (60, Some(299)));
        assert_eq!(s.modifier, 0.85);

        let top = classify_stage(5000.0, &r);
        assert_eq!(top.name, "Perfected");
        assert_eq!(top.max_minutes, None);
    }

    #[test]
    fn negative_and_nan_clamp_to_first_stage() {
        let r = rules();
        assert_eq!(classify_stage(-10.0, &r).ordinal, 0);
        assert_eq!(classify_stage(f64::NAN, &r).ordinal, 0);
        assert_eq!(classify_stage(f64::NEG_INFINITY, &r).ordinal, 0);
        assert_eq!(classify_stage(f64::INFINITY, &r).ordinal, 4);
    }

    #[test]
    fn gap_to_next_stage() {
        let r = rules();
        let g = next_stage_gap(45.0, &r);
        assert_eq!(g.next_stage.map(|s| s.name), Some("Learning"));
        assert_eq!(g.minutes_needed, 15.0);

        let g = next_stage_gap(-30.0, &r);
        assert_eq!(g.minutes_needed, 60.0);

        let g = next_stage_gap(1800.0, &r);
        assert!(g.next_stage.is_none());
        assert_eq!(g.minutes_needed, 0.0);
    }

    #[test]
    fn nan_minutes_keep_first_stage_but_propagate_into_gap() {
        let r = rules();
        let g = next_stage_gap(f64::NAN, &r);
        assert_eq!(g.next_stage.map(|s| s.name), Some("Learning"));
        assert!(g.minutes_needed.is_nan());

        let g = next_stage_gap(f64::NEG_INFINITY, &r);
        assert_eq!(g.minutes_needed, 60.0);
    }

    #[test]
    fn modifier_and_lookup() {
        let r = rules();
        assert_eq!(stage_modifier(400.0, &r), 1.0);
        assert_eq!(stage_by_name("Well Rehearsed", &r).map(|s| s.ordinal), Some(3));
        assert!(stage_by_name("Legendary", &r).is_none());
    }

    #[test]
    fn minutes_formatting() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h");
        assert_eq!(format_minutes(90), "1h 30m");
        assert_eq!(format_minutes(1800), "30h");
        assert_eq!(format_minutes(61), "1h 1m");
    }
}
