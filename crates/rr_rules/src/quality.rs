//! Skill-scaled quality (cover songs and other derivative works).
//!
//! Inputs:
//! - `base_quality`: quality of the original work (non-negative)
//! - `skills`: one skill level per contributor, conventionally 0..=100
//! - `rules`: clamp range for the multiplier
//!
//! Output:
//! - `QualityResult { adjusted_quality, multiplier }`
//!
//! Notes:
//! - No contributors ⇒ the floor multiplier (an unskilled default, not an error).
//! - NaN skills propagate into `multiplier`; `adjusted_quality` then saturates to 0.

#[cfg(feature = "serde")]
use serde::Serialize;

use rr_core::config::QualityRules;

/// Adjusted quality plus the multiplier that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct QualityResult {
    pub adjusted_quality: u32,
    pub multiplier: f64,
}

/// Display band for a multiplier. Thresholds are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum QualityTier {
    Poor,
    Rough,
    Decent,
    Good,
    Excellent,
}

impl QualityTier {
    pub fn label(self) -> &'static str {
        match self {
            QualityTier::Excellent => "Excellent",
            QualityTier::Good => "Good",
            QualityTier::Decent => "Decent",
            QualityTier::Rough => "Rough",
            QualityTier::Poor => "Poor",
        }
    }
}

/// Arithmetic mean of the skill levels; `None` when nobody contributes.
pub fn average_skill(skills: &[f64]) -> Option<f64> {
    if skills.is_empty() {
        return None;
    }
    Some(skills.iter().sum::<f64>() / skills.len() as f64)
}

/// Scale `base_quality` by the contributors' mean skill, clamped to the rules' range.
pub fn compute_adjusted_quality(base_quality: u32, skills: &[f64], rules: &QualityRules) -> QualityResult {
    let multiplier = match average_skill(skills) {
        None => rules.floor_multiplier,
        Some(mean) => clamp_propagating_nan(mean / 100.0, rules.floor_multiplier, rules.ceiling_multiplier),
    };
    let adjusted_quality = (f64::from(base_quality) * multiplier).round() as u32;
    QualityResult { adjusted_quality, multiplier }
}

/// Map a multiplier onto its display band (≥0.9, ≥0.7, ≥0.5, ≥0.3, else).
pub fn quality_tier(multiplier: f64) -> QualityTier {
    if multiplier >= 0.9 {
        QualityTier::Excellent
    } else if multiplier >= 0.7 {
        QualityTier::Good
    } else if multiplier >= 0.5 {
        QualityTier::Decent
    } else if multiplier >= 0.3 {
        QualityTier::Rough
    } else {
        QualityTier::Poor
    }
}

// `f64::max/min` swallow NaN, and `f64::clamp` panics on bad bounds.
#[inline]
fn clamp_propagating_nan(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        x
    } else if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> QualityRules {
        QualityRules::default()
    }

    #[test]
    fn no_contributors_uses_floor() {
        let r = compute_adjusted_quality(100, &[], &rules());
        assert_eq!(r, QualityResult { adjusted_quality: 20, multiplier: 0.2 });
    }

    #[test]
    fn mean_skill_scales_quality() {
        let r = compute_adjusted_quality(80, &[60.0], &rules());
        assert_eq!(r.adjusted_quality, 48);
        assert_eq!(r.multiplier, 0.6);

        let r = compute_adjusted_quality(100, &[40.0, 80.0], &rules());
        assert_eq!(r.adjusted_quality, 60);
    }

    #[test]
    fn multiplier_is_clamped() {
        let low = compute_adjusted_quality(50, &[0.0, 5.0], &rules());
        assert_eq!(low.multiplier, 0.2);
        assert_eq!(low.adjusted_quality, 10);

        let high = compute_adjusted_quality(50, &[150.0], &rules());
        assert_eq!(high.multiplier, 1.0);
        assert_eq!(high.adjusted_quality, 50);
    }

    #[test]
    fn nan_propagates_into_multiplier() {
        let r = compute_adjusted_quality(80, &[f64::NAN, 50.0], &rules());
        assert!(r.multiplier.is_nan());
        assert_eq!(r.adjusted_quality, 0);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(quality_tier(1.0), QualityTier::Excellent);
        assert_eq!(quality_tier(0.9), QualityTier::Excellent);
        assert_eq!(quality_tier(0.89), QualityTier::Good);
        assert_eq!(quality_tier(0.7), QualityTier::Good);
        assert_eq!(quality_tier(0.5), QualityTier::Decent);
        assert_eq!(quality_tier(0.3), QualityTier::Rough);
        assert_eq!(quality_tier(0.29), QualityTier::Poor);
        assert_eq!(quality_tier(0.2).label(), "Poor");
    }

    #[test]
    fn average_skill_empty_is_none() {
        assert_eq!(average_skill(&[]), None);
        assert_eq!(average_skill(&[10.0, 20.0, 30.0]), Some(20.0));
    }
}
