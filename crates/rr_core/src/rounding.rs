//! crates/rr_core/src/rounding.rs
//! Integer-first rounding for money and percentages.
//!
//! Every helper rounds half-up on exact integers, which matches `round(x)` for
//! the non-negative quantities the rules deal in (prices, counts). Widened to
//! `u128` internally so products cannot overflow.

/// One whole = 10_000 basis points.
pub const BPS_DENOMINATOR: u32 = 10_000;

#[inline]
fn saturate_u64(x: u128) -> u64 {
    if x > u64::MAX as u128 { u64::MAX } else { x as u64 }
}

/// `round(amount * bps / 10_000)` without floats.
#[inline]
pub fn apply_bps_round(amount: u64, bps: u32) -> u64 {
    let den = BPS_DENOMINATOR as u128;
    saturate_u64((amount as u128 * bps as u128 + den / 2) / den)
}

/// `round(100 * num / den)`; a zero denominator yields 0.
///
/// Not capped at 100: callers report over-subscription as-is.
#[inline]
pub fn percent_round(num: u64, den: u64) -> u64 {
    if den == 0 {
        return 0;
    }
    let (n, d) = (num as u128, den as u128);
    saturate_u64((200 * n + d) / (2 * d))
}

/// `round(value * multiplier)` for a non-negative count and a finite multiplier.
///
/// Float → int casts saturate: NaN and negatives land on 0.
#[inline]
pub fn scale_round(value: u64, multiplier: f64) -> u64 {
    (value as f64 * multiplier).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bps_rounding_half_up() {
        assert_eq!(apply_bps_round(1000, 1000), 100);
        assert_eq!(apply_bps_round(480, 1000), 48);
        assert_eq!(apply_bps_round(5, 1000), 1); // 0.5 → 1
        assert_eq!(apply_bps_round(4, 1000), 0); // 0.4 → 0
        assert_eq!(apply_bps_round(0, 500), 0);
        assert_eq!(apply_bps_round(u64::MAX, 10_000), u64::MAX);
    }

    #[test]
    fn percent_rounding() {
        assert_eq!(percent_round(1, 3), 33);
        assert_eq!(percent_round(2, 3), 67);
        assert_eq!(percent_round(1, 200), 1); // 0.5% → 1
        assert_eq!(percent_round(150, 100), 150);
        assert_eq!(percent_round(10, 0), 0);
    }

    #[test]
    fn scale_rounding_saturates() {
        assert_eq!(scale_round(1000, 0.75), 750);
        assert_eq!(scale_round(3, 0.5), 2);
        assert_eq!(scale_round(10, f64::NAN), 0);
        assert_eq!(scale_round(10, -1.0), 0);
    }
}
