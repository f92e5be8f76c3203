//! Auction timing: ending-soon detection, anti-snipe extension, remaining-time text.
//!
//! "Now" is always a parameter; nothing here reads the clock.
//! The window is `MarketRules::anti_snipe_minutes`, used both to detect
//! "ending soon" and as the grace added per extension. Extensions are not
//! capped: every qualifying late bid pushes the end out again.

use chrono::{DateTime, Duration, Utc};

#[cfg(feature = "serde")]
use serde::Serialize;

use rr_core::config::MarketRules;

/// Display-ready timing of a running auction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AuctionTiming {
    pub is_ending_soon: bool,
    pub human_remaining: String,
}

#[inline]
fn window(rules: &MarketRules) -> Duration {
    Duration::minutes(i64::from(rules.anti_snipe_minutes))
}

/// `0 < end - now <= window`. An auction that already ended is not "ending soon".
pub fn is_ending_soon(end: DateTime<Utc>, now: DateTime<Utc>, rules: &MarketRules) -> bool {
    let remaining = end - now;
    remaining > Duration::zero() && remaining <= window(rules)
}

/// Push the end out by one grace window.
pub fn extend(end: DateTime<Utc>, rules: &MarketRules) -> DateTime<Utc> {
    end + window(rules)
}

/// New end time if a bid placed at `bid_at` lands inside the ending-soon window.
pub fn anti_snipe_extension(
    end: DateTime<Utc>,
    bid_at: DateTime<Utc>,
    rules: &MarketRules,
) -> Option<DateTime<Utc>> {
    is_ending_soon(end, bid_at, rules).then(|| extend(end, rules))
}

/// `"Ended"`, `"{d}d {h}h"`, `"{h}h {m}m"` or `"{m}m"`: the two largest units,
/// truncated toward zero.
pub fn format_remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = end - now;
    if remaining <= Duration::zero() {
        return "Ended".to_string();
    }
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Both timing views at once.
pub fn auction_timing(end: DateTime<Utc>, now: DateTime<Utc>, rules: &MarketRules) -> AuctionTiming {
    AuctionTiming {
        is_ending_soon: is_ending_soon(end, now, rules),
        human_remaining: format_remaining(end, now),
    }
}
