//! Ticket sales status (deterministic, integers-only).
//!
//! Inputs:
//! - `sold`: tickets sold so far
//! - `predicted`: forecast sales for the gig (0 = no forecast)
//! - `capacity`: venue capacity
//! - `rules`: band thresholds and the on-track cutoff, supplied by the caller
//!
//! Output:
//! - `TicketStatus { label, percent_sold, color_tier, pace, forecast_percent }`
//!
//! Notes:
//! - `percent_sold = round(100 × sold / capacity)` is **not** capped: selling past
//!   capacity is a legitimate display state.
//! - Zero capacity reports 0% (no ratio to show).
//! - The band is the first (highest) one whose `min_percent` is reached.

#[cfg(feature = "serde")]
use serde::Serialize;

use rr_core::config::TicketRules;
use rr_core::rounding::percent_round;

/// Sales against the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SalesPace {
    /// At or above the forecast.
    Ahead,
    /// At or above the on-track share of the forecast.
    OnTrack,
    Behind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TicketStatus {
    pub label: String,
    pub percent_sold: u64,
    pub color_tier: String,
    /// `None` when there is no forecast.
    pub pace: Option<SalesPace>,
    pub forecast_percent: Option<u64>,
}

/// Classify sales against capacity (band) and forecast (pace).
pub fn classify_ticket_status(sold: u64, predicted: u64, capacity: u64, rules: &TicketRules) -> TicketStatus {
    let percent_sold = percent_round(sold, capacity);

    let bands = rules.bands.as_slice();
    // Non-empty and ending at 0 (`TicketBands::new`), so the floor band always matches.
    let floor = bands.len() - 1;
    let band = &bands[bands
        .iter()
        .position(|b| percent_sold >= u64::from(b.min_percent))
        .unwrap_or(floor)];
    let (label, color_tier) = (band.label.clone(), band.color.clone());

    let (pace, forecast_percent) = if predicted == 0 {
        (None, None)
    } else {
        (
            Some(classify_pace(sold, predicted, rules.on_track_pct)),
            Some(percent_round(sold, predicted)),
        )
    };

    TicketStatus { label, percent_sold, color_tier, pace, forecast_percent }
}

fn classify_pace(sold: u64, predicted: u64, on_track_pct: u32) -> SalesPace {
    if sold >= predicted {
        SalesPace::Ahead
    } else if (sold as u128) * 100 >= (predicted as u128) * (on_track_pct as u128) {
        SalesPace::OnTrack
    } else {
        SalesPace::Behind
    }
}
