// crates/rr_rules/src/lib.rs
//! Pure game rules: every function maps its inputs (plus the balance section it
//! reads) to a value. No I/O, no clocks, no shared state; safe to call from any
//! thread without coordination. Timestamps are always passed in by the caller.
#![forbid(unsafe_code)]

// ----------------------------- Components ----------------------------------------------

pub mod quality;
pub mod progression;
pub mod voting;

pub mod market {
    // File modules (actual implementations)
    pub mod bids;
    pub mod auction;

    pub use auction::{
        anti_snipe_extension, auction_timing, extend, format_remaining, is_ending_soon,
        AuctionTiming,
    };
    pub use bids::{bid_quote, is_acceptable_bid, minimum_next_bid, settle_sale, BidQuote, SaleSettlement};
}

pub mod eligibility {
    // File modules (actual implementations)
    pub mod slots;
    pub mod tickets;

    pub use slots::{
        booking_closes_at, eligible_slots, evaluate_slot_eligibility, expected_attendance,
        is_booking_locked, slot_payout, SlotEligibility, UnmetRequirement,
    };
    pub use tickets::{classify_ticket_status, SalesPace, TicketStatus};
}

// ----------------------------- Flat re-exports -----------------------------------------

// Tight, explicit re-exports (avoid wildcard export drift).
pub use quality::{average_skill, compute_adjusted_quality, quality_tier, QualityResult, QualityTier};
pub use progression::{
    classify_stage, format_minutes, next_stage_gap, stage_by_name, stage_modifier, ProgressionStage,
    StageGap,
};
pub use voting::{aggregate_votes, rank_subjects, tally_for, vote_weight, VoteTally};

// Balance sections callers pass in.
pub use rr_core::config::{
    MarketRules, ProgressionRules, QualityRules, RulesConfig, SlotRequirement, SlotTable, TicketRules,
    VotingRules,
};
