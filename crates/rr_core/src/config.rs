//! config.rs: balance constants for every rules component, with safe defaults.
//!
//! `RulesConfig::default()` is the reference balance. Threshold tables
//! (progression stages, ticket bands, slots) can only be built through
//! validating constructors, so the classifiers never see an empty or
//! unordered table. Scalars are checked by `RulesConfig::validate`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::SlotId;
use crate::rounding::BPS_DENOMINATOR;
use crate::Money;

/// Reference balance constants.
pub mod defaults {
    pub const QUALITY_FLOOR: f64 = 0.2;
    pub const QUALITY_CEILING: f64 = 1.0;

    /// (name, min_minutes, modifier); max of each stage is the next min - 1.
    pub const STAGES: [(&str, u32, f64); 5] = [
        ("Unlearned", 0, 0.70),
        ("Learning", 60, 0.85),
        ("Familiar", 300, 1.00),
        ("Well Rehearsed", 900, 1.10),
        ("Perfected", 1800, 1.20),
    ];

    pub const MIN_BID_INCREMENT: u64 = 100;
    pub const BID_INCREMENT_BPS: u32 = 500;
    pub const MARKETPLACE_FEE_BPS: u32 = 1000;
    pub const ANTI_SNIPE_MINUTES: u32 = 5;

    /// (slot, min_fame, min_prestige, attendance ×, payment ×, lockout minutes)
    pub const SLOTS: [(&str, u64, u32, f64, f64, u32); 3] = [
        ("opening", 0, 0, 0.60, 0.50, 60),
        ("support", 250, 2, 0.85, 0.75, 120),
        ("headline", 1000, 3, 1.00, 1.00, 240),
    ];

    /// (min percent of capacity, label, color tier), highest first.
    pub const TICKET_BANDS: [(u32, &str, &str); 5] = [
        (100, "Sold Out", "red"),
        (80, "Almost Sold Out", "orange"),
        (50, "Selling Well", "green"),
        (25, "Steady Sales", "blue"),
        (0, "Slow Sales", "gray"),
    ];
    pub const ON_TRACK_PCT: u32 = 75;

    pub const PRIVILEGED_VOTE_WEIGHT: u32 = 2;
}

// ---------------- Quality ----------------------------------------------------------------------

/// Clamp range for the skill multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct QualityRules {
    pub floor_multiplier: f64,
    pub ceiling_multiplier: f64,
}

impl Default for QualityRules {
    fn default() -> Self {
        Self {
            floor_multiplier: defaults::QUALITY_FLOOR,
            ceiling_multiplier: defaults::QUALITY_CEILING,
        }
    }
}

impl QualityRules {
    pub fn validate(&self) -> Result<(), CoreError> {
        let (lo, hi) = (self.floor_multiplier, self.ceiling_multiplier);
        if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || lo > hi {
            return Err(CoreError::DomainOutOfRange("quality.floor_multiplier/ceiling_multiplier"));
        }
        Ok(())
    }
}

// ---------------- Progression ------------------------------------------------------------------

/// One row of the rehearsal stage table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct StageDef {
    pub name: String,
    pub min_minutes: u32,
    pub modifier: f64,
}

/// Ordered stage table partitioning `[0, ∞)`.
///
/// Invariants: non-empty, first stage starts at 0, `min_minutes` strictly
/// increasing. The last stage is unbounded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<StageDef>", into = "Vec<StageDef>"))]
pub struct ProgressionRules {
    stages: Vec<StageDef>,
}

impl ProgressionRules {
    pub fn new(stages: Vec<StageDef>) -> Result<Self, CoreError> {
        const KEY: &str = "progression";
        let first = stages.first().ok_or(CoreError::InvalidTable(KEY))?;
        if first.min_minutes != 0 {
            return Err(CoreError::InvalidTable(KEY));
        }
        if stages.windows(2).any(|w| w[0].min_minutes >= w[1].min_minutes) {
            return Err(CoreError::InvalidTable(KEY));
        }
        if stages.iter().any(|s| s.name.is_empty() || !s.modifier.is_finite()) {
            return Err(CoreError::DomainOutOfRange("progression.name/modifier"));
        }
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[StageDef] {
        &self.stages
    }
}

impl Default for ProgressionRules {
    fn default() -> Self {
        let stages = defaults::STAGES
            .iter()
            .map(|&(name, min_minutes, modifier)| StageDef {
                name: name.to_string(),
                min_minutes,
                modifier,
            })
            .collect();
        Self { stages }
    }
}

impl TryFrom<Vec<StageDef>> for ProgressionRules {
    type Error = CoreError;
    fn try_from(v: Vec<StageDef>) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<ProgressionRules> for Vec<StageDef> {
    fn from(p: ProgressionRules) -> Self {
        p.stages
    }
}

// ---------------- Market -----------------------------------------------------------------------

/// Auction and marketplace constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MarketRules {
    /// Absolute floor for a bid increment.
    pub min_bid_increment: Money,
    /// Proportional increment over the current base, in basis points.
    pub bid_increment_bps: u32,
    /// Marketplace cut of a sale, in basis points.
    pub fee_bps: u32,
    /// Ending-soon window and per-extension grace.
    pub anti_snipe_minutes: u32,
}

impl Default for MarketRules {
    fn default() -> Self {
        Self {
            min_bid_increment: defaults::MIN_BID_INCREMENT,
            bid_increment_bps: defaults::BID_INCREMENT_BPS,
            fee_bps: defaults::MARKETPLACE_FEE_BPS,
            anti_snipe_minutes: defaults::ANTI_SNIPE_MINUTES,
        }
    }
}

impl MarketRules {
    pub fn validate(&self) -> Result<(), CoreError> {
        // A zero floor would let a zero-priced listing accept a bid equal to the base.
        if self.min_bid_increment == 0 {
            return Err(CoreError::DomainOutOfRange("market.min_bid_increment"));
        }
        if self.fee_bps > BPS_DENOMINATOR {
            return Err(CoreError::DomainOutOfRange("market.fee_bps"));
        }
        if self.anti_snipe_minutes == 0 {
            return Err(CoreError::DomainOutOfRange("market.anti_snipe_minutes"));
        }
        Ok(())
    }
}

// ---------------- Slots ------------------------------------------------------------------------

/// Gates and multipliers for one performance slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct SlotRequirement {
    pub slot_id: SlotId,
    pub min_prestige: u32,
    pub min_fame: u64,
    pub attendance_multiplier: f64,
    pub payment_multiplier: f64,
    pub lockout_minutes: u32,
}

/// Named slots in display order; ids are unique.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<SlotRequirement>", into = "Vec<SlotRequirement>"))]
pub struct SlotTable {
    slots: Vec<SlotRequirement>,
}

impl SlotTable {
    pub fn new(slots: Vec<SlotRequirement>) -> Result<Self, CoreError> {
        for (i, s) in slots.iter().enumerate() {
            if slots[..i].iter().any(|p| p.slot_id == s.slot_id) {
                return Err(CoreError::DuplicateSlot);
            }
            let ok = |m: f64| m.is_finite() && m >= 0.0;
            if !ok(s.attendance_multiplier) || !ok(s.payment_multiplier) {
                return Err(CoreError::DomainOutOfRange("slots.multiplier"));
            }
        }
        Ok(Self { slots })
    }

    pub fn get(&self, slot_id: &SlotId) -> Option<&SlotRequirement> {
        self.slots.iter().find(|s| &s.slot_id == slot_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotRequirement> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        let slots = defaults::SLOTS
            .iter()
            .map(|&(id, min_fame, min_prestige, att, pay, lockout)| SlotRequirement {
                slot_id: id.parse().expect("default slot ids are valid tokens"),
                min_prestige,
                min_fame,
                attendance_multiplier: att,
                payment_multiplier: pay,
                lockout_minutes: lockout,
            })
            .collect();
        Self { slots }
    }
}

impl TryFrom<Vec<SlotRequirement>> for SlotTable {
    type Error = CoreError;
    fn try_from(v: Vec<SlotRequirement>) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<SlotTable> for Vec<SlotRequirement> {
    fn from(t: SlotTable) -> Self {
        t.slots
    }
}

// ---------------- Tickets ----------------------------------------------------------------------

/// A ticket-sales band: applies when percent sold ≥ `min_percent`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct TicketBand {
    pub min_percent: u32,
    pub label: String,
    pub color: String,
}

/// Bands ordered highest threshold first; the last band starts at 0 so every
/// percentage matches exactly one band.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<TicketBand>", into = "Vec<TicketBand>"))]
pub struct TicketBands {
    bands: Vec<TicketBand>,
}

impl TicketBands {
    pub fn new(bands: Vec<TicketBand>) -> Result<Self, CoreError> {
        const KEY: &str = "tickets.bands";
        let last = bands.last().ok_or(CoreError::InvalidTable(KEY))?;
        if last.min_percent != 0 {
            return Err(CoreError::InvalidTable(KEY));
        }
        if bands.windows(2).any(|w| w[0].min_percent <= w[1].min_percent) {
            return Err(CoreError::InvalidTable(KEY));
        }
        Ok(Self { bands })
    }

    pub fn as_slice(&self) -> &[TicketBand] {
        &self.bands
    }
}

impl Default for TicketBands {
    fn default() -> Self {
        let bands = defaults::TICKET_BANDS
            .iter()
            .map(|&(min_percent, label, color)| TicketBand {
                min_percent,
                label: label.to_string(),
                color: color.to_string(),
            })
            .collect();
        Self { bands }
    }
}

impl TryFrom<Vec<TicketBand>> for TicketBands {
    type Error = CoreError;
    fn try_from(v: Vec<TicketBand>) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<TicketBands> for Vec<TicketBand> {
    fn from(t: TicketBands) -> Self {
        t.bands
    }
}

/// Ticket labelling thresholds supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TicketRules {
    pub bands: TicketBands,
    /// Sales at or above this share of the prediction count as on track.
    pub on_track_pct: u32,
}

impl Default for TicketRules {
    fn default() -> Self {
        Self {
            bands: TicketBands::default(),
            on_track_pct: defaults::ON_TRACK_PCT,
        }
    }
}

impl TicketRules {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.on_track_pct == 0 || self.on_track_pct > 100 {
            return Err(CoreError::DomainOutOfRange("tickets.on_track_pct"));
        }
        Ok(())
    }
}

// ---------------- Voting -----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct VotingRules {
    /// Weight of a privileged voter's ballot; ordinary ballots weigh 1.
    pub privileged_weight: u32,
}

impl Default for VotingRules {
    fn default() -> Self {
        Self { privileged_weight: defaults::PRIVILEGED_VOTE_WEIGHT }
    }
}

impl VotingRules {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.privileged_weight == 0 {
            return Err(CoreError::DomainOutOfRange("voting.privileged_weight"));
        }
        Ok(())
    }
}

// ---------------- Whole config -----------------------------------------------------------------

/// Every balance constant the engine reads. Missing sections deserialize to
/// the reference defaults.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RulesConfig {
    pub quality: QualityRules,
    pub progression: ProgressionRules,
    pub market: MarketRules,
    pub slots: SlotTable,
    pub tickets: TicketRules,
    pub voting: VotingRules,
}

impl RulesConfig {
    /// Check scalar domains. Tables were validated when they were built.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.quality.validate()?;
        self.market.validate()?;
        self.tickets.validate()?;
        self.voting.validate()?;
        Ok(())
    }
}
