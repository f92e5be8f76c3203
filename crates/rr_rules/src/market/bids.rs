//! Marketplace pricing (integers only, no floats).
//!
//! - Minimum next bid: base = current bid, or the starting price when nobody
//!   has bid yet; increment = max(floor, round(base × rate)).
//! - The minimum saturates at `Money::MAX`; a bid must also exceed the base,
//!   so an auction already at `Money::MAX` accepts nothing further.
//! - Sale settlement: fee = round(price × fee rate); the payout is the exact
//!   remainder, so `fee + seller_payout == sale_price` always holds.

#[cfg(feature = "serde")]
use serde::Serialize;

use rr_core::config::MarketRules;
use rr_core::rounding::apply_bps_round;
use rr_core::Money;

/// Breakdown of the minimum acceptable next bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BidQuote {
    pub base: Money,
    pub increment: Money,
    pub minimum: Money,
}

/// Split of a sale price between the marketplace and the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SaleSettlement {
    pub fee: Money,
    pub seller_payout: Money,
}

/// Quote the minimum next bid with its base and increment.
pub fn bid_quote(current_bid: Option<Money>, starting_price: Money, rules: &MarketRules) -> BidQuote {
    let base = current_bid.unwrap_or(starting_price);
    let increment = rules
        .min_bid_increment
        .max(apply_bps_round(base, rules.bid_increment_bps));
    BidQuote {
        base,
        increment,
        minimum: base.saturating_add(increment),
    }
}

/// Smallest bid the auction accepts next.
pub fn minimum_next_bid(current_bid: Option<Money>, starting_price: Money, rules: &MarketRules) -> Money {
    bid_quote(current_bid, starting_price, rules).minimum
}

/// Whether `amount` meets the minimum next bid.
pub fn is_acceptable_bid(
    amount: Money,
    current_bid: Option<Money>,
    starting_price: Money,
    rules: &MarketRules,
) -> bool {
    let quote = bid_quote(current_bid, starting_price, rules);
    amount >= quote.minimum && amount > quote.base
}

/// Marketplace fee and seller payout for a completed sale.
pub fn settle_sale(sale_price: Money, rules: &MarketRules) -> SaleSettlement {
    // fee_bps ≤ 10_000 (validated), so fee ≤ sale_price.
    let fee = apply_bps_round(sale_price, rules.fee_bps).min(sale_price);
    SaleSettlement {
        fee,
        seller_payout: sale_price - fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> MarketRules {
        MarketRules::default()
    }

    #[test]
    fn floor_increment_applies_below_2000() {
        let r = rules();
        // 5% of 1000 = 50 < 100
        assert_eq!(minimum_next_bid(None, 1000, &r), 1100);
        assert_eq!(minimum_next_bid(Some(1500), 1000, &r), 1600);
        assert_eq!(minimum_next_bid(None, 0, &r), 100);
    }

    #[test]
    fn proportional_increment_above_2000() {
        let r = rules();
        assert_eq!(minimum_next_bid(Some(2000), 500, &r), 2100);
        assert_eq!(minimum_next_bid(Some(10_000), 500, &r), 10_500);
        // 5% of 2010 = 100.5 → 101
        let q = bid_quote(Some(2010), 0, &r);
        assert_eq!(q, BidQuote { base: 2010, increment: 101, minimum: 2111 });
    }

    #[test]
    fn current_bid_takes_precedence_over_starting_price() {
        let q = bid_quote(Some(300), 5000, &rules());
        assert_eq!(q.base, 300);
    }

    #[test]
    fn acceptable_bid_boundary() {
        let r = rules();
        assert!(is_acceptable_bid(1100, None, 1000, &r));
        assert!(!is_acceptable_bid(1099, None, 1000, &r));
    }

    #[test]
    fn minimum_saturates_at_money_max() {
        let r = rules();
        let q = bid_quote(Some(Money::MAX), 0, &r);
        assert_eq!(q.minimum, Money::MAX);
        assert!(!is_acceptable_bid(Money::MAX, Some(Money::MAX), 0, &r));

        // Just below the ceiling the saturated minimum is still above the base.
        let base = Money::MAX - 10;
        assert_eq!(minimum_next_bid(Some(base), 0, &r), Money::MAX);
        assert!(is_acceptable_bid(Money::MAX, Some(base), 0, &r));
    }

    #[test]
    fn settlement_examples() {
        let r = rules();
        assert_eq!(settle_sale(1000, &r), SaleSettlement { fee: 100, seller_payout: 900 });
        assert_eq!(settle_sale(480, &r), SaleSettlement { fee: 48, seller_payout: 432 });
        // 10% of 15 = 1.5 → 2; payout is the remainder, not independently rounded.
        assert_eq!(settle_sale(15, &r), SaleSettlement { fee: 2, seller_payout: 13 });
        assert_eq!(settle_sale(0, &r), SaleSettlement { fee: 0, seller_payout: 0 });
    }

    #[test]
    fn full_fee_takes_everything() {
        let r = MarketRules { fee_bps: 10_000, ..MarketRules::default() };
        assert_eq!(settle_sale(77, &r), SaleSettlement { fee: 77, seller_payout: 0 });
    }
}
