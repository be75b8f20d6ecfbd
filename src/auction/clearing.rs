use crate::auction::ordering::RankedBid;
use crate::core::bid::Bid;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters fixed at auction start, immutable for one clearing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionParameters {
    /// Total offered size in asset units.
    pub total_size: u64,
    /// Minimum eligible price, inclusive.
    pub floor_price: Decimal,
}

/// Why a bid did not win.
///
/// Rejections are ordinary result data, not errors. The two reasons are
/// kept distinct for observability even though both end a bid's
/// eligibility the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The bid price was below the auction floor.
    BelowFloor,
    /// The offered size was already fully allocated.
    SizeExhausted,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::BelowFloor => write!(f, "below floor"),
            RejectionReason::SizeExhausted => write!(f, "size exhausted"),
        }
    }
}

/// A winning bid with its (possibly partial) fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardedBid {
    pub bid: Bid,
    /// Units awarded. Positive, never exceeds the bid's requested quantity.
    pub awarded_quantity: u64,
}

impl AwardedBid {
    /// True if the bid received less than it asked for.
    pub fn is_partial(&self) -> bool {
        self.awarded_quantity < self.bid.quantity()
    }
}

/// A losing bid with the reason it lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedBid {
    pub bid: Bid,
    pub reason: RejectionReason,
}

/// Result of one clearing run.
///
/// Partitions the ranked bid sequence into awarded and rejected bids and
/// carries the single uniform price every winner pays. `awarded`
/// preserves rank order; `rejected` preserves encounter order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearingOutcome {
    /// The parameters this run cleared against.
    params: AuctionParameters,
    /// Uniform price charged to every winner. Zero when nothing was awarded.
    clearing_price: Decimal,
    /// Total units awarded across all winners.
    allocated_quantity: u64,
    /// Winning bids in rank order.
    awarded: Vec<AwardedBid>,
    /// Losing bids in encounter order.
    rejected: Vec<RejectedBid>,
}

impl ClearingOutcome {
    pub fn params(&self) -> &AuctionParameters {
        &self.params
    }

    /// The single price applied to all winners: the price of the last
    /// bid that received a non-zero award.
    pub fn clearing_price(&self) -> Decimal {
        self.clearing_price
    }

    pub fn allocated_quantity(&self) -> u64 {
        self.allocated_quantity
    }

    pub fn awarded(&self) -> &[AwardedBid] {
        &self.awarded
    }

    pub fn rejected(&self) -> &[RejectedBid] {
        &self.rejected
    }

    /// True if at least one bid was awarded.
    pub fn has_winners(&self) -> bool {
        !self.awarded.is_empty()
    }

    /// Units left unsold after this run.
    pub fn unallocated_quantity(&self) -> u64 {
        self.params.total_size - self.allocated_quantity
    }

    /// Allocated share of the offered size, as a percentage.
    pub fn fill_percent(&self) -> f64 {
        if self.params.total_size == 0 {
            return 0.0;
        }
        self.allocated_quantity as f64 * 100.0 / self.params.total_size as f64
    }

    /// Verify the outcome's own invariants: awards sum to the allocated
    /// total, nothing exceeds the offered size, no bid is overfilled,
    /// and every winner's price is at or above the floor.
    pub fn is_valid(&self) -> bool {
        let award_sum: u64 = self.awarded.iter().map(|a| a.awarded_quantity).sum();
        award_sum == self.allocated_quantity
            && self.allocated_quantity <= self.params.total_size
            && self.awarded.iter().all(|a| {
                a.awarded_quantity > 0
                    && a.awarded_quantity <= a.bid.quantity()
                    && a.bid.price() >= self.params.floor_price
            })
    }
}

impl fmt::Display for ClearingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Clearing Outcome ===")?;
        writeln!(f, "Offered Size:    {}", self.params.total_size)?;
        writeln!(f, "Floor Price:     {}", self.params.floor_price)?;
        writeln!(f, "Allocated:       {}", self.allocated_quantity)?;
        writeln!(f, "Fill:            {:.1}%", self.fill_percent())?;
        if self.has_winners() {
            writeln!(f, "Clearing Price:  {}", self.clearing_price)?;
        } else {
            writeln!(f, "Clearing Price:  (no winners)")?;
        }

        writeln!(f, "\nAwarded ({}):", self.awarded.len())?;
        for award in &self.awarded {
            writeln!(
                f,
                "  {} {} of {} @ limit {}{}",
                award.bid.bidder(),
                award.awarded_quantity,
                award.bid.quantity(),
                award.bid.price(),
                if award.is_partial() { " (partial)" } else { "" },
            )?;
        }

        writeln!(f, "\nRejected ({}):", self.rejected.len())?;
        for rejection in &self.rejected {
            writeln!(
                f,
                "  {} {} @ limit {} — {}",
                rejection.bid.bidder(),
                rejection.bid.quantity(),
                rejection.bid.price(),
                rejection.reason,
            )?;
        }
        Ok(())
    }
}

/// The uniform-price clearing engine.
///
/// A pure function over the ranked bid sequence: no I/O, no hidden
/// state, identical inputs always produce an identical outcome.
pub struct ClearingEngine;

impl ClearingEngine {
    /// Clear the ranked bid sequence against the auction parameters.
    ///
    /// Single pass, left to right. Each bid is classified exactly once
    /// and never reconsidered:
    ///
    /// 1. Once the offered size is consumed, every remaining bid is
    ///    rejected with `SizeExhausted` — no reordering after
    ///    exhaustion, whatever the price.
    /// 2. A bid below the floor is rejected with `BelowFloor`. A bid
    ///    exactly at the floor is eligible.
    /// 3. Otherwise the bid is awarded `min(remaining, requested)` and
    ///    the clearing price moves to its limit price, so the final
    ///    clearing price is the lowest awarded price.
    ///
    /// Malformed input (zero quantities, duplicate origin refs) is a
    /// caller contract violation; see [`crate::auction::validate`].
    pub fn clear(params: &AuctionParameters, ranked: &[RankedBid]) -> ClearingOutcome {
        let mut allocated: u64 = 0;
        let mut clearing_price = Decimal::ZERO;
        let mut awarded = Vec::new();
        let mut rejected = Vec::new();

        for entry in ranked {
            let bid = &entry.bid;
            if allocated == params.total_size {
                rejected.push(RejectedBid {
                    bid: bid.clone(),
                    reason: RejectionReason::SizeExhausted,
                });
            } else if bid.price() < params.floor_price {
                rejected.push(RejectedBid {
                    bid: bid.clone(),
                    reason: RejectionReason::BelowFloor,
                });
            } else {
                let award = (params.total_size - allocated).min(bid.quantity());
                allocated += award;
                clearing_price = bid.price();
                awarded.push(AwardedBid {
                    bid: bid.clone(),
                    awarded_quantity: award,
                });
            }
        }

        ClearingOutcome {
            params: *params,
            clearing_price,
            allocated_quantity: allocated,
            awarded,
            rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::ordering::rank_bids;
    use crate::core::bid::Bid;
    use crate::core::bidder::BidderId;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn bid_at(bidder: &str, price: Decimal, quantity: u64, t: i64) -> Bid {
        Bid::new(BidderId::new(bidder), price, quantity)
            .with_submitted_at(Utc.timestamp_opt(t, 0).unwrap())
    }

    fn clear(params: AuctionParameters, bids: Vec<Bid>) -> ClearingOutcome {
        ClearingEngine::clear(&params, &rank_bids(&bids))
    }

    #[test]
    fn test_oversubscribed_partial_fill() {
        // totalSize 100, floor 10: 60 @ 12 fills, 50 @ 11 gets the last 40,
        // 30 @ 10 is shut out.
        let outcome = clear(
            AuctionParameters {
                total_size: 100,
                floor_price: dec!(10),
            },
            vec![
                bid_at("A", dec!(12), 60, 1),
                bid_at("B", dec!(11), 50, 2),
                bid_at("C", dec!(10), 30, 3),
            ],
        );

        assert_eq!(outcome.allocated_quantity(), 100);
        assert_eq!(outcome.clearing_price(), dec!(11));
        assert_eq!(outcome.awarded().len(), 2);
        assert_eq!(outcome.awarded()[0].awarded_quantity, 60);
        assert!(!outcome.awarded()[0].is_partial());
        assert_eq!(outcome.awarded()[1].awarded_quantity, 40);
        assert!(outcome.awarded()[1].is_partial());
        assert_eq!(outcome.rejected().len(), 1);
        assert_eq!(outcome.rejected()[0].reason, RejectionReason::SizeExhausted);
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_all_below_floor() {
        let outcome = clear(
            AuctionParameters {
                total_size: 100,
                floor_price: dec!(10),
            },
            vec![bid_at("A", dec!(9.99), 60, 1), bid_at("B", dec!(5), 50, 2)],
        );

        assert!(!outcome.has_winners());
        assert_eq!(outcome.allocated_quantity(), 0);
        assert_eq!(outcome.clearing_price(), Decimal::ZERO);
        assert!(outcome
            .rejected()
            .iter()
            .all(|r| r.reason == RejectionReason::BelowFloor));
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_floor_is_inclusive() {
        let outcome = clear(
            AuctionParameters {
                total_size: 100,
                floor_price: dec!(10),
            },
            vec![bid_at("A", dec!(10), 60, 1)],
        );

        assert_eq!(outcome.awarded().len(), 1);
        assert_eq!(outcome.clearing_price(), dec!(10));
    }

    #[test]
    fn test_tie_at_boundary_earlier_submission_wins() {
        // Two equal-priced bids straddle the boundary; the earlier one
        // takes the full fill, the later one the scraps.
        let outcome = clear(
            AuctionParameters {
                total_size: 10,
                floor_price: dec!(1),
            },
            vec![bid_at("LATE", dec!(5), 6, 2), bid_at("EARLY", dec!(5), 6, 1)],
        );

        assert_eq!(outcome.awarded().len(), 2);
        assert_eq!(outcome.awarded()[0].bid.bidder().as_str(), "EARLY");
        assert_eq!(outcome.awarded()[0].awarded_quantity, 6);
        assert_eq!(outcome.awarded()[1].bid.bidder().as_str(), "LATE");
        assert_eq!(outcome.awarded()[1].awarded_quantity, 4);
        assert_eq!(outcome.clearing_price(), dec!(5));
    }

    #[test]
    fn test_zero_size_rejects_everything_as_exhausted() {
        let outcome = clear(
            AuctionParameters {
                total_size: 0,
                floor_price: dec!(10),
            },
            vec![bid_at("A", dec!(12), 60, 1), bid_at("B", dec!(5), 50, 2)],
        );

        assert!(!outcome.has_winners());
        assert_eq!(outcome.rejected().len(), 2);
        assert!(outcome
            .rejected()
            .iter()
            .all(|r| r.reason == RejectionReason::SizeExhausted));
    }

    #[test]
    fn test_clearing_price_is_lowest_awarded() {
        let outcome = clear(
            AuctionParameters {
                total_size: 300,
                floor_price: dec!(90),
            },
            vec![
                bid_at("A", dec!(99), 100, 1),
                bid_at("B", dec!(97.5), 100, 2),
                bid_at("C", dec!(95), 100, 3),
            ],
        );

        assert_eq!(outcome.awarded().len(), 3);
        assert_eq!(outcome.clearing_price(), dec!(95));
        let min_awarded = outcome
            .awarded()
            .iter()
            .map(|a| a.bid.price())
            .min()
            .unwrap();
        assert_eq!(outcome.clearing_price(), min_awarded);
    }

    #[test]
    fn test_undersubscribed_leaves_size_unallocated() {
        let outcome = clear(
            AuctionParameters {
                total_size: 1000,
                floor_price: dec!(10),
            },
            vec![bid_at("A", dec!(12), 600, 1)],
        );

        assert_eq!(outcome.allocated_quantity(), 600);
        assert_eq!(outcome.unallocated_quantity(), 400);
        assert!(outcome.rejected().is_empty());
    }

    #[test]
    fn test_determinism() {
        let bids = vec![
            bid_at("A", dec!(12), 60, 1),
            bid_at("B", dec!(11), 50, 2),
            bid_at("C", dec!(10), 30, 3),
        ];
        let params = AuctionParameters {
            total_size: 100,
            floor_price: dec!(10),
        };
        let first = ClearingEngine::clear(&params, &rank_bids(&bids));
        let second = ClearingEngine::clear(&params, &rank_bids(&bids));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
