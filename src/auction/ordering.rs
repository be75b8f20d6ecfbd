use crate::core::bid::Bid;

/// A bid annotated with its position in the auction's total order.
///
/// Rank 0 is the most competitive bid. Only used transiently between
/// ordering and clearing; the rank is not part of any persisted result.
#[derive(Debug, Clone)]
pub struct RankedBid {
    /// Position in the total order, 0-based.
    pub rank: usize,
    /// The underlying bid.
    pub bid: Bid,
}

/// Produce the total order the clearing pass consumes.
///
/// Higher price ranks first; among equal prices, earlier submission
/// ranks first. Bids sharing both price and submission time keep their
/// input order (the sort is stable), so a given bid set always ranks
/// the same way.
///
/// The tie-break is load-bearing: when equal-priced bids straddle the
/// size boundary, the earlier submission takes the larger fill.
pub fn rank_bids(bids: &[Bid]) -> Vec<RankedBid> {
    let mut ordered: Vec<Bid> = bids.to_vec();
    ordered.sort_by(|a, b| {
        b.price()
            .cmp(&a.price())
            .then_with(|| a.submitted_at().cmp(&b.submitted_at()))
    });
    ordered
        .into_iter()
        .enumerate()
        .map(|(rank, bid)| RankedBid { rank, bid })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bidder::BidderId;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn bid_at(bidder: &str, price: rust_decimal::Decimal, quantity: u64, t: i64) -> Bid {
        Bid::new(BidderId::new(bidder), price, quantity)
            .with_submitted_at(Utc.timestamp_opt(t, 0).unwrap())
    }

    #[test]
    fn test_higher_price_ranks_first() {
        let bids = vec![
            bid_at("A", dec!(99), 100, 1),
            bid_at("B", dec!(101), 100, 2),
            bid_at("C", dec!(100), 100, 3),
        ];
        let ranked = rank_bids(&bids);
        assert_eq!(ranked[0].bid.bidder().as_str(), "B");
        assert_eq!(ranked[1].bid.bidder().as_str(), "C");
        assert_eq!(ranked[2].bid.bidder().as_str(), "A");
    }

    #[test]
    fn test_equal_price_earlier_submission_wins() {
        let bids = vec![
            bid_at("LATE", dec!(100), 100, 20),
            bid_at("EARLY", dec!(100), 100, 10),
        ];
        let ranked = rank_bids(&bids);
        assert_eq!(ranked[0].bid.bidder().as_str(), "EARLY");
        assert_eq!(ranked[1].bid.bidder().as_str(), "LATE");
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let bids = vec![
            bid_at("FIRST", dec!(100), 100, 10),
            bid_at("SECOND", dec!(100), 100, 10),
        ];
        let ranked = rank_bids(&bids);
        assert_eq!(ranked[0].bid.bidder().as_str(), "FIRST");
        assert_eq!(ranked[1].bid.bidder().as_str(), "SECOND");
    }

    #[test]
    fn test_ranks_are_sequential() {
        let bids = vec![
            bid_at("A", dec!(99), 100, 1),
            bid_at("B", dec!(101), 100, 2),
            bid_at("C", dec!(100), 100, 3),
        ];
        let ranked = rank_bids(&bids);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }
}
