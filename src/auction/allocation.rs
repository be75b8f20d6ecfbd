use crate::auction::clearing::AwardedBid;
use crate::core::bidder::BidderId;
use crate::core::supply::FungibleSupply;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One winner's exact share of the offered supply.
///
/// Carries the origin reference of the awarded bid so the settlement
/// layer can pair the balance back to the bid it fills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// Origin reference of the awarded bid.
    bid_ref: Uuid,
    /// The winning bidder.
    bidder: BidderId,
    /// The sub-balance carved out for this bid.
    balance: FungibleSupply,
}

impl Allocation {
    pub fn bid_ref(&self) -> Uuid {
        self.bid_ref
    }

    pub fn bidder(&self) -> &BidderId {
        &self.bidder
    }

    pub fn balance(&self) -> &FungibleSupply {
        &self.balance
    }

    pub fn quantity(&self) -> Decimal {
        self.balance.quantity()
    }
}

/// Result of partitioning one supply handle across the awarded bids.
///
/// The conservation law is the point of this type: allocations plus
/// remainder always equal the original supply, exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationReport {
    /// One allocation per awarded bid, in award order.
    allocations: Vec<Allocation>,
    /// Unconsumed supply, if demand at/above the floor fell short.
    remainder: Option<FungibleSupply>,
}

impl AllocationReport {
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn remainder(&self) -> Option<&FungibleSupply> {
        self.remainder.as_ref()
    }

    /// Total quantity handed out to winners.
    pub fn total_allocated(&self) -> Decimal {
        self.allocations.iter().map(|a| a.quantity()).sum()
    }

    /// Verify conservation against the original supply quantity:
    /// allocations plus remainder must equal it exactly.
    pub fn conserves(&self, original: Decimal) -> bool {
        let remainder = self
            .remainder
            .as_ref()
            .map(|r| r.quantity())
            .unwrap_or(Decimal::ZERO);
        self.total_allocated() + remainder == original
    }
}

impl std::fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Allocation Report ===")?;
        writeln!(f, "Allocations: {}", self.allocations.len())?;
        writeln!(f, "Distributed: {}", self.total_allocated())?;
        match &self.remainder {
            Some(rest) => writeln!(f, "Remainder:   {}", rest.quantity())?,
            None => writeln!(f, "Remainder:   none")?,
        }
        for allocation in &self.allocations {
            writeln!(
                f,
                "  {} receives {}",
                allocation.bidder(),
                allocation.quantity()
            )?;
        }
        Ok(())
    }
}

/// Splits the offered supply into exact sub-balances for each winner.
pub struct AssetAllocator;

impl AssetAllocator {
    /// Consume `supply` across `awarded` in award order.
    ///
    /// The supply handle is threaded linearly: each step either hands
    /// the whole current handle to the bid (exact match, decided by
    /// exact decimal equality) or splits off the awarded quantity and
    /// carries the rest forward. With no awarded bids the full supply
    /// comes back intact as the remainder.
    ///
    /// # Panics
    ///
    /// Panics if the awarded quantities demand more than the supply
    /// holds, or if the conservation law fails to hold afterwards. Both
    /// indicate a bug upstream, not a runtime condition to recover from.
    pub fn allocate(supply: FungibleSupply, awarded: &[AwardedBid]) -> AllocationReport {
        let original = supply.quantity();
        let mut current = Some(supply);
        let mut allocations = Vec::with_capacity(awarded.len());

        for award in awarded {
            let quantity = Decimal::from(award.awarded_quantity);
            let pool = current
                .take()
                .unwrap_or_else(|| panic!("supply exhausted before bid {}", award.bid.id()));
            assert!(
                quantity <= pool.quantity(),
                "awarded {} exceeds remaining supply {}",
                quantity,
                pool.quantity()
            );
            let balance = if pool.quantity() == quantity {
                pool
            } else {
                let (fragment, rest) = pool.split(quantity);
                current = Some(rest);
                fragment
            };
            allocations.push(Allocation {
                bid_ref: award.bid.id(),
                bidder: award.bid.bidder().clone(),
                balance,
            });
        }

        let report = AllocationReport {
            allocations,
            remainder: current,
        };
        assert!(
            report.conserves(original),
            "allocation does not conserve supply: {} distributed + {} remainder != {}",
            report.total_allocated(),
            report
                .remainder()
                .map(|r| r.quantity())
                .unwrap_or(Decimal::ZERO),
            original
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bid::Bid;
    use rust_decimal_macros::dec;

    fn award(bidder: &str, price: Decimal, quantity: u64, awarded: u64) -> AwardedBid {
        AwardedBid {
            bid: Bid::new(BidderId::new(bidder), price, quantity),
            awarded_quantity: awarded,
        }
    }

    #[test]
    fn test_empty_awards_return_supply_intact() {
        let supply = FungibleSupply::new(dec!(100));
        let id = supply.id();
        let report = AssetAllocator::allocate(supply, &[]);

        assert!(report.allocations().is_empty());
        let rest = report.remainder().unwrap();
        assert_eq!(rest.quantity(), dec!(100));
        assert_eq!(rest.id(), id);
    }

    #[test]
    fn test_split_then_remainder() {
        let supply = FungibleSupply::new(dec!(100));
        let awarded = vec![award("A", dec!(12), 60, 60), award("B", dec!(11), 50, 30)];
        let report = AssetAllocator::allocate(supply, &awarded);

        assert_eq!(report.allocations().len(), 2);
        assert_eq!(report.allocations()[0].quantity(), dec!(60));
        assert_eq!(report.allocations()[1].quantity(), dec!(30));
        assert_eq!(report.remainder().unwrap().quantity(), dec!(10));
        assert!(report.conserves(dec!(100)));
    }

    #[test]
    fn test_exact_match_consumes_whole_handle() {
        // Supply equals the two awards exactly: the final award takes
        // the whole current handle and no remainder is produced.
        let supply = FungibleSupply::new(dec!(100));
        let awarded = vec![award("A", dec!(12), 60, 60), award("B", dec!(11), 40, 40)];
        let report = AssetAllocator::allocate(supply, &awarded);

        assert_eq!(report.allocations().len(), 2);
        assert!(report.remainder().is_none());
        assert!(report.conserves(dec!(100)));
    }

    #[test]
    fn test_single_award_exact_match_keeps_handle_id() {
        let supply = FungibleSupply::new(dec!(60));
        let id = supply.id();
        let report = AssetAllocator::allocate(supply, &[award("A", dec!(12), 60, 60)]);

        assert_eq!(report.allocations()[0].balance().id(), id);
        assert!(report.remainder().is_none());
    }

    #[test]
    fn test_allocation_carries_origin_ref() {
        let supply = FungibleSupply::new(dec!(100));
        let awarded = vec![award("A", dec!(12), 60, 60)];
        let expected = awarded[0].bid.id();
        let report = AssetAllocator::allocate(supply, &awarded);

        assert_eq!(report.allocations()[0].bid_ref(), expected);
        assert_eq!(report.allocations()[0].bidder().as_str(), "A");
    }

    #[test]
    #[should_panic(expected = "exceeds remaining supply")]
    fn test_overdemand_aborts() {
        let supply = FungibleSupply::new(dec!(50));
        AssetAllocator::allocate(supply, &[award("A", dec!(12), 60, 60)]);
    }

    #[test]
    #[should_panic(expected = "supply exhausted")]
    fn test_award_after_exact_consumption_aborts() {
        let supply = FungibleSupply::new(dec!(60));
        AssetAllocator::allocate(
            supply,
            &[award("A", dec!(12), 60, 60), award("B", dec!(11), 10, 10)],
        );
    }
}
