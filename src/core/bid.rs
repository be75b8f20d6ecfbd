use crate::core::bidder::BidderId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sealed bid for a quantity of the offered asset.
///
/// Represents the fact that `bidder` is willing to buy `quantity` units
/// at up to `price` per unit. This is the atomic input of the clearing
/// engine.
///
/// Bids are immutable once created. A clearing run never mutates a bid;
/// it only classifies it as awarded or rejected. The `id` is an opaque
/// origin reference carried through to the allocation and settlement
/// boundary so the surrounding system can tie results back to whatever
/// record the bid came from.
///
/// # Examples
///
/// ```
/// use auction_engine::core::bid::Bid;
/// use auction_engine::core::bidder::BidderId;
/// use rust_decimal_macros::dec;
///
/// let bid = Bid::new(BidderId::new("ALPHA-AM"), dec!(99.25), 1_000_000);
///
/// assert_eq!(bid.quantity(), 1_000_000);
/// assert_eq!(bid.price(), dec!(99.25));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Opaque origin reference for this bid.
    id: Uuid,
    /// The party submitting the bid.
    bidder: BidderId,
    /// Limit price per unit. Only bids at or above the floor can win.
    price: Decimal,
    /// Requested quantity in asset units. Must be positive.
    quantity: u64,
    /// When this bid was submitted. Breaks ties between equal prices.
    submitted_at: DateTime<Utc>,
}

impl Bid {
    /// Create a new bid.
    ///
    /// # Panics
    ///
    /// Panics if `quantity` is zero.
    pub fn new(bidder: BidderId, price: Decimal, quantity: u64) -> Self {
        assert!(quantity > 0, "Bid quantity must be positive, got {}", quantity);
        Self {
            id: Uuid::new_v4(),
            bidder,
            price,
            quantity,
            submitted_at: Utc::now(),
        }
    }

    /// Create a bid with a specific origin reference (useful for testing / determinism).
    pub fn with_id(id: Uuid, bidder: BidderId, price: Decimal, quantity: u64) -> Self {
        assert!(quantity > 0);
        Self {
            id,
            bidder,
            price,
            quantity,
            submitted_at: Utc::now(),
        }
    }

    /// Set the submission timestamp.
    pub fn with_submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = at;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bidder(&self) -> &BidderId {
        &self.bidder
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// A collection of bids submitted to one auction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidSet {
    bids: Vec<Bid>,
}

impl BidSet {
    pub fn new() -> Self {
        Self { bids: Vec::new() }
    }

    pub fn add(&mut self, bid: Bid) {
        self.bids.push(bid);
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Total quantity demanded across all bids, regardless of price.
    pub fn total_demand(&self) -> u64 {
        self.bids.iter().map(|b| b.quantity()).sum()
    }

    /// All unique bidders referenced in this set.
    pub fn bidders(&self) -> Vec<BidderId> {
        let mut bidders: Vec<BidderId> =
            self.bids.iter().map(|b| b.bidder().clone()).collect();
        bidders.sort();
        bidders.dedup();
        bidders
    }
}

impl FromIterator<Bid> for BidSet {
    fn from_iter<T: IntoIterator<Item = Bid>>(iter: T) -> Self {
        Self {
            bids: iter.into_iter().collect(),
        }
    }
}
