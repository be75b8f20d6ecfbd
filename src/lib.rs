//! # auction-engine
//!
//! Sealed-bid uniform-price auction clearing and exact allocation engine.
//!
//! Given a set of sealed bids for a fixed, divisible asset supply (a
//! bond tranche), this engine ranks the bids, decides which win fully or
//! partially at a single uniform clearing price, and partitions the
//! offered balance into exact sub-balances matching each winner — with
//! any leftover returned intact. Same bid set, same result, always.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: bids, bidders, fungible supply handles
//! - **auction** — Ordering, clearing, allocation, settlement boundary data
//! - **simulation** — Random bid generation for stress testing
//!
//! The pipeline: raw bids → rank → clear → allocate → settlement inputs.
//! Everything is pure and synchronous; the conservation law (allocations
//! plus remainder equal the original supply, exactly) is asserted on
//! every run.

pub mod auction;
pub mod core;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::auction::allocation::{Allocation, AllocationReport, AssetAllocator};
    pub use crate::auction::clearing::{
        AuctionParameters, ClearingEngine, ClearingOutcome, RejectionReason,
    };
    pub use crate::auction::ordering::rank_bids;
    pub use crate::core::bid::{Bid, BidSet};
    pub use crate::core::bidder::BidderId;
    pub use crate::core::supply::FungibleSupply;
}
