pub mod allocation;
pub mod clearing;
pub mod ordering;
pub mod settlement;

use crate::core::bid::BidSet;
use crate::core::supply::FungibleSupply;
use allocation::{AllocationReport, AssetAllocator};
use clearing::{AuctionParameters, ClearingEngine, ClearingOutcome};
use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Caller contract violations caught at the auction boundary.
///
/// The clearing and allocation functions themselves assume well-formed
/// input; anything here must be rejected before the core runs, never
/// silently coerced.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bid {bid} has zero quantity")]
    ZeroQuantity { bid: Uuid },
    #[error("duplicate bid reference {bid}")]
    DuplicateBidRef { bid: Uuid },
    #[error("auction size must be positive when bids are present")]
    ZeroAuctionSize,
    #[error("supply {supply} does not match offered size {total_size}")]
    SupplyMismatch { supply: Decimal, total_size: u64 },
}

/// Check a bid set against the auction parameters.
///
/// `Bid::new` already refuses zero quantities, but bids arriving over a
/// serde boundary bypass the constructor, so the checks repeat here.
pub fn validate(params: &AuctionParameters, bids: &BidSet) -> Result<(), ValidationError> {
    if params.total_size == 0 && !bids.is_empty() {
        return Err(ValidationError::ZeroAuctionSize);
    }
    let mut seen = HashSet::new();
    for bid in bids.bids() {
        if bid.quantity() == 0 {
            return Err(ValidationError::ZeroQuantity { bid: bid.id() });
        }
        if !seen.insert(bid.id()) {
            return Err(ValidationError::DuplicateBidRef { bid: bid.id() });
        }
    }
    Ok(())
}

/// Combined result of one full auction run.
#[derive(Debug, Clone)]
pub struct AuctionResult {
    pub outcome: ClearingOutcome,
    pub report: AllocationReport,
}

/// Run one complete auction: validate, rank, clear, allocate.
///
/// The supply must carry exactly the advertised size; the remainder (if
/// any) returns to the caller inside the report.
pub fn run(
    params: &AuctionParameters,
    bids: &BidSet,
    supply: FungibleSupply,
) -> Result<AuctionResult, ValidationError> {
    validate(params, bids)?;
    if supply.quantity() != Decimal::from(params.total_size) {
        return Err(ValidationError::SupplyMismatch {
            supply: supply.quantity(),
            total_size: params.total_size,
        });
    }

    info!(
        "clearing {} bids against offered size {} (floor {})",
        bids.len(),
        params.total_size,
        params.floor_price
    );
    let ranked = ordering::rank_bids(bids.bids());
    let outcome = ClearingEngine::clear(params, &ranked);
    debug!(
        "allocated {} of {} at clearing price {}; {} rejected",
        outcome.allocated_quantity(),
        params.total_size,
        outcome.clearing_price(),
        outcome.rejected().len()
    );
    let report = AssetAllocator::allocate(supply, outcome.awarded());
    Ok(AuctionResult { outcome, report })
}
