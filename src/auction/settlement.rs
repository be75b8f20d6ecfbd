//! Input data for the external settlement builder.
//!
//! The engine stops at the data handed to delivery-versus-payment
//! instruction construction: one record per winner pairing its awarded
//! bid with the allocated balance and the payment it owes at the
//! uniform clearing price, plus one notice per rejected bid.
//! Instruction execution, cash locking, and ledger semantics live
//! outside this crate.

use crate::auction::allocation::Allocation;
use crate::auction::clearing::{ClearingOutcome, RejectionReason};
use crate::core::bidder::BidderId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the settlement builder needs for one winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementInstruction {
    /// Origin reference of the awarded bid.
    pub bid_ref: Uuid,
    /// The winning bidder, owed delivery and owing payment.
    pub bidder: BidderId,
    /// Handle of the sub-balance to deliver.
    pub balance: Uuid,
    /// Units delivered.
    pub quantity: Decimal,
    /// Uniform price per unit.
    pub clearing_price: Decimal,
    /// Payment obligation: clearing price times quantity.
    pub payment_due: Decimal,
}

/// Notice for one losing bid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionNotice {
    pub bid_ref: Uuid,
    pub bidder: BidderId,
    pub reason: RejectionReason,
}

/// Pair each awarded bid 1:1 with its allocation, by origin reference.
///
/// The allocator emits allocations in award order, so the pairing is
/// positional and the origin refs are asserted to line up. Returns the
/// winner instructions and the rejection notices.
///
/// # Panics
///
/// Panics if `allocations` does not match `outcome.awarded()` one to
/// one — that pairing is produced upstream and a mismatch is a bug.
pub fn build_settlement_inputs(
    outcome: &ClearingOutcome,
    allocations: &[Allocation],
) -> (Vec<SettlementInstruction>, Vec<RejectionNotice>) {
    assert_eq!(
        outcome.awarded().len(),
        allocations.len(),
        "every awarded bid needs exactly one allocation"
    );

    let instructions = outcome
        .awarded()
        .iter()
        .zip(allocations)
        .map(|(award, allocation)| {
            assert_eq!(
                award.bid.id(),
                allocation.bid_ref(),
                "allocation order does not match award order"
            );
            let quantity = allocation.quantity();
            SettlementInstruction {
                bid_ref: award.bid.id(),
                bidder: award.bid.bidder().clone(),
                balance: allocation.balance().id(),
                quantity,
                clearing_price: outcome.clearing_price(),
                payment_due: outcome.clearing_price() * quantity,
            }
        })
        .collect();

    let notices = outcome
        .rejected()
        .iter()
        .map(|rejection| RejectionNotice {
            bid_ref: rejection.bid.id(),
            bidder: rejection.bid.bidder().clone(),
            reason: rejection.reason,
        })
        .collect();

    (instructions, notices)
}
