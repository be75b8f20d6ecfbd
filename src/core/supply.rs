use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A fungible balance of the offered asset.
///
/// The seller's entire tranche enters a clearing run as one supply
/// handle, which the allocator splits into exact sub-balances for each
/// winning bid. A handle is a linear resource: `split` consumes it by
/// value, so a spent handle can never be re-split or double-counted.
/// At any point in an allocation run exactly one "current" handle is
/// outstanding.
///
/// Child handle ids are derived from the parent id, so re-running an
/// allocation over an identical supply handle reproduces identical
/// fragment ids.
///
/// # Examples
///
/// ```
/// use auction_engine::core::supply::FungibleSupply;
/// use rust_decimal_macros::dec;
///
/// let supply = FungibleSupply::new(dec!(100));
/// let (fragment, rest) = supply.split(dec!(60));
/// assert_eq!(fragment.quantity(), dec!(60));
/// assert_eq!(rest.quantity(), dec!(40));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleSupply {
    /// Opaque handle identifier.
    id: Uuid,
    /// Balance quantity in asset units. Always positive.
    quantity: Decimal,
}

impl FungibleSupply {
    /// Create a new supply handle.
    ///
    /// # Panics
    ///
    /// Panics if `quantity` is not positive.
    pub fn new(quantity: Decimal) -> Self {
        assert!(
            quantity > Decimal::ZERO,
            "Supply quantity must be positive, got {}",
            quantity
        );
        Self {
            id: Uuid::new_v4(),
            quantity,
        }
    }

    /// Create a supply handle with a specific ID (useful for testing / determinism).
    pub fn with_id(id: Uuid, quantity: Decimal) -> Self {
        assert!(quantity > Decimal::ZERO);
        Self { id, quantity }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Split this handle into a fragment of `quantity` and the rest.
    ///
    /// Consumes the handle; the two children replace it. Exact-quantity
    /// consumption is not a split — callers that need the whole balance
    /// take the handle itself (exact decimal equality decides which).
    ///
    /// # Panics
    ///
    /// Panics unless `0 < quantity < self.quantity`.
    pub fn split(self, quantity: Decimal) -> (FungibleSupply, FungibleSupply) {
        assert!(
            quantity > Decimal::ZERO && quantity < self.quantity,
            "Split quantity {} must be within (0, {})",
            quantity,
            self.quantity
        );
        let fragment = FungibleSupply {
            id: Uuid::new_v5(&self.id, b"fragment"),
            quantity,
        };
        let rest = FungibleSupply {
            id: Uuid::new_v5(&self.id, b"rest"),
            quantity: self.quantity - quantity,
        };
        (fragment, rest)
    }
}

impl fmt::Display for FungibleSupply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} units [{}]", self.quantity, self.id)
    }
}
