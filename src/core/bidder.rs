use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a bidder participating in an auction.
///
/// A bidder can represent an asset manager, bank desk, treasury,
/// or any entity submitting bids for a tranche of the offered asset.
///
/// # Examples
///
/// ```
/// use auction_engine::core::bidder::BidderId;
///
/// let alpha = BidderId::new("ALPHA-AM");
/// let beta = BidderId::new("BETA-DESK");
/// assert_ne!(alpha, beta);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BidderId(String);

impl BidderId {
    /// Create a new bidder identifier.
    ///
    /// Convention: institution short name, optionally suffixed with the
    /// submitting desk (e.g., "ALPHA-AM", "GAMMA-RATES").
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this bidder ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BidderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BidderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
