//! Undersubscribed auction example.
//!
//! Demonstrates the remainder path: when eligible demand falls short of
//! the offered size, the unsold balance returns to the seller intact.

use auction_engine::auction;
use auction_engine::auction::clearing::AuctionParameters;
use auction_engine::core::bid::{Bid, BidSet};
use auction_engine::core::bidder::BidderId;
use auction_engine::core::supply::FungibleSupply;
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  auction-engine: Undersubscribed Auction      ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    println!("Offered: 1000 units, floor price 98\n");
    println!("Bids:");
    println!("  ALPHA-AM    400 units @ 99.50");
    println!("  BETA-DESK   250 units @ 98.00");
    println!("  GAMMA-RATES 300 units @ 97.25  (below floor)\n");

    let mut set = BidSet::new();
    set.add(
        Bid::new(BidderId::new("ALPHA-AM"), dec!(99.50), 400)
            .with_submitted_at(Utc.timestamp_opt(1, 0).unwrap()),
    );
    set.add(
        Bid::new(BidderId::new("BETA-DESK"), dec!(98.00), 250)
            .with_submitted_at(Utc.timestamp_opt(2, 0).unwrap()),
    );
    set.add(
        Bid::new(BidderId::new("GAMMA-RATES"), dec!(97.25), 300)
            .with_submitted_at(Utc.timestamp_opt(3, 0).unwrap()),
    );

    let params = AuctionParameters {
        total_size: 1000,
        floor_price: dec!(98),
    };

    let result = auction::run(&params, &set, FungibleSupply::new(dec!(1000)))
        .expect("well-formed auction input");

    println!("{}", result.outcome);
    println!("{}", result.report);

    println!("━━━ Interpretation ━━━\n");
    println!("  Both eligible bids fill completely at the clearing price of 98,");
    println!("  the lowest winning limit. 350 units found no eligible demand and");
    println!("  return to the seller as a single remainder balance. Allocations");
    println!("  plus remainder equal the original 1000 exactly.");
}
