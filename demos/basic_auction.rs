//! Basic oversubscribed auction example.
//!
//! Demonstrates how the engine ranks bids, caps the marginal winner,
//! and charges every winner the same clearing price.

use auction_engine::auction;
use auction_engine::auction::clearing::AuctionParameters;
use auction_engine::auction::settlement::build_settlement_inputs;
use auction_engine::core::bid::{Bid, BidSet};
use auction_engine::core::bidder::BidderId;
use auction_engine::core::supply::FungibleSupply;
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  auction-engine: Basic Auction Example   ║");
    println!("╚══════════════════════════════════════════╝\n");

    // A 100-unit tranche with a floor of 10, demanded 140 units deep
    println!("Offered: 100 units, floor price 10\n");
    println!("Bids:");
    println!("  ALPHA-AM    60 units @ 12");
    println!("  BETA-DESK   50 units @ 11");
    println!("  GAMMA-RATES 30 units @ 10\n");

    let mut set = BidSet::new();
    set.add(
        Bid::new(BidderId::new("ALPHA-AM"), dec!(12), 60)
            .with_submitted_at(Utc.timestamp_opt(1, 0).unwrap()),
    );
    set.add(
        Bid::new(BidderId::new("BETA-DESK"), dec!(11), 50)
            .with_submitted_at(Utc.timestamp_opt(2, 0).unwrap()),
    );
    set.add(
        Bid::new(BidderId::new("GAMMA-RATES"), dec!(10), 30)
            .with_submitted_at(Utc.timestamp_opt(3, 0).unwrap()),
    );

    let params = AuctionParameters {
        total_size: 100,
        floor_price: dec!(10),
    };

    let result = auction::run(&params, &set, FungibleSupply::new(dec!(100)))
        .expect("well-formed auction input");

    println!("{}", result.outcome);
    println!("{}", result.report);

    println!("━━━ Settlement Inputs ━━━\n");
    let (instructions, notices) =
        build_settlement_inputs(&result.outcome, result.report.allocations());
    for instruction in &instructions {
        println!(
            "  {} receives {} units, pays {} ({} per unit)",
            instruction.bidder,
            instruction.quantity,
            instruction.payment_due,
            instruction.clearing_price
        );
    }
    for notice in &notices {
        println!("  {} receives nothing — {}", notice.bidder, notice.reason);
    }

    println!("\n━━━ Interpretation ━━━\n");
    println!("  ALPHA-AM fills completely; BETA-DESK takes the remaining 40 of");
    println!("  its 50 and sets the clearing price at 11. GAMMA-RATES bid an");
    println!("  eligible price but the size was already exhausted.");
}
