//! auction-engine CLI
//!
//! Run a sealed-bid uniform-price auction from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Clear an auction from a JSON bid file
//! auction-engine clear --input auction.json
//!
//! # Output as JSON
//! auction-engine clear --input auction.json --format json
//!
//! # Generate a random bid file for testing
//! auction-engine generate --bids 30 --bidders 10
//! ```

use auction_engine::auction;
use auction_engine::auction::clearing::AuctionParameters;
use auction_engine::auction::settlement::build_settlement_inputs;
use auction_engine::core::bid::{Bid, BidSet};
use auction_engine::core::bidder::BidderId;
use auction_engine::core::supply::FungibleSupply;
use auction_engine::simulation::stress_test::{generate_random_bids, BidGeneratorConfig};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"auction-engine — sealed-bid uniform-price auction clearing and allocation

USAGE:
    auction-engine <COMMAND> [OPTIONS]

COMMANDS:
    clear       Clear an auction over a JSON bid file
    generate    Generate a random bid file (for testing)
    help        Show this message

OPTIONS (clear):
    --input <FILE>      Path to JSON auction file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --bids <N>          Number of bids (default: 30)
    --bidders <N>       Number of distinct bidders (default: 10)
    --size <N>          Offered size to embed in the file (default: 500000)
    --floor <PRICE>     Floor price to embed in the file (default: 95)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    auction-engine clear --input auction.json
    auction-engine clear --input auction.json --format json
    auction-engine generate --bids 50 --bidders 12 --output auction.json"#
    );
}

/// JSON schema for one input bid.
#[derive(serde::Deserialize)]
struct BidInput {
    bidder: String,
    price: String,
    quantity: u64,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
}

#[derive(serde::Deserialize)]
struct AuctionInput {
    total_size: u64,
    floor_price: String,
}

#[derive(serde::Deserialize)]
struct AuctionFile {
    auction: AuctionInput,
    bids: Vec<BidInput>,
}

/// JSON output schema for clearing results.
#[derive(serde::Serialize)]
struct ClearingOutput {
    clearing_price: String,
    allocated_quantity: u64,
    fill_percent: f64,
    valid: bool,
    awarded: Vec<AwardOutput>,
    rejected: Vec<RejectionOutput>,
    remainder: Option<String>,
}

#[derive(serde::Serialize)]
struct AwardOutput {
    bidder: String,
    limit_price: String,
    requested: u64,
    awarded: u64,
    balance: String,
    payment_due: String,
}

#[derive(serde::Serialize)]
struct RejectionOutput {
    bidder: String,
    limit_price: String,
    quantity: u64,
    reason: String,
}

fn load_auction(path: &str) -> (AuctionParameters, BidSet) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: AuctionFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "auction": {{ "total_size": 100, "floor_price": "10" }},
  "bids": [
    {{ "bidder": "ALPHA-AM", "price": "12", "quantity": 60 }}
  ]
}}"#
        );
        process::exit(1);
    });

    let floor_price: Decimal = file.auction.floor_price.parse().unwrap_or_else(|e| {
        eprintln!("Invalid floor price '{}': {}", file.auction.floor_price, e);
        process::exit(1);
    });
    let params = AuctionParameters {
        total_size: file.auction.total_size,
        floor_price,
    };

    let base = Utc::now();
    let mut set = BidSet::new();
    for (i, input) in file.bids.into_iter().enumerate() {
        let price: Decimal = input.price.parse().unwrap_or_else(|e| {
            eprintln!("Invalid price '{}': {}", input.price, e);
            process::exit(1);
        });
        if input.quantity == 0 {
            eprintln!("Bid from '{}' has zero quantity", input.bidder);
            process::exit(1);
        }
        // Bids without an explicit timestamp keep file order
        let submitted_at = input
            .submitted_at
            .unwrap_or(base + chrono::Duration::seconds(i as i64));
        set.add(
            Bid::new(BidderId::new(&input.bidder), price, input.quantity)
                .with_submitted_at(submitted_at),
        );
    }
    (params, set)
}

fn cmd_clear(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let (params, bids) = load_auction(&path);
    if params.total_size == 0 {
        eprintln!("Auction size must be positive");
        process::exit(1);
    }
    let supply = FungibleSupply::new(Decimal::from(params.total_size));

    let result = auction::run(&params, &bids, supply).unwrap_or_else(|e| {
        eprintln!("Invalid auction input: {}", e);
        process::exit(1);
    });
    let (instructions, _notices) =
        build_settlement_inputs(&result.outcome, result.report.allocations());

    if format == "json" {
        let awarded = result
            .outcome
            .awarded()
            .iter()
            .zip(&instructions)
            .map(|(award, instruction)| AwardOutput {
                bidder: award.bid.bidder().to_string(),
                limit_price: award.bid.price().to_string(),
                requested: award.bid.quantity(),
                awarded: award.awarded_quantity,
                balance: instruction.balance.to_string(),
                payment_due: instruction.payment_due.to_string(),
            })
            .collect();

        let rejected = result
            .outcome
            .rejected()
            .iter()
            .map(|rejection| RejectionOutput {
                bidder: rejection.bid.bidder().to_string(),
                limit_price: rejection.bid.price().to_string(),
                quantity: rejection.bid.quantity(),
                reason: rejection.reason.to_string(),
            })
            .collect();

        let output = ClearingOutput {
            clearing_price: result.outcome.clearing_price().to_string(),
            allocated_quantity: result.outcome.allocated_quantity(),
            fill_percent: result.outcome.fill_percent(),
            valid: result.outcome.is_valid(),
            awarded,
            rejected,
            remainder: result.report.remainder().map(|r| r.quantity().to_string()),
        };

        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", result.outcome);
        println!("{}", result.report);
    }
}

fn cmd_generate(args: &[String]) {
    let mut bid_count = 30usize;
    let mut bidder_count = 10usize;
    let mut total_size = 500_000u64;
    let mut floor = "95".to_string();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--bids" => {
                i += 1;
                bid_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--bids requires a number");
                    process::exit(1);
                });
            }
            "--bidders" => {
                i += 1;
                bidder_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--bidders requires a number");
                    process::exit(1);
                });
            }
            "--size" => {
                i += 1;
                total_size = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--size requires a number");
                    process::exit(1);
                });
            }
            "--floor" => {
                i += 1;
                floor = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--floor requires a price");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = BidGeneratorConfig {
        bid_count,
        bidder_count,
        ..Default::default()
    };

    let set = generate_random_bids(&config);

    #[derive(serde::Serialize)]
    struct OutputBid {
        bidder: String,
        price: String,
        quantity: u64,
        submitted_at: DateTime<Utc>,
    }

    #[derive(serde::Serialize)]
    struct OutputAuction {
        total_size: u64,
        floor_price: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        auction: OutputAuction,
        bids: Vec<OutputBid>,
    }

    let output = OutputFile {
        auction: OutputAuction {
            total_size,
            floor_price: floor,
        },
        bids: set
            .bids()
            .iter()
            .map(|bid| OutputBid {
                bidder: bid.bidder().to_string(),
                price: bid.price().to_string(),
                quantity: bid.quantity(),
                submitted_at: bid.submitted_at(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} bids from {} bidders → {}",
            set.len(),
            bidder_count,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "clear" => cmd_clear(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
