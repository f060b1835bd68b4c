//! Limit Book - demonstration binary
//!
//! Builds a small two-sided book and prints its depth ladder and state root.
//!
//! ```bash
//! LIMIT_BOOK_DEFAULT_DEPTH=3 RUST_LOG=limit_book=debug cargo run
//! ```

use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use limit_book::types::price;
use limit_book::{BookConfig, BookError, Order, OrderBook, Side};

/// (id, side, price, quantity, timestamp)
const DEMO_ORDERS: [(u64, Side, &str, u64, u64); 8] = [
    (1, Side::Buy, "99.50", 100, 1_000),
    (2, Side::Buy, "99.45", 200, 2_000),
    (3, Side::Buy, "99.40", 150, 3_000),
    (4, Side::Buy, "99.50", 50, 4_000),
    (5, Side::Sell, "100.00", 100, 5_000),
    (6, Side::Sell, "100.05", 200, 6_000),
    (7, Side::Sell, "100.10", 150, 7_000),
    (8, Side::Sell, "100.00", 75, 8_000),
];

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "limit_book=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), BookError> {
    let config = BookConfig::from_env()?;
    info!(
        order_capacity = config.order_capacity,
        depth = config.default_depth,
        "starting demo book"
    );

    let mut book = OrderBook::with_config(&config);
    for (id, side, px, quantity, timestamp) in DEMO_ORDERS {
        let price = price::to_fixed(px).ok_or(BookError::InvalidPrice { id })?;
        debug!(order_id = id, ?side, price = %price::from_fixed(price), quantity, "demo order");
        book.add(Order::new(id, side, price, quantity, timestamp))?;
    }

    info!(
        orders = book.total_orders(),
        bid_levels = book.bid_level_count(),
        ask_levels = book.ask_level_count(),
        "book loaded"
    );

    println!("{}", book.snapshot());
    println!("State root: {}", book.state_root_hex()?);
    Ok(())
}
