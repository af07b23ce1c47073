//! Temporal Market - Demo Binary
//!
//! Walks the built-in Time Nexus catalog through a short trading session:
//! seed, buy, sell, settle. Useful as a smoke check and as a worked
//! example of the submit/settle split.

use std::time::{SystemTime, UNIX_EPOCH};

use rust_decimal::Decimal;
use temporal_market::types::credits;
use temporal_market::{MarketEngine, OrderFilter, OrderRequest, PlayerWallet, ResourceCatalog, Side};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn main() {
    println!("===========================================");
    println!("  Temporal Market - Time Nexus Exchange");
    println!("===========================================");
    println!();

    let catalog = ResourceCatalog::time_nexus();
    let mut engine = MarketEngine::new(catalog);
    let mut wallet = PlayerWallet::new("traveler-1", credits::from_whole(1_000_000));

    let start = now_ms();
    let hour = 3_600_000;

    println!("Catalog:");
    for resource in engine.catalog().iter() {
        println!(
            "  {:<18} {:<20} base {} credits",
            resource.id, resource.name, resource.base_value
        );
    }
    println!();

    // Buy pressure lifts the crystal price
    let buy = OrderRequest::new(
        "temporal-crystal",
        50,
        Decimal::from(9_000),
        Side::Buy,
        "nexus",
        start + hour,
        wallet.id.clone(),
    );
    match engine.submit(buy, start) {
        Ok(receipt) => {
            println!(
                "Buy accepted:  order #{}, quote now {} credits",
                receipt.order_id,
                credits::format_credits(receipt.quote_price)
            );
        }
        Err(err) => println!("Buy rejected: {}", err),
    }

    // Heavier sell pressure pushes it back down
    let sell = OrderRequest::new(
        "temporal-crystal",
        200,
        Decimal::from(9_000),
        Side::Sell,
        "nexus",
        start + hour,
        wallet.id.clone(),
    );
    match engine.submit(sell, start + 1) {
        Ok(receipt) => {
            println!(
                "Sell accepted: order #{}, quote now {} credits",
                receipt.order_id,
                credits::format_credits(receipt.quote_price)
            );

            // Settlement is the caller's job, after the accepted receipt
            let open = engine.open_orders(&OrderFilter::any(), start + 1);
            let order = open
                .iter()
                .find(|o| o.id == receipt.order_id)
                .expect("accepted order is still open");
            wallet.credit(order.notional(), "listed 200 temporal-crystal", start + 1);
        }
        Err(err) => println!("Sell rejected: {}", err),
    }
    println!();

    let quote = engine
        .quote("temporal-crystal", "nexus")
        .expect("quote exists after accepted orders");
    println!("temporal-crystal @ nexus");
    println!("  current price: {} credits", credits::format_credits(quote.current_price));
    println!("  history:");
    for point in quote.history() {
        println!(
            "    {} credits at t+{}ms",
            credits::format_credits(point.price),
            point.timestamp_ms.saturating_sub(start)
        );
    }
    println!();

    println!(
        "Open orders: {}",
        engine.open_orders(&OrderFilter::any(), start + 2).len()
    );
    println!(
        "Wallet {}: {} credits across {} transactions",
        wallet.id,
        credits::format_credits(wallet.balance()),
        wallet.transactions().len()
    );
}
