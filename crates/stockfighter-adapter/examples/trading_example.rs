/*
[INPUT]:  API key (STOCKFIGHTER_API_KEY) and trading account (STOCKFIGHTER_ACCOUNT)
[OUTPUT]: Order placement, status and cancellation results
[POS]:    Examples - trading operations
[UPDATE]: When adding new trading endpoints
*/

use stockfighter_adapter::*;

/// Example: Place a limit buy on the practice venue, then cancel it
#[tokio::main]
async fn main() {
    println!("=== Stockfighter Trading Example ===\n");

    let api_key = std::env::var("STOCKFIGHTER_API_KEY").unwrap_or_default();
    let account = std::env::var("STOCKFIGHTER_ACCOUNT").unwrap_or_else(|_| "EXB123456".to_string());

    let client = match StockfighterClient::with_config(ClientConfig::new(api_key).with_account(account)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let order = OrderRequest::limit("TESTEX", "FOOBAR", 5142, 10);
    println!("Placing limit buy: {:?}", order);

    let status = match client.buy(&order).await {
        Ok(Outcome::Success(status)) => {
            println!("✓ Order {} open={} filled={}", status.id, status.open, status.total_filled);
            status
        }
        Ok(Outcome::Rejected(err)) => {
            println!("✗ Rejected: {}", err.error);
            return;
        }
        Err(e) => {
            println!("✗ Error: {}", e);
            return;
        }
    };

    println!("\nQuerying order status...");
    match client.order_status(&status.venue, &status.symbol, &status.id).await {
        Ok(outcome) => println!("✓ Status: {:?}", outcome),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nCancelling order...");
    match client.cancel_order(&status.venue, &status.symbol, &status.id).await {
        Ok(Outcome::Success(closed)) => println!("✓ Cancelled, open={}", closed.open),
        Ok(Outcome::Rejected(err)) => println!("✗ Rejected: {}", err.error),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nListing account orders...");
    match client.all_orders(&status.venue, None, None).await {
        Ok(Outcome::Success(orders)) => println!("✓ {} orders", orders.orders.len()),
        Ok(Outcome::Rejected(err)) => println!("✗ Rejected: {}", err.error),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
