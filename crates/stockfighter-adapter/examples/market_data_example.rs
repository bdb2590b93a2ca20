/*
[INPUT]:  API key (STOCKFIGHTER_API_KEY), venue and stock (default TESTEX / FOOBAR)
[OUTPUT]: Heartbeats, symbols, order book and quote
[POS]:    Examples - market data queries
[UPDATE]: When adding new market data endpoints
*/

use stockfighter_adapter::*;

/// Example: Query market data for the practice venue
#[tokio::main]
async fn main() {
    println!("=== Stockfighter Market Data Example ===\n");

    let api_key = std::env::var("STOCKFIGHTER_API_KEY").unwrap_or_default();
    let client = match StockfighterClient::new(api_key) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {} (set STOCKFIGHTER_API_KEY)", e);
            return;
        }
    };

    let venue = "TESTEX";
    let stock = "FOOBAR";

    println!("Checking API heartbeat...");
    match client.heartbeat().await {
        Ok(Outcome::Success(_)) => println!("✓ API is up"),
        Ok(Outcome::Rejected(err)) => println!("✗ API reports: {}", err.error),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nChecking venue {}...", venue);
    match client.venue_heartbeat(venue).await {
        Ok(outcome) => println!("✓ Venue: {:?}", outcome),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nListing stocks on {}...", venue);
    match client.venue_stocks(venue).await {
        Ok(Outcome::Success(listing)) => {
            for symbol in listing.symbols {
                println!("  {} - {}", symbol.symbol, symbol.name);
            }
        }
        Ok(Outcome::Rejected(err)) => println!("✗ Rejected: {}", err.error),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying order book for {}/{}...", venue, stock);
    match client.orderbook(venue, stock).await {
        Ok(outcome) => println!("✓ Book: {:?}", outcome),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying quote for {}/{}...", venue, stock);
    match client.quote(venue, stock).await {
        Ok(Outcome::Success(quote)) => {
            println!("✓ bid {:?} ask {:?} spread {:?}", quote.bid, quote.ask, quote.spread())
        }
        Ok(Outcome::Rejected(err)) => println!("✗ Rejected: {}", err.error),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
