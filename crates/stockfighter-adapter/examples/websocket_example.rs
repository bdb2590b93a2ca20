/*
[INPUT]:  API key (STOCKFIGHTER_API_KEY), optional account (STOCKFIGHTER_ACCOUNT)
[OUTPUT]: Real-time quotes printed until Ctrl-C
[POS]:    Examples - WebSocket streaming
[UPDATE]: When adding new channels or changing stream handling
*/

use stockfighter_adapter::*;

/// Example: Stream the TESTEX tickertape
#[tokio::main]
async fn main() {
    println!("=== Stockfighter WebSocket Example ===\n");

    let api_key = std::env::var("STOCKFIGHTER_API_KEY").unwrap_or_default();
    let client = match StockfighterClient::new(api_key) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    if let Ok(account) = std::env::var("STOCKFIGHTER_ACCOUNT") {
        client.set_account(account);
    }

    let params = SubscriptionParams::tickertape().with_venue("TESTEX");
    let mut subscription = match client.subscribe(params) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to subscribe: {}", e);
            return;
        }
    };
    println!("Subscribed to {}\n", subscription.url());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = subscription.next() => match event {
                Some(StreamEvent::Open) => println!("✓ Stream open"),
                Some(StreamEvent::Message(StreamMessage::Quote(tick))) => {
                    let quote = tick.quote;
                    println!("{} {} bid={:?} ask={:?} last={:?}", quote.venue, quote.symbol, quote.bid, quote.ask, quote.last);
                }
                Some(StreamEvent::Message(StreamMessage::Execution(fill))) => println!("fill: {:?}", fill),
                Some(StreamEvent::Error(e)) => println!("✗ Stream error: {}", e),
                Some(StreamEvent::Closed) | None => break,
            },
        }
    }

    subscription.close().await;
    println!("\n✓ WebSocket example complete");
}
