/*
[INPUT]:  API key (STOCKFIGHTER_API_KEY) and level name (first argument)
[OUTPUT]: Started level instance, its status, then stop acknowledgement
[POS]:    Examples - level orchestration
[UPDATE]: When level endpoints change
*/

use stockfighter_adapter::*;

/// Example: Start a level, adopt its account, check status and stop it
#[tokio::main]
async fn main() {
    println!("=== Stockfighter Level Example ===\n");

    let api_key = std::env::var("STOCKFIGHTER_API_KEY").unwrap_or_default();
    let level = std::env::args().nth(1).unwrap_or_else(|| "first_steps".to_string());

    let client = match StockfighterClient::new(api_key) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let instance = match client.start_level(&level).await {
        Ok(Outcome::Success(instance)) => instance,
        Ok(Outcome::Rejected(err)) => {
            println!("✗ Rejected: {}", err.error);
            return;
        }
        Err(e) => {
            println!("✗ Error: {}", e);
            return;
        }
    };
    println!(
        "✓ Level {} started: instance {} account {} venues {:?} tickers {:?}",
        level, instance.instance_id, instance.account, instance.venues, instance.tickers
    );
    client.set_account(instance.account.clone());

    match client.level_status(instance.instance_id).await {
        Ok(outcome) => println!("✓ Status: {:?}", outcome),
        Err(e) => println!("✗ Error: {}", e),
    }

    match client.stop_level(instance.instance_id).await {
        Ok(outcome) => println!("✓ Stopped: {}", outcome.is_ok()),
        Err(e) => println!("✗ Error: {}", e),
    }
}
