use hawk_eye::config::Config;
use hawk_eye::explorer::{EtherscanClient, TransactionSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae".to_string());

    println!("Querying {} for {}", config.explorer_api_url, address);
    let client = EtherscanClient::new(&config)?;

    let latest = client.fetch_transactions(&address, 1).await?;
    match latest.first() {
        Some(tx) => println!("✅ Latest: {} ({} {} at {})", tx.hash, tx.value, config.token_symbol, tx.timestamp),
        None => println!("No transactions for {}", address),
    }

    let recent = client.fetch_transactions(&address, config.history_limit).await?;
    println!("✅ {} recent transactions:", recent.len());
    for tx in recent {
        println!("  {} {} -> {} {:.6}", tx.hash, tx.sender, tx.receiver, tx.value);
    }

    Ok(())
}
