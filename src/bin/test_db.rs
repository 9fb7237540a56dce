use hawk_eye::db::{alert, connection};
use hawk_eye::models::{ClassifiedAlert, Label, Transaction};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:test_alerts.db".to_string());

    println!("Establishing database connection to {}...", database_url);
    let pool = connection::establish_connection(&database_url).await?;
    println!("✅ Database connection established!");

    let test_alert = ClassifiedAlert {
        transaction: Transaction {
            hash: format!("0xtest{}", chrono::Utc::now().timestamp()),
            sender: "0x1111111111111111111111111111111111111111".to_string(),
            receiver: "0x2222222222222222222222222222222222222222".to_string(),
            value: 12.5,
            timestamp: chrono::Utc::now().timestamp(),
        },
        labels: vec![Label::KnownReceiver],
    };

    println!("Inserting test alert...");
    let first = alert::insert_alert(&pool, &test_alert).await?;
    println!("✅ First insert wrote a row: {}", first);

    println!("Inserting the same alert again...");
    let second = alert::insert_alert(&pool, &test_alert).await?;
    println!("✅ Second insert wrote a row: {} (expected false)", second);

    let (alerts, total) = alert::get_alerts(&pool, 0, 10).await?;
    println!("Found {} alerts (total count: {})", alerts.len(), total);
    for a in alerts {
        println!("Alert #{}: {} -> {} ({} ETH) [{}]", a.id, a.sender, a.receiver, a.value, a.labels);
    }

    println!("All checks completed!");
    Ok(())
}
