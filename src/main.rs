// Load configuration (abort if credentials are missing)
// Set up logging
// Create database connection pool
// Build shared state (cache, watch-list)
// Optionally start the HTTP server
// Run the polling loop until Ctrl-C

use hawk_eye::{
    api, config::Config, db, explorer::EtherscanClient, notify::TelegramNotifier, pipeline, report,
    state::AppState,
};

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}. Ensure .env is properly configured.", e);
            return Err(e.into());
        }
    };

    let db_pool = db::connection::establish_connection(&config.database_url).await?;
    info!("Database connection established");

    // `hawk-eye report [path]` dumps the store and exits
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("report") {
        let path = args.next().unwrap_or_else(|| "transaction_report.txt".to_string());
        report::export_report(&db_pool, &path, &config.token_symbol).await?;
        db_pool.close().await;
        return Ok(());
    }

    let explorer = EtherscanClient::new(&config)?;
    let notifier = TelegramNotifier::new(&config)?;

    let state = Arc::new(AppState::new(config.clone(), db_pool.clone()));
    info!(
        "Watching {} addresses, threshold {} {}, max age {}s",
        state.watchlist.lock().await.len(),
        config.value_threshold,
        config.token_symbol,
        config.max_age_secs
    );

    let shutdown = CancellationToken::new();

    let server = if config.server_enabled {
        let app = api::create_router(state.clone());
        let addr = format!("{}:{}", config.server_host, config.server_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Starting server on {}", addr);

        let server_shutdown = shutdown.clone();
        Some(tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { server_shutdown.cancelled().await })
                .await;
            if let Err(e) = result {
                error!("HTTP server error: {}", e);
            }
        }))
    } else {
        None
    };

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C");
        }
        signal_shutdown.cancel();
    });

    pipeline::start_polling(state, explorer, notifier, shutdown).await;

    if let Some(server) = server {
        let _ = server.await;
    }
    db_pool.close().await;
    info!("Shut down cleanly");

    Ok(())
}
