use clap::Parser;
use tracing_subscriber::EnvFilter;

use kinoteka_api::config::AppConfig;
use kinoteka_api::database::{DatabaseManager, Storage};
use kinoteka_api::services::Services;
use kinoteka_api::{app, AppState};

#[derive(Parser)]
#[command(name = "kinoteka-api")]
#[command(about = "Kinoteka - movie catalog REST API")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind, overrides API_HOST")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on, overrides API_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PG_* and SECURITY_* settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kinoteka_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    tracing::info!("Starting Kinoteka API in {:?} mode", config.environment);

    let manager = DatabaseManager::connect(&config.database).await?;
    let storage = Storage::postgres(manager.clone());
    let services = Services::new(&storage, &config);

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let state = AppState::new(services, storage.health.clone(), config);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Kinoteka API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    manager.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
