use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use inventory_web::config::AppConfig;
use inventory_web::AppState;

#[derive(Parser)]
#[command(name = "inventory-web")]
#[command(about = "Product inventory web application")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "SQLite database URL (overrides DATABASE_URL)")]
    database_url: Option<String>,

    #[arg(long, help = "Do not insert the sample products on startup")]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    if args.no_seed {
        config.bootstrap.seed_on_startup = false;
    }
    tracing::info!("Starting inventory in {:?} mode", config.environment);
    tracing::info!("REST access policy: {:?}", config.security.rest_access);

    let bind_addr = config.bind_addr();
    let state = AppState::build(config).await.context("startup failed")?;
    let database = state.database.clone();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Inventory listening on http://{}", listener.local_addr()?);

    axum::serve(listener, inventory_web::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
