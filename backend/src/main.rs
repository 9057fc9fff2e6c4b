use std::sync::Arc;

use anyhow::Context;

mod bot;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod routes;
mod scoring;
mod services;

use bot::TelegramClient;
use config::Config;
use db::{PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
    pub telegram: Option<TelegramClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sleeplog_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    // Database
    let pool = db::pool::create_pool(&config)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let telegram = match &config.telegram_bot_token {
        Some(token) => Some(TelegramClient::new(&config.telegram_api_url, token)?),
        None => {
            tracing::warn!("TELEGRAM_BOT_TOKEN not set, bot replies are disabled");
            None
        }
    };

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        config: config.clone(),
        telegram,
    };

    let app = routes::router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
