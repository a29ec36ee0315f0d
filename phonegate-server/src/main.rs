//! phonegate login service

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phonegate_server::{
    routes, AppState, Config, HttpProfileFetcher, InMemoryStorage, SessionStorage, SqliteStorage,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phonegate_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(?config, "Loaded configuration");

    let storage: Box<dyn SessionStorage> = match &config.db_path {
        Some(path) => {
            tracing::info!(%path, "Using SQLite session storage");
            Box::new(SqliteStorage::open(path)?)
        }
        None => {
            tracing::info!("Using in-memory session storage");
            Box::new(InMemoryStorage::new())
        }
    };

    let fetcher = HttpProfileFetcher::new(config.profile_url.clone());
    let state = Arc::new(AppState::new(storage, fetcher));

    let app = routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
