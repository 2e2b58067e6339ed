/// clipshelf - video hosting backend, thumbnail surface
///
/// Accepts authenticated thumbnail uploads for video records, persists them
/// through a pluggable blob store (inline data URL or asset file), and
/// serves them back with correct content negotiation.

mod api;
mod auth;
mod config;
mod context;
mod db;
mod error;
mod media_type;
mod metrics;
mod server;
mod thumbnail_store;

use config::ServerConfig;
use context::AppContext;
use error::ApiResult;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ApiResult<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Create application context
    let ctx = AppContext::new(config).await?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}
