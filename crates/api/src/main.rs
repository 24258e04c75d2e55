use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use facerate_api::config::ServerConfig;
use facerate_api::router::build_router;
use facerate_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facerate_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let pool = facerate_db::create_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Database connection pool created");

    facerate_db::health_check(&pool)
        .await
        .context("database health check failed")?;

    facerate_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let app = build_router(AppState { pool }, config.request_timeout_secs);

    let addr = SocketAddr::new(
        config.host.parse().context("invalid HOST")?,
        config.port,
    );
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
