use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use cars_api::{
    auth::JwtAuth,
    config::{Config, StorageBackend},
    constants::API_NAME,
    handlers,
    repository::{CarStore, InMemoryCarStore, PgCarStore},
    state::AppState,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration (is JWT_SECRET set?)")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting Cars API server on port {}", API_NAME, config.server_port);

    let store: Arc<dyn CarStore> = match config.storage {
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("{} Connected to database", API_NAME);

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            tracing::info!("{} Database migrations completed", API_NAME);
            Arc::new(PgCarStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("{} Using in-memory storage; data is lost on restart", API_NAME);
            Arc::new(InMemoryCarStore::new())
        }
    };

    let auth = JwtAuth::new(
        &config.jwt_secret,
        config.jwt_issuer.as_deref(),
        config.required_role.clone(),
    );
    tracing::info!("{} Cars routes require role '{}'", API_NAME, auth.required_role());

    let app = handlers::app(AppState::new(store, auth));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
