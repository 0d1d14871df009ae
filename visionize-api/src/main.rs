//! # Visionize API Server
//!
//! REST API for the Visionize project management service:
//! - Authentication (signup, signin, JWT sessions)
//! - Project CRUD with member management
//! - Task CRUD scoped to projects
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p visionize-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visionize_api::{app, config::Config};
use visionize_shared::db::{migrations, pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visionize_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Visionize API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let addr = config.bind_address();
    let router = app::build_router(app::AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
