/// Common test utilities for integration tests
///
/// Builds the full router against a lazily connected pool, so tests of the
/// authentication gate and request validation run without a live database:
/// those paths reject before any query executes.

use sqlx::postgres::PgPoolOptions;
use visionize_api::app::{build_router, AppState};
use visionize_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 5001,
            cors_origins: vec![],
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/visionize_test".to_string(),
            max_connections: 2,
        },
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            token_ttl_hours: 12,
        },
    }
}

/// Builds the application router without connecting to Postgres.
pub fn test_app() -> axum::Router {
    let config = test_config();
    let db = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_lazy(&config.database.url)
        .unwrap();

    build_router(AppState::new(db, config))
}

/// Issues a token signed with the test secret.
pub fn test_token() -> String {
    use visionize_shared::auth::jwt::{issue_token, Claims};

    let claims = Claims::new(uuid::Uuid::new_v4(), "test@example.com".to_string());
    issue_token(&claims, TEST_SECRET).unwrap()
}
