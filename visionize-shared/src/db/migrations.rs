/// Database migration runner
///
/// Migrations live in `visionize-shared/migrations/` and are embedded at
/// compile time via `sqlx::migrate!`. The API server runs them on startup,
/// so a fresh database boots straight into a usable schema.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending migrations against the given pool.
///
/// Already-applied migrations are skipped; a failed migration is rolled back
/// and returned as an error.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
