/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with startup health check
/// - `migrations`: sqlx migration runner (schema lives in `migrations/`)

pub mod migrations;
pub mod pool;
