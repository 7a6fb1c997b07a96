//! Database connection management
//!
//! The pool is created lazily: no connection is opened until the first
//! query, and a dropped connection surfaces as a failed request.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL pool that connects on first use.
///
/// # Errors
///
/// Returns an error only if `database_url` can't be parsed.
///
/// # Example
///
/// ```ignore
/// let pool = create_lazy_pool("postgres://localhost/wishlists")?;
/// ```
pub fn create_lazy_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect_lazy(database_url)
}
