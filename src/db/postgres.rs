use sqlx::{postgres::PgPoolOptions, PgPool};

/// Maximum concurrent connections held by the pool.
const MAX_CONNECTIONS: u32 = 5;

/// Creates a PostgreSQL connection pool
///
/// The pool is shared by every ranking request; the bulk aggregation path
/// issues a single query per request, the row-wise path one per candidate.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;

    Ok(pool)
}
