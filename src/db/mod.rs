pub mod models;
pub mod reader;
pub mod writer;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::Result;

/// Opens the store and applies pending migrations.
/// A nightly run needs a single connection.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

/// In-memory store with the schema applied.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    connect("sqlite::memory:").await.expect("in-memory sqlite")
}
