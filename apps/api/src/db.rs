use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// Creates and returns a SQLite connection pool.
/// For file-backed URLs the containing directory is created first, so a
/// fresh checkout starts without manual setup.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    if let Some(file) = database_url
        .strip_prefix("sqlite://")
        .map(|rest| rest.split('?').next().unwrap_or(rest))
    {
        if file != ":memory:" && !file.is_empty() {
            if let Some(parent) = Path::new(file).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("creating database directory {}", parent.display())
                    })?;
                }
            }
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .with_context(|| format!("connecting to {database_url}"))?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Applies the table definitions kept in an external schema file.
/// Statements are idempotent (`CREATE TABLE IF NOT EXISTS`), so this runs on
/// every startup.
pub async fn apply_schema(pool: &SqlitePool, schema_path: &str) -> Result<()> {
    let schema = std::fs::read_to_string(schema_path)
        .with_context(|| format!("reading schema from {schema_path}"))?;

    for statement in schema.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Schema applied from {schema_path}");
    Ok(())
}
