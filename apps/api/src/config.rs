use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare `cargo run` serves locally.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub schema_path: String,
    pub upload_dir: String,
    pub public_dir: String,
    pub upload_max_mb: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite://db/core.db?mode=rwc"),
            schema_path: env_or("SCHEMA_PATH", "apps/api/schema.sql"),
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            public_dir: env_or("PUBLIC_DIR", "public"),
            upload_max_mb: env_or("UPLOAD_MAX_MB", "8")
                .parse::<u64>()
                .context("UPLOAD_MAX_MB must be a whole number of megabytes")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Upload size ceiling in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.upload_max_mb * 1024 * 1024
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
