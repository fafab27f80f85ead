use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::ratelimit::RateLimits;
use crate::upload::UploadPolicy;

/// Shared application state injected into all route handlers via Axum extractors.
/// The pool and the rate-limit counters are the only state shared between
/// requests; handlers hold nothing across calls.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    pub uploads: UploadPolicy,
    pub rate_limits: Arc<RateLimits>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let uploads = UploadPolicy::from_config(&config);
        Self {
            db,
            config,
            uploads,
            rate_limits: Arc::new(RateLimits::default()),
        }
    }
}
