/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | LOG_LEVEL | info | Tracing filter level |
/// | LOG_JSON | false | JSON log format (production) |
/// | LOG_DIR | unset | Directory for rotating file logs |
/// | ENVIRONMENT | development | Runtime environment |
/// | STORE_RETRY_LIMIT | 3 | Optimistic-concurrency retry bound |
/// | STALE_ORDER_MAX_AGE_MS | 86400000 | Age before a pending order counts as stale |
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
    /// Retries after a version conflict before giving up
    pub store_retry_limit: u32,
    /// Cutoff age for the stale-order collaborator query (milliseconds)
    pub stale_order_max_age_ms: i64,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            store_retry_limit: std::env::var("STORE_RETRY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            stale_order_max_age_ms: std::env::var("STALE_ORDER_MAX_AGE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400_000),
        }
    }

    /// Override selected fields, for tests
    pub fn with_overrides(log_level: impl Into<String>, store_retry_limit: u32) -> Self {
        let mut config = Self::from_env();
        config.log_level = log_level.into();
        config.store_retry_limit = store_retry_limit;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
