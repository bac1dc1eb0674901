//! Environment-sourced application configuration (§6.3), loaded once at
//! startup via `clap`'s `env` derive attribute. No config file: this
//! service has no per-tenant config to persist, only process-level
//! connection settings.

use clap::Parser;

use crate::redis::draft_store::DEFAULT_DRAFT_TTL_SECONDS;

/// Process-wide configuration for the `sitecraftd` binary.
///
/// Every field is sourced from an environment variable of the same name
/// (upper-cased), with a default suitable for local development so the
/// service boots without any configuration at all.
#[derive(Debug, Clone, Parser)]
#[command(name = "sitecraftd-config")]
pub struct AppConfig {
    /// Draft store address, e.g. `redis://127.0.0.1:6379`.
    #[arg(long, env = "SITECRAFT_REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Relational store DSN. SQLite by default; any `sqlx` SQLite URL works.
    #[arg(long, env = "SITECRAFT_DATABASE_URL", default_value = "sqlite://sitecraft.db?mode=rwc")]
    pub database_url: String,

    /// Public base URL of the blob (logo asset) store's metadata API.
    #[arg(long, env = "SITECRAFT_ASSET_STORE_URL", default_value = "http://127.0.0.1:9090")]
    pub asset_store_url: String,

    /// Default sliding draft TTL, in seconds, applied when a create request
    /// omits one.
    #[arg(long, env = "SITECRAFT_DRAFT_TTL_SECONDS", default_value_t = DEFAULT_DRAFT_TTL_SECONDS)]
    pub draft_ttl_seconds: i64,

    /// Bind host for the HTTP server.
    #[arg(long, env = "SITECRAFT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Bind port for the HTTP server.
    #[arg(long, env = "SITECRAFT_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Shared secret required in the `X-Internal-Token` header on the
    /// commit endpoint (§6.1 "Commit authentication").
    #[arg(long, env = "SITECRAFT_INTERNAL_TOKEN")]
    pub internal_token: String,

    /// Comma-separated list of allowed CORS origins. Empty means "allow
    /// any origin", suitable only for local development.
    #[arg(long, env = "SITECRAFT_CORS_ORIGINS", default_value = "")]
    pub cors_origins: String,

    /// Enables OpenTelemetry trace export alongside structured logging.
    #[arg(long, env = "SITECRAFT_ENABLE_OTEL", default_value_t = false)]
    pub enable_otel: bool,
}

impl AppConfig {
    /// Parses the comma-separated `cors_origins` into a list, trimming
    /// whitespace and dropping empty entries.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
