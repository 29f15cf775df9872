//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use journal_infra::ai::DEFAULT_BASE_URL;
use journal_infra::{DatabaseConfig, RateLimitConfig, SessionConfig};

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Generative text backend settings.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub enhance_model: String,
    pub metadata_model: String,
    pub timeout: Duration,
}

/// How the writer proves who they are.
#[derive(Debug, Clone, Default)]
pub struct WriterCredentials {
    pub password: Option<String>,
    /// Argon2 PHC string. Takes precedence over `password`.
    pub password_hash: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub production: bool,
    pub database: DatabaseConfig,
    pub gemini: GeminiSettings,
    pub writer: WriterCredentials,
    pub session: SessionConfig,
    pub ai_rate_limit: RateLimitConfig,
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let production = env::var("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        let database = DatabaseConfig {
            url: non_empty("DATABASE_URL"),
            fallback_url: non_empty("NEON_DATABASE_URL"),
            max_connections: parsed("DB_MAX_CONNECTIONS", 10),
            connect_timeout: Duration::from_secs(parsed("DB_CONNECT_TIMEOUT_SECS", 15)),
        };

        let gemini = GeminiSettings {
            api_key: non_empty("GEMINI_API_KEY"),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            enhance_model: env::var("GEMINI_ENHANCE_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-pro".to_string()),
            metadata_model: env::var("GEMINI_METADATA_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            timeout: Duration::from_secs(parsed("GEMINI_TIMEOUT_SECS", 60)),
        };

        let writer = WriterCredentials {
            password: non_empty("WRITER_PASSWORD"),
            password_hash: non_empty("WRITER_PASSWORD_HASH"),
        };

        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        if secret == DEFAULT_JWT_SECRET {
            if production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let session = SessionConfig {
            secret,
            expiration_hours: parsed("JWT_EXPIRATION_HOURS", 180 * 24),
            ..SessionConfig::default()
        };

        let ai_rate_limit = RateLimitConfig {
            max_requests: parsed("AI_RATE_LIMIT_MAX_REQUESTS", 20),
            window: Duration::from_secs(parsed("AI_RATE_LIMIT_WINDOW_SECS", 60)),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            production,
            database,
            gemini,
            writer,
            session,
            ai_rate_limit,
        }
    }
}
