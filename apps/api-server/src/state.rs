//! Application state - shared across all handlers.

use std::sync::Arc;

use journal_core::ports::{
    AuthError, GenerationError, PasswordVerifier, PostRepository, RateLimitError, RateLimiter,
    SessionService, TextGenerator,
};
use journal_core::services::{GenerativeMetadataExtractor, PublishService, TextEnhancer};
use journal_infra::database::DatabaseConfig;
use journal_infra::{
    Argon2PasswordVerifier, DisabledTextGenerator, GeminiConfig, GeminiTextGenerator,
    InMemoryPostRepository, InMemoryRateLimiter, JwtSessionService, LockedPasswordVerifier,
};

#[cfg(feature = "postgres")]
use journal_infra::{ConnectionManager, PostgresConnector, PostgresPostRepository, ResilientDb};

use crate::config::{AppConfig, GeminiSettings, WriterCredentials};

/// Failures that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("text generator: {0}")]
    Generation(#[from] GenerationError),

    #[error("writer credentials: {0}")]
    Auth(#[from] AuthError),

    #[error("rate limiter: {0}")]
    RateLimit(#[from] RateLimitError),
}

/// Which store backs the posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    #[cfg_attr(not(feature = "postgres"), allow(dead_code))]
    Postgres,
    Memory,
}

impl Storage {
    pub fn as_str(self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PublishService>,
    pub enhancer: Arc<TextEnhancer>,
    pub sessions: Arc<dyn SessionService>,
    pub passwords: Arc<dyn PasswordVerifier>,
    pub ai_limiter: Arc<dyn RateLimiter>,
    pub storage: Storage,
    /// Set the `Secure` attribute on the session cookie.
    pub secure_cookies: bool,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let (repository, storage) = build_repository(&config.database);
        let (enhance_generator, metadata_generator) = build_generators(&config.gemini)?;

        let state = Self::assemble(
            repository,
            enhance_generator,
            metadata_generator,
            Arc::new(JwtSessionService::new(config.session.clone())),
            build_password_verifier(&config.writer)?,
            Arc::new(InMemoryRateLimiter::new(config.ai_rate_limit.clone())?),
        );

        tracing::info!(storage = storage.as_str(), "Application state initialized");

        Ok(Self {
            storage,
            secure_cookies: config.production,
            ..state
        })
    }

    /// Wire the services around already-built adapters.
    pub fn assemble(
        repository: Arc<dyn PostRepository>,
        enhance_generator: Arc<dyn TextGenerator>,
        metadata_generator: Arc<dyn TextGenerator>,
        sessions: Arc<dyn SessionService>,
        passwords: Arc<dyn PasswordVerifier>,
        ai_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        let extractor = Arc::new(GenerativeMetadataExtractor::new(metadata_generator));

        Self {
            posts: Arc::new(PublishService::new(repository, extractor)),
            enhancer: Arc::new(TextEnhancer::new(enhance_generator)),
            sessions,
            passwords,
            ai_limiter,
            storage: Storage::Memory,
            secure_cookies: false,
        }
    }
}

#[cfg(feature = "postgres")]
fn build_repository(config: &DatabaseConfig) -> (Arc<dyn PostRepository>, Storage) {
    if config.is_unconfigured() {
        tracing::warn!(
            "DATABASE_URL not set. Running without database (in-memory mode)."
        );
        return (Arc::new(InMemoryPostRepository::new()), Storage::Memory);
    }

    // Connects lazily on the first query.
    let connector = Arc::new(PostgresConnector::new(config.clone()));
    let manager = Arc::new(ConnectionManager::new(connector));
    let db = Arc::new(ResilientDb::new(manager));
    (Arc::new(PostgresPostRepository::new(db)), Storage::Postgres)
}

#[cfg(not(feature = "postgres"))]
fn build_repository(_config: &DatabaseConfig) -> (Arc<dyn PostRepository>, Storage) {
    tracing::info!("Running without postgres feature - using in-memory repository");
    (Arc::new(InMemoryPostRepository::new()), Storage::Memory)
}

fn build_generators(
    settings: &GeminiSettings,
) -> Result<(Arc<dyn TextGenerator>, Arc<dyn TextGenerator>), StartupError> {
    let Some(api_key) = &settings.api_key else {
        tracing::warn!("GEMINI_API_KEY not set. AI features are disabled.");
        let disabled: Arc<dyn TextGenerator> = Arc::new(DisabledTextGenerator);
        return Ok((disabled.clone(), disabled));
    };

    let gemini = |model: &str| -> Result<Arc<dyn TextGenerator>, GenerationError> {
        let config = GeminiConfig::new(api_key.clone(), model)
            .with_base_url(settings.base_url.clone())
            .with_timeout(settings.timeout);
        Ok(Arc::new(GeminiTextGenerator::new(config)?))
    };

    Ok((
        gemini(&settings.enhance_model)?,
        gemini(&settings.metadata_model)?,
    ))
}

fn build_password_verifier(
    writer: &WriterCredentials,
) -> Result<Arc<dyn PasswordVerifier>, StartupError> {
    match (&writer.password_hash, &writer.password) {
        (Some(hash), _) => Ok(Arc::new(Argon2PasswordVerifier::from_hash(hash.clone())?)),
        (None, Some(password)) => Ok(Arc::new(Argon2PasswordVerifier::from_password(password)?)),
        (None, None) => {
            tracing::warn!("WRITER_PASSWORD not set. Writer login is disabled.");
            Ok(Arc::new(LockedPasswordVerifier))
        }
    }
}
