//! # Journal Infrastructure
//!
//! Concrete implementations of the ports defined in `journal-core`:
//! the Gemini text generator, resilient PostgreSQL storage, writer sessions
//! and rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT sessions + Argon2 password check
//! - `rate-limit` - Rate limiting via governor

pub mod ai;
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use ai::{DisabledTextGenerator, GeminiConfig, GeminiTextGenerator};
pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{ConnectionManager, PostgresConnector, PostgresPostRepository, ResilientDb};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordVerifier, JwtSessionService, LockedPasswordVerifier, SessionConfig};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
