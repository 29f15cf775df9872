//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod metadata;
mod rate_limit;
mod repository;
mod text_generator;

pub use auth::{AuthError, PasswordVerifier, SessionClaims, SessionService};
pub use metadata::{MetadataError, MetadataExtractor};
pub use rate_limit::{RateDecision, RateLimitError, RateLimiter};
pub use repository::{BaseRepository, PostRepository};
pub use text_generator::{GenerationError, TextGenerator};
