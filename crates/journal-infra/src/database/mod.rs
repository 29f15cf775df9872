//! Database connection management.

mod connections;
mod host;
mod memory;
mod retry;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;
#[cfg(feature = "postgres")]
mod resilient;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use host::{ConnectTarget, HostError, is_external_host, resolve_target};
pub use memory::InMemoryPostRepository;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper, is_transient_message, retry_with_backoff};

#[cfg(feature = "postgres")]
pub use connections::{ConnectionManager, Connector, PostgresConnector};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
#[cfg(feature = "postgres")]
pub use resilient::{ResilientDb, is_transient, repo_error};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
