use std::time::Duration;

#[cfg(feature = "postgres")]
use std::sync::Arc;

#[cfg(feature = "postgres")]
use async_trait::async_trait;
#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};
#[cfg(feature = "postgres")]
use tokio::sync::Mutex;

#[cfg(feature = "postgres")]
use super::host::resolve_target;

/// Configuration for the journal database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Primary URL (`DATABASE_URL`).
    pub url: Option<String>,
    /// Used when the primary host cannot be resolved (`NEON_DATABASE_URL`).
    pub fallback_url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// `true` when neither URL is set and storage must stay in memory.
    pub fn is_unconfigured(&self) -> bool {
        self.url.is_none() && self.fallback_url.is_none()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            fallback_url: None,
            max_connections: 10,
            connect_timeout: Duration::from_secs(15),
        }
    }
}

/// Opens a fresh database connection pool.
#[cfg(feature = "postgres")]
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Arc<DbConn>, DbErr>;
}

/// Lazily shared connection pool.
///
/// The first caller opens the pool and every later caller reuses it. Callers
/// that arrive while the pool is being opened wait for that attempt instead
/// of starting their own. A failed attempt leaves nothing cached, so the
/// next call tries again.
#[cfg(feature = "postgres")]
pub struct ConnectionManager {
    connector: Arc<dyn Connector>,
    slot: Mutex<Option<Arc<DbConn>>>,
}

#[cfg(feature = "postgres")]
impl ConnectionManager {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            slot: Mutex::new(None),
        }
    }

    pub async fn connection(&self) -> Result<Arc<DbConn>, DbErr> {
        let mut slot = self.slot.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(Arc::clone(conn));
        }

        let conn = self.connector.connect().await?;
        *slot = Some(Arc::clone(&conn));
        Ok(conn)
    }

    /// Drop the cached pool so the next call reconnects.
    ///
    /// The pool is closed here only when no query still holds it; otherwise
    /// it closes when the last holder drops it.
    pub async fn invalidate(&self) {
        let stale = self.slot.lock().await.take();
        let Some(conn) = stale else {
            return;
        };

        tracing::warn!("Discarding database connection pool");
        if let Ok(conn) = Arc::try_unwrap(conn) {
            if let Err(e) = conn.close().await {
                tracing::debug!(error = %e, "Error while closing stale pool");
            }
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}

/// Connects to PostgreSQL through SeaORM.
#[cfg(feature = "postgres")]
pub struct PostgresConnector {
    config: DatabaseConfig,
}

#[cfg(feature = "postgres")]
impl PostgresConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

#[cfg(feature = "postgres")]
#[async_trait]
impl Connector for PostgresConnector {
    async fn connect(&self) -> Result<Arc<DbConn>, DbErr> {
        let target = resolve_target(
            self.config.url.as_deref(),
            self.config.fallback_url.as_deref(),
        )
        .await
        .map_err(|e| DbErr::Custom(e.to_string()))?;

        tracing::info!(relaxed_tls = target.relaxed_tls, "Connecting to database...");

        let opts = ConnectOptions::new(target.url)
            .max_connections(self.config.max_connections)
            .connect_timeout(self.config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {})",
            self.config.max_connections
        );

        ensure_schema(&conn).await;
        Ok(Arc::new(conn))
    }
}

/// Add columns that older deployments may lack. Failures are logged only.
#[cfg(feature = "postgres")]
async fn ensure_schema(conn: &DbConn) {
    let result = conn
        .execute_unprepared(
            "ALTER TABLE blog_posts ADD COLUMN IF NOT EXISTS is_private BOOLEAN NOT NULL DEFAULT false",
        )
        .await;

    match result {
        Ok(_) => tracing::debug!("Schema check complete"),
        Err(e) => tracing::warn!(error = %e, "Schema check failed, continuing"),
    }
}
