//! Database access that survives dropped connections and flaky DNS.

use std::future::Future;
use std::sync::Arc;

use sea_orm::{DbConn, DbErr};

use journal_core::error::RepoError;

use super::connections::ConnectionManager;
use super::retry::{RetryPolicy, Sleeper, TokioSleeper, is_transient_message, retry_with_backoff};

pub fn is_transient(err: &DbErr) -> bool {
    matches!(err, DbErr::ConnectionAcquire(_)) || is_transient_message(&err.to_string())
}

/// Map a driver error onto the repository error vocabulary.
pub fn repo_error(err: DbErr) -> RepoError {
    if is_transient(&err) {
        return RepoError::Connection(err.to_string());
    }

    let message = err.to_string();
    if message.contains("duplicate") || message.contains("unique") {
        RepoError::Constraint(message)
    } else {
        RepoError::Query(message)
    }
}

/// Runs queries on the shared pool, retrying transient failures.
///
/// A transient failure also discards the pool, so the retry reconnects
/// from scratch rather than reusing a dead socket.
pub struct ResilientDb {
    manager: Arc<ConnectionManager>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl ResilientDb {
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self {
            manager,
            policy: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_retry(mut self, policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        self.policy = policy;
        self.sleeper = sleeper;
        self
    }

    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, DbErr>
    where
        T: Send,
        F: Fn(Arc<DbConn>) -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, DbErr>> + Send,
    {
        let manager = self.manager.as_ref();
        let op = &op;

        retry_with_backoff(&self.policy, self.sleeper.as_ref(), is_transient, move |_| async move {
            let conn = manager.connection().await?;
            let result = op(conn).await;
            if let Err(err) = &result {
                if is_transient(err) {
                    manager.invalidate().await;
                }
            }
            result
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        assert!(matches!(
            repo_error(DbErr::Custom("Connection terminated unexpectedly".into())),
            RepoError::Connection(_)
        ));
        assert!(matches!(
            repo_error(DbErr::Custom(
                "duplicate key value violates unique constraint \"blog_posts_pkey\"".into()
            )),
            RepoError::Constraint(_)
        ));
        assert!(matches!(
            repo_error(DbErr::Custom("syntax error at or near \"FROM\"".into())),
            RepoError::Query(_)
        ));
    }
}
