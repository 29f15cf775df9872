#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use sea_orm::{DatabaseBackend, DbConn, DbErr, MockDatabase, MockExecResult};

    use crate::database::connections::{ConnectionManager, Connector};
    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use crate::database::resilient::ResilientDb;
    use crate::database::retry::{RetryPolicy, TokioSleeper};
    use journal_core::domain::{Post, PostChanges, Visibility};
    use journal_core::error::RepoError;
    use journal_core::ports::{BaseRepository, PostRepository};

    /// Hands out one shared mock connection and counts reconnects.
    struct MockConnector {
        conn: Arc<DbConn>,
        connects: AtomicU32,
    }

    #[async_trait]
    impl Connector for MockConnector {
        async fn connect(&self) -> Result<Arc<DbConn>, DbErr> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::clone(&self.conn))
        }
    }

    fn repo_over(db: MockDatabase) -> (PostgresPostRepository, Arc<MockConnector>) {
        let connector = Arc::new(MockConnector {
            conn: Arc::new(db.into_connection()),
            connects: AtomicU32::new(0),
        });
        let manager = Arc::new(ConnectionManager::new(connector.clone()));
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::ZERO,
        };
        let resilient = ResilientDb::new(manager).with_retry(policy, Arc::new(TokioSleeper));
        (PostgresPostRepository::new(Arc::new(resilient)), connector)
    }

    fn row(id: i32, title: &str, is_private: bool) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            title: title.to_owned(),
            content: "We walked to the river.".to_owned(),
            excerpt: "We walked to the river.".to_owned(),
            category: "Family".to_owned(),
            read_time: Some("1 min read".to_owned()),
            date: Some("May 4, 2025".to_owned()),
            is_private,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row(5, "Test Post", false)]]);
        let (repo, _) = repo_over(db);

        let result = BaseRepository::<Post, i32>::find_by_id(&repo, 5).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 5);
        assert_eq!(post.date.as_deref(), Some("May 4, 2025"));
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results(vec![vec![
            row(2, "Second", true),
            row(1, "First", false),
        ]]);
        let (repo, _) = repo_over(db);

        let posts = repo.list(Visibility::All).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Second");
        assert!(posts[0].is_private);
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]);
        let (repo, _) = repo_over(db);

        assert!(BaseRepository::<Post, i32>::delete(&repo, 3).await.unwrap());
        assert!(!BaseRepository::<Post, i32>::delete(&repo, 3).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()]);
        let (repo, _) = repo_over(db);

        let changes = PostChanges {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let result = repo.update(42, changes).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_toggle_privacy_flips_flag() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results(vec![
            vec![row(7, "Quiet", false)],
            vec![row(7, "Quiet", true)],
        ]);
        let (repo, _) = repo_over(db);

        let post = repo.toggle_privacy(7).await.unwrap().unwrap();

        assert!(post.is_private);
    }

    #[tokio::test]
    async fn test_transient_failure_reconnects_and_retries() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "Connection terminated unexpectedly".to_owned(),
            )])
            .append_query_results(vec![vec![row(1, "After retry", false)]]);
        let (repo, connector) = repo_over(db);

        let posts = repo.list(Visibility::PublicOnly).await.unwrap();

        assert_eq!(posts[0].title, "After retry");
        assert_eq!(connector.connects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_transient_failure_is_not_retried() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_errors(vec![
            DbErr::Custom("relation \"blog_posts\" does not exist".to_owned()),
        ]);
        let (repo, connector) = repo_over(db);

        let err = repo.list(Visibility::All).await.unwrap_err();

        assert!(matches!(err, RepoError::Query(_)));
        assert_eq!(connector.connects.load(Ordering::SeqCst), 1);
    }
}
