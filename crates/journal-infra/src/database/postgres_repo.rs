//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use journal_core::domain::{NewPost, Post, PostChanges, Visibility};
use journal_core::error::RepoError;
use journal_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::PostgresBaseRepository;
use super::resilient::repo_error;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, visibility: Visibility) -> Result<Vec<Post>, RepoError> {
        let rows = self
            .db
            .run(move |conn| async move {
                let mut query = PostEntity::find()
                    .order_by_desc(post::Column::CreatedAt)
                    .order_by_desc(post::Column::Id);
                if visibility == Visibility::PublicOnly {
                    query = query.filter(post::Column::IsPrivate.eq(false));
                }
                query.all(&*conn).await
            })
            .await
            .map_err(repo_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = self
            .db
            .run(move |conn| {
                let active: post::ActiveModel = new_post.clone().into();
                async move { active.insert(&*conn).await }
            })
            .await
            .map_err(repo_error)?;

        tracing::debug!(post_id = model.id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let result = self
            .db
            .run(move |conn| {
                let active = post::ActiveModel::from_changes(id, changes.clone());
                async move { active.update(&*conn).await }
            })
            .await;

        match result {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(e) => Err(repo_error(e)),
        }
    }

    async fn toggle_privacy(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let current: Option<Post> = BaseRepository::<Post, i32>::find_by_id(self, id).await?;
        let Some(current) = current else {
            return Ok(None);
        };

        let is_private = !current.is_private;
        let result = self
            .db
            .run(move |conn| {
                let active = post::ActiveModel::privacy(id, is_private);
                async move { active.update(&*conn).await }
            })
            .await;

        match result {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(e) => Err(repo_error(e)),
        }
    }
}
