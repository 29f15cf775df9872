use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, Visibility};
use crate::error::RepoError;

/// Generic repository trait for entities addressed by id.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Returns `false` when nothing matched.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Posts visible at the given level, newest first.
    async fn list(&self, visibility: Visibility) -> Result<Vec<Post>, RepoError>;

    /// Insert a post and return the stored row with its generated id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update. `None` when the id does not exist.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError>;

    /// Flip `is_private`. Read-modify-write, not atomic against concurrent togglers.
    async fn toggle_privacy(&self, id: i32) -> Result<Option<Post>, RepoError>;
}
