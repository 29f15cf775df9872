//! In-memory post repository - used when no database URL is configured.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use journal_core::domain::{NewPost, Post, PostChanges, Visibility};
use journal_core::error::RepoError;
use journal_core::ports::{BaseRepository, PostRepository};

/// Post store backed by a `Vec` behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    next_id: AtomicI32,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, visibility: Visibility) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        let mut visible: Vec<Post> = posts
            .iter()
            .filter(|p| visibility.allows(p))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(visible)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: new_post.title,
            content: new_post.content,
            excerpt: new_post.excerpt,
            category: new_post.category,
            read_time: Some(new_post.read_time),
            date: Some(new_post.date),
            is_private: false,
            created_at: now,
            updated_at: now,
        };

        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        changes.apply_to(post);
        Ok(Some(post.clone()))
    }

    async fn toggle_privacy(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.is_private = !post.is_private;
        post.touch();
        Ok(Some(post.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "Rain on the tin roof.".to_string(),
            excerpt: "Rain on the tin roof.".to_string(),
            category: "Reflections".to_string(),
            read_time: "1 min read".to_string(),
            date: "March 2, 2025".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryPostRepository::new();

        let first = repo.create(new_post("First")).await.unwrap();
        let second = repo.create(new_post("Second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.is_private);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_hides_private() {
        let repo = InMemoryPostRepository::new();
        let first = repo.create(new_post("First")).await.unwrap();
        repo.create(new_post("Second")).await.unwrap();
        repo.toggle_privacy(first.id).await.unwrap();

        let all = repo.list(Visibility::All).await.unwrap();
        let public = repo.list(Visibility::PublicOnly).await.unwrap();

        assert_eq!(
            all.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            vec!["Second", "First"]
        );
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].title, "Second");
    }

    #[tokio::test]
    async fn test_update_missing_post_returns_none() {
        let repo = InMemoryPostRepository::new();

        let result = repo.update(99, PostChanges::default()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_and_advances_timestamp() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("First")).await.unwrap();

        let once = repo.toggle_privacy(post.id).await.unwrap().unwrap();
        let twice = repo.toggle_privacy(post.id).await.unwrap().unwrap();

        assert!(once.is_private);
        assert!(!twice.is_private);
        assert!(once.updated_at > post.updated_at);
        assert!(twice.updated_at > once.updated_at);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("First")).await.unwrap();

        assert!(repo.delete(post.id).await.unwrap());
        assert!(!repo.delete(post.id).await.unwrap());
        assert!(repo.find_by_id(post.id).await.unwrap().is_none());
    }
}
