use std::sync::Arc;

use chrono::Local;

use crate::domain::{NewPost, Post, PostChanges, PostDraft, Visibility, display_date};
use crate::error::DomainError;
use crate::metadata::PostMetadata;
use crate::ports::{MetadataExtractor, PostRepository};

/// Author excerpts shorter than this (after trimming) are replaced.
const MIN_EXCERPT_CHARS: usize = 10;

/// Validates author input, merges generated metadata and persists posts.
pub struct PublishService {
    posts: Arc<dyn PostRepository>,
    metadata: Arc<dyn MetadataExtractor>,
}

impl PublishService {
    pub fn new(posts: Arc<dyn PostRepository>, metadata: Arc<dyn MetadataExtractor>) -> Self {
        Self { posts, metadata }
    }

    pub async fn list(&self, visibility: Visibility) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list(visibility).await?)
    }

    /// A private post is reported as absent to callers who may not see it.
    pub async fn get(&self, id: i32, visibility: Visibility) -> Result<Option<Post>, DomainError> {
        let post = self.posts.find_by_id(id).await?;
        Ok(post.filter(|p| visibility.allows(p)))
    }

    /// Create a post from the author's final content.
    ///
    /// Caller-supplied title and category win when non-blank; a supplied
    /// excerpt wins only with at least ten characters. Read time is always
    /// derived from the content.
    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let PostDraft {
            content,
            title,
            excerpt,
            category,
            date,
        } = draft;

        if content.trim().is_empty() {
            return Err(DomainError::Validation("Content is required".to_string()));
        }

        let date = non_blank(date).unwrap_or_else(|| display_date(Local::now().date_naive()));
        let metadata = self.metadata_for(&content).await;

        let post = NewPost {
            title: non_blank(title).unwrap_or(metadata.title),
            category: non_blank(category).unwrap_or(metadata.category),
            excerpt: accepted_excerpt(excerpt).unwrap_or(metadata.excerpt),
            read_time: metadata.read_time,
            date,
            content,
        };

        tracing::debug!(
            title_chars = post.title.chars().count(),
            content_chars = post.content.chars().count(),
            excerpt_chars = post.excerpt.chars().count(),
            category = %post.category,
            "Saving new post"
        );

        let saved = self.posts.create(post).await?;
        tracing::info!(post_id = saved.id, "Post created");
        Ok(saved)
    }

    /// Apply a partial update. New content regenerates metadata; anything
    /// else is stored as given.
    pub async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, DomainError> {
        if self.posts.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let PostChanges {
            title,
            content,
            excerpt,
            category,
            read_time,
            date,
        } = changes;

        let changes = match content {
            Some(content) => {
                if content.trim().is_empty() {
                    return Err(DomainError::Validation("Content cannot be empty".to_string()));
                }
                let metadata = self.metadata_for(&content).await;
                PostChanges {
                    title: Some(non_blank(title).unwrap_or(metadata.title)),
                    category: Some(non_blank(category).unwrap_or(metadata.category)),
                    excerpt: Some(accepted_excerpt(excerpt).unwrap_or(metadata.excerpt)),
                    read_time: Some(metadata.read_time),
                    date: non_blank(date),
                    content: Some(content),
                }
            }
            None => PostChanges {
                title: non_blank(title),
                category: non_blank(category),
                excerpt: accepted_excerpt(excerpt),
                read_time: non_blank(read_time),
                date: non_blank(date),
                content: None,
            },
        };

        let updated = self.posts.update(id, changes).await?;
        if updated.is_some() {
            tracing::info!(post_id = id, "Post updated");
        }
        Ok(updated)
    }

    /// `false` when no post had that id.
    pub async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let deleted = self.posts.delete(id).await?;
        if deleted {
            tracing::info!(post_id = id, "Post deleted");
        }
        Ok(deleted)
    }

    pub async fn toggle_privacy(&self, id: i32) -> Result<Option<Post>, DomainError> {
        let post = self.posts.toggle_privacy(id).await?;
        if let Some(post) = &post {
            tracing::info!(post_id = id, is_private = post.is_private, "Post privacy toggled");
        }
        Ok(post)
    }

    async fn metadata_for(&self, content: &str) -> PostMetadata {
        match self.metadata.extract(content).await {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!(error = %err, "Metadata extraction failed, summarizing content");
                PostMetadata::summary(content)
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn accepted_excerpt(excerpt: Option<String>) -> Option<String> {
    excerpt
        .map(|e| e.trim().to_string())
        .filter(|e| e.chars().count() >= MIN_EXCERPT_CHARS)
}
