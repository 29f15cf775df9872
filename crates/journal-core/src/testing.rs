//! Test doubles for the core ports.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewPost, Post, PostChanges, Visibility};
use crate::error::RepoError;
use crate::metadata::PostMetadata;
use crate::ports::{
    BaseRepository, GenerationError, MetadataError, MetadataExtractor, PostRepository,
    TextGenerator,
};

/// Generator that replays scripted answers and records prompts.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Backend("no scripted reply".to_string())))
    }
}

/// Extractor that counts calls and either succeeds with fixed values or fails.
pub struct CountingExtractor {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingExtractor {
    pub fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataExtractor for CountingExtractor {
    async fn extract(&self, content: &str) -> Result<PostMetadata, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MetadataError::Failed("extractor offline".to_string()));
        }
        Ok(PostMetadata {
            title: "Generated Title".to_string(),
            category: "Family".to_string(),
            excerpt: "A generated excerpt that invites the reader in.".to_string(),
            read_time: crate::metadata::read_time(content),
        })
    }
}

/// Vec-backed post repository.
#[derive(Default)]
pub struct MemoryPosts {
    posts: Mutex<Vec<Post>>,
}

#[async_trait]
impl BaseRepository<Post, i32> for MemoryPosts {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn list(&self, visibility: Visibility) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| visibility.allows(p))
            .cloned()
            .collect();
        posts.reverse();
        Ok(posts)
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let now = Utc::now();
        let stored = Post {
            id: posts.len() as i32 + 1,
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            category: post.category,
            read_time: Some(post.read_time),
            date: Some(post.date),
            is_private: false,
            created_at: now,
            updated_at: now,
        };
        posts.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        changes.apply_to(post);
        Ok(Some(post.clone()))
    }

    async fn toggle_privacy(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.is_private = !post.is_private;
        post.touch();
        Ok(Some(post.clone()))
    }
}
