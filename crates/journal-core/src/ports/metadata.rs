use async_trait::async_trait;

use crate::metadata::PostMetadata;

/// Derives display metadata from post content.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, content: &str) -> Result<PostMetadata, MetadataError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Metadata extraction failed: {0}")]
    Failed(String),
}
