use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::metadata::{PostMetadata, parse_metadata_response};
use crate::ports::{MetadataError, MetadataExtractor, TextGenerator};
use crate::prompts::METADATA_PROMPT;

/// Asks the generative backend for title, category and excerpt.
///
/// Backend failures and missing fields degrade to the deterministic
/// fallbacks, so extraction itself always succeeds.
pub struct GenerativeMetadataExtractor {
    generator: Arc<dyn TextGenerator>,
}

impl GenerativeMetadataExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl MetadataExtractor for GenerativeMetadataExtractor {
    async fn extract(&self, content: &str) -> Result<PostMetadata, MetadataError> {
        let prompt = METADATA_PROMPT.render(content);
        let started = Instant::now();

        let response = match self.generator.generate(&prompt).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "Metadata generation failed, using fallback");
                return Ok(PostMetadata::fallback(content));
            }
        };

        let parsed = parse_metadata_response(&response);
        if !parsed.is_complete() {
            tracing::warn!(
                missing = ?parsed.missing_fields(),
                "Metadata response incomplete, filling from content"
            );
        }

        let metadata = PostMetadata::from_parsed(parsed, content);
        tracing::debug!(
            duration_ms = started.elapsed().as_millis() as u64,
            title = %metadata.title,
            category = %metadata.category,
            read_time = %metadata.read_time,
            "Metadata generated"
        );
        Ok(metadata)
    }
}
