use std::sync::Arc;
use std::time::Instant;

use crate::ports::{GenerationError, TextGenerator};
use crate::prompts::ENHANCE_PROMPT;

/// Rewrites raw journal notes into polished prose.
pub struct TextEnhancer {
    generator: Arc<dyn TextGenerator>,
}

impl TextEnhancer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Send the persona prompt plus `raw` to the backend.
    ///
    /// The model's answer is returned untouched. Failures are not retried;
    /// callers decide whether to fall back to the original text.
    pub async fn enhance(&self, raw: &str) -> Result<String, GenerationError> {
        let prompt = ENHANCE_PROMPT.render(raw);
        tracing::debug!(
            prompt = ENHANCE_PROMPT.name,
            version = ENHANCE_PROMPT.version,
            input_chars = raw.chars().count(),
            "Requesting text enhancement"
        );

        let started = Instant::now();
        match self.generator.generate(&prompt).await {
            Ok(enhanced) => {
                tracing::info!(
                    duration_ms = started.elapsed().as_millis() as u64,
                    output_chars = enhanced.chars().count(),
                    "Text enhanced"
                );
                Ok(enhanced)
            }
            Err(err) => {
                tracing::error!(error = %err, "Text enhancement failed");
                Err(err)
            }
        }
    }
}
