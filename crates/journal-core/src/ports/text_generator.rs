//! Generative text backend port.

use async_trait::async_trait;

/// A model that answers a single natural-language prompt with text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Generative backend failures, with user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid API key. Please check your Gemini API configuration.")]
    InvalidCredential,

    #[error("API quota exceeded. Please try again later.")]
    QuotaExceeded,

    #[error("Model not available. Please contact support.")]
    ModelUnavailable,

    #[error("Failed to generate text with AI: {0}")]
    Backend(String),
}

impl GenerationError {
    /// Classify a backend error message into one of the known causes.
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("api key") {
            GenerationError::InvalidCredential
        } else if lowered.contains("quota") {
            GenerationError::QuotaExceeded
        } else if lowered.contains("model") {
            GenerationError::ModelUnavailable
        } else {
            GenerationError::Backend(message.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_causes() {
        assert_eq!(
            GenerationError::classify("API key not valid. Please pass a valid API key."),
            GenerationError::InvalidCredential
        );
        assert_eq!(
            GenerationError::classify("You exceeded your current quota"),
            GenerationError::QuotaExceeded
        );
        assert_eq!(
            GenerationError::classify("models/gemini-9 is not found for API version v1beta"),
            GenerationError::ModelUnavailable
        );
    }

    #[test]
    fn test_classify_keeps_unknown_message() {
        let err = GenerationError::classify("connection closed before message completed");

        assert_eq!(
            err.to_string(),
            "Failed to generate text with AI: connection closed before message completed"
        );
    }
}
