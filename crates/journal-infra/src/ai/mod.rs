//! Generative text backends.

mod gemini;

pub use gemini::{DEFAULT_BASE_URL, DisabledTextGenerator, GeminiConfig, GeminiTextGenerator};
