//! Application services - the publishing pipeline.

mod enhancer;
mod metadata;
mod publish;

pub use enhancer::TextEnhancer;
pub use metadata::GenerativeMetadataExtractor;
pub use publish::PublishService;
