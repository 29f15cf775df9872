//! # Journal Core
//!
//! The domain layer of the journal service.
//! Posts, ports, prompt templates, metadata heuristics and the publishing
//! pipeline. This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod metadata;
pub mod ports;
pub mod prompts;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use error::DomainError;
