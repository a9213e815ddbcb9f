//! Opus Translator - serverless-style translation endpoint
//!
//! This library lazily provisions machine-translation models from a warm
//! local cache, a remote object store, or the public model registry, and
//! translates arbitrarily long text in bounded, order-preserving segments.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    cache::ModelCacheManager,
    config::ServiceConfig,
    engine::{InferenceEngine, ModelHandle},
    errors::TranslatorError,
    models::{LanguagePair, MAX_SEGMENT_CHARS, MODEL_ARTIFACTS},
    store::ObjectStore,
    translator::ChunkedTranslator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
