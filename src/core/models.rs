//! Core data models for model provisioning

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum number of characters handed to the inference engine at once
pub const MAX_SEGMENT_CHARS: usize = 512;

/// Provider namespace used by the public model registry
pub const REGISTRY_NAMESPACE: &str = "Helsinki-NLP";

/// Files that together constitute one persisted translation model
pub const MODEL_ARTIFACTS: &[&str] = &[
    "pytorch_model.bin",
    "vocab.json",
    "tokenizer_config.json",
    "config.json",
];

/// A source/target language direction, used as the model cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    source: String,
    target: String,
}

impl LanguagePair {
    /// Create a pair from short language codes (e.g. "es", "en")
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Source language code
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Target language code
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Directory name of the local cache entry, `{source}-{target}`
    pub fn slug(&self) -> String {
        format!("{}-{}", self.source, self.target)
    }

    /// Local cache entry directory under the given scratch root
    pub fn cache_dir(&self, scratch_root: &Path) -> PathBuf {
        scratch_root.join(self.slug())
    }

    /// Object store key for one artifact, `models/{source}-{target}/{filename}`
    pub fn store_key(&self, filename: &str) -> String {
        format!("models/{}/{}", self.slug(), filename)
    }

    /// Canonical model id in the public registry
    pub fn registry_model_id(&self) -> String {
        format!("{}/opus-mt-{}", REGISTRY_NAMESPACE, self.slug())
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_names() {
        let pair = LanguagePair::new("es", "en");
        assert_eq!(pair.slug(), "es-en");
        assert_eq!(pair.store_key("vocab.json"), "models/es-en/vocab.json");
        assert_eq!(pair.registry_model_id(), "Helsinki-NLP/opus-mt-es-en");
        assert_eq!(
            pair.cache_dir(Path::new("/tmp")),
            PathBuf::from("/tmp/es-en")
        );
    }

    #[test]
    fn test_artifact_set_is_fixed() {
        assert_eq!(MODEL_ARTIFACTS.len(), 4);
        assert!(MODEL_ARTIFACTS.contains(&"pytorch_model.bin"));
    }
}
