//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Configuration for the translation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Object store bucket holding seeded models; `None` disables remote fetch
    pub model_bucket: Option<String>,
    pub store_endpoint: String,
    pub scratch_root: PathBuf,
    pub registry_endpoint: String,
    pub inference_endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_bucket: None,
            store_endpoint: "http://localhost:9000".to_string(),
            scratch_root: PathBuf::from("/tmp"),
            registry_endpoint: "https://huggingface.co".to_string(),
            inference_endpoint: "http://localhost:8501".to_string(),
            timeout_ms: 30000,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let model_bucket = std::env::var("MODEL_BUCKET_NAME")
            .ok()
            .filter(|s| !s.is_empty());

        let store_endpoint = std::env::var("OBJECT_STORE_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());

        let scratch_root = std::env::var("SCRATCH_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"));

        let registry_endpoint = std::env::var("MODEL_REGISTRY_ENDPOINT")
            .unwrap_or_else(|_| "https://huggingface.co".to_string());

        let inference_endpoint = std::env::var("INFERENCE_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:8501".to_string());

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()?;

        Ok(Self {
            model_bucket,
            store_endpoint,
            scratch_root,
            registry_endpoint,
            inference_endpoint,
            timeout_ms,
        })
    }

    /// Load and validate configuration
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;

        match &config.model_bucket {
            Some(bucket) => info!("Model bucket configured: {}", bucket),
            None => info!("No model bucket configured, registry fallback only"),
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.scratch_root.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("scratch_root is required"));
        }

        if self.registry_endpoint.is_empty() {
            return Err(anyhow::anyhow!("registry_endpoint is required"));
        }

        if self.inference_endpoint.is_empty() {
            return Err(anyhow::anyhow!("inference_endpoint is required"));
        }

        if self.model_bucket.is_some() && self.store_endpoint.is_empty() {
            return Err(anyhow::anyhow!(
                "store_endpoint is required when a model bucket is configured"
            ));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.model_bucket.is_none());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = ServiceConfig {
            timeout_ms: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_requires_store_endpoint_with_bucket() {
        let config = ServiceConfig {
            model_bucket: Some("models".to_string()),
            store_endpoint: "".to_string(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }
}
