//! Public model registry download client
//!
//! Used by the seeding tool to pull artifact files out of the registry before
//! uploading them to the object store. The runtime request path never calls
//! this directly; registry fallback at inference time goes through the engine.

use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::core::errors::{Result, TranslatorError};

/// HTTP client for the public model registry
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RegistryClient {
    /// Create a registry client against the given base endpoint
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Download one artifact of `model_id` into the local file `dest`
    pub async fn download(&self, model_id: &str, filename: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/{}/resolve/main/{}", self.endpoint, model_id, filename);
        info!("Downloading {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TranslatorError::ObjectFetch {
                key: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TranslatorError::ObjectFetch {
                key: url,
                message: format!("status {}", response.status()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TranslatorError::ObjectFetch {
                key: url,
                message: e.to_string(),
            })?;

        tokio::fs::write(dest, &bytes).await?;

        Ok(())
    }
}
