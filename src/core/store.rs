//! Object store client for seeded model artifacts

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::core::errors::{Result, TranslatorError};

/// Key/value blob store for model artifacts
///
/// Failures are per-object: one missing key says nothing about the others.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the object at `key` into the local file `dest`
    async fn fetch(&self, key: &str, dest: &Path) -> Result<()>;

    /// Upload the local file `src` to the object at `key`
    async fn put(&self, src: &Path, key: &str) -> Result<()>;
}

/// Object store backed by an S3-compatible HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl HttpObjectStore {
    /// Create a store client for one bucket
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            bucket: bucket.into(),
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn fetch(&self, key: &str, dest: &Path) -> Result<()> {
        let url = self.object_url(key);
        debug!("Fetching {} -> {}", url, dest.display());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TranslatorError::ObjectFetch {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TranslatorError::ObjectFetch {
                key: key.to_string(),
                message: format!("status {}", response.status()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TranslatorError::ObjectFetch {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        tokio::fs::write(dest, &bytes).await?;

        Ok(())
    }

    async fn put(&self, src: &Path, key: &str) -> Result<()> {
        let url = self.object_url(key);
        debug!("Uploading {} -> {}", src.display(), url);

        let bytes = tokio::fs::read(src).await?;

        let response = self
            .client
            .put(&url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| TranslatorError::ObjectPut {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TranslatorError::ObjectPut {
                key: key.to_string(),
                message: format!("status {}", response.status()),
            });
        }

        Ok(())
    }
}
