//! Opaque inference capability behind a trait
//!
//! The neural computation (tokenize, generate, decode) lives outside this
//! crate. The production implementation delegates to an inference sidecar
//! over HTTP; tests inject deterministic stubs.

use async_trait::async_trait;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::errors::{Result, TranslatorError};
use crate::core::models::LanguagePair;

/// A loaded tokenizer+model pair, one per language pair per environment
///
/// Translating a segment is atomic from the caller's perspective: tokenizer
/// and model failures are not distinguished, only surfaced as inference
/// failures.
#[async_trait]
pub trait ModelHandle: Send + Sync {
    /// Translate one text segment
    async fn translate(&self, text: &str) -> Result<String>;

    /// Model identifier, for logging
    fn model_id(&self) -> &str;
}

/// Loader for model handles, from a local directory or the public registry
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Load a handle from a materialized local cache entry
    async fn load_local(&self, pair: &LanguagePair, dir: &Path) -> Result<Arc<dyn ModelHandle>>;

    /// Load a handle directly from the public registry
    async fn load_registry(
        &self,
        pair: &LanguagePair,
        model_id: &str,
    ) -> Result<Arc<dyn ModelHandle>>;
}

/// Inference engine backed by an HTTP sidecar
#[derive(Debug, Clone)]
pub struct SidecarEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl SidecarEngine {
    /// Create an engine client against the sidecar endpoint
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Ask the sidecar to load a model, returning its session id
    async fn load(&self, body: serde_json::Value, origin: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/models/load", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslatorError::ModelLoad {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslatorError::ModelLoad {
                path: origin.to_string(),
                message: format!("status {}: {}", status, error_text),
            });
        }

        let json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| TranslatorError::ModelLoad {
                    path: origin.to_string(),
                    message: e.to_string(),
                })?;

        json["model_id"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| TranslatorError::ModelLoad {
                path: origin.to_string(),
                message: "No model_id in response".to_string(),
            })
    }
}

#[async_trait]
impl InferenceEngine for SidecarEngine {
    async fn load_local(&self, pair: &LanguagePair, dir: &Path) -> Result<Arc<dyn ModelHandle>> {
        let origin = dir.display().to_string();
        let body = json!({
            "source": "local",
            "pair": pair.slug(),
            "path": origin,
        });

        let model_id = self.load(body, &origin).await?;
        debug!("Loaded local model {} for {}", model_id, pair);

        Ok(Arc::new(SidecarHandle {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            model_id,
        }))
    }

    async fn load_registry(
        &self,
        pair: &LanguagePair,
        model_id: &str,
    ) -> Result<Arc<dyn ModelHandle>> {
        let body = json!({
            "source": "registry",
            "pair": pair.slug(),
            "model": model_id,
        });

        let model_id = self.load(body, model_id).await?;
        debug!("Loaded registry model {} for {}", model_id, pair);

        Ok(Arc::new(SidecarHandle {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            model_id,
        }))
    }
}

/// Handle to a model session held by the sidecar
#[derive(Debug, Clone)]
struct SidecarHandle {
    client: reqwest::Client,
    endpoint: String,
    model_id: String,
}

#[async_trait]
impl ModelHandle for SidecarHandle {
    async fn translate(&self, text: &str) -> Result<String> {
        let body = json!({
            "model_id": self.model_id,
            "text": text,
        });

        let response = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslatorError::Inference {
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslatorError::Inference {
                message: format!("status {}: {}", status, error_text),
            });
        }

        let json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| TranslatorError::Inference {
                    message: e.to_string(),
                })?;

        json["translation"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| TranslatorError::Inference {
                message: "No translation in response".to_string(),
            })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
