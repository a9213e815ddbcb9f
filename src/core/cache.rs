//! Model cache manager with ordered provisioning fallback

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::core::config::ServiceConfig;
use crate::core::engine::{InferenceEngine, ModelHandle, SidecarEngine};
use crate::core::errors::{Result, TranslatorError};
use crate::core::models::{LanguagePair, MODEL_ARTIFACTS};
use crate::core::store::{HttpObjectStore, ObjectStore};

/// Resolves language pairs to ready model handles
///
/// Provisioning sources are tried in order: in-memory handle, local cache
/// entry on disk, object store fetch plus local load, public registry. Every
/// failure before the last source is absorbed into the next attempt; only
/// exhausting all of them fails the resolution.
pub struct ModelCacheManager {
    scratch_root: PathBuf,
    store: Option<Arc<dyn ObjectStore>>,
    engine: Arc<dyn InferenceEngine>,
    handles: Mutex<HashMap<LanguagePair, Arc<dyn ModelHandle>>>,
}

impl ModelCacheManager {
    /// Create a manager with injected collaborators
    pub fn new(
        scratch_root: impl Into<PathBuf>,
        store: Option<Arc<dyn ObjectStore>>,
        engine: Arc<dyn InferenceEngine>,
    ) -> Self {
        Self {
            scratch_root: scratch_root.into(),
            store,
            engine,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Wire up production collaborators from configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let store: Option<Arc<dyn ObjectStore>> = match &config.model_bucket {
            Some(bucket) => Some(Arc::new(HttpObjectStore::new(
                &config.store_endpoint,
                bucket,
                config.timeout_ms,
            )?)),
            None => None,
        };

        let engine = Arc::new(SidecarEngine::new(
            &config.inference_endpoint,
            config.timeout_ms,
        )?);

        Ok(Self::new(config.scratch_root.clone(), store, engine))
    }

    /// Resolve a ready model handle for the given language pair
    ///
    /// Idempotent: at most one handle and one local cache entry are ever
    /// created per pair in a given environment. The handle map lock is held
    /// across provisioning so overlapping resolutions of the same pair
    /// cannot create divergent entries.
    pub async fn resolve(&self, pair: &LanguagePair) -> Result<Arc<dyn ModelHandle>> {
        let mut handles = self.handles.lock().await;

        if let Some(handle) = handles.get(pair) {
            debug!("Reusing in-memory handle for {}", pair);
            return Ok(Arc::clone(handle));
        }

        let handle = self.provision(pair).await?;
        handles.insert(pair.clone(), Arc::clone(&handle));

        Ok(handle)
    }

    /// Run the ordered fallback chain for a pair with no in-memory handle
    async fn provision(&self, pair: &LanguagePair) -> Result<Arc<dyn ModelHandle>> {
        let dir = pair.cache_dir(&self.scratch_root);

        // Warm environment: the entry was materialized by an earlier invocation
        if dir.is_dir() {
            match self.engine.load_local(pair, &dir).await {
                Ok(handle) => {
                    debug!("Loaded {} from warm cache entry {}", pair, dir.display());
                    return Ok(handle);
                }
                Err(e) => {
                    warn!("Warm cache load failed for {}: {}", pair, e);
                }
            }
        }

        if let Some(store) = &self.store {
            info!("Fetching {} artifacts from object store", pair);
            self.fetch_artifacts(store.as_ref(), pair, &dir).await;

            match self.engine.load_local(pair, &dir).await {
                Ok(handle) => {
                    info!("Loaded {} from fetched cache entry", pair);
                    return Ok(handle);
                }
                Err(e) => {
                    warn!("Load from fetched artifacts failed for {}: {}", pair, e);
                }
            }
        }

        let model_id = pair.registry_model_id();
        info!("Falling back to registry model {}", model_id);

        self.engine
            .load_registry(pair, &model_id)
            .await
            .map_err(|e| {
                warn!("Registry load failed for {}: {}", model_id, e);
                TranslatorError::ModelUnavailable { model: model_id }
            })
    }

    /// Best-effort fetch of every artifact into the local cache entry
    ///
    /// Per-file failures are logged and skipped: a subsequent load attempt
    /// can still succeed if enough files landed, and falls through to the
    /// registry if not. Directory creation treats "already exists" as
    /// success, so overlapping invocations cannot trip each other up.
    async fn fetch_artifacts(
        &self,
        store: &dyn ObjectStore,
        pair: &LanguagePair,
        dir: &std::path::Path,
    ) {
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            warn!("Error creating cache entry {}: {}", dir.display(), e);
            return;
        }

        for filename in MODEL_ARTIFACTS {
            let key = pair.store_key(filename);
            let dest = dir.join(filename);

            if let Err(e) = store.fetch(&key, &dest).await {
                warn!("Error downloading {}: {}", key, e);
            }
        }
    }
}
