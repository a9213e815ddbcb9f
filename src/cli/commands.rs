//! CLI command definitions and handlers

use clap::Subcommand;

/// Commands for the translation service
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },

    /// Seed the object store with a model from the public registry
    Seed {
        /// Source language code (e.g. es)
        #[arg(long)]
        src: String,

        /// Target language code (e.g. en)
        #[arg(long)]
        tgt: String,

        /// Object store bucket to upload into
        #[arg(long)]
        bucket: String,
    },
}

/// Handle the serve command
pub async fn handle_serve(host: String, port: u16) -> anyhow::Result<()> {
    crate::server::api::run_server(host, port).await
}

/// Handle the seed command
///
/// One-shot: pulls every artifact of the pair's model out of the public
/// registry and uploads it under the key scheme the cache manager fetches
/// from. Not part of the runtime request path.
pub async fn handle_seed(src: String, tgt: String, bucket: String) -> anyhow::Result<()> {
    use crate::core::config::ServiceConfig;
    use crate::core::models::{LanguagePair, MODEL_ARTIFACTS};
    use crate::core::registry::RegistryClient;
    use crate::core::store::{HttpObjectStore, ObjectStore};
    use indicatif::{ProgressBar, ProgressStyle};
    use tracing::info;

    let config = ServiceConfig::from_env()?;
    let pair = LanguagePair::new(src, tgt);
    let model_id = pair.registry_model_id();

    info!("Seeding model {} into bucket {}", model_id, bucket);

    let registry = RegistryClient::new(&config.registry_endpoint, config.timeout_ms)?;
    let store = HttpObjectStore::new(&config.store_endpoint, &bucket, config.timeout_ms)?;

    let dir = pair.cache_dir(&config.scratch_root);
    tokio::fs::create_dir_all(&dir).await?;

    let progress = ProgressBar::new(MODEL_ARTIFACTS.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    for filename in MODEL_ARTIFACTS {
        progress.set_message(filename.to_string());

        let local_path = dir.join(filename);
        registry.download(&model_id, filename, &local_path).await?;
        store.put(&local_path, &pair.store_key(filename)).await?;

        progress.inc(1);
    }

    progress.finish_with_message("upload complete");
    info!("Seeded {} artifacts for {}", MODEL_ARTIFACTS.len(), pair);

    Ok(())
}
