//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::cache::ModelCacheManager;
use crate::core::config::ServiceConfig;
use crate::core::models::LanguagePair;
use crate::core::translator::ChunkedTranslator;

/// Application state
#[derive(Clone)]
pub struct AppState {
    cache: Arc<ModelCacheManager>,
    translator: ChunkedTranslator,
}

impl AppState {
    /// Create state around a cache manager
    pub fn new(cache: Arc<ModelCacheManager>) -> Self {
        Self {
            cache,
            translator: ChunkedTranslator::default(),
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

fn default_src_lang() -> String {
    "es".to_string()
}

fn default_tgt_lang() -> String {
    "en".to_string()
}

/// Translation request
#[derive(Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_src_lang")]
    pub src_lang: String,
    #[serde(default = "default_tgt_lang")]
    pub tgt_lang: String,
}

/// Translation response
#[derive(Serialize)]
pub struct TranslateResponse {
    pub original: String,
    pub translated: String,
    pub source_language: String,
    pub target_language: String,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check handler
async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
        service: "opus-translator".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateRequest>,
) -> Result<axum::Json<TranslateResponse>, (StatusCode, axum::Json<ErrorResponse>)> {
    let text = match payload.text {
        Some(text) if !text.is_empty() => text,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                axum::Json(ErrorResponse {
                    error: "Text is required".to_string(),
                }),
            ));
        }
    };

    let pair = LanguagePair::new(&payload.src_lang, &payload.tgt_lang);

    let handle = state.cache.resolve(&pair).await.map_err(|e| {
        warn!("Model resolution failed for {}: {}", pair, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let translated = state
        .translator
        .translate(&text, handle.as_ref())
        .await
        .map_err(|e| {
            warn!("Translation failed for {}: {}", pair, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

    Ok(axum::Json(TranslateResponse {
        original: text,
        translated,
        source_language: payload.src_lang,
        target_language: payload.tgt_lang,
    }))
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/translate", post(translate))
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16) -> anyhow::Result<()> {
    let config = ServiceConfig::load()?;
    let cache = Arc::new(ModelCacheManager::from_config(&config)?);

    let app = router(AppState::new(cache));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
