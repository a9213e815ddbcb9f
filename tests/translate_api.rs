//! End-to-end tests for the translation endpoint with stub collaborators

use assert_json_diff::assert_json_include;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use opus_translator::core::errors::{Result, TranslatorError};
use opus_translator::server::api::{router, AppState};
use opus_translator::{InferenceEngine, LanguagePair, ModelCacheManager, ModelHandle};

/// Deterministic handle: fixed answer for the smoke phrase, echo otherwise
struct StubHandle {
    invocations: Arc<AtomicUsize>,
}

#[async_trait]
impl ModelHandle for StubHandle {
    async fn translate(&self, text: &str) -> Result<String> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if text == "Hola mundo" {
            Ok("Hello world".to_string())
        } else {
            Ok(format!("<{}>", text))
        }
    }

    fn model_id(&self) -> &str {
        "stub"
    }
}

/// Engine with a healthy registry and no local models
struct StubEngine {
    invocations: Arc<AtomicUsize>,
    registry_ok: bool,
}

#[async_trait]
impl InferenceEngine for StubEngine {
    async fn load_local(&self, _pair: &LanguagePair, dir: &Path) -> Result<Arc<dyn ModelHandle>> {
        Err(TranslatorError::ModelLoad {
            path: dir.display().to_string(),
            message: "no local artifacts".to_string(),
        })
    }

    async fn load_registry(
        &self,
        _pair: &LanguagePair,
        model_id: &str,
    ) -> Result<Arc<dyn ModelHandle>> {
        if self.registry_ok {
            Ok(Arc::new(StubHandle {
                invocations: Arc::clone(&self.invocations),
            }))
        } else {
            Err(TranslatorError::ModelLoad {
                path: model_id.to_string(),
                message: "registry down".to_string(),
            })
        }
    }
}

fn test_app(registry_ok: bool) -> (axum::Router, Arc<AtomicUsize>, tempfile::TempDir) {
    let invocations = Arc::new(AtomicUsize::new(0));
    let scratch = tempfile::tempdir().unwrap();

    let engine = Arc::new(StubEngine {
        invocations: Arc::clone(&invocations),
        registry_ok,
    });
    let cache = Arc::new(ModelCacheManager::new(scratch.path(), None, engine));

    (router(AppState::new(cache)), invocations, scratch)
}

async fn post_translate(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_hola_mundo_roundtrip() {
    let (app, _, _scratch) = test_app(true);

    let (status, body) = post_translate(
        app,
        json!({"text": "Hola mundo", "src_lang": "es", "tgt_lang": "en"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_json_include!(
        actual: body,
        expected: json!({
            "original": "Hola mundo",
            "translated": "Hello world",
            "source_language": "es",
            "target_language": "en",
        })
    );
}

#[tokio::test]
async fn test_language_defaults_are_es_to_en() {
    let (app, _, _scratch) = test_app(true);

    let (status, body) = post_translate(app, json!({"text": "Hola mundo"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source_language"], "es");
    assert_eq!(body["target_language"], "en");
}

#[tokio::test]
async fn test_missing_text_is_client_error_without_inference() {
    let (app, invocations, _scratch) = test_app(true);

    let (status, body) = post_translate(app, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_text_is_client_error() {
    let (app, invocations, _scratch) = test_app(true);

    let (status, _) = post_translate(app, json!({"text": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unavailable_model_is_server_error() {
    let (app, _, _scratch) = test_app(false);

    let (status, body) = post_translate(app, json!({"text": "Hola mundo"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("model unavailable"));
    assert!(message.contains("Helsinki-NLP/opus-mt-es-en"));
}

#[tokio::test]
async fn test_long_text_is_chunked_and_rejoined() {
    let (app, invocations, _scratch) = test_app(true);
    let text = "z".repeat(1025);

    let (status, body) = post_translate(app, json!({"text": text})).await;

    assert_eq!(status, StatusCode::OK);
    // 512 + 512 + 1 chars
    assert_eq!(invocations.load(Ordering::SeqCst), 3);

    let translated = body["translated"].as_str().unwrap();
    let expected = format!("<{}> <{}> <{}>", "z".repeat(512), "z".repeat(512), "z");
    assert_eq!(translated, expected);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _, _scratch) = test_app(true);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
