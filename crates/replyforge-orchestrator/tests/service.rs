//! Message channel behaviour: one response per known request.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use replyforge_config::ConfigLoader;
use replyforge_orchestrator::{
    INTERNAL_ERROR_MESSAGE, Orchestrator, OrchestratorHandle, OrchestratorService, ToxicityGate,
};
use replyforge_protocols::error::{ProviderError, TransportError};
use replyforge_protocols::{ChatRequest, CompletionBackend, RequestMessage};
use replyforge_store::{InMemoryStore, ProfileStore};

struct EchoBackend;

#[async_trait]
impl CompletionBackend for EchoBackend {
    fn id(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: ChatRequest, _api_key: &str) -> Result<String, ProviderError> {
        Ok(format!("echo {}", request.messages.len()))
    }
}

struct PanickingBackend;

#[async_trait]
impl CompletionBackend for PanickingBackend {
    fn id(&self) -> &str {
        "panicking"
    }

    async fn complete(&self, _request: ChatRequest, _api_key: &str) -> Result<String, ProviderError> {
        panic!("backend exploded");
    }
}

fn start(backend: Arc<dyn CompletionBackend>, dir: &TempDir) -> (OrchestratorHandle, CancellationToken) {
    let orchestrator = Orchestrator::new(
        backend,
        ToxicityGate::new().unwrap(),
        Arc::new(ConfigLoader::new(dir.path())),
        ProfileStore::new(Arc::new(InMemoryStore::new())),
    );
    let shutdown = CancellationToken::new();
    let (handle, _task) = OrchestratorService::spawn(Arc::new(orchestrator), shutdown.clone());
    (handle, shutdown)
}

fn generate_payload() -> Value {
    json!({
        "action": "generateReply",
        "context": {
            "tweetText": "hello",
            "author": "someone",
            "threadContext": "hello",
            "timestamp": "2024-01-01T00:00:00Z"
        },
        "userProfile": {
            "profile": {"bio": "b", "style": "s"},
            "preferences": {"tone": "agree", "length": "long"},
            "apiKey": "k"
        }
    })
}

#[tokio::test]
async fn test_generate_round_trip() {
    let dir = TempDir::new().unwrap();
    let (handle, _shutdown) = start(Arc::new(EchoBackend), &dir);

    let response = handle.request(generate_payload()).await.unwrap();
    assert_eq!(response, json!({"reply": "echo 2"}));
}

#[tokio::test]
async fn test_typed_send() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "GROQ_API_KEY=k").unwrap();
    let (handle, _shutdown) = start(Arc::new(EchoBackend), &dir);

    let response = handle.send(&RequestMessage::ReloadConfig {}).await.unwrap();
    assert_eq!(response, json!({"success": true}));
}

#[tokio::test]
async fn test_panicking_handler_still_answers() {
    let dir = TempDir::new().unwrap();
    let (handle, _shutdown) = start(Arc::new(PanickingBackend), &dir);

    let response = handle.request(generate_payload()).await.unwrap();
    assert_eq!(response, json!({"error": INTERNAL_ERROR_MESSAGE}));

    // The service survives the panic.
    let again = handle.request(generate_payload()).await.unwrap();
    assert_eq!(again, json!({"error": INTERNAL_ERROR_MESSAGE}));
}

#[tokio::test]
async fn test_unknown_action_gets_no_response() {
    let dir = TempDir::new().unwrap();
    let (handle, _shutdown) = start(Arc::new(EchoBackend), &dir);

    let result = handle.request(json!({"action": "somethingElse"})).await;
    assert_eq!(result, Err(TransportError::NoResponse));
}

#[tokio::test]
async fn test_concurrent_requests_are_correlated() {
    let dir = TempDir::new().unwrap();
    let (handle, _shutdown) = start(Arc::new(EchoBackend), &dir);

    let a = handle.request(generate_payload());
    let b = handle.request(json!({"action": "analyzeProfile", "tweets": ["lol"], "bio": "x"}));
    let (a, b) = tokio::join!(a, b);

    assert_eq!(a.unwrap()["reply"], "echo 2");
    let b = b.unwrap();
    assert_eq!(b["success"], true);
    assert_eq!(b["profile"]["bio"], "x");
}

#[tokio::test]
async fn test_shutdown_disconnects() {
    let dir = TempDir::new().unwrap();
    let (handle, shutdown) = start(Arc::new(EchoBackend), &dir);
    shutdown.cancel();

    // Give the service task a chance to observe cancellation.
    while !handle.is_closed() {
        tokio::task::yield_now().await;
    }
    let result = handle.request(generate_payload()).await;
    assert_eq!(result, Err(TransportError::Disconnected));
}
