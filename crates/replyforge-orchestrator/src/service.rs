//! Message channel between the page-side agent and the orchestrator.
//!
//! Requests travel as JSON values through an mpsc channel, each carrying a
//! oneshot responder. Every request with a known action is answered exactly
//! once, including when its handler panics.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info};
use uuid::Uuid;

use replyforge_protocols::MessageChannel;
use replyforge_protocols::error::TransportError;

use crate::orchestrator::{INTERNAL_ERROR_MESSAGE, Orchestrator};

const CHANNEL_CAPACITY: usize = 64;

struct Envelope {
    correlation_id: Uuid,
    payload: Value,
    reply: oneshot::Sender<Value>,
}

/// Sending half of the channel, held by the page side.
#[derive(Clone)]
pub struct OrchestratorHandle {
    tx: mpsc::Sender<Envelope>,
}

impl OrchestratorHandle {
    /// Send a raw message and wait for its response.
    pub async fn request(&self, payload: Value) -> Result<Value, TransportError> {
        let correlation_id = Uuid::new_v4();
        let (reply, rx) = oneshot::channel();

        self.tx
            .send(Envelope {
                correlation_id,
                payload,
                reply,
            })
            .await
            .map_err(|_| TransportError::Disconnected)?;
        debug!(%correlation_id, "Request sent");

        rx.await.map_err(|_| TransportError::NoResponse)
    }

    /// Encode `message` and send it.
    pub async fn send<T: Serialize>(&self, message: &T) -> Result<Value, TransportError> {
        let payload =
            serde_json::to_value(message).map_err(|e| TransportError::Encoding(e.to_string()))?;
        self.request(payload).await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl MessageChannel for OrchestratorHandle {
    async fn request(&self, payload: Value) -> Result<Value, TransportError> {
        OrchestratorHandle::request(self, payload).await
    }
}

/// Runs an [`Orchestrator`] as a task.
pub struct OrchestratorService;

impl OrchestratorService {
    /// Start serving. The task stops when `shutdown` is cancelled or every
    /// handle is dropped; requests already accepted still get answered.
    pub fn spawn(
        orchestrator: Arc<Orchestrator>,
        shutdown: CancellationToken,
    ) -> (OrchestratorHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let task = tokio::spawn(Self::serve(orchestrator, rx, shutdown));
        (OrchestratorHandle { tx }, task)
    }

    async fn serve(
        orchestrator: Arc<Orchestrator>,
        mut rx: mpsc::Receiver<Envelope>,
        shutdown: CancellationToken,
    ) {
        info!("Orchestrator service started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                envelope = rx.recv() => match envelope {
                    Some(envelope) => Self::handle_envelope(orchestrator.clone(), envelope),
                    None => break,
                },
            }
        }
        info!("Orchestrator service stopped");
    }

    fn handle_envelope(orchestrator: Arc<Orchestrator>, envelope: Envelope) {
        let Envelope {
            correlation_id,
            payload,
            reply,
        } = envelope;
        let action = payload
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let span = tracing::info_span!("request", %correlation_id, action = %action);

        tokio::spawn(
            async move {
                let outcome = AssertUnwindSafe(orchestrator.dispatch(payload))
                    .catch_unwind()
                    .await;
                match outcome {
                    Ok(Some(response)) => {
                        if reply.send(response).is_err() {
                            debug!("Requester went away before the response");
                        }
                    }
                    // Unknown action: dropping the responder closes the port.
                    Ok(None) => drop(reply),
                    Err(panic) => {
                        error!("Request handler panicked: {}", panic_message(panic.as_ref()));
                        let _ = reply.send(json!({ "error": INTERNAL_ERROR_MESSAGE }));
                    }
                }
            }
            .instrument(span),
        );
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
