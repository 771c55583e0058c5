//! Wiring of the privileged side.

use std::error::Error;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use replyforge_agent::ReplyRequestClient;
use replyforge_config::{ConfigLoader, Settings};
use replyforge_orchestrator::{Orchestrator, OrchestratorHandle, OrchestratorService, ToxicityGate};
use replyforge_provider_groq::{GroqOptions, GroqProvider};
use replyforge_store::{JsonFileStore, ProfileStore};

/// A running orchestrator plus the store both sides share.
pub(crate) struct App {
    pub settings: Settings,
    pub profiles: ProfileStore,
    handle: OrchestratorHandle,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl App {
    pub async fn start(settings: Settings) -> Result<Self, Box<dyn Error>> {
        let store = Arc::new(JsonFileStore::open(&settings.paths.store_file).await?);
        info!("Store: {}", store.path().display());
        let profiles = ProfileStore::new(store);

        let provider = GroqProvider::with_options(GroqOptions {
            api_url: settings.provider.endpoint.clone(),
            model: settings.provider.model.clone(),
            temperature: settings.provider.temperature,
            max_tokens: settings.provider.max_tokens,
            top_p: settings.provider.top_p,
        });
        let config = Arc::new(ConfigLoader::new(&settings.paths.config_dir));
        let orchestrator = Arc::new(Orchestrator::new(
            Arc::new(provider),
            ToxicityGate::new()?,
            config,
            profiles.clone(),
        ));

        if let Err(e) = orchestrator.initialize().await {
            warn!("Generation unavailable until a successful reload: {}", e);
        }

        let shutdown = CancellationToken::new();
        let (handle, task) = OrchestratorService::spawn(orchestrator, shutdown.clone());

        Ok(Self {
            settings,
            profiles,
            handle,
            shutdown,
            task,
        })
    }

    pub fn client(&self) -> ReplyRequestClient {
        ReplyRequestClient::new(Arc::new(self.handle.clone()))
    }

    pub async fn stop(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            warn!("Orchestrator task ended abnormally: {}", e);
        }
    }
}
