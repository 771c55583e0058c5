//! Trigger observer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use replyforge_protocols::{PageAdapter, PageInteraction};

use crate::pipeline::ReplyPipeline;
use crate::session::Session;

/// Watches page interactions for reply intent.
///
/// Any interaction landing inside a post counts as a trigger: after
/// `surface_delay` the observer looks for the compose surface and, if one
/// is rendered, runs the pipeline against it. Triggers are not
/// de-duplicated.
pub struct Observer {
    page: Arc<dyn PageAdapter>,
    pipeline: Arc<ReplyPipeline>,
    session: Arc<Session>,
    surface_delay: Duration,
}

impl Observer {
    pub fn new(page: Arc<dyn PageAdapter>, pipeline: Arc<ReplyPipeline>, surface_delay: Duration) -> Self {
        let session = pipeline.session().clone();
        Self {
            page,
            pipeline,
            session,
            surface_delay,
        }
    }

    /// Consume interactions until the stream ends or `shutdown` fires.
    ///
    /// Only one listener runs per session; a second call returns at once.
    pub async fn run(self, mut interactions: mpsc::Receiver<PageInteraction>, shutdown: CancellationToken) {
        if !self.session.start_listening() {
            warn!("Observer already listening, ignoring second start");
            return;
        }
        info!("Observer listening for reply triggers");

        let reset = self.session.spawn_window_reset(shutdown.child_token());

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Observer shutting down");
                    break;
                }
                interaction = interactions.recv() => {
                    match interaction {
                        Some(interaction) => {
                            self.on_interaction(interaction).await;
                        }
                        None => {
                            debug!("Interaction stream closed");
                            break;
                        }
                    }
                }
            }
        }

        reset.abort();
    }

    /// Handle one interaction. Returns the spawned pipeline task when the
    /// interaction was a trigger.
    pub async fn on_interaction(&self, interaction: PageInteraction) -> Option<JoinHandle<()>> {
        let post = match self.page.closest_post(interaction.target).await {
            Ok(Some(post)) => post,
            Ok(None) => return None,
            Err(e) => {
                debug!("Ignoring interaction: {}", e);
                return None;
            }
        };
        debug!(post = post.0, "Reply trigger");

        let page = self.page.clone();
        let pipeline = self.pipeline.clone();
        let session = self.session.clone();
        let delay = self.surface_delay;
        let span = info_span!("trigger", target = interaction.target.0);

        Some(tokio::spawn(
            async move {
                tokio::time::sleep(delay).await;
                match page.compose_surface().await {
                    Ok(Some(surface)) => {
                        session.set_active_surface(surface);
                        pipeline.run(surface).await;
                    }
                    Ok(None) => warn!("Compose surface not found"),
                    Err(e) => warn!("Compose surface lookup failed: {}", e),
                }
            }
            .instrument(span),
        ))
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
