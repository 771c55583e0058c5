//! The reply pipeline.

use std::sync::Arc;

use tracing::{Instrument, debug, info, info_span, warn};

use replyforge_protocols::{ElementHandle, InsertOutcome, PageAdapter, PipelineError};
use replyforge_store::ProfileStore;

use crate::client::ReplyRequestClient;
use crate::extractor::ContextExtractor;
use crate::injector::ReplyInjector;
use crate::notification::NotificationPresenter;
use crate::session::Session;

pub const SUCCESS_MESSAGE: &str = "Reply generated! Edit and post 🎯";
pub const LOADING_MESSAGE: &str = "Crafting your reply...";

/// Result of a pipeline run that produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub reply: String,
    pub outcome: InsertOutcome,
}

/// One full pass from a detected compose surface to an inserted reply.
pub struct ReplyPipeline {
    page: Arc<dyn PageAdapter>,
    extractor: ContextExtractor,
    session: Arc<Session>,
    profiles: ProfileStore,
    client: ReplyRequestClient,
    injector: ReplyInjector,
    notifier: NotificationPresenter,
}

impl ReplyPipeline {
    pub fn new(
        page: Arc<dyn PageAdapter>,
        max_ancestor_depth: usize,
        session: Arc<Session>,
        profiles: ProfileStore,
        client: ReplyRequestClient,
        injector: ReplyInjector,
        notifier: NotificationPresenter,
    ) -> Self {
        Self {
            extractor: ContextExtractor::new(page.clone(), max_ancestor_depth),
            page,
            session,
            profiles,
            client,
            injector,
            notifier,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Run the pipeline and report the outcome to the user.
    ///
    /// Returns the reply when one was produced. Every failure has been
    /// shown as a notification by the time this returns.
    pub async fn run(&self, surface: ElementHandle) -> Option<RunOutcome> {
        let span = info_span!("reply_pipeline", surface = surface.0);
        let result = self.execute(surface).instrument(span).await;

        match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// The pipeline steps, without user-facing reporting of failures.
    pub async fn execute(&self, surface: ElementHandle) -> Result<RunOutcome, PipelineError> {
        let context = self.extractor.extract(surface).await;
        debug!(author = %context.author_label, "Context captured");

        self.session.check_rate()?;

        let editor = match self.page.editor_in(surface).await {
            Ok(Some(editor)) => editor,
            Ok(None) => return Err(PipelineError::EditorNotFound),
            Err(e) => {
                warn!("Editor lookup failed: {}", e);
                return Err(PipelineError::EditorNotFound);
            }
        };

        self.notifier.loading(LOADING_MESSAGE);

        let bundle = self.profiles.load_bundle().await?;
        let reply = self.client.generate(context, bundle).await?;
        let outcome = self.injector.inject(editor, &reply).await?;

        self.session.record_success();
        if let Err(e) = self.profiles.record_reply().await {
            warn!("Failed to persist usage stats: {}", e);
        }

        if outcome == InsertOutcome::Inserted {
            self.notifier.success(SUCCESS_MESSAGE);
        }
        let (count, max) = self.session.rate_usage();
        info!(count, max, ?outcome, "Reply delivered");

        Ok(RunOutcome { reply, outcome })
    }

    fn report(&self, error: &PipelineError) {
        match error {
            PipelineError::RateLimitExceeded { .. } => {
                info!("{}", error);
                self.notifier.warning(&error.to_string());
            }
            PipelineError::EditorNotFound => {
                warn!("{}", error);
                self.notifier.error(&error.to_string());
            }
            // The injector already told the user.
            PipelineError::Insertion(_) => {}
            other => {
                warn!("Reply pipeline failed: {}", other);
                self.notifier.error(&format!("Failed: {}", other));
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
