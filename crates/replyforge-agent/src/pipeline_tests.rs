use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use replyforge_clipboard_system::MemoryClipboard;
use replyforge_page_snapshot::{SnapshotBehavior, SnapshotPage};
use replyforge_protocols::store::keys;
use replyforge_protocols::{
    KeyValueStore, MessageChannel, NotificationId, NotificationKind, NotificationSurface,
    TransportError,
};
use replyforge_store::InMemoryStore;

use super::*;
use crate::rate_limit::RateLimiter;

const PAGE: &str = r#"
<section>
  <article data-testid="tweet" id="post">
    <div data-testid="User-Name"><span>Jane Doe</span></div>
    <div data-testid="tweetText">AI will change everything</div>
  </article>
  <div data-testid="tweetTextarea_0RichTextInputContainer" id="surface">
    <div data-testid="tweetTextarea_0" id="editor">
      <div role="textbox" contenteditable="true" id="textbox"></div>
    </div>
  </div>
  <div id="bare-surface"></div>
</section>
"#;

#[derive(Default)]
struct Shown(Mutex<Vec<(NotificationKind, String)>>);

impl Shown {
    fn last(&self) -> Option<(NotificationKind, String)> {
        self.0.lock().last().cloned()
    }
}

impl NotificationSurface for Shown {
    fn show(&self, _id: NotificationId, kind: NotificationKind, message: &str) {
        self.0.lock().push((kind, message.to_string()));
    }
    fn fade(&self, _id: NotificationId) {}
    fn remove(&self, _id: NotificationId) {}
}

/// Channel answering every request with the same value.
struct CannedChannel {
    answer: Value,
    requests: Mutex<Vec<Value>>,
}

#[async_trait]
impl MessageChannel for CannedChannel {
    async fn request(&self, payload: Value) -> Result<Value, TransportError> {
        self.requests.lock().push(payload);
        Ok(self.answer.clone())
    }
}

struct Fixture {
    pipeline: ReplyPipeline,
    page: Arc<SnapshotPage>,
    channel: Arc<CannedChannel>,
    store: Arc<InMemoryStore>,
    shown: Arc<Shown>,
    clipboard: Arc<MemoryClipboard>,
}

impl Fixture {
    async fn new(answer: Value, behavior: SnapshotBehavior, max_per_hour: u32) -> Self {
        let page = Arc::new(SnapshotPage::with_behavior(PAGE, behavior));
        let channel = Arc::new(CannedChannel {
            answer,
            requests: Mutex::new(Vec::new()),
        });
        let store = Arc::new(InMemoryStore::new());
        store
            .set(keys::API_KEY, json!("gsk_test"))
            .await
            .unwrap();
        let shown = Arc::new(Shown::default());
        let clipboard = Arc::new(MemoryClipboard::new());

        let notifier = NotificationPresenter::new(
            shown.clone(),
            Duration::from_secs(4),
            Duration::from_millis(300),
        );
        let session = Arc::new(Session::new(RateLimiter::new(
            max_per_hour,
            Duration::from_secs(3600),
        )));
        let pipeline = ReplyPipeline::new(
            page.clone(),
            20,
            session,
            ProfileStore::new(store.clone()),
            ReplyRequestClient::new(channel.clone()),
            ReplyInjector::with_clipboard(page.clone(), clipboard.clone(), notifier.clone()),
            notifier,
        );

        Self {
            pipeline,
            page,
            channel,
            store,
            shown,
            clipboard,
        }
    }

    fn surface(&self) -> ElementHandle {
        self.page.find_by_id("surface").unwrap()
    }
}

#[tokio::test]
async fn test_reply_inserted() {
    let fx = Fixture::new(json!({"reply": "Hard agree"}), SnapshotBehavior::default(), 20).await;

    let outcome = fx.pipeline.run(fx.surface()).await.unwrap();
    assert_eq!(outcome.reply, "Hard agree");
    assert_eq!(outcome.outcome, InsertOutcome::Inserted);

    let textbox = fx.page.find_by_id("textbox").unwrap();
    assert_eq!(fx.page.content(textbox).as_deref(), Some("Hard agree"));
    assert_eq!(
        fx.shown.last(),
        Some((NotificationKind::Success, SUCCESS_MESSAGE.to_string()))
    );
    assert_eq!(fx.pipeline.session().rate_usage(), (1, 20));

    let request = &fx.channel.requests.lock()[0];
    assert_eq!(request["action"], "generateReply");
    assert_eq!(request["context"]["tweetText"], "AI will change everything");
    assert_eq!(request["context"]["author"], "Jane Doe");

    let stats = fx.store.get(keys::USAGE_STATS).await.unwrap().unwrap();
    assert_eq!(stats["totalReplies"], 1);
}

#[tokio::test]
async fn test_clipboard_fallback_counts_as_success() {
    let behavior = SnapshotBehavior {
        fail_dispatch: true,
        ..Default::default()
    };
    let fx = Fixture::new(json!({"reply": "Copied"}), behavior, 20).await;

    let outcome = fx.pipeline.run(fx.surface()).await.unwrap();
    assert_eq!(outcome.outcome, InsertOutcome::ClipboardFallback);
    assert_eq!(fx.clipboard.text().as_deref(), Some("Copied"));
    assert_eq!(fx.pipeline.session().rate_usage(), (1, 20));
    assert_eq!(
        fx.shown.last(),
        Some((NotificationKind::Info, crate::CLIPBOARD_FALLBACK_MESSAGE.to_string()))
    );
}

#[tokio::test]
async fn test_rate_limit_blocks_before_request() {
    let fx = Fixture::new(json!({"reply": "ok"}), SnapshotBehavior::default(), 1).await;

    assert!(fx.pipeline.run(fx.surface()).await.is_some());
    assert!(fx.pipeline.run(fx.surface()).await.is_none());

    assert_eq!(fx.channel.requests.lock().len(), 1);
    let (kind, message) = fx.shown.last().unwrap();
    assert_eq!(kind, NotificationKind::Warning);
    assert!(message.contains("1/1"));
}

#[tokio::test]
async fn test_editor_not_found() {
    let fx = Fixture::new(json!({"reply": "ok"}), SnapshotBehavior::default(), 20).await;
    let bare = fx.page.find_by_id("bare-surface").unwrap();

    let err = fx.pipeline.execute(bare).await.unwrap_err();
    assert!(matches!(err, PipelineError::EditorNotFound));

    assert!(fx.pipeline.run(bare).await.is_none());
    assert_eq!(
        fx.shown.last(),
        Some((NotificationKind::Error, "Could not find text editor".to_string()))
    );
    assert!(fx.channel.requests.lock().is_empty());
}

#[tokio::test]
async fn test_domain_error_is_shown_and_not_counted() {
    let fx = Fixture::new(
        json!({"error": "Invalid API Key"}),
        SnapshotBehavior::default(),
        20,
    )
    .await;

    assert!(fx.pipeline.run(fx.surface()).await.is_none());
    assert_eq!(
        fx.shown.last(),
        Some((NotificationKind::Error, "Failed: Invalid API Key".to_string()))
    );
    assert_eq!(fx.pipeline.session().rate_usage(), (0, 20));
}

#[tokio::test]
async fn test_missing_credential() {
    let fx = Fixture::new(json!({"reply": "ok"}), SnapshotBehavior::default(), 20).await;
    fx.store.set(keys::API_KEY, json!("")).await.unwrap();

    let err = fx.pipeline.execute(fx.surface()).await.unwrap_err();
    assert!(matches!(err, PipelineError::MissingCredential));
    assert!(fx.channel.requests.lock().is_empty());
}

#[tokio::test]
async fn test_insertion_failure_not_counted() {
    let fx = Fixture::new(json!({"reply": "nowhere"}), SnapshotBehavior::default(), 20).await;
    // Rebuild with a clipboard that refuses writes.
    let notifier = NotificationPresenter::new(
        fx.shown.clone(),
        Duration::from_secs(4),
        Duration::from_millis(300),
    );
    let pipeline = ReplyPipeline::new(
        fx.page.clone(),
        20,
        Arc::new(Session::new(RateLimiter::new(20, Duration::from_secs(3600)))),
        ProfileStore::new(fx.store.clone()),
        ReplyRequestClient::new(fx.channel.clone()),
        ReplyInjector::with_clipboard(
            fx.page.clone(),
            Arc::new(MemoryClipboard::denying()),
            notifier.clone(),
        ),
        notifier,
    );

    let err = pipeline.execute(fx.surface()).await.unwrap_err();
    assert!(matches!(err, PipelineError::Insertion(_)));
    assert_eq!(pipeline.session().rate_usage(), (0, 20));
    assert_eq!(
        fx.shown.last(),
        Some((NotificationKind::Error, crate::INSERT_FAILED_MESSAGE.to_string()))
    );
}
