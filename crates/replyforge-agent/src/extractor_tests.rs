use async_trait::async_trait;
use replyforge_page_snapshot::SnapshotPage;
use replyforge_protocols::SyntheticEvent;

use super::*;

const THREAD: &str = r#"
<section>
  <article data-testid="tweet" id="parent">
    <div data-testid="User-Name"><div><span>Jane Doe</span></div><div><span>@jdoe</span></div></div>
    <div data-testid="tweetText"><span>AI will change everything</span></div>
  </article>
  <div>
    <div data-testid="tweetTextarea_0RichTextInputContainer" id="surface"></div>
  </div>
</section>
"#;

#[tokio::test]
async fn test_extracts_enclosing_post() {
    let page = Arc::new(SnapshotPage::from_html(THREAD));
    let surface = page.find_by_id("surface").unwrap();

    let context = ContextExtractor::new(page, 20).extract(surface).await;
    assert_eq!(context.source_text, "AI will change everything");
    assert_eq!(context.author_label, "Jane Doe");
    assert_eq!(context.thread_text, context.source_text);
}

#[tokio::test]
async fn test_falls_back_to_first_post_beyond_depth() {
    let html = r#"
        <article data-testid="tweet"><div data-testid="tweetText">Elsewhere</div></article>
        <div><div><div><div id="surface"></div></div></div></div>
    "#;
    let page = Arc::new(SnapshotPage::from_html(html));
    let surface = page.find_by_id("surface").unwrap();

    let context = ContextExtractor::new(page, 1).extract(surface).await;
    assert_eq!(context.source_text, "Elsewhere");
    assert_eq!(context.author_label, "someone");
}

#[tokio::test]
async fn test_no_posts_yields_defaults() {
    let page = Arc::new(SnapshotPage::from_html(r#"<div id="surface"></div>"#));
    let surface = page.find_by_id("surface").unwrap();

    let context = ContextExtractor::new(page, 20).extract(surface).await;
    let wire = serde_json::to_value(&context).unwrap();
    assert_eq!(wire["tweetText"], "a tweet");
    assert_eq!(wire["author"], "someone");
    assert_eq!(wire["threadContext"], "a tweet");
}

#[tokio::test]
async fn test_empty_author_line() {
    let html = r#"
        <article data-testid="tweet" id="p">
          <div data-testid="User-Name"></div>
          <div data-testid="tweetText">Body</div>
        </article>
    "#;
    let page = Arc::new(SnapshotPage::from_html(html));
    let post = page.find_by_id("p").unwrap();

    let context = ContextExtractor::new(page, 20).extract(post).await;
    assert_eq!(context.source_text, "Body");
    assert_eq!(context.author_label, "someone");
}

/// Page whose every query fails.
struct BrokenPage;

#[async_trait]
impl PageAdapter for BrokenPage {
    async fn closest_post(&self, _: ElementHandle) -> Result<Option<ElementHandle>, PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn compose_surface(&self) -> Result<Option<ElementHandle>, PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn editor_in(&self, _: ElementHandle) -> Result<Option<ElementHandle>, PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn editable_in(&self, _: ElementHandle) -> Result<Option<ElementHandle>, PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn nearest_enclosing_post(
        &self,
        from: ElementHandle,
        _: usize,
    ) -> Result<Option<ElementHandle>, PageError> {
        Err(PageError::Detached(from))
    }
    async fn first_post(&self) -> Result<Option<ElementHandle>, PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn post_text(&self, _: ElementHandle) -> Result<Option<String>, PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn author_block_text(&self, _: ElementHandle) -> Result<Option<String>, PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn focus(&self, _: ElementHandle) -> Result<(), PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn assign_text(&self, _: ElementHandle, _: &str) -> Result<(), PageError> {
        Err(PageError::Query("broken".into()))
    }
    async fn dispatch(&self, _: ElementHandle, _: SyntheticEvent) -> Result<(), PageError> {
        Err(PageError::Dispatch("broken".into()))
    }
}

#[tokio::test]
async fn test_page_failure_is_absorbed() {
    let context = ContextExtractor::new(Arc::new(BrokenPage), 20)
        .extract(ElementHandle(1))
        .await;
    assert_eq!(context.source_text, "a tweet");
    assert_eq!(context.author_label, "someone");
    assert_eq!(context.thread_text, "a tweet");
}
