use replyforge_clipboard_system::MemoryClipboard;
use replyforge_page_snapshot::{SnapshotBehavior, SnapshotPage};
use replyforge_protocols::error::{ClipboardError, PageError};

use super::*;

const EDITOR: &str = r#"
<div data-testid="tweetTextarea_0" id="editor">
  <div role="textbox" contenteditable="true" id="textbox"></div>
</div>
"#;

fn page(behavior: SnapshotBehavior) -> Arc<SnapshotPage> {
    Arc::new(SnapshotPage::with_behavior(EDITOR, behavior))
}

#[tokio::test]
async fn test_paste_simulation_inserts() {
    let page = page(SnapshotBehavior::default());
    let clipboard = Arc::new(MemoryClipboard::new());
    let textbox = page.find_by_id("textbox").unwrap();

    let adapter = PasteSimulation::new(page.clone(), clipboard.clone());
    let outcome = adapter.insert(textbox, "Nice one").await.unwrap();

    assert_eq!(outcome, InsertOutcome::Inserted);
    assert_eq!(page.focused(), Some(textbox));
    assert_eq!(clipboard.text().as_deref(), Some("Nice one"));
    assert_eq!(
        page.events(),
        vec![
            (textbox, SyntheticEvent::paste("Nice one")),
            (textbox, SyntheticEvent::insert_from_paste()),
        ]
    );
    assert_eq!(page.content(textbox).as_deref(), Some("Nice one"));
}

#[tokio::test]
async fn test_paste_simulation_clipboard_denied() {
    let page = page(SnapshotBehavior::default());
    let textbox = page.find_by_id("textbox").unwrap();

    let adapter = PasteSimulation::new(page.clone(), Arc::new(MemoryClipboard::denying()));
    let err = adapter.insert(textbox, "x").await.unwrap_err();

    assert!(matches!(err, InsertError::Clipboard(ClipboardError::Denied(_))));
    assert!(page.events().is_empty());
}

#[tokio::test]
async fn test_paste_simulation_dispatch_failure() {
    let page = page(SnapshotBehavior {
        fail_dispatch: true,
        ..SnapshotBehavior::default()
    });
    let textbox = page.find_by_id("textbox").unwrap();

    let adapter = PasteSimulation::new(page.clone(), Arc::new(MemoryClipboard::new()));
    let err = adapter.insert(textbox, "x").await.unwrap_err();
    assert!(matches!(err, InsertError::Page(PageError::Dispatch(_))));
}

#[tokio::test]
async fn test_direct_assign() {
    let page = page(SnapshotBehavior {
        accept_assignment: true,
        ..SnapshotBehavior::default()
    });
    let textbox = page.find_by_id("textbox").unwrap();

    let outcome = DirectAssign::new(page.clone())
        .insert(textbox, "plain")
        .await
        .unwrap();
    assert_eq!(outcome, InsertOutcome::Inserted);
    assert_eq!(page.content(textbox).as_deref(), Some("plain"));
}

#[tokio::test]
async fn test_clipboard_fallback() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let outcome = ClipboardFallback::new(clipboard.clone())
        .insert(ElementHandle(0), "copy me")
        .await
        .unwrap();
    assert_eq!(outcome, InsertOutcome::ClipboardFallback);
    assert_eq!(clipboard.text().as_deref(), Some("copy me"));
}
