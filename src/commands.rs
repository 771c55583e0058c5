//! Subcommand handlers.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use replyforge_agent::{
    AgentOptions, NotificationPresenter, Observer, RateLimiter, ReplyInjector, ReplyPipeline,
    Session, TracingSurface,
};
use replyforge_clipboard_system::{MemoryClipboard, SystemClipboard};
use replyforge_orchestrator::build_reply_prompt;
use replyforge_page_snapshot::SnapshotPage;
use replyforge_protocols::{
    Clipboard, ConversationContext, PageAdapter, PageInteraction, Preferences, ReplyLength, Tone,
};

use crate::app::App;

type CmdResult = Result<(), Box<dyn Error>>;

/// Load a page snapshot and run one trigger through the observer.
pub(crate) async fn draft(
    app: &App,
    page_file: &Path,
    target: Option<&str>,
    system_clipboard: bool,
) -> CmdResult {
    let html = tokio::fs::read_to_string(page_file).await?;
    let page = Arc::new(SnapshotPage::from_html(&html));

    let target = match target {
        Some(id) => page
            .find_by_id(id)
            .ok_or_else(|| format!("No element with id '{}'", id))?,
        None => page
            .first_post()
            .await?
            .ok_or("The snapshot contains no post")?,
    };

    let options = AgentOptions::from_settings(&app.settings);
    let clipboard: Arc<dyn Clipboard> = if system_clipboard {
        Arc::new(SystemClipboard::new())
    } else {
        Arc::new(MemoryClipboard::new())
    };
    let notifier = NotificationPresenter::new(
        Arc::new(TracingSurface),
        options.dismiss_after,
        options.fade,
    );
    let session = Arc::new(Session::new(RateLimiter::new(
        options.max_replies_per_hour,
        options.rate_window,
    )));
    let pipeline = Arc::new(ReplyPipeline::new(
        page.clone(),
        options.max_ancestor_depth,
        session.clone(),
        app.profiles.clone(),
        app.client(),
        ReplyInjector::with_clipboard(page.clone(), clipboard, notifier.clone()),
        notifier,
    ));
    let observer = Observer::new(page.clone(), pipeline, options.surface_delay);

    let Some(task) = observer.on_interaction(PageInteraction { target }).await else {
        return Err("The clicked element is not inside a post".into());
    };
    task.await?;

    let Some(surface) = session.active_surface() else {
        return Err("No compose surface in the snapshot".into());
    };
    let editable = match page.editor_in(surface).await? {
        Some(editor) => page.editable_in(editor).await?,
        None => None,
    };
    match editable.and_then(|node| page.content(node)) {
        Some(text) => println!("{}", text),
        None => warn!("Nothing was inserted into the editor"),
    }
    Ok(())
}

pub(crate) async fn generate(
    app: &App,
    text: String,
    author: String,
    tone: Option<String>,
    length: Option<String>,
) -> CmdResult {
    let mut bundle = app.profiles.load_bundle().await?;
    bundle.preferences = override_preferences(bundle.preferences, tone, length);

    let reply = app
        .client()
        .generate(ConversationContext::new(text, author), bundle)
        .await?;
    app.profiles.record_reply().await?;

    println!("{}", reply);
    Ok(())
}

pub(crate) async fn prompt(
    app: &App,
    text: String,
    author: String,
    tone: Option<String>,
    length: Option<String>,
) -> CmdResult {
    let profile = app.profiles.user_profile().await?;
    let preferences = override_preferences(app.profiles.preferences().await?, tone, length);

    let context = ConversationContext::new(text, author);
    println!("{}", build_reply_prompt(&context, &profile, &preferences));
    Ok(())
}

pub(crate) async fn analyze(app: &App, posts_file: &Path, bio: Option<String>) -> CmdResult {
    let content = tokio::fs::read_to_string(posts_file).await?;
    let posts: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    info!("Analysing {} posts", posts.len());

    let profile = app.client().analyze_profile(posts, bio).await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub(crate) async fn prefs(app: &App, tone: Option<String>, length: Option<String>) -> CmdResult {
    let current = app.profiles.preferences().await?;
    if tone.is_some() || length.is_some() {
        let updated = override_preferences(current, tone, length);
        app.profiles.set_preferences(&updated).await?;
        println!("tone: {}\nlength: {}", updated.tone, updated.length);
    } else {
        println!("tone: {}\nlength: {}", current.tone, current.length);
    }
    Ok(())
}

pub(crate) async fn reload(app: &App) -> CmdResult {
    if app.client().reload_config().await? {
        println!("Configuration reloaded");
        Ok(())
    } else {
        Err("Configuration reload failed, see the log for details".into())
    }
}

pub(crate) async fn stats(app: &App) -> CmdResult {
    let stats = app.profiles.usage_stats().await?;
    let max = app.settings.limits.max_replies_per_hour;
    println!("Total replies: {}", stats.total_replies);
    println!(
        "This hour: {} ({} remaining)",
        stats.current_hour_replies,
        stats.remaining(max)
    );
    Ok(())
}

fn override_preferences(
    preferences: Preferences,
    tone: Option<String>,
    length: Option<String>,
) -> Preferences {
    Preferences {
        tone: tone.map_or(preferences.tone, |key| Tone::from_key(&key)),
        length: length.map_or(preferences.length, |key| ReplyLength::from_key(&key)),
    }
}
