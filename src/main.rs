//! Replyforge
//!
//! Command-line front end: wires the page-side agent to the privileged
//! orchestrator and drives them against page snapshots or plain text.

mod app;
mod cli;
mod commands;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use replyforge_config::{ConfigValidator, SettingsLoader};

use crate::app::App;
use crate::cli::{Cli, Commands};

fn replyforge_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".replyforge"))
        .unwrap_or_else(|| PathBuf::from(".replyforge"))
}

/// Console logging on stderr plus a daily-rotated file under
/// ~/.replyforge/logs/.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = replyforge_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("replyforge")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();

    let settings = SettingsLoader::load_or_default(&cli.config)?;
    let validation = ConfigValidator::validate(&settings);
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if !validation.is_valid() {
        for e in &validation.errors {
            error!("{}", e);
        }
        return Err(format!("Invalid settings in {}", cli.config.display()).into());
    }

    info!("Starting replyforge v{}", env!("CARGO_PKG_VERSION"));
    let app = App::start(settings).await?;

    let result = match cli.command {
        Commands::Draft {
            page,
            target,
            system_clipboard,
        } => commands::draft(&app, &page, target.as_deref(), system_clipboard).await,
        Commands::Generate {
            text,
            author,
            tone,
            length,
        } => commands::generate(&app, text, author, tone, length).await,
        Commands::Prompt {
            text,
            author,
            tone,
            length,
        } => commands::prompt(&app, text, author, tone, length).await,
        Commands::Analyze { posts_file, bio } => commands::analyze(&app, &posts_file, bio).await,
        Commands::Prefs { tone, length } => commands::prefs(&app, tone, length).await,
        Commands::Reload => commands::reload(&app).await,
        Commands::Stats => commands::stats(&app).await,
    };

    app.stop().await;
    result
}
