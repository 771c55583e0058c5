//! CLI definitions for replyforge.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Replyforge CLI.
#[derive(Parser)]
#[command(name = "replyforge")]
#[command(about = "Drafts short social-media replies in your own voice")]
#[command(version)]
pub(crate) struct Cli {
    /// Settings file path
    #[arg(short, long, default_value = "replyforge.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Draft a reply on a saved page snapshot, as if the user clicked Reply
    Draft {
        /// HTML snapshot of the timeline with an open compose surface
        #[arg(long)]
        page: PathBuf,

        /// Element id of the clicked element (defaults to the first post)
        #[arg(long)]
        target: Option<String>,

        /// Use the OS clipboard for the paste fallback
        #[arg(long)]
        system_clipboard: bool,
    },

    /// Generate a reply to a post without a page
    Generate {
        /// Text of the post being replied to
        #[arg(long)]
        text: String,

        /// Display name of the post's author
        #[arg(long, default_value = "someone")]
        author: String,

        /// Override the stored tone (agree, witty, inquisitive, balanced)
        #[arg(long)]
        tone: Option<String>,

        /// Override the stored length (short, medium, long)
        #[arg(long)]
        length: Option<String>,
    },

    /// Print the prompt that would be sent for a post
    Prompt {
        #[arg(long)]
        text: String,

        #[arg(long, default_value = "someone")]
        author: String,

        #[arg(long)]
        tone: Option<String>,

        #[arg(long)]
        length: Option<String>,
    },

    /// Derive a style profile from prior posts, one per line
    Analyze {
        posts_file: PathBuf,

        #[arg(long)]
        bio: Option<String>,
    },

    /// Show or change reply preferences
    Prefs {
        #[arg(long)]
        tone: Option<String>,

        #[arg(long)]
        length: Option<String>,
    },

    /// Re-read the credential and bio files
    Reload,

    /// Show usage statistics
    Stats,
}
