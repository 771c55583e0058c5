//! Prompt construction.
//!
//! Pure functions: identical inputs always produce identical prompts.

use replyforge_protocols::{
    ChatMessage, ChatRequest, ConversationContext, Preferences, ReplyLength, StyleProfile, Tone,
};

/// System message sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "You are a writing assistant that drafts authentic, \
high-quality social media replies. You match the user's own voice and style while staying \
genuine and helpful.";

const FALLBACK_BIO: &str = "Professional and authentic";
const FALLBACK_STYLE: &str = "Casual but thoughtful";

pub fn tone_phrase(tone: Tone) -> &'static str {
    match tone {
        Tone::Agree => "supportive and affirming",
        Tone::Witty => "clever and humorous",
        Tone::Inquisitive => "curious and question-asking",
        Tone::Balanced => "thoughtful and authentic",
    }
}

pub fn length_instruction(length: ReplyLength) -> &'static str {
    match length {
        ReplyLength::Short => "Keep it brief - 1-2 sentences max (under 100 characters).",
        ReplyLength::Medium => "Medium length - 2-3 sentences (100-200 characters).",
        ReplyLength::Long => "Detailed response - 3-4 sentences (200-280 characters).",
    }
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// The user message for one reply.
pub fn build_reply_prompt(
    context: &ConversationContext,
    profile: &StyleProfile,
    preferences: &Preferences,
) -> String {
    let tone = tone_phrase(preferences.tone);
    let length = length_instruction(preferences.length);
    let bio = or_fallback(&profile.bio, FALLBACK_BIO);
    let style = or_fallback(&profile.style, FALLBACK_STYLE);

    format!(
        "You are helping to write an authentic reply to a tweet.

ORIGINAL TWEET:
\"{source}\"
Author: {author}

THREAD CONTEXT:
{thread}

USER'S WRITING STYLE:
{bio}
{style}

YOUR TASK:
Write a {tone} reply that sounds natural and human. {length}

CRITICAL RULES:
- Write ONLY the reply text, no quotes, no meta-commentary
- Match the user's authentic voice
- Be helpful and genuine, not generic or robotic
- Avoid hashtags unless absolutely necessary
- No spam, no toxicity, no manipulation
- Stay on topic and add value to the conversation
- If the tweet is controversial, be balanced and respectful

Reply:",
        source = context.source_text,
        author = context.author_label,
        thread = context.thread_text,
    )
}

/// System message plus the reply prompt.
pub fn build_chat_request(
    context: &ConversationContext,
    profile: &StyleProfile,
    preferences: &Preferences,
) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_reply_prompt(context, profile, preferences)),
    ])
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
