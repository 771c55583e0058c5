//! Heuristic style analysis over a user's prior posts.
//!
//! Deliberately shallow: character counts, a handful of marker words and a
//! word-frequency table.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use replyforge_protocols::StyleProfile;

/// Average length reported when there are no posts.
const EMPTY_AVG_LENGTH: u32 = 150;

/// Share of posts that must contain `?` for an inquisitive tone.
const QUESTION_RATIO: f64 = 0.3;

const MAX_COMMON_PHRASES: usize = 5;

/// Minimum length, exclusive, of a word counted as a common phrase.
const MIN_PHRASE_CHARS: usize = 4;

static CASUAL_MARKERS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(lol|omg|tbh|imo|btw)\b").ok());

/// Statistics derived from a set of posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostStats {
    pub style: String,
    pub avg_length: u32,
    pub common_phrases: Vec<String>,
    pub tone: String,
}

impl PostStats {
    fn empty() -> Self {
        Self {
            style: "professional".to_string(),
            avg_length: EMPTY_AVG_LENGTH,
            common_phrases: Vec::new(),
            tone: "balanced".to_string(),
        }
    }
}

pub fn analyze_posts<S: AsRef<str>>(posts: &[S]) -> PostStats {
    if posts.is_empty() {
        return PostStats::empty();
    }

    let count = posts.len() as f64;
    let total_chars: usize = posts.iter().map(|p| p.as_ref().chars().count()).sum();
    let avg_length = (total_chars as f64 / count).round() as u32;

    let has_emoji = posts.iter().any(|p| p.as_ref().chars().any(is_face_emoji));
    let questions = posts.iter().filter(|p| p.as_ref().contains('?')).count();
    let has_questions = questions as f64 / count > QUESTION_RATIO;
    let has_casual = match CASUAL_MARKERS.as_ref() {
        Some(re) => posts.iter().any(|p| re.is_match(p.as_ref())),
        None => false,
    };

    let mut tone = "balanced";
    if has_questions {
        tone = "inquisitive";
    }
    if has_casual {
        tone = "casual";
    }
    if !has_emoji && !has_casual {
        tone = "professional";
    }

    PostStats {
        style: tone.to_string(),
        avg_length,
        common_phrases: common_phrases(posts),
        tone: tone.to_string(),
    }
}

/// Analyse `posts` into a full profile carrying `bio` (empty if absent).
pub fn analyze_profile<S: AsRef<str>>(posts: &[S], bio: Option<&str>) -> StyleProfile {
    let stats = analyze_posts(posts);
    StyleProfile {
        bio: bio.unwrap_or_default().to_string(),
        style: stats.style,
        avg_length: Some(stats.avg_length),
        common_phrases: Some(stats.common_phrases),
        tone: Some(stats.tone),
    }
}

fn is_face_emoji(c: char) -> bool {
    ('\u{1F600}'..='\u{1F64F}').contains(&c)
}

/// Most frequent long words, ties kept in first-seen order.
fn common_phrases<S: AsRef<str>>(posts: &[S]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for post in posts {
        for word in post.as_ref().to_lowercase().split_whitespace() {
            if word.chars().count() <= MIN_PHRASE_CHARS {
                continue;
            }
            let entry = counts.entry(word.to_string()).or_insert_with(|| {
                order.push(word.to_string());
                0
            });
            *entry += 1;
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(MAX_COMMON_PHRASES);
    order
}

#[cfg(test)]
#[path = "style_analysis_tests.rs"]
mod tests;
