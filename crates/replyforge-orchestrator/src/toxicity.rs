//! Pattern-based toxicity gate.
//!
//! A best-effort filter over a handful of case-insensitive patterns. It
//! will miss things and occasionally block harmless text.

use regex::RegexSet;

/// Returned instead of a blocked reply.
pub const REFUSAL_MESSAGE: &str = "Potentially harmful content was detected, so this reply \
was discarded. Please try a different approach.";

const DEFAULT_PATTERNS: &[&str] = &[
    // self-harm incitement
    r"(?i)\b(kill|die|death)\s+(yourself|urself)\b",
    // abusive profanity
    r"(?i)\bf+[ua*]+c+k+\s+(you|u|off)\b",
    // hate phrasing
    r"(?i)\bh[a@]te\s+(you|speech)\b",
    // insult plus slur
    r"(?i)\b(stupid|idiot|moron)\s+(n|b)[i1!]gg[ea@]r*\b",
    // genocidal phrasing
    r"(?i)\bk[i1!]ll\s+all\b",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Blocked,
}

#[derive(Debug, Clone)]
pub struct ToxicityGate {
    patterns: RegexSet,
}

impl ToxicityGate {
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_patterns(DEFAULT_PATTERNS)
    }

    pub fn with_patterns<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            patterns: RegexSet::new(patterns)?,
        })
    }

    /// Any single match blocks.
    pub fn classify(&self, text: &str) -> Verdict {
        if self.patterns.is_match(text) {
            Verdict::Blocked
        } else {
            Verdict::Allowed
        }
    }

    pub fn is_blocked(&self, text: &str) -> bool {
        self.classify(text) == Verdict::Blocked
    }
}
