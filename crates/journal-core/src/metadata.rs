//! Post metadata: read time, structured-response parsing and the
//! deterministic fallbacks used when the generative backend is unavailable.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const FALLBACK_CATEGORY: &str = "Reflections";
pub const UNTITLED: &str = "Untitled";

const WORDS_PER_MINUTE: usize = 200;
const TITLE_CHARS: usize = 50;
const EXCERPT_CHARS: usize = 150;
const SUMMARY_WORDS: usize = 20;

const CLAUSE_TERMINATORS: [char; 4] = ['.', '!', '?', '\n'];
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TITLE:[ \t]*([^\r\n]+)").expect("valid title pattern"));
static CATEGORY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CATEGORY:[ \t]*([^\r\n]+)").expect("valid category pattern")
});
static EXCERPT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)EXCERPT:[ \t]*([^\r\n]+)").expect("valid excerpt pattern")
});

/// Display metadata derived from a post's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub read_time: String,
}

impl PostMetadata {
    /// Combine a parsed model response with per-field fallbacks.
    pub fn from_parsed(parsed: ParsedMetadata, content: &str) -> Self {
        Self {
            title: parsed.title.unwrap_or_else(|| fallback_title(content)),
            category: parsed
                .category
                .unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
            excerpt: parsed.excerpt.unwrap_or_else(|| fallback_excerpt(content)),
            read_time: read_time(content),
        }
    }

    /// Metadata computed without the generative backend. Never panics.
    pub fn fallback(content: &str) -> Self {
        Self::from_parsed(ParsedMetadata::default(), content)
    }

    /// Last-resort metadata: first clause as title, first words as excerpt.
    pub fn summary(content: &str) -> Self {
        Self {
            title: first_clause(content).unwrap_or_else(|| UNTITLED.to_string()),
            category: FALLBACK_CATEGORY.to_string(),
            excerpt: leading_words(content, SUMMARY_WORDS),
            read_time: read_time(content),
        }
    }
}

/// Fields found in a `TITLE:` / `CATEGORY:` / `EXCERPT:` response.
///
/// Each label is located on its own, so a missing line never affects the
/// others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMetadata {
    pub title: Option<String>,
    pub category: Option<String>,
    pub excerpt: Option<String>,
}

impl ParsedMetadata {
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.category.is_some() && self.excerpt.is_some()
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.excerpt.is_none() {
            missing.push("excerpt");
        }
        missing
    }
}

/// Parse a free-text model response into its labelled fields.
pub fn parse_metadata_response(response: &str) -> ParsedMetadata {
    ParsedMetadata {
        title: labelled_value(&TITLE_LINE, response),
        category: labelled_value(&CATEGORY_LINE, response),
        excerpt: labelled_value(&EXCERPT_LINE, response),
    }
}

fn labelled_value(pattern: &Regex, response: &str) -> Option<String> {
    let raw = pattern.captures(response)?.get(1)?.as_str().trim();
    let value = strip_quotes(raw).trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// `"<N> min read"` at 200 words per minute, never below one minute.
pub fn read_time(content: &str) -> String {
    let minutes = word_count(content).div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

/// First clause of the first 50 characters; `...` marks a sentence that
/// was cut short.
pub fn fallback_title(content: &str) -> String {
    let Some(clause) = first_clause(content) else {
        return UNTITLED.to_string();
    };

    let sentence = content
        .split(CLAUSE_TERMINATORS)
        .next()
        .unwrap_or_default()
        .trim();

    if clause.chars().count() < sentence.chars().count() {
        format!("{clause}...")
    } else {
        clause
    }
}

/// First sentence, capped at 150 characters, ending in a period.
pub fn fallback_excerpt(content: &str) -> String {
    let sentence = content
        .split(SENTENCE_TERMINATORS)
        .next()
        .unwrap_or_default()
        .trim();
    let capped: String = sentence.chars().take(EXCERPT_CHARS).collect();
    format!("{}.", capped.trim_end())
}

fn first_clause(content: &str) -> Option<String> {
    let head: String = content.chars().take(TITLE_CHARS).collect();
    let clause = head.split(CLAUSE_TERMINATORS).next().unwrap_or_default().trim();
    (!clause.is_empty()).then(|| clause.to_string())
}

fn leading_words(content: &str, limit: usize) -> String {
    let words: Vec<&str> = content.split_whitespace().collect();
    let mut excerpt = words.iter().take(limit).copied().collect::<Vec<_>>().join(" ");
    if words.len() > limit {
        excerpt.push_str("...");
    }
    excerpt
}
