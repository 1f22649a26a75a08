//! Suggestion oracle boundary.
//!
//! The oracle is the hosted text predictor. The engine only depends on the
//! `SuggestionOracle` trait; `MacroClient` (see `client`) is the network
//! implementation and tests plug in scripted stubs.
//!
//! Response text is line oriented. Only lines of the form `<n>. text` are
//! suggestions; everything else is noise and dropped.

use std::num::NonZeroUsize;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::config::PromptHints;
use crate::error::OracleError;

/// Which macro produced (or should produce) a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    /// Next word, or a `-`-prefixed suffix completing the last word.
    Word,
    /// Whole sentence continuing the typed text.
    Sentence,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Sentence => "sentence",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    pub text: String,
    pub count: usize,
    pub kind: SuggestionKind,
    pub language: String,
    pub temperature: f32,
    pub hints: PromptHints,
}

/// Anything that can turn typed text into ordered continuations.
///
/// Implementations may return fewer items than requested, duplicates, or fail
/// outright; callers treat a failure like an empty list.
pub trait SuggestionOracle {
    fn suggest(&mut self, request: &SuggestionRequest) -> Result<Vec<String>, OracleError>;
}

impl<T: SuggestionOracle + ?Sized> SuggestionOracle for Box<T> {
    fn suggest(&mut self, request: &SuggestionRequest) -> Result<Vec<String>, OracleError> {
        (**self).suggest(request)
    }
}

impl<T: SuggestionOracle + ?Sized> SuggestionOracle for &mut T {
    fn suggest(&mut self, request: &SuggestionRequest) -> Result<Vec<String>, OracleError> {
        (**self).suggest(request)
    }
}

static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());
static LINE_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s?").unwrap());

/// Extract suggestions from raw response text.
///
/// Escaped line continuations (`\` followed by a newline) are joined first.
/// Lines without a leading `<digits>.` index are discarded; the index, one
/// optional whitespace after it and `*` highlight markers are stripped.
pub fn parse_response(text: &str) -> Vec<String> {
    let joined = text.replace("\\\n", "");
    joined
        .split('\n')
        .map(str::trim)
        .filter(|line| NUMBERED_LINE.is_match(line))
        .map(|line| LINE_INDEX.replace(line, "").replace('*', "").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
struct MacroResponse {
    messages: Vec<MacroMessage>,
}

#[derive(Debug, Deserialize)]
struct MacroMessage {
    #[serde(default)]
    text: String,
}

/// Pull the first message text out of a `{"messages": [{"text": ...}]}` body.
///
/// An empty `messages` array is a valid "no output" response.
pub fn extract_message_text(body: &str) -> Result<String, OracleError> {
    let response: MacroResponse = serde_json::from_str(body)?;
    Ok(response
        .messages
        .into_iter()
        .next()
        .map(|m| m.text)
        .unwrap_or_default())
}

/// LRU cache in front of another oracle.
///
/// Keyed on (kind, text); other request fields are fixed for a run. Failed
/// calls are not cached.
pub struct CachedOracle<O> {
    inner: O,
    cache: lru::LruCache<(SuggestionKind, String), Vec<String>>,
    hits: usize,
    misses: usize,
}

impl<O: SuggestionOracle> CachedOracle<O> {
    pub fn new(inner: O, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: lru::LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Hit rate as a percentage, or None before the first lookup.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let total = self.hits + self.misses;
        if total == 0 {
            None
        } else {
            Some(self.hits as f32 / total as f32 * 100.0)
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: SuggestionOracle> SuggestionOracle for CachedOracle<O> {
    fn suggest(&mut self, request: &SuggestionRequest) -> Result<Vec<String>, OracleError> {
        let key = (request.kind, request.text.clone());
        if let Some(cached) = self.cache.get(&key) {
            self.hits += 1;
            return Ok(cached.clone());
        }
        self.misses += 1;
        let suggestions = self.inner.suggest(request)?;
        self.cache.put(key, suggestions.clone());
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: SuggestionKind, text: &str) -> SuggestionRequest {
        SuggestionRequest {
            text: text.to_string(),
            count: 5,
            kind,
            language: "English".into(),
            temperature: 0.0,
            hints: PromptHints::default(),
        }
    }

    #[test]
    fn parse_keeps_only_numbered_lines() {
        let text = "Here you go:\n1. I am fine.\n2.I am tired.\n  3.   Not now  \n- stray\n";
        assert_eq!(
            parse_response(text),
            vec!["I am fine.", "I am tired.", "Not now"]
        );
    }

    #[test]
    fn parse_joins_escaped_continuations() {
        let text = "1. I am \\\nfine.\n2. ok";
        assert_eq!(parse_response(text), vec!["I am fine.", "ok"]);
    }

    #[test]
    fn parse_strips_highlight_markers() {
        assert_eq!(parse_response("1. **-llo**\n2. *was*"), vec!["-llo", "was"]);
    }

    #[test]
    fn parse_without_numbered_lines_is_empty() {
        assert!(parse_response("I am fine.\nsure thing").is_empty());
        assert!(parse_response("").is_empty());
        assert!(parse_response("1.\n2.  ").is_empty());
    }

    #[test]
    fn extract_first_message() {
        let body = r#"{"messages":[{"text":"1. a\n2. b"},{"text":"ignored"}]}"#;
        assert_eq!(extract_message_text(body).unwrap(), "1. a\n2. b");
    }

    #[test]
    fn extract_empty_messages_is_empty_text() {
        assert_eq!(extract_message_text(r#"{"messages":[]}"#).unwrap(), "");
    }

    #[test]
    fn extract_rejects_body_without_messages() {
        assert!(matches!(
            extract_message_text(r#"{"error":"quota"}"#),
            Err(OracleError::Decode(_))
        ));
        assert!(extract_message_text("<html>").is_err());
    }

    struct Counting {
        calls: usize,
    }

    impl SuggestionOracle for Counting {
        fn suggest(&mut self, request: &SuggestionRequest) -> Result<Vec<String>, OracleError> {
            self.calls += 1;
            Ok(vec![format!("{}:{}", request.kind.as_str(), request.text)])
        }
    }

    #[test]
    fn cache_serves_repeated_queries() {
        let mut oracle = CachedOracle::new(Counting { calls: 0 }, NonZeroUsize::new(4).unwrap());
        assert_eq!(oracle.cache_hit_rate(), None);

        let first = oracle.suggest(&request(SuggestionKind::Word, "I ")).unwrap();
        let again = oracle.suggest(&request(SuggestionKind::Word, "I ")).unwrap();
        assert_eq!(first, again);

        // Same text, different kind is a different entry.
        let sentence = oracle.suggest(&request(SuggestionKind::Sentence, "I ")).unwrap();
        assert_eq!(sentence, vec!["sentence:I "]);

        assert_eq!(oracle.cache_stats(), (1, 2));
        assert_eq!(oracle.cache_size(), 2);
        assert_eq!(oracle.into_inner().calls, 2);
    }

    #[test]
    fn clear_cache_resets_stats() {
        let mut oracle = CachedOracle::new(Counting { calls: 0 }, NonZeroUsize::new(2).unwrap());
        oracle.suggest(&request(SuggestionKind::Word, "a")).unwrap();
        oracle.clear_cache();
        assert_eq!(oracle.cache_stats(), (0, 0));
        assert_eq!(oracle.cache_size(), 0);
    }
}
