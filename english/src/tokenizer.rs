//! Whitespace tokenizer that splits trailing sentence punctuation.

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*[^.,!?])([.,!?]+)$").unwrap());

/// `"Hello, world!"` -> `["Hello", ",", "world", "!"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        match TRAILING_PUNCT.captures(word) {
            Some(caps) => {
                tokens.push(caps[1].to_string());
                tokens.push(caps[2].to_string());
            }
            None => tokens.push(word.to_string()),
        }
    }
    tokens
}

/// Token made only of `. , ! ?`.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| matches!(c, '.' | ',' | '!' | '?'))
}

/// Whether a space separates `prev` from `next`. Punctuation attaches to a
/// preceding word but not to preceding punctuation.
pub fn needs_space(prev: &str, next: &str) -> bool {
    !is_punctuation(next) || is_punctuation(prev)
}

/// Inverse of `tokenize`: single spaces, none between a word and the
/// punctuation after it, and a trailing space after the last token.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut text = String::new();
    let mut prev: Option<&str> = None;
    for token in tokens {
        let token = token.as_ref();
        if prev.is_some_and(|p| needs_space(p, token)) {
            text.push(' ');
        }
        text.push_str(token);
        prev = Some(token);
    }
    if !text.is_empty() {
        text.push(' ');
    }
    text
}
