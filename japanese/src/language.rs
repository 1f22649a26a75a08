//! Japanese strategy: morphological tokens typed as kana readings.

use voicesim_core::{Entry, InputState, Language, Target, WordQuery};

use crate::analyzer::MorphAnalyzer;
use crate::transcriber::Transcriber;

pub struct Japanese<A> {
    transcriber: Transcriber<A>,
}

impl<A: MorphAnalyzer> Japanese<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            transcriber: Transcriber::new(analyzer),
        }
    }

    pub fn transcriber(&self) -> &Transcriber<A> {
        &self.transcriber
    }
}

fn offers(candidates: &[String], token: &str) -> bool {
    candidates.iter().any(|c| c.trim() == token)
}

impl<A: MorphAnalyzer> Language for Japanese<A> {
    fn name(&self) -> &str {
        "Japanese"
    }

    /// Analyzer segmentation, or one token per character when the analyzer
    /// returns nothing for non-blank text.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = self
            .transcriber
            .analyzer()
            .segment(text)
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect();
        if tokens.is_empty() {
            return text.chars().filter(|c| !c.is_whitespace()).map(String::from).collect();
        }
        tokens
    }

    fn tokens_equal(&self, a: &str, b: &str) -> bool {
        a == b
    }

    fn render(&self, tokens: &[String], _sealed: bool) -> String {
        tokens.concat()
    }

    /// The target starts with the phrase and its tokens line up.
    fn phrase_matches(&self, target: &Target, phrase: &str) -> Option<Vec<String>> {
        if !target.surface.starts_with(phrase) {
            return None;
        }
        let tokens = self.tokenize(phrase);
        (!tokens.is_empty() && target.tokens.starts_with(&tokens)).then_some(tokens)
    }

    fn is_complete(&self, state: &InputState, target: &Target) -> bool {
        state.tokens == target.tokens
    }

    /// The candidate's tokens must equal the target run right after the
    /// committed tokens.
    fn match_word(&self, state: &InputState, target: &Target, candidate: &str) -> Option<Vec<String>> {
        let tokens = self.tokenize(candidate.trim());
        if tokens.is_empty() {
            return None;
        }
        let start = state.tokens.len();
        let run = target.tokens.get(start..start + tokens.len())?;
        (run == tokens.as_slice()).then(|| {
            let mut next = state.tokens.clone();
            next.extend(tokens);
            next
        })
    }

    /// Type the next token's reading kana by kana, watching the word
    /// suggestions.
    ///
    /// With text already committed, the first kana is also tried together
    /// with that text. Then each growing prefix of the reading is offered on
    /// its own. The first query listing the token commits it as a word
    /// suggestion; otherwise the whole reading is typed.
    fn fallback(&self, state: &mut InputState, target: &Target, query: &mut WordQuery<'_>) -> Entry {
        let Some(token) = target.tokens.get(state.tokens.len()).cloned() else {
            return Entry::Literal { units: 0, selections: 0 };
        };
        let reading: Vec<char> = self.transcriber.reading(&token).chars().collect();
        let context = self.render(&state.tokens, state.sealed);

        if let Some(first) = reading.first() {
            if !context.is_empty() && offers(&query(&format!("{context}{first}")), &token) {
                state.tokens.push(token);
                return Entry::Assisted { typed_units: 1 };
            }
        }

        let mut typed = String::new();
        for (i, unit) in reading.iter().enumerate() {
            typed.push(*unit);
            if offers(&query(&typed), &token) {
                state.tokens.push(token);
                return Entry::Assisted { typed_units: i + 1 };
            }
        }

        state.tokens.push(token);
        Entry::Literal {
            units: reading.len(),
            selections: 1,
        }
    }

    fn reading(&self, sentence: &str) -> Option<String> {
        Some(self.transcriber.sentence_reading(sentence))
    }
}
