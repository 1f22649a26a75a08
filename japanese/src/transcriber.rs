//! Phonetic readings (kana keystrokes) for tokens and sentences.

use tracing::warn;

use crate::analyzer::{MorphAnalyzer, Morpheme};
use crate::kana;

/// Turns surface text into the hiragana a phonetic input method needs.
///
/// Never fails: when the analyzer errors or knows no reading, the surface is
/// script-normalized instead.
pub struct Transcriber<A> {
    analyzer: A,
}

impl<A: MorphAnalyzer> Transcriber<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Reading of a single token.
    pub fn reading(&self, token: &str) -> String {
        self.transcribe(token)
    }

    /// Reading of a whole sentence, analyzed in one pass so that it does not
    /// depend on how the sentence was tokenized.
    pub fn sentence_reading(&self, text: &str) -> String {
        self.transcribe(text)
    }

    fn transcribe(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return kana::normalize(text);
        }
        match self.analyzer.analyze(text) {
            Ok(morphemes) if !morphemes.is_empty() => kana::normalize(&join_readings(&morphemes)),
            Ok(_) => kana::normalize(text),
            Err(e) => {
                warn!(text, error = %e, "reading lookup failed; using surface form");
                kana::normalize(text)
            }
        }
    }
}

fn join_readings(morphemes: &[Morpheme]) -> String {
    morphemes
        .iter()
        .map(|m| m.reading.as_deref().unwrap_or(&m.surface))
        .collect()
}
