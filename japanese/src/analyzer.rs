//! Morphological analysis backends.
//!
//! `MorphAnalyzer` is the capability the Japanese strategy needs: split text
//! into morphemes and, where the dictionary knows it, give each morpheme's
//! reading. `VibratoAnalyzer` wraps a compiled IPADIC-format dictionary;
//! `StaticAnalyzer` is a deterministic in-memory lexicon for tests and demos.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;
use vibrato::{Dictionary, Tokenizer};

/// IPADIC feature column holding the katakana reading.
const READING_FIELD: usize = 7;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("failed to load dictionary {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("analysis failed: {0}")]
    Analyze(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub surface: String,
    /// Katakana or hiragana reading; None when the dictionary has none.
    pub reading: Option<String>,
}

pub trait MorphAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError>;

    /// Surfaces only. An analysis failure yields an empty list.
    fn segment(&self, text: &str) -> Vec<String> {
        self.analyze(text)
            .map(|morphemes| morphemes.into_iter().map(|m| m.surface).collect())
            .unwrap_or_default()
    }
}

impl<T: MorphAnalyzer + ?Sized> MorphAnalyzer for &T {
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError> {
        (**self).analyze(text)
    }
}

impl<T: MorphAnalyzer + ?Sized> MorphAnalyzer for Box<T> {
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError> {
        (**self).analyze(text)
    }
}

/// Viterbi analyzer over a compiled system dictionary.
pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
}

impl VibratoAnalyzer {
    /// Load an uncompressed `system.dic`. Whitespace is skipped during
    /// analysis.
    pub fn from_dictionary_path<P: AsRef<Path>>(path: P) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let load_err = |reason: String| AnalyzerError::Load {
            path: path.display().to_string(),
            reason,
        };
        let file = File::open(path).map_err(|e| load_err(e.to_string()))?;
        let dict = Dictionary::read(BufReader::new(file)).map_err(|e| load_err(e.to_string()))?;
        let tokenizer = Tokenizer::new(dict)
            .ignore_space(true)
            .map_err(|e| load_err(e.to_string()))?;
        Ok(Self { tokenizer })
    }
}

impl MorphAnalyzer for VibratoAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError> {
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(text);
        worker.tokenize();
        Ok(worker
            .token_iter()
            .map(|token| Morpheme {
                surface: token.surface().to_string(),
                reading: reading_from_feature(token.feature()),
            })
            .collect())
    }
}

/// Reading column of an IPADIC feature string; `*` means unknown.
pub fn reading_from_feature(feature: &str) -> Option<String> {
    feature
        .split(',')
        .nth(READING_FIELD)
        .filter(|r| !r.is_empty() && *r != "*")
        .map(str::to_string)
}

/// Greedy longest-match analyzer over a fixed word list.
///
/// Characters not covered by any entry become single-character morphemes
/// without a reading. Whitespace is skipped.
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
    entries: HashMap<String, String>,
    max_chars: usize,
}

impl StaticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, S, R>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: Into<String>,
    {
        let mut analyzer = Self::new();
        for (surface, reading) in entries {
            analyzer.insert(surface, reading);
        }
        analyzer
    }

    pub fn insert(&mut self, surface: impl Into<String>, reading: impl Into<String>) {
        let surface = surface.into();
        self.max_chars = self.max_chars.max(surface.chars().count());
        self.entries.insert(surface, reading.into());
    }
}

impl MorphAnalyzer for StaticAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |i: usize| chars.get(i).map(|&(b, _)| b).unwrap_or(text.len());

        let mut morphemes = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            if chars[i].1.is_whitespace() {
                i += 1;
                continue;
            }
            let longest = self.max_chars.min(chars.len() - i);
            let hit = (1..=longest).rev().find_map(|len| {
                let surface = &text[byte_at(i)..byte_at(i + len)];
                self.entries.get(surface).map(|reading| (len, surface, reading))
            });
            match hit {
                Some((len, surface, reading)) => {
                    morphemes.push(Morpheme {
                        surface: surface.to_string(),
                        reading: Some(reading.clone()),
                    });
                    i += len;
                }
                None => {
                    morphemes.push(Morpheme {
                        surface: chars[i].1.to_string(),
                        reading: None,
                    });
                    i += 1;
                }
            }
        }
        Ok(morphemes)
    }
}
