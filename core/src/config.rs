//! Simulation configuration.
//!
//! `SimConfig` holds only language-agnostic settings. The language crates wrap
//! it (flattened via serde) and fill in their own opening phrases, model and
//! macro ids.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Optional context forwarded to the oracle alongside the typed text.
///
/// Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptHints {
    pub persona: String,
    pub conversation_history: String,
    pub sentence_emotion: String,
    pub last_input_speech: String,
    pub last_output_speech: String,
}

impl PromptHints {
    /// Hint fields as `(userInputs key, value)` pairs, skipping empty values.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("persona", self.persona.as_str()),
            ("conversationHistory", self.conversation_history.as_str()),
            ("sentenceEmotion", self.sentence_emotion.as_str()),
            ("lastInputSpeech", self.last_input_speech.as_str()),
            ("lastOutputSpeech", self.last_output_speech.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    /// Opening phrases offered before anything is typed, in priority order.
    /// Language crates populate this.
    pub initial_phrases: Vec<String>,

    /// Number of suggestions requested from the oracle (`[[num]]`).
    pub requested_suggestions: usize,
    /// Only the first N sentence suggestions are considered.
    pub sentence_suggestion_limit: usize,
    pub temperature: f32,

    /// Clicks charged per literally typed unit (character, space or kana).
    /// A single-row scanning keyboard needs 2.
    pub literal_click_cost: usize,

    /// Individual histogram buckets; one overflow bucket is added after them.
    pub histogram_bins: usize,

    /// Capacity of the (kind, text) -> suggestions cache. 0 disables it.
    pub query_cache_size: usize,

    // Oracle endpoint
    pub endpoint: String,
    pub timeout_ms: u64,
    pub model_id: String,
    pub sentence_macro_id: String,
    pub word_macro_id: String,
    /// Language name sent to the oracle (`[[language]]`).
    pub language: String,

    pub hints: PromptHints,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_phrases: vec![],
            requested_suggestions: 5,
            sentence_suggestion_limit: 2,
            temperature: 0.0,
            literal_click_cost: 1,
            histogram_bins: 5,
            query_cache_size: 0,
            endpoint: "http://127.0.0.1:5000/run-macro".to_string(),
            timeout_ms: 30_000,
            model_id: String::new(),
            sentence_macro_id: String::new(),
            word_macro_id: "WordGeneric20240628".to_string(),
            language: String::new(),
            hints: PromptHints::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> SimResult<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_simulator_constants() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.requested_suggestions, 5);
        assert_eq!(cfg.sentence_suggestion_limit, 2);
        assert_eq!(cfg.literal_click_cost, 1);
        assert_eq!(cfg.histogram_bins, 5);
        assert_eq!(cfg.query_cache_size, 0);
        assert!(cfg.initial_phrases.is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = SimConfig::from_toml_str(
            r#"
            initial_phrases = ["Hello", "Thanks"]
            literal_click_cost = 2

            [hints]
            persona = "retired nurse"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.initial_phrases, vec!["Hello", "Thanks"]);
        assert_eq!(cfg.literal_click_cost, 2);
        assert_eq!(cfg.sentence_suggestion_limit, 2);
        assert_eq!(cfg.hints.persona, "retired nurse");
        assert!(cfg.hints.sentence_emotion.is_empty());
    }

    #[test]
    fn toml_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!(
            "voicesim_config_test_{}.toml",
            std::process::id()
        ));
        let mut cfg = SimConfig::default();
        cfg.model_id = "model-x".into();
        cfg.query_cache_size = 64;
        cfg.save_toml(&path).unwrap();

        let loaded = SimConfig::load_toml(&path).unwrap();
        assert_eq!(loaded.model_id, "model-x");
        assert_eq!(loaded.query_cache_size, 64);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn hint_fields_skip_empty_values() {
        let hints = PromptHints {
            persona: "p".into(),
            sentence_emotion: "polite".into(),
            ..Default::default()
        };
        assert_eq!(
            hints.fields(),
            vec![("persona", "p"), ("sentenceEmotion", "polite")]
        );
    }
}
