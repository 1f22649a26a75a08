use std::path::Path;

use serde::{Deserialize, Serialize};
use voicesim_core::{SimConfig, SimResult};

pub const ENGLISH_INITIAL_PHRASES: &[&str] = &[
    "I", "You", "They", "What", "Why", "When", "Where", "How", "Who", "Can", "Could you", "Would you",
    "Do you",
];

pub const DEFAULT_MODEL_ID: &str = "gemini-1.5-flash-002";
pub const DEFAULT_SENTENCE_MACRO_ID: &str = "SentenceEnglish20240703";

/// English configuration that extends the base `SimConfig` from core.
///
/// Blank model/macro ids, language name and an empty phrase list are filled
/// with the English defaults, both for `Default` and after loading TOML, so a
/// config file only needs the fields it changes.
///
/// # Example
///
/// ```rust
/// use voicesim_en::EnglishConfig;
///
/// let config = EnglishConfig::default();
/// assert_eq!(config.base().language, "English");
/// let base = config.into_base();
/// assert_eq!(base.initial_phrases[0], "I");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnglishConfig {
    #[serde(flatten)]
    pub base: SimConfig,
}

impl Default for EnglishConfig {
    fn default() -> Self {
        Self::from_base(SimConfig::default())
    }
}

impl EnglishConfig {
    pub fn from_base(mut base: SimConfig) -> Self {
        if base.initial_phrases.is_empty() {
            base.initial_phrases = ENGLISH_INITIAL_PHRASES.iter().map(|s| s.to_string()).collect();
        }
        if base.model_id.is_empty() {
            base.model_id = DEFAULT_MODEL_ID.to_string();
        }
        if base.sentence_macro_id.is_empty() {
            base.sentence_macro_id = DEFAULT_SENTENCE_MACRO_ID.to_string();
        }
        if base.language.is_empty() {
            base.language = "English".to_string();
        }
        Self { base }
    }

    pub fn load_toml<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let cfg: Self = toml::from_str(content)?;
        Ok(Self::from_base(cfg.base))
    }

    pub fn into_base(self) -> SimConfig {
        self.base
    }

    pub fn base(&self) -> &SimConfig {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut SimConfig {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_english() {
        let cfg = EnglishConfig::default();
        assert_eq!(cfg.base.model_id, "gemini-1.5-flash-002");
        assert_eq!(cfg.base.sentence_macro_id, "SentenceEnglish20240703");
        assert_eq!(cfg.base.word_macro_id, "WordGeneric20240628");
        assert_eq!(cfg.base.initial_phrases.len(), 13);
    }

    #[test]
    fn toml_overrides_keep_language_defaults() {
        let cfg = EnglishConfig::from_toml_str(
            r#"
            literal_click_cost = 2
            model_id = "other-model"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.base.literal_click_cost, 2);
        assert_eq!(cfg.base.model_id, "other-model");
        assert_eq!(cfg.base.sentence_macro_id, "SentenceEnglish20240703");
        assert_eq!(cfg.base.initial_phrases[12], "Do you");
    }
}
