use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voicesim_core::{SimConfig, SimResult};

pub const JAPANESE_INITIAL_PHRASES: &[&str] = &[
    "はい", "いいえ", "ありがとう", "すみません", "お願いします", "私", "あなた", "彼", "彼女", "今日", "昨日", "明日",
];

pub const DEFAULT_MODEL_ID: &str = "gemini-2.0-flash-001";
pub const DEFAULT_SENTENCE_MACRO_ID: &str = "SentenceJapaneseLong20250424";

/// Japanese configuration that extends the base `SimConfig` from core.
///
/// Adds the path of the compiled system dictionary used by the
/// morphological analyzer. Blank language fields of the base config are
/// filled with the Japanese defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JapaneseConfig {
    #[serde(flatten)]
    pub base: SimConfig,

    /// Uncompressed IPADIC-format `system.dic` for vibrato.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
}

impl Default for JapaneseConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl JapaneseConfig {
    pub fn new() -> Self {
        Self::from_base(SimConfig::default())
    }

    pub fn from_base(base: SimConfig) -> Self {
        let mut cfg = Self {
            base,
            dictionary: None,
        };
        cfg.fill_defaults();
        cfg
    }

    fn fill_defaults(&mut self) {
        let base = &mut self.base;
        if base.initial_phrases.is_empty() {
            base.initial_phrases = JAPANESE_INITIAL_PHRASES.iter().map(|s| s.to_string()).collect();
        }
        if base.model_id.is_empty() {
            base.model_id = DEFAULT_MODEL_ID.to_string();
        }
        if base.sentence_macro_id.is_empty() {
            base.sentence_macro_id = DEFAULT_SENTENCE_MACRO_ID.to_string();
        }
        if base.language.is_empty() {
            base.language = "Japanese".to_string();
        }
    }

    pub fn load_toml<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut cfg: Self = toml::from_str(content)?;
        cfg.fill_defaults();
        Ok(cfg)
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
    fn defaults_are_japanese() {
        let cfg = JapaneseConfig::new();
        assert_eq!(cfg.base.model_id, "gemini-2.0-flash-001");
        assert_eq!(cfg.base.sentence_macro_id, "SentenceJapaneseLong20250424");
        assert_eq!(cfg.base.language, "Japanese");
        assert_eq!(cfg.base.initial_phrases[2], "ありがとう");
        assert!(cfg.dictionary.is_none());
    }

    #[test]
    fn toml_sets_dictionary_and_overrides() {
        let cfg = JapaneseConfig::from_toml_str(
            r#"
            dictionary = "/opt/ipadic/system.dic"
            sentence_suggestion_limit = 3

            [hints]
            persona = "大学生"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.dictionary, Some(PathBuf::from("/opt/ipadic/system.dic")));
        assert_eq!(cfg.base.sentence_suggestion_limit, 3);
        assert_eq!(cfg.base.hints.persona, "大学生");
        assert_eq!(cfg.base.initial_phrases.len(), 12);
    }
}
