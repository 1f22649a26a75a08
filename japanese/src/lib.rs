//! voicesim-ja crate root
//!
//! Japanese variant of the input simulator. Text is segmented by a
//! morphological analyzer and typed as kana readings; word suggestions are
//! checked while the reading is being typed.
//!
//! Public API exported here:
//! - `MorphAnalyzer`, `VibratoAnalyzer`, `StaticAnalyzer` from `analyzer`
//! - `Transcriber` from `transcriber`
//! - `Japanese` strategy from `language`
//! - `JapaneseConfig` from `config`

pub mod analyzer;
pub mod config;
pub mod kana;
pub mod language;
pub mod transcriber;

pub use analyzer::{AnalyzerError, Morpheme, MorphAnalyzer, StaticAnalyzer, VibratoAnalyzer};
pub use config::{JapaneseConfig, JAPANESE_INITIAL_PHRASES};
pub use language::Japanese;
pub use transcriber::Transcriber;
