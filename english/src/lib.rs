//! voicesim-en crate root
//!
//! English variant of the input simulator: whitespace/punctuation
//! tokenization, case-insensitive matching and character-by-character
//! fallback with an implicit space click at word boundaries.
//!
//! Public API exported here:
//! - `tokenize`, `join_tokens`, `is_punctuation`, `needs_space` from `tokenizer`
//! - `English` strategy from `language`
//! - `EnglishConfig` from `config`

pub mod config;
pub mod language;
pub mod tokenizer;

pub use config::{EnglishConfig, ENGLISH_INITIAL_PHRASES};
pub use language::English;
pub use tokenizer::{is_punctuation, join_tokens, needs_space, tokenize};
