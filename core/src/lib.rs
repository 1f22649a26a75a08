//! voicesim-core
//!
//! Language-agnostic input simulation for AAC suggestion evaluation: the
//! simulation engine, the suggestion oracle boundary, cost accounting,
//! corpus metrics and reporting shared by the language crates
//! (voicesim-en, voicesim-ja).
//!
//! Public API:
//! - `Simulator` - Drives one target sentence from empty input to completion
//! - `Language` - Tokenization, matching and fallback rules for one language
//! - `SuggestionOracle` - Word/sentence suggestion source (HTTP or stub)
//! - `MacroClient` - Blocking HTTP client for the macro endpoint
//! - `CostLedger` / `SentenceReport` - Per-sentence click accounting
//! - `CorpusMetrics` / `Summary` - Corpus aggregation and derived rates
//! - `SimConfig` - Configuration loaded from TOML

pub mod config;
pub use config::{PromptHints, SimConfig};

pub mod error;
pub use error::{OracleError, SimError, SimResult};

pub mod oracle;
pub use oracle::{CachedOracle, SuggestionKind, SuggestionOracle, SuggestionRequest, parse_response};

pub mod client;
pub use client::MacroClient;

pub mod language;
pub use language::{Entry, InputState, Language, Target, WordQuery};

pub mod ledger;
pub use ledger::{CostLedger, SentenceReport, StepKind, StepRecord};

pub mod engine;
pub use engine::Simulator;

pub mod metrics;
pub use metrics::{CorpusMetrics, Histogram, Summary};

pub mod logging;
pub mod report;
pub mod runner;
