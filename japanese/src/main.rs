//! Japanese AAC input simulator
//!
//! Usage:
//!   voicesim-ja --dictionary ipadic/system.dic
//!   voicesim-ja --dictionary ipadic/system.dic --input corpus.txt --output results.csv
//!
//! The dictionary must be an uncompressed vibrato system dictionary compiled
//! from IPADIC. It can also be set with `dictionary = "..."` in the config.

use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use voicesim_core::runner::{run_batch, run_interactive};
use voicesim_core::{CachedOracle, MacroClient, SimError, Simulator, SuggestionOracle};
use voicesim_ja::{Japanese, JapaneseConfig, VibratoAnalyzer};

#[derive(Parser, Debug)]
#[command(name = "voicesim-ja")]
#[command(about = "Simulate AAC input of Japanese sentences with kana typing and suggestions")]
struct Args {
    /// Input file with one target sentence per line (requires --output)
    #[arg(short, long, requires = "output")]
    input: Option<PathBuf>,

    /// CSV file the run summary is appended to (requires --input)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Model used by the macro endpoint
    #[arg(long)]
    model_id: Option<String>,

    /// Macro producing sentence suggestions
    #[arg(long)]
    sentence_macro_id: Option<String>,

    /// Macro producing word suggestions
    #[arg(long)]
    word_macro_id: Option<String>,

    /// Macro endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Compiled system dictionary for the morphological analyzer
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    voicesim_core::logging::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => JapaneseConfig::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => JapaneseConfig::default(),
    };
    let base = config.base_mut();
    if let Some(v) = args.model_id {
        base.model_id = v;
    }
    if let Some(v) = args.sentence_macro_id {
        base.sentence_macro_id = v;
    }
    if let Some(v) = args.word_macro_id {
        base.word_macro_id = v;
    }
    if let Some(v) = args.endpoint {
        base.endpoint = v;
    }

    // The analyzer must be ready before any sentence is read.
    let dictionary = args.dictionary.or(config.dictionary.take()).ok_or_else(|| {
        SimError::BackendUnavailable("no dictionary configured; pass --dictionary or set `dictionary`".into())
    })?;
    let analyzer = VibratoAnalyzer::from_dictionary_path(&dictionary)
        .map_err(|e| SimError::BackendUnavailable(e.to_string()))?;
    info!(dictionary = %dictionary.display(), "morphological analyzer loaded");

    let config = config.into_base();
    let client = MacroClient::from_config(&config).context("failed to build macro client")?;
    let oracle: Box<dyn SuggestionOracle> = match NonZeroUsize::new(config.query_cache_size) {
        Some(capacity) => Box::new(CachedOracle::new(client, capacity)),
        None => Box::new(client),
    };
    info!(model = %config.model_id, endpoint = %config.endpoint, "starting Japanese simulator");

    let mut sim = Simulator::new(Japanese::new(analyzer), oracle, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match (args.input, args.output) {
        (Some(input), Some(output)) => {
            run_batch(&mut sim, &input, &output, &mut out)?;
        }
        _ => {
            let stdin = io::stdin();
            run_interactive(&mut sim, stdin.lock(), &mut out)?;
        }
    }
    Ok(())
}
