use std::path::PathBuf;

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("linguistic backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("input file not found at `{0}`")]
    InputNotFound(PathBuf),

    #[error("target sentence is empty")]
    EmptyTarget,

    #[error("simulation of `{target}` made no progress after {iterations} steps")]
    Stalled { target: String, iterations: usize },
}

/// Failure of a single oracle call. Never fatal: the engine treats it as an
/// empty suggestion list.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("http failure: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed oracle response: {0}")]
    Decode(String),

    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
