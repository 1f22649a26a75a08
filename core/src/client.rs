//! HTTP client for the macro endpoint.
//!
//! The endpoint fills a prompt template from `userInputs`, runs the model and
//! answers `{"messages": [{"text": "1. ...\n2. ..."}]}`.
//!
//! Uses the `reqwest` blocking client: the simulator issues one query at a
//! time, so there is nothing to gain from an async runtime.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::config::SimConfig;
use crate::error::OracleError;
use crate::oracle::{extract_message_text, parse_response, SuggestionKind, SuggestionOracle, SuggestionRequest};

/// Macro endpoint client. Selects the sentence or word macro by request kind.
pub struct MacroClient {
    endpoint: String,
    model_id: String,
    sentence_macro_id: String,
    word_macro_id: String,
    client: reqwest::blocking::Client,
}

impl MacroClient {
    pub fn new(
        endpoint: impl Into<String>,
        model_id: impl Into<String>,
        sentence_macro_id: impl Into<String>,
        word_macro_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            model_id: model_id.into(),
            sentence_macro_id: sentence_macro_id.into(),
            word_macro_id: word_macro_id.into(),
            client,
        })
    }

    pub fn from_config(cfg: &SimConfig) -> Result<Self, OracleError> {
        Self::new(
            cfg.endpoint.clone(),
            cfg.model_id.clone(),
            cfg.sentence_macro_id.clone(),
            cfg.word_macro_id.clone(),
            Duration::from_millis(cfg.timeout_ms),
        )
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn macro_id(&self, kind: SuggestionKind) -> &str {
        match kind {
            SuggestionKind::Sentence => &self.sentence_macro_id,
            SuggestionKind::Word => &self.word_macro_id,
        }
    }

    /// POST the macro form and return the raw response body.
    fn run_macro(&self, request: &SuggestionRequest) -> Result<String, OracleError> {
        let user_inputs = serde_json::to_string(&user_inputs(request))?;
        let temperature = request.temperature.to_string();
        let form = [
            ("id", self.macro_id(request.kind)),
            ("userInputs", user_inputs.as_str()),
            ("temperature", temperature.as_str()),
            ("model_id", self.model_id.as_str()),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()?
            .error_for_status()?;
        Ok(response.text()?)
    }
}

/// Template inputs for a request: `language`, `num`, `text` plus non-empty hints.
pub fn user_inputs(request: &SuggestionRequest) -> Map<String, Value> {
    let mut inputs = Map::new();
    inputs.insert("language".into(), Value::String(request.language.clone()));
    inputs.insert("num".into(), Value::String(request.count.to_string()));
    inputs.insert("text".into(), Value::String(request.text.clone()));
    for (key, value) in request.hints.fields() {
        inputs.insert(key.into(), Value::String(value.to_string()));
    }
    inputs
}

impl SuggestionOracle for MacroClient {
    fn suggest(&mut self, request: &SuggestionRequest) -> Result<Vec<String>, OracleError> {
        let body = self.run_macro(request)?;
        let text = extract_message_text(&body)?;
        Ok(parse_response(&text))
    }
}
