// core/src/engine.rs
//
// Generic input-simulation engine that works with any language strategy.
// English and Japanese share this loop; only the `Language` impl differs.

use tracing::{debug, warn};

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::language::{Entry, InputState, Language, Target};
use crate::ledger::{CostLedger, SentenceReport, StepKind, StepRecord};
use crate::oracle::{SuggestionKind, SuggestionOracle, SuggestionRequest};

/// Replays how a user reaches a known sentence with suggestion support.
///
/// Type parameter L is the language strategy, O the suggestion oracle.
/// Oracle queries are issued one at a time, in order; a failed query counts as
/// an empty suggestion list.
pub struct Simulator<L, O> {
    language: L,
    oracle: O,
    config: SimConfig,
}

impl<L: Language, O: SuggestionOracle> Simulator<L, O> {
    pub fn new(language: L, oracle: O, config: SimConfig) -> Self {
        Self {
            language,
            oracle,
            config,
        }
    }

    pub fn language(&self) -> &L {
        &self.language
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn into_parts(self) -> (L, O, SimConfig) {
        (self.language, self.oracle, self.config)
    }

    /// Simulate one target sentence from empty input to completion.
    ///
    /// 1. Seeding: commit the longest matching opening phrase (1 click), or
    ///    take one fallback step on the empty input.
    /// 2. Until the language reports completion:
    ///    - accept the sentence suggestion that matches the most target
    ///      tokens beyond those already matched (first listed wins ties),
    ///    - otherwise accept the first word suggestion that continues the
    ///      target,
    ///    - otherwise take one fallback step.
    ///
    /// Committed tokens are never revised.
    pub fn simulate(&mut self, sentence: &str) -> SimResult<SentenceReport> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Err(SimError::EmptyTarget);
        }
        let target = Target::new(&self.language, sentence);
        if target.is_empty() {
            return Err(SimError::EmptyTarget);
        }

        let mut ledger = CostLedger::new();
        let mut steps = Vec::new();
        let mut state = InputState::default();

        // Seeding
        match self.opening_phrase(&target) {
            Some(tokens) => {
                let next = InputState::new(tokens, true);
                let step = self.commit(&state, &next, &target, StepKind::InitialPhrase, &mut ledger);
                state = next;
                steps.push(step);
            }
            None => steps.push(self.fallback_step(&mut state, &target, &mut ledger, true)),
        }

        let limit = target.len() + target.canonical.chars().count() + 1;
        let mut iterations = 0;
        while !self.language.is_complete(&state, &target) {
            iterations += 1;
            if iterations > limit {
                return Err(SimError::Stalled {
                    target: target.surface.clone(),
                    iterations,
                });
            }

            if let Some(next) = self.select_sentence(&state, &target) {
                let step = self.commit(&state, &next, &target, StepKind::Sentence, &mut ledger);
                state = next;
                steps.push(step);
                continue;
            }

            if let Some(next) = self.select_word(&state, &target) {
                let step = self.commit(&state, &next, &target, StepKind::Word, &mut ledger);
                state = next;
                steps.push(step);
                continue;
            }

            steps.push(self.fallback_step(&mut state, &target, &mut ledger, false));
        }

        Ok(SentenceReport {
            target: target.surface.clone(),
            target_chars: target.canonical.chars().count(),
            keystrokes: self.language.keystrokes(&target.surface),
            ledger,
            steps,
        })
    }

    /// Longest configured opening phrase accepted by the language; earlier
    /// entries win ties.
    fn opening_phrase(&self, target: &Target) -> Option<Vec<String>> {
        let mut best: Option<(usize, Vec<String>)> = None;
        for phrase in self.config.initial_phrases.iter().filter(|p| !p.is_empty()) {
            let len = phrase.chars().count();
            if best.as_ref().is_some_and(|(best_len, _)| len <= *best_len) {
                continue;
            }
            if let Some(tokens) = self.language.phrase_matches(target, phrase) {
                best = Some((len, tokens));
            }
        }
        best.map(|(_, tokens)| tokens)
    }

    fn select_sentence(&mut self, state: &InputState, target: &Target) -> Option<InputState> {
        let surface = self.language.surface(state);
        if surface.is_empty() {
            return None;
        }
        let matched = self.language.matched_len(state, target);
        let candidates = query(&mut self.oracle, &self.config, self.language.name(), SuggestionKind::Sentence, &surface);

        let mut best = matched;
        for candidate in candidates.iter().take(self.config.sentence_suggestion_limit) {
            let tokens = self.language.tokenize(candidate);
            let len = crate::language::common_prefix_len(&target.tokens, &tokens, |a, b| {
                self.language.tokens_equal(a, b)
            });
            if len > best {
                best = len;
            }
        }

        (best > matched).then(|| InputState::new(target.tokens[..best].to_vec(), true))
    }

    fn select_word(&mut self, state: &InputState, target: &Target) -> Option<InputState> {
        if self.language.matched_len(state, target) >= target.len() {
            return None;
        }
        let surface = self.language.surface(state);
        if surface.is_empty() {
            return None;
        }
        let candidates = query(&mut self.oracle, &self.config, self.language.name(), SuggestionKind::Word, &surface);
        candidates
            .iter()
            .find_map(|candidate| self.language.match_word(state, target, candidate))
            .map(|tokens| InputState::new(tokens, true))
    }

    fn fallback_step(
        &mut self,
        state: &mut InputState,
        target: &Target,
        ledger: &mut CostLedger,
        seeding: bool,
    ) -> StepRecord {
        let before_surface = self.language.surface(state);
        let before_matched = self.language.matched_len(state, target);

        let Self {
            language,
            oracle,
            config,
        } = self;
        let config: &SimConfig = config;
        let name = language.name().to_string();
        let mut word_query = |text: &str| query(&mut *oracle, config, &name, SuggestionKind::Word, text);
        let entry = if seeding {
            language.seed(state, target, &mut word_query)
        } else {
            language.fallback(state, target, &mut word_query)
        };

        let added = appended(&before_surface, &language.surface(state));
        let segments = language.matched_len(state, target).saturating_sub(before_matched);
        let unit_cost = config.literal_click_cost;

        let step = match entry {
            Entry::Literal { units, selections } => StepRecord {
                kind: StepKind::Literal,
                clicks: ledger.record_literal(units, selections, unit_cost),
                segments,
                added,
            },
            Entry::Assisted { typed_units } => StepRecord {
                kind: StepKind::Assisted,
                clicks: ledger.record_word(segments, added.chars().count(), typed_units, unit_cost),
                segments,
                added,
            },
        };
        debug!(target: "voicesim::step", "{step}");
        step
    }

    /// Record the transition from `from` to `to` for a one-click selection.
    fn commit(
        &self,
        from: &InputState,
        to: &InputState,
        target: &Target,
        kind: StepKind,
        ledger: &mut CostLedger,
    ) -> StepRecord {
        let before = self.language.surface(from);
        let after = self.language.surface(to);
        let added = appended(&before, &after);
        let chars = after.chars().count().saturating_sub(before.chars().count());
        let segments = self
            .language
            .matched_len(to, target)
            .saturating_sub(self.language.matched_len(from, target));

        let clicks = match kind {
            StepKind::InitialPhrase => ledger.record_initial_phrase(segments),
            StepKind::Sentence => ledger.record_sentence(segments, chars),
            _ => ledger.record_word(segments, chars, 0, self.config.literal_click_cost),
        };
        let step = StepRecord {
            kind,
            clicks,
            segments,
            added,
        };
        debug!(target: "voicesim::step", "{step}");
        step
    }
}

/// Issue one oracle query. Failures are logged and read as "no suggestions".
///
/// `language` is used unless the config names the language explicitly.
fn query<O: SuggestionOracle>(
    oracle: &mut O,
    config: &SimConfig,
    language: &str,
    kind: SuggestionKind,
    text: &str,
) -> Vec<String> {
    let request = SuggestionRequest {
        text: text.to_string(),
        count: config.requested_suggestions,
        kind,
        language: if config.language.is_empty() {
            language.to_string()
        } else {
            config.language.clone()
        },
        temperature: config.temperature,
        hints: config.hints.clone(),
    };
    match oracle.suggest(&request) {
        Ok(suggestions) => {
            debug!(target: "voicesim::oracle", kind = kind.as_str(), text, ?suggestions, "suggestions");
            suggestions
        }
        Err(e) => {
            warn!(kind = kind.as_str(), text, error = %e, "oracle query failed; treating as empty");
            Vec::new()
        }
    }
}

/// Text added to `before` to produce `after`. When the step rewrote a partial
/// token the whole new surface past the common prefix is reported.
fn appended(before: &str, after: &str) -> String {
    let common = before
        .char_indices()
        .zip(after.chars())
        .take_while(|((_, a), b)| a == b)
        .last()
        .map(|((i, a), _)| i + a.len_utf8())
        .unwrap_or(0);
    after[common..].to_string()
}
