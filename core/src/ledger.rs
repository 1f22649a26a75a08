//! Per-sentence cost accounting.

use std::fmt;

/// How a step advanced the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    InitialPhrase,
    Sentence,
    Word,
    /// Word suggestion accepted after typing part of the token's reading.
    Assisted,
    Literal,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InitialPhrase => "Initial Phrase",
            Self::Sentence => "Sentence Suggestion",
            Self::Word => "Word Suggestion",
            Self::Assisted => "Word Sugg. (Mid-typing)",
            Self::Literal => "Direct Input",
        };
        f.write_str(label)
    }
}

/// One transition of the simulation, kept for the interactive breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub kind: StepKind,
    pub clicks: usize,
    /// Segments (tokens) newly matched against the target.
    pub segments: usize,
    /// Surface text appended by this step.
    pub added: String,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: clicks +{} (Added {} segments: '{}')",
            self.kind, self.clicks, self.segments, self.added
        )
    }
}

/// Counters for one sentence. Only ever incremented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostLedger {
    pub clicks: usize,

    pub initial_phrase_count: usize,
    pub initial_phrase_segments: usize,

    pub sentence_count: usize,
    pub sentence_segments: usize,
    pub sentence_chars: usize,

    pub word_count: usize,
    pub word_segments: usize,
    pub word_chars: usize,
    /// Units typed before a word suggestion was accepted.
    pub assisted_units: usize,

    /// Discrete literal selections (characters and spaces, or whole tokens
    /// entered by reading).
    pub fallback_count: usize,
    pub fallback_units: usize,

    /// Segments gained by each accepted suggestion, in order.
    pub sentence_lengths: Vec<usize>,
    pub word_lengths: Vec<usize>,
}

impl CostLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_initial_phrase(&mut self, segments: usize) -> usize {
        self.clicks += 1;
        self.initial_phrase_count += 1;
        self.initial_phrase_segments += segments;
        1
    }

    pub fn record_sentence(&mut self, segments: usize, chars: usize) -> usize {
        self.clicks += 1;
        self.sentence_count += 1;
        self.sentence_segments += segments;
        self.sentence_chars += chars;
        self.sentence_lengths.push(segments);
        1
    }

    /// A word suggestion taken after `typed_units` literal units, each costing
    /// `unit_cost` clicks. Returns the clicks charged.
    pub fn record_word(&mut self, segments: usize, chars: usize, typed_units: usize, unit_cost: usize) -> usize {
        let clicks = typed_units * unit_cost + 1;
        self.clicks += clicks;
        self.word_count += 1;
        self.word_segments += segments;
        self.word_chars += chars;
        self.assisted_units += typed_units;
        self.word_lengths.push(segments);
        clicks
    }

    pub fn record_literal(&mut self, units: usize, selections: usize, unit_cost: usize) -> usize {
        let clicks = units * unit_cost;
        self.clicks += clicks;
        self.fallback_count += selections;
        self.fallback_units += units;
        clicks
    }

    /// Every discrete selection: phrases, suggestions and literal entries.
    pub fn selections(&self) -> usize {
        self.initial_phrase_count + self.sentence_count + self.word_count + self.fallback_count
    }
}

/// Result of simulating one target sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceReport {
    pub target: String,
    pub target_chars: usize,
    /// Phonetic keystrokes needed without any suggestion, when the language
    /// has a phonetic baseline.
    pub keystrokes: Option<usize>,
    pub ledger: CostLedger,
    pub steps: Vec<StepRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_costs_one_click_regardless_of_length() {
        let mut ledger = CostLedger::new();
        assert_eq!(ledger.record_sentence(7, 30), 1);
        assert_eq!(ledger.record_word(1, 5, 0, 2), 1);
        assert_eq!(ledger.clicks, 2);
        assert_eq!(ledger.sentence_lengths, vec![7]);
        assert_eq!(ledger.word_lengths, vec![1]);
    }

    #[test]
    fn assisted_word_charges_typed_units() {
        let mut ledger = CostLedger::new();
        assert_eq!(ledger.record_word(1, 2, 3, 1), 4);
        assert_eq!(ledger.assisted_units, 3);
        assert_eq!(ledger.word_count, 1);
    }

    #[test]
    fn literal_entry_scales_with_unit_cost() {
        let mut ledger = CostLedger::new();
        assert_eq!(ledger.record_literal(2, 2, 2), 4);
        assert_eq!(ledger.record_literal(4, 1, 1), 4);
        assert_eq!(ledger.clicks, 8);
        assert_eq!(ledger.fallback_count, 3);
        assert_eq!(ledger.fallback_units, 6);
    }

    #[test]
    fn selections_count_every_category() {
        let mut ledger = CostLedger::new();
        ledger.record_initial_phrase(1);
        ledger.record_sentence(2, 8);
        ledger.record_word(1, 3, 0, 1);
        ledger.record_literal(1, 1, 1);
        assert_eq!(ledger.selections(), 4);
        assert_eq!(ledger.clicks, 4);
    }

    #[test]
    fn step_display_matches_trace_format() {
        let step = StepRecord {
            kind: StepKind::Sentence,
            clicks: 1,
            segments: 3,
            added: "am fine.".into(),
        };
        assert_eq!(
            step.to_string(),
            "Sentence Suggestion: clicks +1 (Added 3 segments: 'am fine.')"
        );
    }
}
