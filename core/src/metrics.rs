//! Corpus-level aggregation of sentence reports.

use crate::ledger::SentenceReport;

/// Frequency of suggestion lengths: `bins` individual buckets plus one
/// overflow bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: usize,
    counts: Vec<usize>,
}

impl Histogram {
    pub fn new(bins: usize) -> Self {
        let bins = bins.max(1);
        Self {
            bins,
            counts: vec![0; bins + 1],
        }
    }

    /// Lengths of 0 fall into the first bucket.
    pub fn add(&mut self, len: usize) {
        let idx = len.clamp(1, self.bins + 1) - 1;
        self.counts[idx] += 1;
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Column labels, e.g. `SentSuggFreq_1` .. `SentSuggFreq_6plus`.
    pub fn labels(&self, prefix: &str) -> Vec<String> {
        (1..=self.bins)
            .map(|i| format!("{prefix}_{i}"))
            .chain(std::iter::once(format!("{prefix}_{}plus", self.bins + 1)))
            .collect()
    }
}

/// Running sums over every simulated sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusMetrics {
    pub lines: usize,
    pub target_chars: usize,
    pub clicks: usize,
    pub keystrokes: usize,
    /// False once any folded report lacked a phonetic baseline.
    has_baseline: bool,

    pub initial_phrase_count: usize,
    pub sentence_count: usize,
    pub sentence_segments: usize,
    pub sentence_chars: usize,
    pub word_count: usize,
    pub word_segments: usize,
    pub word_chars: usize,
    pub fallback_count: usize,
    pub selections: usize,

    pub sentence_hist: Histogram,
    pub word_hist: Histogram,
}

impl CorpusMetrics {
    pub fn new(bins: usize) -> Self {
        Self {
            lines: 0,
            target_chars: 0,
            clicks: 0,
            keystrokes: 0,
            has_baseline: true,
            initial_phrase_count: 0,
            sentence_count: 0,
            sentence_segments: 0,
            sentence_chars: 0,
            word_count: 0,
            word_segments: 0,
            word_chars: 0,
            fallback_count: 0,
            selections: 0,
            sentence_hist: Histogram::new(bins),
            word_hist: Histogram::new(bins),
        }
    }

    pub fn fold(&mut self, report: &SentenceReport) {
        let l = &report.ledger;
        self.lines += 1;
        self.target_chars += report.target_chars;
        self.clicks += l.clicks;
        match report.keystrokes {
            Some(k) => self.keystrokes += k,
            None => self.has_baseline = false,
        }
        self.initial_phrase_count += l.initial_phrase_count;
        self.sentence_count += l.sentence_count;
        self.sentence_segments += l.sentence_segments;
        self.sentence_chars += l.sentence_chars;
        self.word_count += l.word_count;
        self.word_segments += l.word_segments;
        self.word_chars += l.word_chars;
        self.fallback_count += l.fallback_count;
        self.selections += l.selections();
        for &len in &l.sentence_lengths {
            self.sentence_hist.add(len);
        }
        for &len in &l.word_lengths {
            self.word_hist.add(len);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    pub fn finalize(&self) -> Summary {
        let total_keystrokes = (self.has_baseline && self.lines > 0).then_some(self.keystrokes);
        let keystroke_saving_rate = total_keystrokes
            .filter(|&k| k > 0)
            .map(|k| 1.0 - self.clicks as f64 / k as f64);

        Summary {
            lines: self.lines,
            target_chars: self.target_chars,
            clicks: self.clicks,
            keystrokes: total_keystrokes,
            sentence_count: self.sentence_count,
            word_count: self.word_count,
            fallback_count: self.fallback_count,
            keystroke_saving_rate,
            chars_per_click: ratio(self.target_chars, self.clicks),
            suggestion_rate: ratio(self.sentence_count + self.word_count, self.selections),
            chars_per_selection: ratio(self.target_chars, self.selections),
            sentence_segments: self.sentence_segments,
            segments_per_sentence: ratio(self.sentence_segments, self.sentence_count),
            word_segments: self.word_segments,
            segments_per_word: ratio(self.word_segments, self.word_count),
            sentence_hist: self.sentence_hist.clone(),
            word_hist: self.word_hist.clone(),
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Derived corpus statistics. Rates are fractions in 0..=1.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub lines: usize,
    pub target_chars: usize,
    pub clicks: usize,
    /// Present only when every sentence had a phonetic baseline.
    pub keystrokes: Option<usize>,
    pub sentence_count: usize,
    pub word_count: usize,
    pub fallback_count: usize,
    pub keystroke_saving_rate: Option<f64>,
    pub chars_per_click: f64,
    pub suggestion_rate: f64,
    pub chars_per_selection: f64,
    pub sentence_segments: usize,
    pub segments_per_sentence: f64,
    pub word_segments: usize,
    pub segments_per_word: f64,
    pub sentence_hist: Histogram,
    pub word_hist: Histogram,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CostLedger;

    fn report(ledger: CostLedger, chars: usize, keystrokes: Option<usize>) -> SentenceReport {
        SentenceReport {
            target: "x".into(),
            target_chars: chars,
            keystrokes,
            ledger,
            steps: Vec::new(),
        }
    }

    #[test]
    fn histogram_overflow_bucket() {
        let mut h = Histogram::new(5);
        for len in [1, 2, 5, 6, 9, 0] {
            h.add(len);
        }
        assert_eq!(h.counts(), &[2, 1, 0, 0, 1, 2]);
        assert_eq!(h.total(), 6);
        assert_eq!(h.labels("WordSuggFreq").last().map(String::as_str), Some("WordSuggFreq_6plus"));
        assert_eq!(h.labels("WordSuggFreq").len(), 6);
    }

    #[test]
    fn keystroke_saving_rate_needs_baseline() {
        let mut ledger = CostLedger::new();
        ledger.record_initial_phrase(1);
        ledger.record_sentence(2, 8);

        let mut with = CorpusMetrics::new(5);
        with.fold(&report(ledger.clone(), 10, Some(8)));
        let s = with.finalize();
        assert_eq!(s.keystrokes, Some(8));
        assert!((s.keystroke_saving_rate.unwrap() - 0.75).abs() < 1e-9);

        let mut without = CorpusMetrics::new(5);
        without.fold(&report(ledger, 10, None));
        let s = without.finalize();
        assert_eq!(s.keystrokes, None);
        assert_eq!(s.keystroke_saving_rate, None);
    }

    #[test]
    fn suggestion_rate_excludes_initial_phrase_hits() {
        let mut ledger = CostLedger::new();
        ledger.record_initial_phrase(1);
        ledger.record_sentence(3, 12);
        ledger.record_word(1, 4, 0, 1);
        ledger.record_literal(1, 1, 1);

        let mut m = CorpusMetrics::new(5);
        m.fold(&report(ledger, 20, None));
        let s = m.finalize();
        assert!((s.suggestion_rate - 0.5).abs() < 1e-9);
        assert!((s.chars_per_click - 5.0).abs() < 1e-9);
        assert!((s.chars_per_selection - 5.0).abs() < 1e-9);
        assert_eq!(s.sentence_hist.counts()[2], 1);
        assert_eq!(s.word_hist.counts()[0], 1);
    }

    #[test]
    fn empty_corpus_has_zero_ratios() {
        let s = CorpusMetrics::new(5).finalize();
        assert_eq!(s.lines, 0);
        assert_eq!(s.chars_per_click, 0.0);
        assert_eq!(s.segments_per_word, 0.0);
        assert_eq!(s.keystroke_saving_rate, None);
    }
}
