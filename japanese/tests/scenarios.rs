// japanese/tests/scenarios.rs
//
// End-to-end simulations of Japanese sentences with a deterministic
// in-memory analyzer and scripted oracles.
//
// Tests cover:
// - Target equal to an opening phrase costs one click
// - Always-empty oracle: sum of token reading lengths
// - Kana-by-kana seeding accepted as a word suggestion
// - Sentence suggestion followed by a mid-typing word suggestion
// - Keystroke baseline and saving rate

use voicesim_core::{
    CorpusMetrics, OracleError, SimConfig, Simulator, StepKind, SuggestionKind, SuggestionOracle, SuggestionRequest,
};
use voicesim_ja::{Japanese, JapaneseConfig, StaticAnalyzer};

struct Script(Vec<(SuggestionKind, &'static str, Vec<&'static str>)>);

impl SuggestionOracle for Script {
    fn suggest(&mut self, request: &SuggestionRequest) -> Result<Vec<String>, OracleError> {
        Ok(self
            .0
            .iter()
            .find(|(kind, text, _)| *kind == request.kind && *text == request.text)
            .map(|(_, _, items)| items.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default())
    }
}

fn japanese() -> Japanese<StaticAnalyzer> {
    Japanese::new(StaticAnalyzer::with_entries([
        ("ありがとう", "アリガトウ"),
        ("ござい", "ゴザイ"),
        ("ます", "マス"),
        ("私", "ワタシ"),
        ("は", "ハ"),
        ("元気", "ゲンキ"),
        ("です", "デス"),
        ("今日", "キョウ"),
        ("天気", "テンキ"),
        ("いい", "イイ"),
        ("ね", "ネ"),
    ]))
}

fn config() -> SimConfig {
    JapaneseConfig::default().into_base()
}

fn without_phrases() -> SimConfig {
    SimConfig {
        initial_phrases: Vec::new(),
        ..config()
    }
}

#[test]
fn greeting_from_phrase_list_costs_one_click() {
    let mut sim = Simulator::new(japanese(), Script(Vec::new()), config());
    let report = sim.simulate("ありがとう").unwrap();
    assert_eq!(report.ledger.clicks, 1);
    assert_eq!(report.ledger.initial_phrase_count, 1);
    assert_eq!(report.steps.len(), 1);
}

#[test]
fn empty_oracle_types_every_reading() {
    let mut sim = Simulator::new(japanese(), Script(Vec::new()), without_phrases());
    let report = sim.simulate("私は元気です").unwrap();

    // わたし + は + げんき + です
    assert_eq!(report.ledger.clicks, 3 + 1 + 3 + 2);
    assert_eq!(report.ledger.fallback_count, 4);
    assert_eq!(report.ledger.fallback_units, 9);
    assert_eq!(report.keystrokes, Some(9));
    assert!(report.steps.iter().all(|s| s.kind == StepKind::Literal));
}

#[test]
fn seeding_accepts_token_while_typing_reading() {
    let oracle = Script(vec![(SuggestionKind::Word, "きょ", vec!["今", "今日"])]);
    let mut sim = Simulator::new(japanese(), oracle, without_phrases());
    let report = sim.simulate("今日").unwrap();

    assert_eq!(report.ledger.clicks, 3);
    assert_eq!(report.ledger.word_count, 1);
    assert_eq!(report.ledger.assisted_units, 2);
    assert_eq!(report.steps[0].kind, StepKind::Assisted);
}

#[test]
fn sentence_then_mid_typing_word() {
    let oracle = Script(vec![
        (SuggestionKind::Sentence, "今日", vec!["今日は雨です", "今日は天気が悪い"]),
        (SuggestionKind::Word, "今日は天気", vec!["です", "いい"]),
        (SuggestionKind::Word, "ね", vec!["ね"]),
    ]);
    let mut sim = Simulator::new(japanese(), oracle, config());
    let report = sim.simulate("今日は天気いいね").unwrap();

    let kinds: Vec<StepKind> = report.steps.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![StepKind::InitialPhrase, StepKind::Sentence, StepKind::Word, StepKind::Assisted]
    );
    assert_eq!(report.steps[1].segments, 2);
    assert_eq!(report.steps[1].added, "は天気");
    // phrase 1, sentence 1, word 1, "ね" after one kana 2
    assert_eq!(report.ledger.clicks, 5);
}

#[test]
fn full_context_first_kana_is_tried_first() {
    let oracle = Script(vec![(SuggestionKind::Word, "私はげ", vec!["元気"])]);
    let mut sim = Simulator::new(japanese(), oracle, config());
    let report = sim.simulate("私は元気").unwrap();

    // phrase "私", "は" typed (1 kana), then 元気 from the context query
    assert_eq!(report.ledger.clicks, 1 + 1 + 2);
    assert_eq!(report.steps[2].kind, StepKind::Assisted);
}

#[test]
fn keystroke_saving_rate_over_corpus() {
    let mut sim = Simulator::new(japanese(), Script(Vec::new()), config());
    let mut metrics = CorpusMetrics::new(5);
    for line in ["ありがとうございます", "私は元気です"] {
        metrics.fold(&sim.simulate(line).unwrap());
    }
    let summary = metrics.finalize();

    // ありがとうございます: phrase + ございます typed (ござい 3 + ます 2)
    // 私は元気です: phrase + は 1 + げんき 3 + です 2
    assert_eq!(summary.clicks, (1 + 5) + (1 + 6));
    assert_eq!(summary.keystrokes, Some(10 + 9));
    let ksr = summary.keystroke_saving_rate.unwrap();
    assert!((ksr - (1.0 - 13.0 / 19.0)).abs() < 1e-9);
}
