//! Language strategy used by the generic simulator.
//!
//! The simulator runs the same state machine for every language; a `Language`
//! supplies tokenization, token equality, rendering, the word-suggestion
//! match rule, literal/phonetic fallback entry and the termination test.

/// The sentence being reached. Immutable for one simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub surface: String,
    pub tokens: Vec<String>,
    /// Surface re-rendered from `tokens`.
    pub canonical: String,
}

impl Target {
    pub fn new<L: Language + ?Sized>(language: &L, surface: &str) -> Self {
        let tokens = language.tokenize(surface);
        let canonical = language.render(&tokens, false);
        Self {
            surface: surface.to_string(),
            tokens,
            canonical,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// What has been typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub tokens: Vec<String>,
    /// The surface ends at a token boundary (a space has been entered or a
    /// suggestion was accepted).
    pub sealed: bool,
}

impl InputState {
    pub fn new(tokens: Vec<String>, sealed: bool) -> Self {
        Self { tokens, sealed }
    }
}

/// Outcome of one fallback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Units typed literally, taking `selections` discrete selections.
    Literal { units: usize, selections: usize },
    /// The token was offered as a word suggestion after `typed_units` units.
    Assisted { typed_units: usize },
}

/// Callback issuing a word query for the given context text.
pub type WordQuery<'a> = dyn FnMut(&str) -> Vec<String> + 'a;

pub trait Language {
    /// Name sent to the oracle as `[[language]]`.
    fn name(&self) -> &str;

    /// Split surface text into tokens. Must be pure and deterministic.
    fn tokenize(&self, text: &str) -> Vec<String>;

    fn tokens_equal(&self, a: &str, b: &str) -> bool;

    /// Surface text for a token sequence.
    fn render(&self, tokens: &[String], sealed: bool) -> String;

    /// Tokens to commit if `phrase` is an acceptable opening for `target`.
    fn phrase_matches(&self, target: &Target, phrase: &str) -> Option<Vec<String>>;

    fn is_complete(&self, state: &InputState, target: &Target) -> bool;

    /// Token sequence after accepting `candidate` as a word suggestion, or
    /// None if it does not continue toward the target.
    fn match_word(&self, state: &InputState, target: &Target, candidate: &str) -> Option<Vec<String>>;

    /// Enter (part of) the next target token without a suggestion. Must make
    /// progress whenever the state is not complete.
    fn fallback(&self, state: &mut InputState, target: &Target, query: &mut WordQuery<'_>) -> Entry;

    /// First entry when no opening phrase applies. Defaults to `fallback`.
    fn seed(&self, state: &mut InputState, target: &Target, query: &mut WordQuery<'_>) -> Entry {
        self.fallback(state, target, query)
    }

    /// Phonetic reading of a whole sentence, for languages typed phonetically.
    fn reading(&self, _sentence: &str) -> Option<String> {
        None
    }

    /// Phonetic keystrokes needed to type `sentence` with no help at all.
    fn keystrokes(&self, sentence: &str) -> Option<usize> {
        self.reading(sentence).map(|r| r.chars().count())
    }

    fn surface(&self, state: &InputState) -> String {
        self.render(&state.tokens, state.sealed)
    }

    /// Number of leading state tokens equal to the target's.
    fn matched_len(&self, state: &InputState, target: &Target) -> usize {
        common_prefix_len(&state.tokens, &target.tokens, |a, b| self.tokens_equal(a, b))
    }
}

/// Length of the common prefix of two token sequences under `eq`.
pub fn common_prefix_len<F>(a: &[String], b: &[String], mut eq: F) -> usize
where
    F: FnMut(&str, &str) -> bool,
{
    a.iter().zip(b.iter()).take_while(|(x, y)| eq(x.as_str(), y.as_str())).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn common_prefix_stops_at_first_mismatch() {
        let a = toks(&["I", "am", "fine"]);
        let b = toks(&["I", "am", "tired", "fine"]);
        assert_eq!(common_prefix_len(&a, &b, |x, y| x == y), 2);
        assert_eq!(common_prefix_len(&a, &[], |x, y| x == y), 0);
    }

    #[test]
    fn common_prefix_uses_supplied_equality() {
        let a = toks(&["hello", "WORLD"]);
        let b = toks(&["Hello", "world", "!"]);
        assert_eq!(common_prefix_len(&a, &b, |x, y| x == y), 0);
        assert_eq!(
            common_prefix_len(&a, &b, |x, y| x.to_lowercase() == y.to_lowercase()),
            2
        );
    }
}
