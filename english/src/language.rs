//! English strategy: words are typed one character at a time.

use voicesim_core::{Entry, InputState, Language, Target, WordQuery};

use crate::tokenizer::{join_tokens, needs_space, tokenize};

/// Marker on word suggestions that complete a partially typed word.
pub const SUFFIX_MARKER: char = '-';

#[derive(Debug, Clone, Default)]
pub struct English;

impl English {
    pub fn new() -> Self {
        Self
    }

    /// Index of the target token whose characters are being typed, if the
    /// last state token is an incomplete prefix of it.
    fn partial_index(&self, state: &InputState, target: &Target) -> Option<usize> {
        let matched = self.matched_len(state, target);
        if state.tokens.len() != matched + 1 {
            return None;
        }
        let typed = state.tokens.last()?;
        let want = target.tokens.get(matched)?;
        remainder_ci(want, typed).filter(|rest| !rest.is_empty()).map(|_| matched)
    }

    /// The last token is finished but the space after it has not been
    /// entered yet.
    fn space_pending(&self, state: &InputState, target: &Target) -> bool {
        let matched = self.matched_len(state, target);
        !state.sealed
            && matched > 0
            && matched == state.tokens.len()
            && target.tokens.get(matched).is_some_and(|t| needs_space(&target.tokens[matched - 1], t))
    }

    fn type_char(&self, state: &mut InputState, target: &Target, enter_space: bool) -> Entry {
        let idx = match self.partial_index(state, target) {
            Some(idx) => {
                let typed = state.tokens[idx].chars().count();
                let Some(c) = target.tokens[idx].chars().nth(typed) else {
                    return Entry::Literal { units: 0, selections: 0 };
                };
                state.tokens[idx].push(c);
                idx
            }
            None => {
                let idx = self.matched_len(state, target);
                state.tokens.truncate(idx);
                let Some(c) = target.tokens.get(idx).and_then(|t| t.chars().next()) else {
                    return Entry::Literal { units: 0, selections: 0 };
                };
                state.tokens.push(c.to_string());
                idx
            }
        };
        state.sealed = false;

        let mut units = 1;
        let word_done = eq_ci(&state.tokens[idx], &target.tokens[idx]);
        let spaced = target.tokens.get(idx + 1).is_some_and(|t| needs_space(&target.tokens[idx], t));
        if enter_space && word_done && spaced {
            units += 1;
            state.sealed = true;
        }
        Entry::Literal { units, selections: units }
    }
}

/// The part of `word` after `prefix`, comparing case-insensitively.
fn remainder_ci<'a>(word: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = word.char_indices();
    for p in prefix.chars() {
        let (_, w) = rest.next()?;
        if !w.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    Some(rest.next().map(|(i, _)| &word[i..]).unwrap_or(""))
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Language for English {
    fn name(&self) -> &str {
        "English"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }

    fn tokens_equal(&self, a: &str, b: &str) -> bool {
        eq_ci(a, b)
    }

    fn render(&self, tokens: &[String], sealed: bool) -> String {
        let text = join_tokens(tokens);
        if sealed {
            text
        } else {
            text.trim_end().to_string()
        }
    }

    /// Whole-word, case-insensitive prefix of the target.
    fn phrase_matches(&self, target: &Target, phrase: &str) -> Option<Vec<String>> {
        let tokens = tokenize(phrase);
        if tokens.is_empty() || tokens.len() > target.len() {
            return None;
        }
        tokens
            .iter()
            .zip(&target.tokens)
            .all(|(p, t)| eq_ci(p, t))
            .then(|| target.tokens[..tokens.len()].to_vec())
    }

    /// The typed text starts with the target, ignoring case. Extra trailing
    /// text is allowed.
    fn is_complete(&self, state: &InputState, target: &Target) -> bool {
        let surface = self.surface(state).to_lowercase();
        surface.starts_with(&target.canonical.to_lowercase())
            || (state.tokens.len() == target.len() && self.matched_len(state, target) == target.len())
    }

    fn match_word(&self, state: &InputState, target: &Target, candidate: &str) -> Option<Vec<String>> {
        let candidate = candidate.trim();
        if let Some(idx) = self.partial_index(state, target) {
            let typed = state.tokens.last()?;
            let rest = remainder_ci(&target.tokens[idx], typed)?;
            let suffix = candidate.strip_prefix(SUFFIX_MARKER)?;
            return eq_ci(suffix, rest).then(|| target.tokens[..=idx].to_vec());
        }

        let matched = self.matched_len(state, target);
        if matched != state.tokens.len() {
            return None;
        }
        let next = target.tokens.get(matched)?;
        eq_ci(candidate, next).then(|| target.tokens[..=matched].to_vec())
    }

    /// Type one character of the current target token. Finishing a token
    /// that is followed by a space also enters the space.
    fn fallback(&self, state: &mut InputState, target: &Target, _query: &mut WordQuery<'_>) -> Entry {
        if self.space_pending(state, target) {
            state.sealed = true;
            return Entry::Literal { units: 1, selections: 1 };
        }
        self.type_char(state, target, true)
    }

    /// The first character alone; a following space is left to the next step.
    fn seed(&self, state: &mut InputState, target: &Target, _query: &mut WordQuery<'_>) -> Entry {
        self.type_char(state, target, false)
    }
}
