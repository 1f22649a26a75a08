//! Kana script normalization.

use unicode_normalization::UnicodeNormalization;

const KATA_HIRA_OFFSET: u32 = 0x60;

/// Map katakana `ァ`..=`ン` to hiragana; everything else is kept.
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ('ァ'..='ン').contains(&c) {
                char::from_u32(c as u32 - KATA_HIRA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// NFKC (half-width kana to full-width, full-width ASCII to ASCII) followed
/// by katakana to hiragana.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    katakana_to_hiragana(&composed)
}
