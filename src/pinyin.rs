//! Reading aid for the Chinese prompt: Hanzi → tone-marked pinyin.
//!
//!   "我很開心。" → "wǒ hěn kāi xīn。"
use ::pinyin::ToPinyin;

/// Per-character conversion (no word segmentation, default reading for
/// polyphones). Syllables are space-separated; anything that is not Hanzi,
/// punctuation included, is copied through and breaks the spacing run.
pub fn to_pinyin_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut after_syllable = false;

    for ch in text.chars() {
        match ch.to_pinyin() {
            Some(py) => {
                if after_syllable {
                    out.push(' ');
                }
                out.push_str(py.with_tone());
                after_syllable = true;
            }
            None => {
                out.push(ch);
                after_syllable = false;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_hanzi_passes_through() {
        assert_eq!(to_pinyin_diacritics("OK 2025!"), "OK 2025!");
        assert_eq!(to_pinyin_diacritics(""), "");
    }

    #[test]
    fn syllables_are_space_separated() {
        let py = to_pinyin_diacritics("我們");
        assert_eq!(py.split(' ').count(), 2);
        assert!(py.starts_with("wǒ"));
    }
}
