//! Fragment merging for words split by the text extractor.
//!
//! Extractors often break a word at kerning or font-subset boundaries. Two
//! neighbouring tokens are joined when the gap between them is small and
//! either one of them is short or both are purely alphabetic.

use super::params::LayoutParams;
use super::types::Token;

fn should_merge(prev: &Token, next: &Token, params: &LayoutParams) -> bool {
    let gap = next.x0 - prev.x1;
    gap <= params.fragment_gap
        && (prev.char_len() <= params.short_fragment_len
            || next.char_len() <= params.short_fragment_len
            || (prev.is_alphabetic() && next.is_alphabetic()))
}

/// Merge adjacent fragments of a line's words.
///
/// `words` must already be sorted by `x0`. Runs left to right in a single
/// pass; a merged token keeps absorbing following tokens while the rule
/// holds. Alphabetic pairs are joined without a separator, anything else
/// with one space.
pub fn merge_fragments(words: Vec<Token>, params: &LayoutParams) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(words.len());
    for word in words {
        if let Some(prev) = merged.last_mut()
            && should_merge(prev, &word, params)
        {
            let joiner = if prev.is_alphabetic() && word.is_alphabetic() {
                ""
            } else {
                " "
            };
            let text = format!("{}{}{}", prev.text, joiner, word.text);
            prev.text = text.trim().to_string();
            prev.x1 = word.x1;
            continue;
        }
        merged.push(word);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, x0: f64, x1: f64) -> Token {
        Token::new(text, x0, 0.0, x1, 10.0)
    }

    #[test]
    fn test_merge_alphabetic_fragments() {
        let out = merge_fragments(
            vec![tok("Jo", 0.0, 10.0), tok("hn", 11.0, 20.0)],
            &LayoutParams::default(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "John");
        assert_eq!(out[0].x0, 0.0);
        assert_eq!(out[0].x1, 20.0);
    }

    #[test]
    fn test_merge_short_numeric_uses_space() {
        let out = merge_fragments(
            vec![tok("12", 0.0, 10.0), tok("345", 14.0, 30.0)],
            &LayoutParams::default(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "12 345");
    }

    #[test]
    fn test_no_merge_across_wide_gap() {
        let out = merge_fragments(
            vec![tok("Jo", 0.0, 10.0), tok("hn", 22.5, 30.0)],
            &LayoutParams::default(),
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_no_merge_long_mixed_tokens() {
        let out = merge_fragments(
            vec![tok("1234", 0.0, 10.0), tok("5678", 12.0, 30.0)],
            &LayoutParams::default(),
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_merged_token_keeps_absorbing() {
        let out = merge_fragments(
            vec![
                tok("Inter", 0.0, 20.0),
                tok("nation", 21.0, 45.0),
                tok("al", 46.0, 52.0),
            ],
            &LayoutParams::default(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "International");
        assert_eq!(out[0].x1, 52.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_fragments(Vec::new(), &LayoutParams::default()).is_empty());
    }
}
