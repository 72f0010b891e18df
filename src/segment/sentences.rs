//! Sentence boundary detection.
//!
//! A boundary closes after a terminal mark (`.`, `!`, `?`) plus any
//! trailing closing quotes/brackets, when followed by whitespace and then
//! end-of-paragraph, an uppercase letter, or an opening quote. A period is
//! not a boundary when it ends a configured abbreviation or a single
//! uppercase initial, or when the next word starts lowercase or with a
//! digit (decimals, list continuations).
//!
//! Known misclassification classes (accepted behavior, not bugs):
//! - an abbreviation outside the exception list followed by an uppercase
//!   word splits ("Col. Mustard" → two sentences)
//! - a sentence legitimately ending before a lowercase word merges
//!   ("...et al. wrote" stays joined)

use std::collections::BTreeSet;

/// Closing characters that stay attached to the sentence they follow.
fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | '\u{201d}' | '\u{2019}' | ')' | ']')
}

/// Characters that may open a new sentence.
fn is_opener(c: char) -> bool {
    c.is_uppercase() || matches!(c, '"' | '\'' | '\u{201c}' | '\u{2018}' | '(')
}

/// Split a paragraph into sentences.
///
/// The input is expected to be whitespace-normalized (soft wraps already
/// collapsed). A paragraph with no terminal punctuation is returned as a
/// single sentence.
pub fn split_sentences(paragraph: &str, abbreviations: &BTreeSet<String>) -> Vec<String> {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut sentences: Vec<String> = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if matches!(c, '.' | '!' | '?') {
            // Pull trailing closers into the sentence before judging.
            let mut end = i + 1;
            while end < chars.len() && is_closer(chars[end]) {
                end += 1;
            }

            let at_end = end == chars.len();
            let followed_by_space = !at_end && chars[end].is_whitespace();
            let non_boundary_period = c == '.' && is_exception_word(&chars, start, i, abbreviations);

            if (at_end || followed_by_space) && !non_boundary_period {
                let mut next = end;
                while next < chars.len() && chars[next].is_whitespace() {
                    next += 1;
                }
                if next >= chars.len() || is_opener(chars[next]) {
                    push_sentence(&mut sentences, &chars[start..end]);
                    start = next;
                    i = next;
                    continue;
                }
            }
        }
        i += 1;
    }

    if start < chars.len() {
        push_sentence(&mut sentences, &chars[start..]);
    }

    sentences
}

/// Check whether the period at `period_idx` ends an abbreviation or a
/// single uppercase initial.
fn is_exception_word(
    chars: &[char],
    sentence_start: usize,
    period_idx: usize,
    abbreviations: &BTreeSet<String>,
) -> bool {
    let mut word_start = period_idx;
    while word_start > sentence_start && !chars[word_start - 1].is_whitespace() {
        word_start -= 1;
    }

    // Drop leading punctuation such as an opening quote before the word.
    let mut word: &[char] = &chars[word_start..=period_idx];
    while let Some(&first) = word.first() {
        if first.is_alphanumeric() {
            break;
        }
        word = &word[1..];
    }
    if word.is_empty() {
        return false;
    }

    // Single uppercase initial, e.g. the "J." in "J. R. Tolkien".
    if word.len() == 2 && word[0].is_alphabetic() && word[0].is_uppercase() {
        return true;
    }

    let word: String = word.iter().collect();
    abbreviations.contains(&word)
}

fn push_sentence(sentences: &mut Vec<String>, chars: &[char]) {
    let sentence: String = chars.iter().collect();
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SegmentOptions;

    fn split(text: &str) -> Vec<String> {
        split_sentences(text, &SegmentOptions::default().abbreviations)
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(
            split("Hello world. This is a test."),
            vec!["Hello world.", "This is a test."]
        );
    }

    #[test]
    fn test_exclamation_and_question() {
        assert_eq!(
            split("Stop! Why? Because."),
            vec!["Stop!", "Why?", "Because."]
        );
    }

    #[test]
    fn test_abbreviation_not_split() {
        assert_eq!(
            split("Dr. Smith arrived. He left soon."),
            vec!["Dr. Smith arrived.", "He left soon."]
        );
    }

    #[test]
    fn test_multiple_abbreviations() {
        assert_eq!(
            split("Mr. and Mrs. Jones met Prof. Hale. They talked."),
            vec!["Mr. and Mrs. Jones met Prof. Hale.", "They talked."]
        );
    }

    #[test]
    fn test_lowercase_follow_not_split() {
        assert_eq!(split("It arrived c. noon. Then we ate."), vec![
            "It arrived c. noon.",
            "Then we ate."
        ]);
    }

    #[test]
    fn test_decimal_not_split() {
        assert_eq!(split("Pi is 3.14 roughly. Indeed."), vec![
            "Pi is 3.14 roughly.",
            "Indeed."
        ]);
    }

    #[test]
    fn test_digit_follow_not_split() {
        // A digit after the period is not an opener, so no boundary.
        assert_eq!(split("He got 7. 50 others got none."), vec![
            "He got 7. 50 others got none."
        ]);
    }

    #[test]
    fn test_initials_not_split() {
        assert_eq!(
            split("J. R. Tolkien wrote it. We read it."),
            vec!["J. R. Tolkien wrote it.", "We read it."]
        );
    }

    #[test]
    fn test_closing_quote_included() {
        assert_eq!(
            split("He said \"Stop.\" Then he left."),
            vec!["He said \"Stop.\"", "Then he left."]
        );
    }

    #[test]
    fn test_closing_paren_included() {
        assert_eq!(
            split("It worked (somehow.) Nobody asked why."),
            vec!["It worked (somehow.)", "Nobody asked why."]
        );
    }

    #[test]
    fn test_opening_quote_starts_sentence() {
        assert_eq!(
            split("She nodded. \"Fine,\" she said."),
            vec!["She nodded.", "\"Fine,\" she said."]
        );
    }

    #[test]
    fn test_no_terminal_punctuation_single_sentence() {
        assert_eq!(split("a paragraph without an ending"), vec![
            "a paragraph without an ending"
        ]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
    }

    #[test]
    fn test_trailing_punctuation_kept() {
        let sentences = split("One. Two.");
        assert!(sentences.iter().all(|s| s.ends_with('.')));
    }
}
