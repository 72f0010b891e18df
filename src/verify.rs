//! Lossless-transform verification.
//!
//! Segmentation strips markup and relocates footnote markers but must
//! never lose or duplicate words. The check compares alphanumeric token
//! multisets: the raw paragraph (with markers replaced by their note
//! values) against the emitted sentences plus notes. Whitespace and
//! punctuation normalization are expected and ignored.

use std::collections::BTreeMap;

use crate::error::{BookError, Result};
use crate::types::{Book, Sentence};

/// Contiguous alphanumeric runs of `text`.
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Token multiset of `text`.
fn token_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Compare raw paragraph content against its emitted sentences.
///
/// `raw` must already have footnote markers replaced by their note
/// values (see `segment::replace_markers`). Returns a human-readable
/// description of the first diverging token, or `None` when lossless.
#[must_use]
pub fn paragraph_divergence(raw: &str, sentences: &[Sentence]) -> Option<String> {
    let expected = token_counts(raw);

    let mut emitted = String::new();
    for sentence in sentences {
        emitted.push_str(&sentence.text);
        emitted.push(' ');
        for note in &sentence.notes {
            emitted.push_str(note);
            emitted.push(' ');
        }
    }
    let actual = token_counts(&emitted);

    for (token, &expected_count) in &expected {
        let actual_count = actual.get(token).copied().unwrap_or(0);
        if actual_count != expected_count {
            return Some(format!(
                "token '{token}' appears {expected_count} time(s) in source but {actual_count} in output"
            ));
        }
    }
    for (token, &actual_count) in &actual {
        if !expected.contains_key(token) {
            return Some(format!(
                "token '{token}' appears {actual_count} time(s) in output but not in source"
            ));
        }
    }
    None
}

/// Final structural pass: numbering must be exactly 1..N with no gaps.
///
/// Unreachable by construction; reported rather than silently corrected.
pub fn verify_numbering(book: &Book) -> Result<()> {
    for (ci, chapter) in book.chapters.iter().enumerate() {
        let expected = u32::try_from(ci + 1)
            .map_err(|_| BookError::MalformedSchema("chapter count overflow".to_string()))?;
        if chapter.chapter_number != expected {
            return Err(BookError::MalformedSchema(format!(
                "chapter_number {} at position {} (expected {expected})",
                chapter.chapter_number,
                ci + 1
            )));
        }
        for (pi, paragraph) in chapter.paragraphs.iter().enumerate() {
            let expected = u32::try_from(pi + 1)
                .map_err(|_| BookError::MalformedSchema("paragraph count overflow".to_string()))?;
            if paragraph.paragraph_number != expected {
                return Err(BookError::MalformedSchema(format!(
                    "paragraph_number {} at chapter {}, position {} (expected {expected})",
                    paragraph.paragraph_number,
                    chapter.chapter_number,
                    pi + 1
                )));
            }
            if paragraph.sentences.is_empty() {
                return Err(BookError::MalformedSchema(format!(
                    "empty paragraph {} in chapter {}",
                    paragraph.paragraph_number, chapter.chapter_number
                )));
            }
        }
    }
    Ok(())
}
