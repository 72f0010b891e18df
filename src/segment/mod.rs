//! Segmentation pipeline: chapters → paragraphs → sentences.
//!
//! Each stage consumes an immutable input and produces a new immutable
//! output; document order is preserved at every level.

mod chapters;
mod footnotes;
mod paragraphs;
mod sentences;

pub use chapters::{heading_level, segment_chapters, RawChapter};
pub use footnotes::{collect_definitions, extract_notes, replace_markers, FootnoteDefs};
pub use paragraphs::{split_paragraphs, RawParagraph};
pub use sentences::split_sentences;

/// Collapse all whitespace runs to single spaces and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
