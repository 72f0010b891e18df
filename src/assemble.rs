//! Tree assembly: composes metadata extraction and the segmentation
//! pipeline into a complete `Book`.
//!
//! Pure composition plus the lossless check: every paragraph is verified
//! against its raw source slice as it is built, and a final pass
//! re-checks the numbering invariants.

use crate::config::SegmentOptions;
use crate::error::{BookError, Result};
use crate::metadata;
use crate::segment::{
    collect_definitions, extract_notes, replace_markers, segment_chapters, split_paragraphs,
    split_sentences, FootnoteDefs, RawParagraph,
};
use crate::types::{Book, Chapter, Paragraph, Sentence};
use crate::verify;

/// Convert a Markdown document into a structured book tree.
///
/// Single pass, no side effects. An empty document yields an empty book
/// (no chapters), which is not an error.
///
/// # Errors
/// * `BookError::LosslessCheckFailed` when reconstructed text diverges
///   from the source beyond whitespace/markup normalization
/// * `BookError::MalformedSchema` when a numbering invariant is violated
///   (unreachable by construction)
pub fn parse_book(source: &str, options: &SegmentOptions) -> Result<Book> {
    if source.trim().is_empty() {
        return Ok(Book::new());
    }

    let (stripped, defs) = collect_definitions(source);
    let (meta, body) = metadata::extract(&stripped, options);
    let raw_chapters = segment_chapters(&body, options);

    let mut book = Book::new().with_title(meta.title).with_author(meta.author);

    for (ci, raw_chapter) in raw_chapters.iter().enumerate() {
        let chapter_number = u32::try_from(ci + 1)
            .map_err(|_| BookError::MalformedSchema("chapter count overflow".to_string()))?;
        let mut chapter = Chapter::new(chapter_number, raw_chapter.title.clone());

        let mut paragraph_number: u32 = 0;
        for raw_paragraph in split_paragraphs(&raw_chapter.body) {
            let sentences = build_sentences(&raw_paragraph, options, &defs);
            if sentences.is_empty() {
                continue;
            }
            paragraph_number += 1;

            check_paragraph(
                &raw_paragraph,
                &sentences,
                &defs,
                ci + 1,
                paragraph_number as usize,
            )?;
            chapter.add_paragraph(Paragraph::new(paragraph_number, sentences));
        }

        tracing::debug!(
            chapter = chapter.chapter_number,
            title = %chapter.chapter_title,
            paragraphs = chapter.paragraphs.len(),
            "assembled chapter"
        );
        book.add_chapter(chapter);
    }

    verify::verify_numbering(&book)?;
    Ok(book)
}

/// Segment one raw paragraph into sentences with relocated footnotes.
fn build_sentences(
    raw: &RawParagraph,
    options: &SegmentOptions,
    defs: &FootnoteDefs,
) -> Vec<Sentence> {
    if raw.verbatim {
        return vec![Sentence::new(raw.text.clone())];
    }

    let mut sentences = Vec::new();
    for piece in split_sentences(&raw.text, &options.abbreviations) {
        let (text, notes) = extract_notes(&piece, defs);
        if text.is_empty() && notes.is_empty() {
            continue;
        }
        sentences.push(Sentence::new(text).with_notes(notes));
    }
    sentences
}

/// Recompute the lossless check for one paragraph.
fn check_paragraph(
    raw: &RawParagraph,
    sentences: &[Sentence],
    defs: &FootnoteDefs,
    chapter: usize,
    paragraph: usize,
) -> Result<()> {
    let normalized = if raw.verbatim {
        raw.text.clone()
    } else {
        replace_markers(&raw.text, defs)
    };
    if let Some(detail) = verify::paragraph_divergence(&normalized, sentences) {
        return Err(BookError::LosslessCheckFailed {
            chapter,
            paragraph,
            detail,
        });
    }
    Ok(())
}
