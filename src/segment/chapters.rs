//! Chapter segmentation on Markdown heading boundaries.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SegmentOptions;

/// Markdown heading line: `#`-run plus heading text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("valid regex"));

/// A chapter as produced by heading segmentation, before paragraph
/// splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChapter {
    /// Heading text with markup stripped; empty for the implicit chapter.
    pub title: String,

    /// Raw body text between this heading and the next.
    pub body: String,
}

/// Parse a heading line into its level and text.
#[must_use]
pub fn heading_level(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING.captures(line)?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    Some((level, caps.get(2)?.as_str()))
}

/// Split the document body at recognized heading levels.
///
/// Headings at configured levels start a new chapter. Deeper headings
/// stay in the current chapter body with their markers stripped. Text
/// before the first recognized heading becomes an implicit chapter with
/// an empty title; it is never dropped. A body with zero headings yields
/// exactly one chapter (or none when the body is entirely blank).
pub fn segment_chapters(body: &str, options: &SegmentOptions) -> Vec<RawChapter> {
    let mut chapters: Vec<RawChapter> = Vec::new();
    let mut title: Option<String> = None;
    let mut acc: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            acc.push(line.to_string());
            continue;
        }
        if !in_fence {
            if let Some((level, text)) = heading_level(line) {
                if options.is_chapter_level(level) {
                    flush_chapter(&mut chapters, title.take(), &mut acc);
                    title = Some(text.trim().to_string());
                    continue;
                }
                // Deeper heading: body content, markup stripped.
                acc.push(text.trim().to_string());
                continue;
            }
        }
        acc.push(line.to_string());
    }
    flush_chapter(&mut chapters, title, &mut acc);

    chapters
}

/// Close out the current chapter.
///
/// The implicit pre-heading chapter (no title yet) is only emitted when
/// it has non-blank content; a titled chapter is always emitted, even
/// with an empty body.
fn flush_chapter(chapters: &mut Vec<RawChapter>, title: Option<String>, acc: &mut Vec<String>) {
    let body = acc.join("\n");
    acc.clear();
    match title {
        Some(title) => chapters.push(RawChapter { title, body }),
        None => {
            if !body.trim().is_empty() {
                chapters.push(RawChapter {
                    title: String::new(),
                    body,
                });
            }
        }
    }
}
