//! Book metadata extraction from the document head.
//!
//! The head region is everything before the first chapter-starting
//! heading. Recognized conventions:
//! - `Title: ...` label line
//! - `Author: ...` or `by ...` label line
//! - a leading level-1 heading, when at least one more recognized heading
//!   follows it (a lone `#` heading starts chapter 1 instead)
//!
//! Extraction never fails. Head content not consumed as metadata is
//! returned as part of the body so it ends up in the first (implicit)
//! chapter rather than being dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SegmentOptions;
use crate::segment::heading_level;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^title:\s*(.+)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static AUTHOR_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^author:\s*(.+)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^by\s+(.+)$").expect("valid regex"));

/// Metadata recognized in the document head.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadMetadata {
    /// Book title; `None` when absent, never an empty string.
    pub title: Option<String>,

    /// Book author; `None` when absent.
    pub author: Option<String>,

    /// Raw source lines consumed as metadata, in document order.
    pub consumed: Vec<String>,
}

/// Extract book metadata and return it with the remaining body text.
///
/// The returned body starts with any unconsumed head lines, so the
/// lossless invariant holds: what is not metadata flows into the first
/// chapter.
pub fn extract(source: &str, options: &SegmentOptions) -> (HeadMetadata, String) {
    let lines: Vec<&str> = source.lines().collect();
    let headings = chapter_heading_positions(&lines, options);

    let head_end = headings.first().copied().unwrap_or(lines.len());

    let mut meta = HeadMetadata::default();
    let mut body_lines: Vec<&str> = Vec::new();
    for &line in &lines[..head_end] {
        if !consume_label(line, &mut meta) {
            body_lines.push(line);
        }
    }

    if let Some(&first) = headings.first() {
        let leading_h1 = meta.title.is_none()
            && headings.len() > 1
            && heading_level(lines[first]).map(|(level, _)| level) == Some(1);

        if leading_h1 {
            if let Some((_, text)) = heading_level(lines[first]) {
                meta.title = Some(text.trim().to_string());
                meta.consumed.push(lines[first].to_string());
            }
            // Front matter between the title heading and the next chapter
            // heading may still carry author labels.
            let next = headings[1];
            for &line in &lines[first + 1..next] {
                if !consume_label(line, &mut meta) {
                    body_lines.push(line);
                }
            }
            body_lines.extend_from_slice(&lines[next..]);
        } else {
            body_lines.extend_from_slice(&lines[first..]);
        }
    }

    (meta, body_lines.join("\n"))
}

/// Try to consume a line as a metadata label. Returns `true` if consumed.
fn consume_label(line: &str, meta: &mut HeadMetadata) -> bool {
    let trimmed = line.trim();

    if meta.title.is_none() {
        if let Some(caps) = TITLE_LABEL.captures(trimmed) {
            if let Some(value) = caps.get(1) {
                meta.title = Some(value.as_str().trim().to_string());
                meta.consumed.push(line.to_string());
                return true;
            }
        }
    }

    if meta.author.is_none() {
        let value = AUTHOR_LABEL
            .captures(trimmed)
            .or_else(|| BY_LINE.captures(trimmed))
            .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()));
        if let Some(value) = value {
            meta.author = Some(value);
            meta.consumed.push(line.to_string());
            return true;
        }
    }

    false
}

/// Indices of lines that start a chapter, skipping fenced code blocks.
fn chapter_heading_positions(lines: &[&str], options: &SegmentOptions) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut in_fence = false;
    for (idx, line) in lines.iter().enumerate() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some((level, _)) = heading_level(line) {
            if options.is_chapter_level(level) {
                positions.push(idx);
            }
        }
    }
    positions
}
