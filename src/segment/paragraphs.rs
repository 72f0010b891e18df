//! Paragraph splitting on blank-line boundaries.
//!
//! Internal single line breaks are soft wraps and collapse to a space.
//! Fenced code blocks are verbatim regions: their interior is preserved
//! byte-for-byte and bypasses sentence splitting entirely. Bullet list
//! lines each form their own paragraph.

use super::collapse_whitespace;

/// A paragraph as produced by blank-line splitting, before sentence
/// segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParagraph {
    /// Paragraph text. Whitespace-normalized unless `verbatim`.
    pub text: String,

    /// Verbatim regions skip sentence splitting and footnote extraction.
    pub verbatim: bool,
}

impl RawParagraph {
    fn prose(text: String) -> Self {
        Self {
            text,
            verbatim: false,
        }
    }

    fn verbatim(text: String) -> Self {
        Self {
            text,
            verbatim: true,
        }
    }
}

/// Check for a fence delimiter line.
fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Split chapter body text into paragraphs.
///
/// Paragraphs that are empty after trimming are dropped; an all-blank
/// body yields an empty sequence.
pub fn split_paragraphs(body: &str) -> Vec<RawParagraph> {
    let mut paragraphs: Vec<RawParagraph> = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut lines = body.lines();

    while let Some(line) = lines.next() {
        if is_fence(line) {
            flush(&mut paragraphs, &mut pending);
            let mut block: Vec<&str> = Vec::new();
            let mut closed = false;
            for inner in lines.by_ref() {
                if is_fence(inner) {
                    closed = true;
                    break;
                }
                block.push(inner);
            }
            if !closed {
                tracing::warn!("unclosed code fence, treating remainder as verbatim");
            }
            let text = block.join("\n");
            if !text.trim().is_empty() {
                paragraphs.push(RawParagraph::verbatim(text));
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut paragraphs, &mut pending);
            continue;
        }

        // Bullet items are standalone paragraphs.
        if trimmed.starts_with("- ") {
            flush(&mut paragraphs, &mut pending);
            paragraphs.push(RawParagraph::prose(collapse_whitespace(trimmed)));
            continue;
        }

        pending.push(trimmed);
    }
    flush(&mut paragraphs, &mut pending);

    paragraphs
}

fn flush(paragraphs: &mut Vec<RawParagraph>, pending: &mut Vec<&str>) {
    if pending.is_empty() {
        return;
    }
    let text = collapse_whitespace(&pending.join(" "));
    pending.clear();
    if !text.is_empty() {
        paragraphs.push(RawParagraph::prose(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_split() {
        let paragraphs = split_paragraphs("First paragraph.\n\nSecond paragraph.");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "First paragraph.");
        assert_eq!(paragraphs[1].text, "Second paragraph.");
    }

    #[test]
    fn test_soft_wrap_joined() {
        let paragraphs = split_paragraphs("A line\nwrapped softly\nacross three lines.");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text, "A line wrapped softly across three lines.");
    }

    #[test]
    fn test_blank_line_with_trailing_whitespace() {
        let paragraphs = split_paragraphs("First.\n   \nSecond.");
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_multiple_blank_lines_collapse() {
        let paragraphs = split_paragraphs("First.\n\n\n\nSecond.");
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_all_blank_body_yields_nothing() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n   \n").is_empty());
    }

    #[test]
    fn test_code_fence_verbatim() {
        let paragraphs = split_paragraphs("Before.\n\n```\nlet x = 1;\n    indented\n```\n\nAfter.");
        assert_eq!(paragraphs.len(), 3);
        assert!(!paragraphs[0].verbatim);
        assert!(paragraphs[1].verbatim);
        assert_eq!(paragraphs[1].text, "let x = 1;\n    indented");
        assert_eq!(paragraphs[2].text, "After.");
    }

    #[test]
    fn test_code_fence_without_surrounding_blanks() {
        let paragraphs = split_paragraphs("Before.\n```\ncode here\n```\nAfter.");
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[1].verbatim);
    }

    #[test]
    fn test_unclosed_fence_takes_rest() {
        let paragraphs = split_paragraphs("Text.\n\n```\ndangling code");
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs[1].verbatim);
        assert_eq!(paragraphs[1].text, "dangling code");
    }

    #[test]
    fn test_bullet_items_standalone() {
        let paragraphs = split_paragraphs("Intro line.\n- first item\n- second item");
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].text, "Intro line.");
        assert_eq!(paragraphs[1].text, "- first item");
        assert_eq!(paragraphs[2].text, "- second item");
    }
}
