//! Footnote marker detection and relocation.
//!
//! Marker grammar (chosen concretely, see DESIGN.md):
//! - `[^id]` - reference marker, resolved against `[^id]: body` definition
//!   lines found anywhere in the document
//! - `[N]` - bracketed numeric reference, recorded as the raw number
//! - `[footnote: text]` - inline footnote (case-insensitive label)
//!
//! Markers are stripped from visible sentence text and collected in order
//! into the sentence's notes. A marker without a definition is recorded
//! with its raw id, never dropped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use super::collapse_whitespace;

/// Reference marker: `[^id]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTNOTE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\^([^\]\s]+)\]").expect("valid regex"));

/// Bracketed numeric reference: `[1]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BRACKET_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("valid regex"));

/// Inline footnote: `[footnote: text]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INLINE_FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[footnote:\s*([^\]]*)\]").expect("valid regex"));

/// Definition line: `[^id]: body` (applied per line).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTNOTE_DEF_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\^([^\]\s]+)\]:\s*(.*)$").expect("valid regex"));

/// Footnote definition bodies keyed by id.
pub type FootnoteDefs = BTreeMap<String, String>;

/// A marker occurrence within a text span.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Marker {
    Reference(String),
    Numeric(String),
    Inline(String),
}

impl Marker {
    /// Resolve the marker to its note value.
    fn resolve(&self, defs: &FootnoteDefs) -> String {
        match self {
            Self::Reference(id) => match defs.get(id) {
                Some(body) => body.clone(),
                None => {
                    tracing::warn!(id = %id, "footnote marker has no definition, recording raw id");
                    id.clone()
                }
            },
            Self::Numeric(n) => n.clone(),
            Self::Inline(text) => text.clone(),
        }
    }
}

/// Collect `[^id]: body` definitions and strip the referenced ones.
///
/// Returns the document text with consumed definition lines removed, plus
/// the id → body map. Lines inside fenced code blocks are verbatim
/// content and are never treated as definitions. Only the first
/// definition line per id is consumed; duplicate definitions and
/// definitions whose id is never referenced stay in place as ordinary
/// text so the lossless invariant holds.
pub fn collect_definitions(text: &str) -> (String, FootnoteDefs) {
    let mut defs: FootnoteDefs = BTreeMap::new();
    let mut in_fence = false;
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = FOOTNOTE_DEF_LINE.captures(line.trim_end()) {
            let (Some(id), Some(body)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            defs.entry(id.as_str().to_string())
                .or_insert_with(|| body.as_str().trim().to_string());
        }
    }

    if defs.is_empty() {
        return (text.to_string(), defs);
    }

    // A reference is any `[^id]` occurrence outside a fence that is not
    // itself the start of a definition line (i.e., not immediately
    // followed by a colon).
    let mut referenced: BTreeSet<String> = BTreeSet::new();
    in_fence = false;
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        for caps in FOOTNOTE_REF.captures_iter(line) {
            let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if line[whole.end()..].starts_with(':') {
                continue;
            }
            referenced.insert(id.as_str().to_string());
        }
    }
    defs.retain(|id, _| referenced.contains(id));

    let mut stripped: BTreeSet<&str> = BTreeSet::new();
    let mut kept: Vec<&str> = Vec::new();
    in_fence = false;
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            kept.push(line);
            continue;
        }
        if !in_fence {
            if let Some(caps) = FOOTNOTE_DEF_LINE.captures(line.trim_end()) {
                if let Some(id) = caps.get(1) {
                    let id = id.as_str();
                    if defs.contains_key(id) && stripped.insert(id) {
                        continue;
                    }
                }
            }
        }
        kept.push(line);
    }

    (kept.join("\n"), defs)
}

/// Find all marker occurrences in `text`, ordered by position.
fn marker_spans(text: &str) -> Vec<(usize, usize, Marker)> {
    let mut spans: Vec<(usize, usize, Marker)> = Vec::new();

    for caps in FOOTNOTE_REF.captures_iter(text) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        spans.push((
            whole.start(),
            whole.end(),
            Marker::Reference(id.as_str().to_string()),
        ));
    }
    for caps in BRACKET_NUM.captures_iter(text) {
        let (Some(whole), Some(n)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        spans.push((
            whole.start(),
            whole.end(),
            Marker::Numeric(n.as_str().to_string()),
        ));
    }
    for caps in INLINE_FOOTNOTE.captures_iter(text) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        spans.push((
            whole.start(),
            whole.end(),
            Marker::Inline(body.as_str().trim().to_string()),
        ));
    }

    spans.sort_by_key(|(start, _, _)| *start);

    // The three patterns cannot overlap, but guard against it anyway.
    let mut result: Vec<(usize, usize, Marker)> = Vec::new();
    for span in spans {
        if result.last().is_none_or(|(_, prev_end, _)| span.0 >= *prev_end) {
            result.push(span);
        }
    }
    result
}

/// Strip footnote markers from a sentence, collecting note values in order.
///
/// # Returns
/// `(cleaned_text, notes)` where `cleaned_text` has whitespace collapsed.
pub fn extract_notes(sentence: &str, defs: &FootnoteDefs) -> (String, Vec<String>) {
    let spans = marker_spans(sentence);
    if spans.is_empty() {
        return (sentence.to_string(), Vec::new());
    }

    let mut cleaned = String::with_capacity(sentence.len());
    let mut notes = Vec::with_capacity(spans.len());
    let mut cursor = 0;
    for (start, end, marker) in spans {
        cleaned.push_str(&sentence[cursor..start]);
        notes.push(marker.resolve(defs));
        cursor = end;
    }
    cleaned.push_str(&sentence[cursor..]);

    (collapse_whitespace(&cleaned), notes)
}

/// Replace every marker occurrence with its resolved note value.
///
/// Used by the lossless check to put raw paragraph text and emitted
/// (text + notes) on equal footing.
#[must_use]
pub fn replace_markers(text: &str, defs: &FootnoteDefs) -> String {
    let spans = marker_spans(text);
    if spans.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end, marker) in spans {
        result.push_str(&text[cursor..start]);
        result.push(' ');
        result.push_str(&marker.resolve(defs));
        result.push(' ');
        cursor = end;
    }
    result.push_str(&text[cursor..]);
    result
}
