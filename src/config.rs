//! Configuration options and validation for the segmentation pipeline.

use std::collections::BTreeSet;

use crate::error::{BookError, Result};

/// Heading levels treated as chapter boundaries by default.
///
/// The two most significant Markdown levels (`#` and `##`).
pub const DEFAULT_HEADING_LEVELS: [u8; 2] = [1, 2];

/// Built-in abbreviation exceptions for sentence boundary detection.
///
/// A terminal period ending one of these words never closes a sentence.
/// The list is deliberately small; callers with unusual material can
/// replace it via [`SegmentOptions::with_abbreviations`].
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Rev.", "St.", "Sr.", "Jr.", "vs.", "etc.", "e.g.",
    "i.e.", "cf.", "Fig.", "No.", "vol.", "approx.",
];

/// Options controlling the segmentation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Markdown heading levels (1-6) that start a new chapter.
    pub heading_levels: BTreeSet<u8>,

    /// Words whose trailing period never ends a sentence.
    pub abbreviations: BTreeSet<String>,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            heading_levels: DEFAULT_HEADING_LEVELS.into_iter().collect(),
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl SegmentOptions {
    /// Create options with the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the chapter heading levels.
    #[must_use]
    pub fn with_heading_levels(mut self, levels: impl IntoIterator<Item = u8>) -> Self {
        self.heading_levels = levels.into_iter().collect();
        self
    }

    /// Replace the abbreviation exception list.
    #[must_use]
    pub fn with_abbreviations(
        mut self,
        abbreviations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.abbreviations = abbreviations.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a heading level starts a new chapter.
    #[must_use]
    pub fn is_chapter_level(&self, level: u8) -> bool {
        self.heading_levels.contains(&level)
    }
}

/// Parse a comma-separated heading level specification (e.g., "1,2").
///
/// # Arguments
/// * `spec` - Comma-separated list of digits in 1..=6
///
/// # Returns
/// * `Ok(set)` with the parsed levels
/// * `Err(BookError::InvalidHeadingLevels)` on empty input, non-digit
///   entries, or levels outside 1..=6
///
/// # Examples
/// ```
/// use booktree::config::parse_heading_levels;
///
/// assert!(parse_heading_levels("1,2").is_ok());
/// assert!(parse_heading_levels("0").is_err());
/// assert!(parse_heading_levels("").is_err());
/// ```
pub fn parse_heading_levels(spec: &str) -> Result<BTreeSet<u8>> {
    let mut levels = BTreeSet::new();
    for part in spec.split(',') {
        let part = part.trim();
        let level: u8 = part
            .parse()
            .map_err(|_| BookError::InvalidHeadingLevels(spec.to_string()))?;
        if !(1..=6).contains(&level) {
            return Err(BookError::InvalidHeadingLevels(spec.to_string()));
        }
        levels.insert(level);
    }
    if levels.is_empty() {
        return Err(BookError::InvalidHeadingLevels(spec.to_string()));
    }
    Ok(levels)
}
