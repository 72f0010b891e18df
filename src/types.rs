//! Core data types for the book tree.
//!
//! The tree is built bottom-up (Sentence → Paragraph → Chapter → Book)
//! and never mutated after construction. Numbering is 1-based and
//! strictly sequential at every level.

/// The smallest textual unit of the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Visible sentence text, including trailing terminal punctuation.
    pub text: String,

    /// Footnotes referenced from this sentence, in marker order.
    ///
    /// Markers are never left inline in `text`; they are relocated here.
    pub notes: Vec<String>,
}

impl Sentence {
    /// Create a sentence without notes.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notes: Vec::new(),
        }
    }

    /// Attach notes to the sentence.
    #[must_use]
    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// A contiguous block of text within a chapter, bounded by blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// 1-based position within the chapter; restarts at 1 per chapter.
    pub paragraph_number: u32,

    /// Ordered sentences. Never empty: paragraphs that would end up
    /// without sentences are dropped before construction.
    pub sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Create a paragraph from its sentences.
    #[must_use]
    pub fn new(paragraph_number: u32, sentences: Vec<Sentence>) -> Self {
        Self {
            paragraph_number,
            sentences,
        }
    }
}

/// A top-level structural unit of the book, bounded by heading markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// 1-based position within the book, no gaps.
    pub chapter_number: u32,

    /// Heading text with markup stripped. Empty for the implicit chapter
    /// formed from text preceding the first recognized heading.
    pub chapter_title: String,

    /// Ordered paragraphs. May be empty for an all-blank chapter body.
    pub paragraphs: Vec<Paragraph>,
}

impl Chapter {
    /// Create an empty chapter.
    #[must_use]
    pub fn new(chapter_number: u32, chapter_title: impl Into<String>) -> Self {
        Self {
            chapter_number,
            chapter_title: chapter_title.into(),
            paragraphs: Vec::new(),
        }
    }

    /// Append a paragraph to the chapter.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }
}

/// Complete book with optional metadata and ordered chapters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Book {
    /// Book title. `None` when no title convention was recognized;
    /// absence is distinct from an empty title.
    pub title: Option<String>,

    /// Book author, if a recognized author line was present.
    pub author: Option<String>,

    /// Ordered chapters. Empty for an empty input document.
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Create an empty book with no metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Set the author.
    #[must_use]
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    /// Append a chapter to the book.
    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// Total number of paragraphs across all chapters.
    #[must_use]
    pub fn paragraph_count(&self) -> usize {
        self.chapters.iter().map(|c| c.paragraphs.len()).sum()
    }

    /// Total number of sentences across all chapters.
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.chapters
            .iter()
            .flat_map(|c| &c.paragraphs)
            .map(|p| p.sentences.len())
            .sum()
    }

    /// Total number of notes across all sentences.
    #[must_use]
    pub fn note_count(&self) -> usize {
        self.chapters
            .iter()
            .flat_map(|c| &c.paragraphs)
            .flat_map(|p| &p.sentences)
            .map(|s| s.notes.len())
            .sum()
    }
}
