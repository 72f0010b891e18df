//! JSON writer for book files.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{BookError, Result};
use crate::types::{Book, Chapter, Paragraph, Sentence};

/// Sentence representation for JSON serialization.
#[derive(Debug, Serialize)]
struct JsonSentence {
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notes: Vec<String>,
}

impl From<&Sentence> for JsonSentence {
    fn from(s: &Sentence) -> Self {
        Self {
            text: s.text.clone(),
            notes: s.notes.clone(),
        }
    }
}

/// Paragraph representation for JSON serialization.
#[derive(Debug, Serialize)]
struct JsonParagraph {
    paragraph_number: u32,
    sentences: Vec<JsonSentence>,
}

impl From<&Paragraph> for JsonParagraph {
    fn from(p: &Paragraph) -> Self {
        Self {
            paragraph_number: p.paragraph_number,
            sentences: p.sentences.iter().map(JsonSentence::from).collect(),
        }
    }
}

/// Chapter representation for JSON serialization.
#[derive(Debug, Serialize)]
struct JsonChapter {
    chapter_number: u32,
    chapter_title: String,
    paragraphs: Vec<JsonParagraph>,
}

impl From<&Chapter> for JsonChapter {
    fn from(c: &Chapter) -> Self {
        Self {
            chapter_number: c.chapter_number,
            chapter_title: c.chapter_title.clone(),
            paragraphs: c.paragraphs.iter().map(JsonParagraph::from).collect(),
        }
    }
}

/// Top-level book representation for JSON serialization.
///
/// `title` and `author` are always present, serialized as `null` when
/// absent; only sentence `notes` are omitted when empty.
#[derive(Debug, Serialize)]
struct JsonBook {
    title: Option<String>,
    author: Option<String>,
    chapters: Vec<JsonChapter>,
}

/// Document wrapper: the tree lives under a single `book` key.
#[derive(Debug, Serialize)]
struct JsonDocument {
    book: JsonBook,
}

impl From<&Book> for JsonDocument {
    fn from(book: &Book) -> Self {
        Self {
            book: JsonBook {
                title: book.title.clone(),
                author: book.author.clone(),
                chapters: book.chapters.iter().map(JsonChapter::from).collect(),
            },
        }
    }
}

/// Generate a JSON string from a Book object.
///
/// `pretty` selects 2-space indented output; compact output has no
/// extra whitespace. Either way the string ends with a newline.
pub fn generate_json(book: &Book, pretty: bool) -> Result<String> {
    let document = JsonDocument::from(book);
    let mut content = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    content.push('\n');
    Ok(content)
}

/// Save a Book object as a JSON file.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// This ensures partial writes don't corrupt existing files on crash.
///
/// # Arguments
/// * `book` - The Book object to save
/// * `output_file` - Destination path
/// * `pretty` - Whether to use pretty-printed output
///
/// # Returns
/// Path to the saved file
pub fn save_json(book: &Book, output_file: &Path, pretty: bool) -> Result<PathBuf> {
    let content = generate_json(book, pretty)?;

    let file_name = output_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| BookError::OutputUnwritable {
            path: output_file.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "missing file name"),
        })?;
    let temp_file = output_file.with_file_name(format!(".{file_name}.tmp"));

    // Write to temp file first, then sync and rename for atomicity
    let write_result = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if output_file.exists() {
            fs::remove_file(output_file)?;
        }

        fs::rename(&temp_file, output_file)
    })();

    write_result.map_err(|source| {
        // Best-effort cleanup of the temp file on failure
        let _ = fs::remove_file(&temp_file);
        BookError::OutputUnwritable {
            path: output_file.to_path_buf(),
            source,
        }
    })?;

    Ok(output_file.to_path_buf())
}
