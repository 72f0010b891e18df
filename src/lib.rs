//! Booktree - Convert Markdown books into structured JSON trees.
//!
//! This crate parses a Markdown book into a hierarchy of chapters,
//! paragraphs, and sentences, relocates footnote markers to per-sentence
//! notes, and emits the result as JSON. Segmentation is verified to be
//! lossless: every word of the source appears in the output.
//!
//! # Example
//!
//! ```
//! use booktree::{parse_book, SegmentOptions};
//!
//! let book = parse_book("# Chapter One\n\nHello world. Goodbye.", &SegmentOptions::default())?;
//! assert_eq!(book.chapters.len(), 1);
//! assert_eq!(book.chapters[0].paragraphs[0].sentences.len(), 2);
//! # Ok::<(), booktree::BookError>(())
//! ```
//!
//! # Architecture
//!
//! The converter is organized into several modules:
//!
//! - [`config`]: Segmentation options and defaults
//! - [`types`]: Core data types (Book, Chapter, Paragraph, Sentence)
//! - [`error`]: Error types and Result alias
//! - [`metadata`]: Title and author extraction from the document head
//! - [`segment`]: Chapter, paragraph, sentence, and footnote segmentation
//! - [`assemble`]: Pipeline composing segmentation into a Book
//! - [`verify`]: Lossless-transform and numbering verification
//! - [`json`]: JSON output generation
//! - [`cli`]: Command-line interface

pub mod assemble;
pub mod cli;
pub mod config;
pub mod error;
pub mod json;
pub mod metadata;
pub mod segment;
pub mod types;
pub mod verify;

// Re-export main functions
pub use assemble::parse_book;
pub use json::{generate_json, save_json};

// Re-export commonly used items
pub use config::SegmentOptions;
pub use error::{BookError, Result};
pub use types::{Book, Chapter, Paragraph, Sentence};
