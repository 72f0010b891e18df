//! End-to-end integration tests for the converter pipeline.
//!
//! Tests the complete pipeline from Markdown parsing to JSON generation,
//! plus the CLI binary via assert_cmd.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

use booktree::{generate_json, parse_book, verify, Book, SegmentOptions};

const SAMPLE_BOOK: &str = "\
# A Study in Segments

by Jane Doe

## The Beginning

Dr. Smith arrived at noon. \"It was quiet,\" she said. The town slept on.

The second paragraph makes a claim[^ev]. It continues with more text
wrapped softly across lines.

[^ev]: Archival records from 1887.

## The Middle

A numbered aside[1] sits mid-chapter. Then came the list:

- first item
- second item

```
let x = 1. not a sentence boundary.
```

### A Subsection

Deep headings stay in the chapter. The end approaches.

## The End

Final words here.
";

fn run_pipeline() -> Book {
    parse_book(SAMPLE_BOOK, &SegmentOptions::default())
        .unwrap_or_else(|e| panic!("pipeline failed: {e}"))
}

#[test]
fn test_pipeline_metadata() {
    let book = run_pipeline();

    assert_eq!(book.title.as_deref(), Some("A Study in Segments"));
    assert_eq!(book.author.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_pipeline_chapter_structure() {
    let book = run_pipeline();

    let titles: Vec<&str> = book
        .chapters
        .iter()
        .map(|c| c.chapter_title.as_str())
        .collect();
    assert_eq!(titles, vec!["The Beginning", "The Middle", "The End"]);

    for (i, chapter) in book.chapters.iter().enumerate() {
        assert_eq!(
            chapter.chapter_number as usize,
            i + 1,
            "Chapter numbers should be sequential"
        );
        for (j, paragraph) in chapter.paragraphs.iter().enumerate() {
            assert_eq!(
                paragraph.paragraph_number as usize,
                j + 1,
                "Paragraph numbers should restart per chapter"
            );
            assert!(
                !paragraph.sentences.is_empty(),
                "No paragraph should be empty"
            );
        }
    }
}

#[test]
fn test_pipeline_sentence_splitting() {
    let book = run_pipeline();

    let first = &book.chapters[0].paragraphs[0];
    let texts: Vec<&str> = first.sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Dr. Smith arrived at noon.",
            "\"It was quiet,\" she said.",
            "The town slept on.",
        ],
        "Abbreviations and quotes should not break sentence boundaries"
    );
}

#[test]
fn test_pipeline_footnotes_relocated() {
    let book = run_pipeline();

    // [^ev] resolved to its definition text
    let second = &book.chapters[0].paragraphs[1];
    assert_eq!(
        second.sentences[0].notes,
        vec!["Archival records from 1887."]
    );

    // [1] has no definition, kept as raw id
    let aside = &book.chapters[1].paragraphs[0];
    assert_eq!(aside.sentences[0].notes, vec!["1"]);

    // No marker text survives in any sentence
    for chapter in &book.chapters {
        for paragraph in &chapter.paragraphs {
            for sentence in &paragraph.sentences {
                assert!(
                    !sentence.text.contains("[^") && !sentence.text.contains("[1]"),
                    "Markers should be stripped from sentence text: {}",
                    sentence.text
                );
            }
        }
    }
}

#[test]
fn test_pipeline_verbatim_and_bullets() {
    let book = run_pipeline();

    let middle = &book.chapters[1];
    let texts: Vec<&str> = middle
        .paragraphs
        .iter()
        .flat_map(|p| &p.sentences)
        .map(|s| s.text.as_str())
        .collect();

    assert!(texts.contains(&"- first item"), "Bullets keep their marker");
    assert!(texts.contains(&"- second item"));
    assert!(
        texts.contains(&"let x = 1. not a sentence boundary."),
        "Fenced code should be a single verbatim sentence"
    );
    assert!(
        texts.contains(&"A Subsection"),
        "Deep headings should stay in the chapter body, markup stripped"
    );
}

#[test]
fn test_pipeline_lossless() {
    // No caret footnotes here: resolved definitions change the token
    // stream by design, so the whole-document comparison uses a source
    // where markers replace one-to-one.
    let source = "# The Book\n\nby A. Writer\n\n## Start\n\nDr. Smith spoke[1]. \"A quote.\" The end.\n\n- item one\n\n```\nverbatim. text\n```\n\n## Finish\n\nLast words here.";
    let book =
        parse_book(source, &SegmentOptions::default()).unwrap_or_else(|e| panic!("parse: {e}"));

    let mut emitted = String::new();
    if let Some(title) = &book.title {
        emitted.push_str(title);
        emitted.push(' ');
    }
    if let Some(author) = &book.author {
        emitted.push_str("by ");
        emitted.push_str(author);
        emitted.push(' ');
    }
    for chapter in &book.chapters {
        emitted.push_str(&chapter.chapter_title);
        emitted.push(' ');
        for paragraph in &chapter.paragraphs {
            for sentence in &paragraph.sentences {
                emitted.push_str(&sentence.text);
                emitted.push(' ');
                for note in &sentence.notes {
                    emitted.push_str(note);
                    emitted.push(' ');
                }
            }
        }
    }

    assert_eq!(
        verify::tokens(source),
        verify::tokens(&emitted),
        "Every word of the source should survive the transform in order"
    );
}

#[test]
fn test_json_generation() {
    let book = run_pipeline();
    let json = generate_json(&book, true).expect("Failed to generate JSON");

    let parsed: serde_json::Value =
        serde_json::from_str(&json).expect("Generated JSON should be valid");

    assert_eq!(parsed["book"]["title"], "A Study in Segments");
    assert_eq!(parsed["book"]["author"], "Jane Doe");

    let chapters = parsed["book"]["chapters"]
        .as_array()
        .expect("chapters should be an array");
    assert_eq!(chapters.len(), 3);
    assert_eq!(chapters[0]["chapter_number"], 1);
    assert_eq!(chapters[0]["chapter_title"], "The Beginning");

    let sentence = &chapters[0]["paragraphs"][0]["sentences"][0];
    assert!(sentence.is_object(), "Sentences should always be objects");
    assert!(sentence.get("text").is_some());
    assert!(
        sentence.get("notes").is_none(),
        "Empty notes should be omitted"
    );
}

#[test]
fn test_empty_input_yields_empty_book() {
    let book = parse_book("", &SegmentOptions::default()).expect("Empty input should succeed");
    assert!(book.chapters.is_empty());

    let json = generate_json(&book, false).expect("Failed to generate JSON");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(parsed["book"]["title"], serde_json::Value::Null);
    assert_eq!(parsed["book"]["author"], serde_json::Value::Null);
    assert_eq!(parsed["book"]["chapters"], serde_json::json!([]));
}

#[test]
fn test_custom_heading_levels() {
    let options = SegmentOptions::default().with_heading_levels([1]);
    let book = parse_book(SAMPLE_BOOK, &options).expect("parse with custom levels");

    // Only the lone level-1 heading counts, so it starts chapter 1
    // instead of being consumed as the book title.
    assert!(book.title.is_none());
    assert_eq!(book.chapters.len(), 1);
    assert_eq!(book.chapters[0].chapter_title, "A Study in Segments");
}

#[test]
fn test_cli_convert() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("book.md");
    fs::write(&input, SAMPLE_BOOK).expect("write input");

    let mut cmd = Command::cargo_bin("booktree").expect("binary exists");
    cmd.arg("convert").arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("A Study in Segments"))
        .stdout(predicate::str::contains("Chapters: 3"));

    let output = dir.path().join("book.json");
    assert!(output.exists(), "Default output path should be input.json");
    let content = fs::read_to_string(&output).expect("read output");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");
    assert_eq!(parsed["book"]["author"], "Jane Doe");
}

#[test]
fn test_cli_convert_compact_with_output() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("book.md");
    let output = dir.path().join("tree.json");
    fs::write(&input, "# One\n\nHello world.").expect("write input");

    let mut cmd = Command::cargo_bin("booktree").expect("binary exists");
    cmd.arg("convert")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--mode")
        .arg("compact");
    cmd.assert().success();

    let content = fs::read_to_string(&output).expect("read output");
    assert_eq!(
        content.trim_end().lines().count(),
        1,
        "Compact mode should emit a single line"
    );
}

#[test]
fn test_cli_missing_input() {
    let mut cmd = Command::cargo_bin("booktree").expect("binary exists");
    cmd.arg("convert").arg("/no/such/file.md");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_cli_invalid_levels() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("book.md");
    fs::write(&input, "# One\n\nText.").expect("write input");

    let mut cmd = Command::cargo_bin("booktree").expect("binary exists");
    cmd.arg("convert").arg(&input).arg("--levels").arg("0,7");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
