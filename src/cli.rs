//! Command-line interface for the converter.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::assemble::parse_book;
use crate::config::{parse_heading_levels, SegmentOptions};
use crate::error::{BookError, Result};
use crate::json::save_json;

/// Booktree - Convert Markdown books into structured JSON trees.
#[derive(Parser)]
#[command(name = "booktree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a Markdown file to a JSON book tree.
    Convert {
        /// Path to the Markdown input file
        input: PathBuf,

        /// Output file (default: input path with .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Heading levels that start a chapter, comma-separated (default: 1,2)
        #[arg(short, long)]
        levels: Option<String>,

        /// JSON output mode
        #[arg(short, long, value_enum, default_value_t)]
        mode: OutputMode,
    },
}

/// JSON formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// 2-space indented output
    #[default]
    Pretty,
    /// Single-line output without extra whitespace
    Compact,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            levels,
            mode,
        } => convert_command(&input, output.as_deref(), levels.as_deref(), mode),
    }
}

/// Execute the convert command.
fn convert_command(
    input: &Path,
    output: Option<&Path>,
    levels: Option<&str>,
    mode: OutputMode,
) -> Result<()> {
    let mut options = SegmentOptions::default();
    if let Some(spec) = levels {
        options = options.with_heading_levels(parse_heading_levels(spec)?);
    }

    if !input.exists() {
        return Err(BookError::InputNotFound(input.to_path_buf()));
    }

    let source = fs::read_to_string(input).map_err(|e| BookError::InputUnreadable {
        path: input.to_path_buf(),
        detail: e.to_string(),
    })?;

    let output_file = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("json"));

    // Validate output directory exists before doing any work
    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(BookError::OutputUnwritable {
                path: output_file.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Output directory does not exist: {}", parent.display()),
                ),
            });
        }
    }

    println!(
        "{} {}",
        style("Converting").bold(),
        style(input.display()).cyan()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );

    pb.set_message("Segmenting chapters and sentences...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let book = match parse_book(&source, &options) {
        Ok(book) => book,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    if let Some(title) = &book.title {
        println!("  Title: {}", style(title).green());
    }
    if let Some(author) = &book.author {
        println!("  Author: {}", style(author).green());
    }
    println!("  Chapters: {}", book.chapters.len());
    println!("  Paragraphs: {}", book.paragraph_count());
    println!("  Sentences: {}", book.sentence_count());
    let notes = book.note_count();
    if notes > 0 {
        println!("  Notes: {}", style(notes).yellow());
    }

    pb.set_message("Saving JSON...");

    let pretty = matches!(mode, OutputMode::Pretty);
    let output_path = match save_json(&book, &output_file, pretty) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}
