//! Command-line tool for converting Markdown with LaTeX formulas to Word.
//!
//! # Usage
//!
//! Basic conversion:
//! ```sh
//! cargo run --example md2docx -- notes.md -o notes.docx
//! ```
//!
//! Several files into a directory, with options from YAML:
//! ```sh
//! cargo run --example md2docx -- *.md -o out/ --config options.yaml
//! ```

use clap::Parser;
use mathdocx::{CollectingSink, ConversionOptions, Converter};
use std::fs;
use std::path::{Path, PathBuf};

/// Convert Markdown files to Word documents with native equations
#[derive(Parser, Debug)]
#[command(name = "md2docx", version)]
struct Args {
    /// Input Markdown file(s)
    #[arg(value_name = "INPUT", required = true)]
    input: Vec<PathBuf>,

    /// Output file, or directory when several inputs are given
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// YAML file with conversion options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Font used for code
    #[arg(long)]
    code_font: Option<String>,

    /// Title stored in the document properties
    #[arg(long)]
    title: Option<String>,

    /// Author stored in the document properties
    #[arg(long)]
    author: Option<String>,

    /// Force overwrite existing files
    #[arg(short, long)]
    force: bool,

    /// Print every diagnostic
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut options = match args.config {
        Some(ref path) => ConversionOptions::from_yaml_file(path)?,
        None => ConversionOptions::default(),
    };
    if let Some(ref font) = args.code_font {
        options = options.with_code_font(font.clone());
    }
    if let Some(ref title) = args.title {
        options = options.with_document_title(title.clone());
    }
    if let Some(ref author) = args.author {
        options = options.with_author(author.clone());
    }

    let output_is_dir = args.output.to_string_lossy().ends_with('/')
        || (args.output.exists() && args.output.is_dir());
    if args.input.len() > 1 && !output_is_dir {
        eprintln!("Error: Multiple input files require output to be a directory");
        std::process::exit(1);
    }
    if output_is_dir && !args.output.exists() {
        fs::create_dir_all(&args.output)?;
    }

    let sink = CollectingSink::new();
    let converter = Converter::new(options, &sink);
    let mut error_count = 0;

    for input in &args.input {
        let output_path = if output_is_dir {
            output_path_in(&args.output, input)?
        } else {
            args.output.clone()
        };

        if output_path.exists() && !args.force {
            eprintln!(
                "Error: Output file already exists: {} (use --force to overwrite)",
                output_path.display()
            );
            error_count += 1;
            continue;
        }

        match converter.convert_file(input, &output_path) {
            Ok(()) => println!("✓ {} -> {}", input.display(), output_path.display()),
            Err(e) => {
                error_count += 1;
                eprintln!("✗ {}: {}", input.display(), e);
            },
        }

        for diagnostic in sink.take() {
            if args.verbose || diagnostic.level <= log::Level::Warn {
                eprintln!("  [{}] {}", diagnostic.level, diagnostic.message);
            }
        }
    }

    if error_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn output_path_in(dir: &Path, input: &Path) -> Result<PathBuf, String> {
    let stem = input
        .file_stem()
        .ok_or_else(|| format!("Invalid input filename: {}", input.display()))?
        .to_string_lossy();
    Ok(dir.join(format!("{}.docx", stem)))
}
