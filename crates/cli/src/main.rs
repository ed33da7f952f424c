//! CLI tool for compiling outline documents into slide descriptors.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use outline_core::{SlideCompiler, SlideDeck, TextFormatter};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Compile markdown-style outlines into slide descriptors for a renderer.
#[derive(Parser, Debug)]
#[command(name = "outline-slides")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input outline file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Drop slides whose content is empty
    #[arg(long)]
    skip_empty: bool,

    /// Indentation per depth level for text output
    #[arg(short, long, default_value = "2")]
    indent: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON slide deck
    Json,
    /// Indented plain-text listing
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "slides.json",
            Self::Text => "slides.txt",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let failures = run(&args);
    if failures > 0 {
        log::warn!("{} of {} files failed", failures, args.input.len());
    }

    Ok(())
}

/// Process every input, reporting per-file failures on stderr.
///
/// Returns the number of files that failed.
fn run(args: &Args) -> usize {
    let compiler = SlideCompiler::new();
    let formatter = TextFormatter::new().with_indent(args.indent);
    let mut failures = 0;

    for input_path in &args.input {
        log::info!("Processing: {}", input_path.display());

        if let Err(e) = emit_file(input_path, args, &compiler, &formatter) {
            eprintln!("Error processing {}: {:#}", input_path.display(), e);
            failures += 1;
        }
    }

    failures
}

/// Compile one file and print it or write it to its output path.
fn emit_file(
    input_path: &Path,
    args: &Args,
    compiler: &SlideCompiler,
    formatter: &TextFormatter,
) -> Result<()> {
    let output = process_file(input_path, args, compiler, formatter)?;

    if args.print {
        print!("{}", output);
    } else {
        let output_path = get_output_path(input_path, args.output.as_deref(), args.format)?;
        write_output(&output_path, &output)?;
        log::info!("Written to: {}", output_path.display());
    }

    Ok(())
}

/// Compile a single outline file and render it in the requested format.
fn process_file(
    input_path: &Path,
    args: &Args,
    compiler: &SlideCompiler,
    formatter: &TextFormatter,
) -> Result<String> {
    let tree = outline_core::parse_file(input_path)
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;

    log::debug!("  Found {} sections", tree.len());

    let mut deck = compiler.compile(tree);
    if args.skip_empty {
        deck.retain_non_empty();
    }

    log::debug!("  Compiled {} slides", deck.len());

    render(&deck, args.format, formatter)
}

/// Render a deck as JSON or plain text, with a trailing newline.
fn render(deck: &SlideDeck, format: OutputFormat, formatter: &TextFormatter) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(deck).context("Failed to serialize slides")?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Text => Ok(formatter.format_with_newline(deck)),
    }
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&Path>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
