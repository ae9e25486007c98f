//! Scripta CLI
//!
//! Compiles one file (or every markup file under a directory) and prints
//! the requested view of the result.
//!
//! ```text
//! # Inspect the primitive block structure
//! scripta --format blocks document.md
//!
//! # Full renderer contract as JSON
//! scripta --format compiled-json document.md
//!
//! # Colored tree of a whole directory
//! scripta notes/
//! ```

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use termcolor::{ColorChoice, StandardStream};
use walkdir::WalkDir;

use scripta::api::{process, OutputFormat, ProcessArgs};
use scripta::compiler;
use scripta::tools::treeviz::{self, RenderOptions};

#[derive(Parser, Debug)]
#[command(version, about = "Scripta compiler front end", long_about = None)]
struct Args {
    /// Path to a Scripta file, or a directory to sweep for .md/.scripta
    /// files
    path: PathBuf,

    /// Output format: blocks, forest, forest-json, compiled-json, treeviz
    #[arg(long, short, default_value = "treeviz")]
    format: String,

    /// Use ASCII branch characters instead of Unicode
    #[arg(long)]
    ascii: bool,

    /// Never color the output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let format: OutputFormat = args.format.parse()?;

    let files = collect_inputs(&args.path)?;
    if files.is_empty() {
        eprintln!("No Scripta files found under {}", args.path.display());
        std::process::exit(1);
    }

    let many = files.len() > 1;
    for file in files {
        if many {
            println!("== {} ==", file.display());
        }
        run_one(&file, format, &args)?;
    }
    Ok(())
}

fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry?;
        let is_source = entry
            .path()
            .extension()
            .map_or(false, |ext| ext == "md" || ext == "scripta");
        if entry.file_type().is_file() && is_source {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn run_one(file: &Path, format: OutputFormat, args: &Args) -> Result<(), Box<dyn Error>> {
    let content = fs::read_to_string(file)?;

    // the tree view honors terminal width and colors when stdout is a
    // real terminal
    if format == OutputFormat::Treeviz {
        let output = compiler::compile_default(&content);
        let options = RenderOptions {
            ascii: args.ascii,
            max_width: terminal_size::terminal_size().map(|(w, _)| w.0 as usize),
        };
        if !args.no_color && atty::is(atty::Stream::Stdout) {
            let mut stdout = StandardStream::stdout(ColorChoice::Auto);
            treeviz::render_colored(&output.forest, &options, &mut stdout)?;
        } else {
            print!("{}", treeviz::render(&output.forest, &options));
        }
        return Ok(());
    }

    let rendered = process(&ProcessArgs {
        content,
        source_path: file.display().to_string(),
        format,
    })?;
    println!("{rendered}");
    Ok(())
}
