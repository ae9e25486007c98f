//! Processing API
//!
//! Pure functions for driving the compiler from tools. This module does no
//! I/O and never exits the process; it takes structured input and returns
//! structured output so the CLI and tests share one code path.

use std::str::FromStr;

use thiserror::Error;

use crate::ast::Heading;
use crate::blocks;
use crate::compiler;
use crate::tools::treeviz::{self, RenderOptions};

/// What the caller wants back from a compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Flat primitive-block listing, one block per line.
    Blocks,
    /// ASCII tree of the compiled forest.
    Forest,
    /// The compiled forest as JSON.
    ForestJson,
    /// Forest plus accumulator as JSON (the full renderer contract).
    CompiledJson,
    /// Unicode tree of the compiled forest.
    Treeviz,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blocks" => Ok(OutputFormat::Blocks),
            "forest" => Ok(OutputFormat::Forest),
            "forest-json" => Ok(OutputFormat::ForestJson),
            "compiled-json" => Ok(OutputFormat::CompiledJson),
            "treeviz" => Ok(OutputFormat::Treeviz),
            other => Err(format!("Unknown format: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessArgs {
    pub content: String,
    pub source_path: String,
    pub format: OutputFormat,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Run the pipeline and render the requested view of the result.
pub fn process(args: &ProcessArgs) -> Result<String, ProcessError> {
    match args.format {
        OutputFormat::Blocks => Ok(list_blocks(&args.content)),
        OutputFormat::Forest => {
            let output = compiler::compile_default(&args.content);
            Ok(treeviz::render(&output.forest, &RenderOptions::ascii()))
        }
        OutputFormat::ForestJson => {
            let output = compiler::compile_default(&args.content);
            Ok(serde_json::to_string_pretty(&output.forest)?)
        }
        OutputFormat::CompiledJson => {
            let output = compiler::compile_default(&args.content);
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Treeviz => {
            let output = compiler::compile_default(&args.content);
            Ok(treeviz::render(&output.forest, &RenderOptions::default()))
        }
    }
}

fn list_blocks(content: &str) -> String {
    blocks::parse_source(content)
        .iter()
        .map(|block| {
            format!(
                "{} {} indent={} lines={}",
                block.meta.id,
                heading_label(&block.heading),
                block.indent,
                block.meta.number_of_lines
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading_label(heading: &Heading) -> String {
    match heading {
        Heading::Paragraph => "paragraph".to_string(),
        Heading::Ordinary { name } => format!("ordinary:{name}"),
        Heading::Verbatim { name } => format!("verbatim:{name}"),
    }
}
