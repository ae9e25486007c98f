//! Compiler façade
//!
//! Composes the whole pipeline behind one call:
//! `lines -> classify -> primitive blocks -> forest -> expressions ->
//! accumulator -> (accumulator, annotated forest)`. A compile is a pure
//! function of its input; there is no shared state between compiles.

use serde::{Deserialize, Serialize};

use crate::accumulator::{self, Accumulator};
use crate::ast::ExpressionBlock;
use crate::blocks;
use crate::forest::{self, Tree};
use crate::line;
use crate::pipeline;

/// Post-compile tree filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    NoFilter,
    /// Remove any tree whose root is a `document` or `title` block.
    SuppressDocumentBlocks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Renderer sizing hints, passed through untouched by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sizing {
    pub base_font_size: f32,
    pub paragraph_spacing: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub indentation: f32,
    pub indent_unit: f32,
    pub scale: f32,
}

impl Default for Sizing {
    fn default() -> Self {
        Self {
            base_font_size: 16.0,
            paragraph_spacing: 12.0,
            margin_left: 0.0,
            margin_right: 0.0,
            indentation: 18.0,
            indent_unit: 12.0,
            scale: 1.0,
        }
    }
}

/// Compile parameters. Most fields are semantic hints for the downstream
/// renderer; the core reads only `filter` and `max_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerParameters {
    pub filter: Filter,
    pub window_width: u32,
    pub selected_id: String,
    pub theme: Theme,
    pub edit_count: u32,
    pub width: u32,
    pub show_toc: bool,
    pub sizing: Sizing,
    /// Section depth at which the theorem/equation counters reset.
    pub max_level: usize,
}

impl Default for CompilerParameters {
    fn default() -> Self {
        Self {
            filter: Filter::NoFilter,
            window_width: 1200,
            selected_id: String::new(),
            theme: Theme::Light,
            edit_count: 0,
            width: 600,
            show_toc: true,
            sizing: Sizing::default(),
            max_level: 2,
        }
    }
}

/// The compile result handed to renderers: the rewritten forest plus the
/// final accumulator for reference, footnote and bibliography lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerOutput {
    pub forest: Vec<Tree<ExpressionBlock>>,
    pub accumulator: Accumulator,
}

/// Compile a full source text.
pub fn compile(parameters: &CompilerParameters, source: &str) -> CompilerOutput {
    let lines = line::classify_lines(source);
    let primitive = blocks::parse_lines(&lines);
    let forest = forest::build(primitive);
    let forest = pipeline::to_expression_forest(forest);
    let (accumulator, forest) = accumulator::transform_accumulate(parameters.max_level, forest);
    let forest = apply_filter(parameters.filter, forest);
    CompilerOutput {
        forest,
        accumulator,
    }
}

/// Compile with default parameters.
pub fn compile_default(source: &str) -> CompilerOutput {
    compile(&CompilerParameters::default(), source)
}

fn apply_filter(
    filter: Filter,
    forest: Vec<Tree<ExpressionBlock>>,
) -> Vec<Tree<ExpressionBlock>> {
    match filter {
        Filter::NoFilter => forest,
        Filter::SuppressDocumentBlocks => forest
            .into_iter()
            .filter(|tree| {
                !matches!(tree.value.name(), Some("document") | Some("title"))
            })
            .collect(),
    }
}

/// One table-of-contents row projected from the compiled forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: usize,
    pub title: String,
    pub label: String,
}

/// The flat section outline a TOC renderer consumes.
pub fn outline(output: &CompilerOutput) -> Vec<OutlineEntry> {
    forest::flatten(&output.forest)
        .into_iter()
        .filter(|block| block.heading.is_ordinary_named("section"))
        .map(|block| OutlineEntry {
            level: block
                .get_property("level")
                .and_then(|value| value.parse().ok())
                .unwrap_or(1),
            title: block.first_text_line(),
            label: block.get_property("label").unwrap_or("").to_string(),
        })
        .collect()
}
