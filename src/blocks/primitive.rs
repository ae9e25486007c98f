//! Primitive block parser
//!
//! A line-driven state machine over classified lines. Outside a block,
//! blank lines advance and content lines open a block; inside a block,
//! content lines accumulate (with header continuation and list coalescing)
//! and any content-free line finalizes the block.

use std::collections::HashMap;

use tracing::debug;

use crate::ast::{BlockMeta, Heading, PrimitiveBlock};
use crate::line::{self, Line};

use super::header::{self, Header};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Item,
    Numbered,
}

struct OpenBlock {
    block: PrimitiveBlock,
    /// Every source line consumed so far, untouched. `source_text` and
    /// `number_of_lines` come from here, so they survive the indent
    /// stripping applied to the body.
    raw_lines: Vec<String>,
    /// Still merging `| ` continuation lines into the header.
    in_header: bool,
    list_kind: Option<ListKind>,
}

pub struct BlockParser {
    blocks: Vec<PrimitiveBlock>,
    current: Option<OpenBlock>,
}

/// Parse classified lines into a flat list of primitive blocks.
pub fn parse_lines(lines: &[Line]) -> Vec<PrimitiveBlock> {
    let mut parser = BlockParser {
        blocks: Vec::new(),
        current: None,
    };
    for line in lines {
        parser.consume(line);
    }
    parser.finalize();
    parser.blocks
}

/// Classify and parse in one step.
pub fn parse_source(source: &str) -> Vec<PrimitiveBlock> {
    parse_lines(&line::classify_lines(source))
}

impl BlockParser {
    fn consume(&mut self, line: &Line) {
        let blank = line.is_empty() || line.is_blank();
        let in_block = self.current.is_some();
        match (in_block, blank) {
            (false, true) => {}
            (false, false) => self.open(line),
            (true, true) => self.finalize(),
            (true, false) => self.add_line(line),
        }
    }

    fn open(&mut self, line: &Line) {
        let content = line.body();
        let mut block = PrimitiveBlock {
            heading: Heading::Paragraph,
            indent: line.indent,
            args: Vec::new(),
            properties: HashMap::new(),
            first_line: String::new(),
            body: Vec::new(),
            meta: BlockMeta::at(line.position, line.line_number),
        };
        let mut in_header = false;
        let mut list_kind = None;

        match header::recognize(content) {
            Header::Paragraph => {
                block.first_line = content.to_string();
                block.body.push(line.content.clone());
            }
            Header::Section { level, title } => {
                block.heading = Heading::Ordinary {
                    name: "section".to_string(),
                };
                block
                    .properties
                    .insert("level".to_string(), level.to_string());
                block.meta.body_line_number = Some(line.line_number);
                if !title.is_empty() {
                    block.body.push(title);
                }
            }
            Header::Item => {
                block.heading = Heading::Ordinary {
                    name: "item".to_string(),
                };
                block.first_line = content.to_string();
                list_kind = Some(ListKind::Item);
            }
            Header::Numbered => {
                block.heading = Heading::Ordinary {
                    name: "numbered".to_string(),
                };
                block.first_line = content.to_string();
                list_kind = Some(ListKind::Numbered);
            }
            Header::Ordinary { name, rest } => {
                let (args, properties) = header::parse_args_and_properties(&rest);
                block.properties = properties;
                if name == "section" {
                    // the first positional arg is the level
                    let level = args
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "1".to_string());
                    block.properties.entry("level".to_string()).or_insert(level);
                }
                block.args = args;
                block.heading = Heading::Ordinary { name };
                in_header = true;
            }
            Header::Verbatim { name, rest } => {
                let (args, properties) = header::parse_args_and_properties(&rest);
                block.args = args;
                block.properties = properties;
                block.heading = Heading::Verbatim { name };
                in_header = true;
            }
        }

        self.current = Some(OpenBlock {
            block,
            raw_lines: vec![line.content.clone()],
            in_header,
            list_kind,
        });
    }

    fn add_line(&mut self, line: &Line) {
        let Some(open) = self.current.as_mut() else {
            return;
        };
        open.raw_lines.push(line.content.clone());
        let content = line.body();

        if open.in_header {
            if let Some(rest) = header::continuation(content) {
                let (args, properties) = header::parse_args_and_properties(rest);
                open.block.args.extend(args);
                // new keys win on conflict
                open.block.properties.extend(properties);
                return;
            }
            open.in_header = false;
            open.block.meta.body_line_number = Some(line.line_number);
        }

        if let Some(kind) = open.list_kind {
            if header::is_list_entry(content) {
                promote(&mut open.block, kind);
                open.block.body.push(relative_line(line, open.block.indent));
            } else {
                // space-joined continuation of the previous item
                match open.block.body.last_mut() {
                    Some(entry) => {
                        entry.push(' ');
                        entry.push_str(content.trim_end());
                    }
                    None => {
                        open.block.first_line.push(' ');
                        open.block.first_line.push_str(content.trim_end());
                    }
                }
            }
            return;
        }

        open.block.body.push(line.content.clone());
    }

    fn finalize(&mut self) {
        let Some(open) = self.current.take() else {
            return;
        };
        let OpenBlock {
            mut block,
            raw_lines,
            list_kind,
            ..
        } = open;

        match (&block.heading, list_kind) {
            (Heading::Verbatim { .. }, _) => {
                // verbatim bodies keep every line, header indent stripped
                let indent = block.indent;
                block.body = block
                    .body
                    .iter()
                    .map(|entry| strip_spaces(entry, indent).to_string())
                    .collect();
            }
            (_, Some(_)) => {
                // list entries were stored relative to the block already
            }
            _ => {
                let common = block
                    .body
                    .iter()
                    .filter(|entry| !entry.trim().is_empty())
                    .map(|entry| leading_spaces(entry))
                    .min()
                    .unwrap_or(0);
                block.body = block
                    .body
                    .iter()
                    .map(|entry| strip_spaces(entry, common).to_string())
                    .collect();
                if matches!(block.heading, Heading::Paragraph) {
                    block.first_line = block.body.first().cloned().unwrap_or_default();
                }
            }
        }

        block.meta.number_of_lines = raw_lines.len();
        block.meta.source_text = raw_lines.join("\n");
        block.meta.id = format!("{}-{}", block.meta.line_number, self.blocks.len());
        debug!(
            id = %block.meta.id,
            lines = block.meta.number_of_lines,
            "block finalized"
        );
        self.blocks.push(block);
    }
}

/// Promote a lone item to a coalesced list when a second entry arrives.
fn promote(block: &mut PrimitiveBlock, kind: ListKind) {
    let name = match kind {
        ListKind::Item => "itemList",
        ListKind::Numbered => "numberedList",
    };
    block.heading = Heading::Ordinary {
        name: name.to_string(),
    };
}

/// The line content with the block's own indent removed but any deeper
/// indent kept, so nesting stays recoverable from the entries.
fn relative_line(line: &Line, block_indent: usize) -> String {
    let keep = line.indent.saturating_sub(block_indent);
    format!("{}{}", " ".repeat(keep), line.body())
}

fn leading_spaces(entry: &str) -> usize {
    entry.chars().take_while(|&c| c == ' ').count()
}

fn strip_spaces(entry: &str, count: usize) -> &str {
    let available = leading_spaces(entry);
    &entry[count.min(available)..]
}
