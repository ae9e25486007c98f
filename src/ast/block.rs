//! Block-level data model
//!
//! [`PrimitiveBlock`] is what the line machine emits: a heading, raw body
//! lines and block metadata. [`ExpressionBlock`] is the same shape after
//! the body has been parsed (or kept raw, for verbatim blocks).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::expression::Expression;

/// Block heading. `name` is the block kind (`section`, `theorem`,
/// `equation`, `code`, ...); the set of verbatim names is fixed, see
/// [`crate::blocks::names`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Paragraph,
    Ordinary { name: String },
    Verbatim { name: String },
}

impl Heading {
    pub fn name(&self) -> Option<&str> {
        match self {
            Heading::Paragraph => None,
            Heading::Ordinary { name } | Heading::Verbatim { name } => Some(name),
        }
    }

    pub fn is_verbatim(&self) -> bool {
        matches!(self, Heading::Verbatim { .. })
    }

    pub fn is_ordinary_named(&self, wanted: &str) -> bool {
        matches!(self, Heading::Ordinary { name } if name == wanted)
    }
}

/// Block metadata.
///
/// `number_of_lines` counts every source line the block consumed, header
/// and continuation lines included. `body_line_number` points at the first
/// line inside the body when a header was consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMeta {
    pub id: String,
    pub position: usize,
    pub line_number: usize,
    pub number_of_lines: usize,
    pub body_line_number: Option<usize>,
    pub messages: Vec<String>,
    pub source_text: String,
    pub error: Option<String>,
}

impl BlockMeta {
    pub fn at(position: usize, line_number: usize) -> Self {
        Self {
            id: String::new(),
            position,
            line_number,
            number_of_lines: 0,
            body_line_number: None,
            messages: Vec::new(),
            source_text: String::new(),
            error: None,
        }
    }
}

/// A block as produced by the primitive block parser.
///
/// `args` holds the positional header arguments, `properties` the
/// `key:value` pairs; the two are disjoint. For paragraphs `first_line`
/// is the first content line and `body` holds every content line; for
/// headed blocks the header is consumed and `first_line` is empty, except
/// for list items where it carries the first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveBlock {
    pub heading: Heading,
    pub indent: usize,
    pub args: Vec<String>,
    pub properties: HashMap<String, String>,
    pub first_line: String,
    pub body: Vec<String>,
    pub meta: BlockMeta,
}

/// An expression-block body: raw text for verbatim blocks, a parsed
/// expression list for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Raw(String),
    Parsed(Vec<Expression>),
}

impl Body {
    pub fn expressions(&self) -> &[Expression] {
        match self {
            Body::Parsed(expressions) => expressions,
            Body::Raw(_) => &[],
        }
    }
}

/// Same shape as [`PrimitiveBlock`] with the body lifted to [`Body`].
/// The block id is also mirrored into `properties["id"]` so renderers can
/// attach DOM ids without reaching into the meta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionBlock {
    pub heading: Heading,
    pub indent: usize,
    pub args: Vec<String>,
    pub properties: HashMap<String, String>,
    pub first_line: String,
    pub body: Body,
    pub meta: BlockMeta,
}

impl ExpressionBlock {
    pub fn name(&self) -> Option<&str> {
        self.heading.name()
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<String>) {
        self.properties.insert(key.to_string(), value.into());
    }

    /// The first textual line of the block content, used for slugs and
    /// reference tags. For parsed bodies this is the text up to the first
    /// newline; for raw bodies, the first raw line.
    pub fn first_text_line(&self) -> String {
        match &self.body {
            Body::Raw(text) => text.lines().next().unwrap_or("").trim().to_string(),
            Body::Parsed(expressions) => {
                let mut out = String::new();
                for expression in expressions {
                    let text = expression.plain_text();
                    match text.split_once('\n') {
                        Some((head, _)) => {
                            out.push_str(head);
                            break;
                        }
                        None => out.push_str(&text),
                    }
                }
                out.trim().to_string()
            }
        }
    }
}
