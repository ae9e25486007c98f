//! Inline expression nodes
//!
//! The expression layer is a small tagged union over one metadata record.
//! `Fun` comes from `[name ...]`, `VFun` from `$...$` / `` `...` `` spans
//! whose body stays unparsed, and `List` groups the expressions of one
//! indented list item.

use serde::{Deserialize, Serialize};

/// Expression metadata: character offsets within the source line, the
/// token index the expression started at, and a stable id of the form
/// `"e-<lineNumber>.<tokenIndex>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprMeta {
    pub begin: usize,
    pub end: usize,
    pub index: usize,
    pub id: String,
}

impl ExprMeta {
    pub fn new(begin: usize, end: usize, index: usize, line_number: usize) -> Self {
        Self {
            begin,
            end,
            index,
            id: format!("e-{}.{}", line_number, index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Plain text.
    Text { content: String, meta: ExprMeta },
    /// A named function applied to sub-expressions, from `[name ...]`.
    Fun {
        name: String,
        args: Vec<Expression>,
        meta: ExprMeta,
    },
    /// A verbatim function whose body is one unparsed string; `name` is
    /// `"math"` or `"code"`.
    VFun {
        name: String,
        body: String,
        meta: ExprMeta,
    },
    /// An indented group, used for list items.
    List {
        indent: usize,
        items: Vec<Expression>,
        meta: ExprMeta,
    },
}

impl Expression {
    pub fn meta(&self) -> &ExprMeta {
        match self {
            Expression::Text { meta, .. }
            | Expression::Fun { meta, .. }
            | Expression::VFun { meta, .. }
            | Expression::List { meta, .. } => meta,
        }
    }

    /// The text payload, when this is a `Text` node.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Expression::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Concatenated plain text of this expression, recursing into
    /// function arguments and list items.
    pub fn plain_text(&self) -> String {
        match self {
            Expression::Text { content, .. } => content.clone(),
            Expression::Fun { args, .. } => args.iter().map(|a| a.plain_text()).collect(),
            Expression::VFun { body, .. } => body.clone(),
            Expression::List { items, .. } => items.iter().map(|i| i.plain_text()).collect(),
        }
    }
}

/// The sorted, de-duplicated function names appearing in a list of
/// expressions, including nested ones.
pub fn expression_names(expressions: &[Expression]) -> Vec<String> {
    let mut names = Vec::new();
    collect_names(expressions, &mut names);
    names.sort();
    names.dedup();
    names
}

fn collect_names(expressions: &[Expression], out: &mut Vec<String>) {
    for expression in expressions {
        match expression {
            Expression::Fun { name, args, .. } => {
                out.push(name.clone());
                collect_names(args, out);
            }
            Expression::VFun { name, .. } => out.push(name.clone()),
            Expression::List { items, .. } => collect_names(items, out),
            Expression::Text { .. } => {}
        }
    }
}
