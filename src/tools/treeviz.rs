//! Forest visualization
//!
//! Converts a compiled forest into an `ego_tree` of display labels and
//! draws it with Unicode or ASCII branch characters, optionally colored
//! for terminals. One output line per block.

use std::io::{self, Write};

use ego_tree::{NodeMut, NodeRef};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::ast::{ExpressionBlock, Heading};
use crate::forest::Tree;

#[derive(Debug, Clone, Copy)]
struct TreeChars {
    tee: &'static str,
    last: &'static str,
    pipe: &'static str,
    blank: &'static str,
}

const UNICODE_CHARS: TreeChars = TreeChars {
    tee: "├── ",
    last: "└── ",
    pipe: "│   ",
    blank: "    ",
};

const ASCII_CHARS: TreeChars = TreeChars {
    tee: "|-- ",
    last: "`-- ",
    pipe: "|   ",
    blank: "    ",
};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub ascii: bool,
    /// Cap on rendered line width; longer labels are cut off.
    pub max_width: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ascii: false,
            max_width: None,
        }
    }
}

impl RenderOptions {
    pub fn ascii() -> Self {
        Self {
            ascii: true,
            max_width: None,
        }
    }
}

/// A display label per node, kept alongside the block kind so colored
/// rendering can pick a color without re-deriving it.
struct DisplayNode {
    label: String,
    kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Root,
    Paragraph,
    Ordinary,
    Verbatim,
}

/// Lift the forest into an `ego_tree` under one synthetic root.
fn to_display_tree(forest: &[Tree<ExpressionBlock>]) -> ego_tree::Tree<DisplayNode> {
    let mut tree = ego_tree::Tree::new(DisplayNode {
        label: "*".to_string(),
        kind: NodeKind::Root,
    });
    let mut root = tree.root_mut();
    for block_tree in forest {
        append_block(&mut root, block_tree);
    }
    tree
}

fn append_block(parent: &mut NodeMut<DisplayNode>, tree: &Tree<ExpressionBlock>) {
    let mut node = parent.append(display_node(&tree.value));
    for child in &tree.children {
        append_block(&mut node, child);
    }
}

fn display_node(block: &ExpressionBlock) -> DisplayNode {
    let (kind, name) = match &block.heading {
        Heading::Paragraph => (NodeKind::Paragraph, "paragraph".to_string()),
        Heading::Ordinary { name } => (NodeKind::Ordinary, name.clone()),
        Heading::Verbatim { name } => (NodeKind::Verbatim, name.clone()),
    };
    let mut label = format!("{name} ({})", block.meta.id);
    if let Some(display) = block.get_property("label") {
        if !display.is_empty() {
            label.push_str(&format!(" [{display}]"));
        }
    }
    let excerpt = block.first_text_line();
    if !excerpt.is_empty() {
        label.push_str(&format!(" {excerpt:?}"));
    }
    DisplayNode { label, kind }
}

/// Render to a plain string.
pub fn render(forest: &[Tree<ExpressionBlock>], options: &RenderOptions) -> String {
    let tree = to_display_tree(forest);
    let chars = if options.ascii {
        ASCII_CHARS
    } else {
        UNICODE_CHARS
    };
    let mut out = String::new();
    for top in tree.root().children() {
        push_line(&mut out, "", &top.value().label, options);
        render_children(&mut out, top, "", &chars, options);
    }
    out
}

fn render_children(
    out: &mut String,
    node: NodeRef<DisplayNode>,
    prefix: &str,
    chars: &TreeChars,
    options: &RenderOptions,
) {
    let children: Vec<_> = node.children().collect();
    let count = children.len();
    for (position, child) in children.into_iter().enumerate() {
        let is_last = position + 1 == count;
        let branch = if is_last { chars.last } else { chars.tee };
        push_line(
            out,
            &format!("{prefix}{branch}"),
            &child.value().label,
            options,
        );
        let deeper = format!("{prefix}{}", if is_last { chars.blank } else { chars.pipe });
        render_children(out, child, &deeper, chars, options);
    }
}

fn push_line(out: &mut String, prefix: &str, label: &str, options: &RenderOptions) {
    let mut line = format!("{prefix}{label}");
    if let Some(width) = options.max_width {
        line = line.chars().take(width).collect();
    }
    out.push_str(&line);
    out.push('\n');
}

/// Render with per-kind colors to a terminal writer.
pub fn render_colored<W: WriteColor>(
    forest: &[Tree<ExpressionBlock>],
    options: &RenderOptions,
    writer: &mut W,
) -> io::Result<()> {
    let tree = to_display_tree(forest);
    let chars = if options.ascii {
        ASCII_CHARS
    } else {
        UNICODE_CHARS
    };
    for top in tree.root().children() {
        write_line(writer, "", top.value(), options)?;
        write_children(writer, top, "", &chars, options)?;
    }
    Ok(())
}

fn write_children<W: WriteColor>(
    writer: &mut W,
    node: NodeRef<DisplayNode>,
    prefix: &str,
    chars: &TreeChars,
    options: &RenderOptions,
) -> io::Result<()> {
    let children: Vec<_> = node.children().collect();
    let count = children.len();
    for (position, child) in children.into_iter().enumerate() {
        let is_last = position + 1 == count;
        let branch = if is_last { chars.last } else { chars.tee };
        write!(writer, "{prefix}{branch}")?;
        write_line(writer, "", child.value(), options)?;
        let deeper = format!("{prefix}{}", if is_last { chars.blank } else { chars.pipe });
        write_children(writer, child, &deeper, chars, options)?;
    }
    Ok(())
}

fn write_line<W: WriteColor>(
    writer: &mut W,
    prefix: &str,
    node: &DisplayNode,
    options: &RenderOptions,
) -> io::Result<()> {
    let color = match node.kind {
        NodeKind::Root => None,
        NodeKind::Paragraph => None,
        NodeKind::Ordinary => Some(Color::Cyan),
        NodeKind::Verbatim => Some(Color::Yellow),
    };
    write!(writer, "{prefix}")?;
    if let Some(color) = color {
        writer.set_color(ColorSpec::new().set_fg(Some(color)))?;
    }
    let mut label = node.label.clone();
    if let Some(width) = options.max_width {
        label = label.chars().take(width).collect();
    }
    write!(writer, "{label}")?;
    writer.reset()?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler;

    #[test]
    fn one_line_per_block() {
        let output = compiler::compile_default("# One\n\nhello\n\n| theorem\nPythagoras\n");
        let rendered = render(&output.forest, &RenderOptions::ascii());
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("section"));
        assert!(rendered.contains("theorem"));
    }

    #[test]
    fn width_cap_truncates() {
        let output = compiler::compile_default("a paragraph with a very long first line indeed\n");
        let rendered = render(
            &output.forest,
            &RenderOptions {
                ascii: true,
                max_width: Some(10),
            },
        );
        assert!(rendered.lines().all(|line| line.chars().count() <= 10));
    }
}
