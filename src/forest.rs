//! Forest construction
//!
//! Lifts a flat, ordered block list to a forest of rose trees using
//! indentation as the tree-building signal. A stack tracks the current
//! parent at each seen indent level; ties in indent produce siblings, and
//! blocks at indent 0 are roots. Indents are normalized during the lift:
//! the shallowest block anchors the document baseline, and a block that
//! ends up a root always carries indent 0.

use serde::{Deserialize, Serialize};

/// A rose tree. Tree shape encodes indentation hierarchy, not semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree<T> {
    pub value: T,
    pub children: Vec<Tree<T>>,
}

impl<T> Tree<T> {
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// Map every node value, preserving shape.
    pub fn map<U>(self, f: &mut impl FnMut(T) -> U) -> Tree<U> {
        Tree {
            value: f(self.value),
            children: self.children.into_iter().map(|c| c.map(f)).collect(),
        }
    }

    /// Depth-first, left-to-right references to every value.
    pub fn flatten(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a T>) {
        out.push(&self.value);
        for child in &self.children {
            child.collect(out);
        }
    }

    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Tree::size).sum::<usize>()
    }
}

/// Access to the indentation that drives forest construction.
pub trait Indented {
    fn indent(&self) -> usize;
    fn set_indent(&mut self, indent: usize);
}

impl Indented for crate::ast::PrimitiveBlock {
    fn indent(&self) -> usize {
        self.indent
    }

    fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }
}

impl Indented for crate::ast::ExpressionBlock {
    fn indent(&self) -> usize {
        self.indent
    }

    fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }
}

/// Build the forest: pop the parent stack until the top has strictly
/// smaller indent, then attach.
///
/// Indents are made baseline-relative first (the minimum block indent
/// counts as 0), and a block with no shallower predecessor is anchored at
/// indent 0 when it becomes a root. Every root therefore has indent 0,
/// for any input.
pub fn build<T: Indented>(blocks: Vec<T>) -> Vec<Tree<T>> {
    let baseline = blocks.iter().map(Indented::indent).min().unwrap_or(0);
    let mut roots: Vec<Tree<T>> = Vec::new();
    let mut stack: Vec<Tree<T>> = Vec::new();

    for mut block in blocks {
        block.set_indent(block.indent() - baseline);
        while stack
            .last()
            .map_or(false, |top| top.value.indent() >= block.indent())
        {
            if let Some(done) = stack.pop() {
                attach(&mut roots, &mut stack, done);
            }
        }
        if stack.is_empty() {
            block.set_indent(0);
        }
        stack.push(Tree::leaf(block));
    }
    while let Some(done) = stack.pop() {
        attach(&mut roots, &mut stack, done);
    }
    roots
}

fn attach<T>(roots: &mut Vec<Tree<T>>, stack: &mut [Tree<T>], done: Tree<T>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(done),
        None => roots.push(done),
    }
}

/// Depth-first, left-to-right references across a whole forest.
pub fn flatten<T>(forest: &[Tree<T>]) -> Vec<&T> {
    forest.iter().flat_map(Tree::flatten).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block(usize, &'static str);

    impl Indented for Block {
        fn indent(&self) -> usize {
            self.0
        }

        fn set_indent(&mut self, indent: usize) {
            self.0 = indent;
        }
    }

    fn names(forest: &[Tree<Block>]) -> Vec<&'static str> {
        flatten(forest).iter().map(|b| b.1).collect()
    }

    #[test]
    fn equal_indent_gives_siblings() {
        let forest = build(vec![Block(0, "a"), Block(0, "b")]);
        assert_eq!(forest.len(), 2);
        assert_eq!(names(&forest), vec!["a", "b"]);
    }

    #[test]
    fn deeper_indent_nests() {
        let forest = build(vec![Block(0, "a"), Block(2, "b"), Block(4, "c"), Block(2, "d")]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].children.len(), 1);
        assert_eq!(names(&forest), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn dedent_pops_back_to_the_right_parent() {
        let forest = build(vec![
            Block(0, "a"),
            Block(3, "b"),
            Block(0, "c"),
            Block(3, "d"),
        ]);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[1].children.len(), 1);
    }

    #[test]
    fn uniformly_indented_blocks_anchor_at_the_baseline() {
        let forest = build(vec![Block(2, "a"), Block(2, "b"), Block(4, "c")]);
        assert_eq!(forest.len(), 2);
        assert!(forest.iter().all(|tree| tree.value.0 == 0));
        assert_eq!(forest[1].children.len(), 1);
        assert_eq!(forest[1].children[0].value.0, 2);
    }

    #[test]
    fn a_deep_leading_block_still_roots_at_zero() {
        let forest = build(vec![Block(2, "a"), Block(0, "b")]);
        assert_eq!(forest.len(), 2);
        assert!(forest.iter().all(|tree| tree.value.0 == 0));
        assert_eq!(names(&forest), vec!["a", "b"]);
    }
}
