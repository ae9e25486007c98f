//! Forest construction tests over compiled documents.

use scripta::compiler::compile_default;
use scripta::forest::Tree;
use scripta::ExpressionBlock;

fn check_indents(tree: &Tree<ExpressionBlock>) {
    for child in &tree.children {
        assert!(
            child.value.indent > tree.value.indent,
            "child indent {} must exceed parent indent {}",
            child.value.indent,
            tree.value.indent
        );
        check_indents(child);
    }
}

#[test]
fn roots_have_indent_zero() {
    let output = compile_default("alpha\n\nbeta\n\n  indented under beta\n");
    assert_eq!(output.forest.len(), 2);
    for tree in &output.forest {
        assert_eq!(tree.value.indent, 0);
    }
}

#[test]
fn children_are_strictly_deeper() {
    let source = "\
| theorem
Primes abound

  | equation
  p_1 p_2 cdots p_n + 1

  remark at the same depth

back at top level
";
    let output = compile_default(source);
    assert_eq!(output.forest.len(), 2);
    let theorem = &output.forest[0];
    assert_eq!(theorem.children.len(), 2);
    for tree in &output.forest {
        check_indents(tree);
    }
}

#[test]
fn indented_documents_anchor_at_the_baseline() {
    // the shallowest blocks sit at indent 2, so they become the roots
    let output = compile_default("  a\n\n    b\n\n  c\n");
    assert_eq!(output.forest.len(), 2);
    for tree in &output.forest {
        assert_eq!(tree.value.indent, 0);
        check_indents(tree);
    }
    assert_eq!(output.forest[0].children.len(), 1);
}

#[test]
fn a_leading_deep_block_still_roots_at_zero() {
    let output = compile_default("    deep start\n\nshallow\n");
    assert_eq!(output.forest.len(), 2);
    for tree in &output.forest {
        assert_eq!(tree.value.indent, 0);
    }
}

#[test]
fn equal_indent_blocks_are_siblings() {
    let output = compile_default("one\n\ntwo\n\nthree\n");
    assert_eq!(output.forest.len(), 3);
    assert!(output.forest.iter().all(|tree| tree.children.is_empty()));
}

#[test]
fn deep_nesting_follows_indentation() {
    let source = "a\n\n  b\n\n    c\n\n  d\n";
    let output = compile_default(source);
    assert_eq!(output.forest.len(), 1);
    let a = &output.forest[0];
    assert_eq!(a.size(), 4);
    assert_eq!(a.children.len(), 2);
    assert_eq!(a.children[0].children.len(), 1);
    for tree in &output.forest {
        check_indents(tree);
    }
}
