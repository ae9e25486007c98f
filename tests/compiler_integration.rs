//! End-to-end compiler tests
//!
//! Literal pipeline scenarios, block id uniqueness, the document filter
//! and the outline projection.

use std::collections::HashSet;

use scripta::ast::{Body, Expression, Heading};
use scripta::compiler::{compile, compile_default, outline, CompilerParameters, Filter};
use scripta::forest;

#[test]
fn a_single_word_compiles_to_one_paragraph() {
    let output = compile_default("hello");
    assert_eq!(output.forest.len(), 1);
    let block = &output.forest[0].value;
    assert_eq!(block.heading, Heading::Paragraph);
    match &block.body {
        Body::Parsed(expressions) => {
            assert_eq!(expressions.len(), 1);
            match &expressions[0] {
                Expression::Text { content, meta } => {
                    assert_eq!(content, "hello");
                    assert_eq!((meta.begin, meta.end, meta.index), (0, 4, 0));
                    assert_eq!(meta.id, "e-0.0");
                }
                other => panic!("expected Text, got {other:?}"),
            }
        }
        other => panic!("expected parsed body, got {other:?}"),
    }
}

#[test]
fn inline_functions_survive_the_pipeline() {
    let output = compile_default("This is [b bold]!");
    let block = &output.forest[0].value;
    match &block.body {
        Body::Parsed(expressions) => {
            assert_eq!(expressions.len(), 3);
            assert_eq!(expressions[0].text_content(), Some("This is "));
            assert!(matches!(
                &expressions[1],
                Expression::Fun { name, .. } if name == "b"
            ));
            assert_eq!(expressions[2].text_content(), Some("!"));
        }
        other => panic!("expected parsed body, got {other:?}"),
    }
}

#[test]
fn a_broken_bracket_recovers_with_a_message() {
    let output = compile_default("This is [b");
    let block = &output.forest[0].value;
    let Body::Parsed(expressions) = &block.body else {
        panic!("expected parsed body");
    };
    let highlights = expressions
        .iter()
        .filter(|expression| {
            matches!(expression, Expression::Fun { name, .. } if name == "errorHighlight")
        })
        .count();
    assert_eq!(highlights, 1);
    assert!(block
        .meta
        .messages
        .contains(&"Missing right bracket (line 0)".to_string()));
}

#[test]
fn block_ids_are_unique_within_a_compile() {
    let source = "a\n\nb\n\n  c\n\n| theorem\nx\n\n- one\n- two\n\n$$\nz\n";
    let output = compile_default(source);
    let blocks = forest::flatten(&output.forest);
    let ids: HashSet<_> = blocks.iter().map(|block| block.meta.id.as_str()).collect();
    assert_eq!(ids.len(), blocks.len());
    for block in &blocks {
        assert_eq!(block.get_property("id"), Some(block.meta.id.as_str()));
    }
}

#[test]
fn suppressing_document_blocks_removes_title_trees() {
    let source = "| title\nEssay on Rain\n\nhello world\n\n| document\nPreface\n";
    let kept = compile(
        &CompilerParameters {
            filter: Filter::SuppressDocumentBlocks,
            ..CompilerParameters::default()
        },
        source,
    );
    assert_eq!(kept.forest.len(), 1);
    assert_eq!(kept.forest[0].value.heading, Heading::Paragraph);

    let unfiltered = compile_default(source);
    assert_eq!(unfiltered.forest.len(), 3);
}

#[test]
fn the_outline_lists_sections_in_order() {
    let output = compile_default("# One\n\ntext\n\n## One-one\n\n# Two\n");
    let entries = outline(&output);
    let rows: Vec<_> = entries
        .iter()
        .map(|entry| (entry.level, entry.title.as_str(), entry.label.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![(1, "One", "1"), (2, "One-one", "1.1"), (1, "Two", "2")]
    );
}

#[test]
fn compile_is_total_on_odd_inputs() {
    for source in [
        "",
        "\n\n\n",
        "   \n\t\n",
        "| \n",
        "|\n",
        "[[[\n]]]\n\n$$$\n",
        "| section\n| section\n| section\n",
        "````\n- \n. \n# \n",
        "\u{0}\u{1}binary\u{2}\n",
    ] {
        let _ = compile_default(source);
    }
}

#[test]
fn empty_input_compiles_to_an_empty_forest() {
    let output = compile_default("");
    assert!(output.forest.is_empty());
    assert_eq!(output.accumulator.block_counter, 0);
}
