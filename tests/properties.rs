//! Property tests for the compiler invariants
//!
//! The compiler must be total over arbitrary byte sequences, block ids
//! unique, forests strictly indented, and balanced inline input free of
//! error highlights.

use std::collections::HashSet;

use proptest::prelude::*;
use scripta::ast::Expression;
use scripta::compiler::compile_default;
use scripta::forest::Tree;
use scripta::parser::parse;
use scripta::tokenizer::{tokenize, Token};
use scripta::ExpressionBlock;

fn indents_strictly_increase(tree: &Tree<ExpressionBlock>) -> bool {
    tree.children.iter().all(|child| {
        child.value.indent > tree.value.indent && indents_strictly_increase(child)
    })
}

fn count_highlights(expressions: &[Expression]) -> usize {
    expressions
        .iter()
        .map(|expression| match expression {
            Expression::Fun { name, args, .. } => {
                usize::from(name == "errorHighlight") + count_highlights(args)
            }
            Expression::List { items, .. } => count_highlights(items),
            _ => 0,
        })
        .sum()
}

proptest! {
    #[test]
    fn compile_never_panics(input in any::<String>()) {
        let _ = compile_default(&input);
    }

    #[test]
    fn block_ids_are_unique(input in "[ -~\n]{0,400}") {
        let output = compile_default(&input);
        let blocks = scripta::forest::flatten(&output.forest);
        let ids: HashSet<_> = blocks.iter().map(|block| block.meta.id.as_str()).collect();
        prop_assert_eq!(ids.len(), blocks.len());
    }

    #[test]
    fn forests_are_strictly_indented(input in "[ -~\n]{0,400}") {
        let output = compile_default(&input);
        for tree in &output.forest {
            prop_assert_eq!(tree.value.indent, 0);
            prop_assert!(indents_strictly_increase(tree));
        }
    }

    #[test]
    fn inline_parser_never_panics(input in any::<String>()) {
        let _ = parse(0, &input);
    }

    #[test]
    fn balanced_function_calls_have_no_highlights(
        name in "[a-z]{1,8}",
        argument in "[a-zA-Z0-9 ]{0,20}",
    ) {
        let input = format!("[{name} {argument}]");
        let (expressions, messages) = parse(0, &input);
        prop_assert_eq!(count_highlights(&expressions), 0);
        prop_assert!(messages.is_empty());
    }

    #[test]
    fn text_tokens_retokenize_to_themselves(word in "[a-zA-Z0-9,.;!?-]{1,24}") {
        let tokens = tokenize(&word);
        prop_assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Str { content, .. } => prop_assert_eq!(content, &word),
            other => prop_assert!(false, "expected Str, got {:?}", other),
        }
    }

    #[test]
    fn source_text_reconstructs_consumed_lines(
        first in "[a-z][a-z ]{0,19}",
        second in "[a-z][a-z ]{0,19}",
    ) {
        let source = format!("{first}\n{second}\n");
        let blocks = scripta::blocks::parse_source(&source);
        // a two-line paragraph consumes both lines verbatim
        prop_assert_eq!(blocks.len(), 1);
        prop_assert_eq!(&blocks[0].meta.source_text, source.trim_end_matches('\n'));
    }
}
