//! Block-to-expression pipeline
//!
//! For each primitive block, parse its body into expressions or keep it
//! raw for verbatim blocks. List blocks become one `ExprList` per entry so
//! nesting stays visible to the renderer.

use crate::ast::{Body, ExprMeta, Expression, ExpressionBlock, Heading, PrimitiveBlock};
use crate::blocks::header;
use crate::forest::Tree;
use crate::parser;

/// Lift a whole primitive forest to expression blocks.
pub fn to_expression_forest(forest: Vec<Tree<PrimitiveBlock>>) -> Vec<Tree<ExpressionBlock>> {
    forest
        .into_iter()
        .map(|tree| tree.map(&mut to_expression_block))
        .collect()
}

/// Lift one block. The block id is mirrored into `properties["id"]`, and
/// inline recovery messages are appended to the block messages.
pub fn to_expression_block(block: PrimitiveBlock) -> ExpressionBlock {
    let PrimitiveBlock {
        heading,
        indent,
        args,
        mut properties,
        first_line,
        body,
        mut meta,
    } = block;

    // zero-based line for expression ids and messages
    let base_line = meta.line_number.saturating_sub(1);

    let body = match &heading {
        Heading::Verbatim { .. } => Body::Raw(body.join("\n")),
        Heading::Ordinary { name } if name == "item" || name == "numbered" => {
            let (expressions, messages) =
                parser::parse(base_line, header::strip_list_marker(&first_line));
            meta.messages.extend(messages);
            Body::Parsed(vec![list_entry(indent, expressions, base_line)])
        }
        Heading::Ordinary { name } if name == "itemList" || name == "numberedList" => {
            let mut items = Vec::new();
            for (offset, entry) in std::iter::once(first_line.as_str())
                .chain(body.iter().map(String::as_str))
                .enumerate()
            {
                let entry_indent = indent + leading_spaces(entry);
                let trimmed = entry.trim_start();
                let (expressions, messages) =
                    parser::parse(base_line + offset, header::strip_list_marker(trimmed));
                meta.messages.extend(messages);
                items.push(list_entry(entry_indent, expressions, base_line + offset));
            }
            Body::Parsed(items)
        }
        _ => {
            let (expressions, messages) = parser::parse(base_line, &body.join("\n"));
            meta.messages.extend(messages);
            Body::Parsed(expressions)
        }
    };

    properties.insert("id".to_string(), meta.id.clone());

    ExpressionBlock {
        heading,
        indent,
        args,
        properties,
        first_line,
        body,
        meta,
    }
}

fn list_entry(indent: usize, items: Vec<Expression>, line_number: usize) -> Expression {
    let (begin, end) = match (items.first(), items.last()) {
        (Some(first), Some(last)) => (first.meta().begin, last.meta().end),
        _ => (0, 0),
    };
    Expression::List {
        indent,
        items,
        meta: ExprMeta::new(begin, end, 0, line_number),
    }
}

fn leading_spaces(entry: &str) -> usize {
    entry.chars().take_while(|&c| c == ' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks;
    use crate::forest;

    fn compile_bodies(source: &str) -> Vec<ExpressionBlock> {
        let forest = to_expression_forest(forest::build(blocks::parse_source(source)));
        forest::flatten(&forest).into_iter().cloned().collect()
    }

    #[test]
    fn verbatim_body_stays_raw() {
        let compiled = compile_bodies("| equation\na^2 + b^2 = c^2\n");
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].body, Body::Raw("a^2 + b^2 = c^2".to_string()));
    }

    #[test]
    fn paragraph_body_is_parsed() {
        let compiled = compile_bodies("hello");
        match &compiled[0].body {
            Body::Parsed(expressions) => {
                assert_eq!(expressions.len(), 1);
                assert_eq!(expressions[0].text_content(), Some("hello"));
            }
            other => panic!("expected parsed body, got {other:?}"),
        }
    }

    #[test]
    fn id_is_mirrored_into_properties() {
        let compiled = compile_bodies("hello");
        assert_eq!(compiled[0].get_property("id"), Some("1-0"));
    }

    #[test]
    fn item_list_has_one_entry_per_item() {
        let compiled = compile_bodies("- milk\n- eggs\n");
        assert_eq!(compiled.len(), 1);
        match &compiled[0].body {
            Body::Parsed(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(items[0], Expression::List { .. }));
            }
            other => panic!("expected parsed body, got {other:?}"),
        }
    }
}
