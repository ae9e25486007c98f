//! Rewrite phase
//!
//! The second half of the paired fold: relabel the block using the state
//! the update phase just produced. Labels are display numbers, tags are
//! stable slugs; both land in `properties` where renderers read them.

use crate::ast::{Body, ExpressionBlock, Heading};
use crate::macros;

use super::update::reduce_name;
use super::{explicit_tag, tag_for, Accumulator};

pub(crate) fn transform_block(
    accumulator: &Accumulator,
    mut block: ExpressionBlock,
) -> ExpressionBlock {
    match block.heading.clone() {
        Heading::Ordinary { name } => rewrite_ordinary(accumulator, &name, &mut block),
        Heading::Verbatim { name } => rewrite_verbatim(accumulator, &name, &mut block),
        Heading::Paragraph => {}
    }
    block
}

fn rewrite_ordinary(accumulator: &Accumulator, name: &str, block: &mut ExpressionBlock) {
    match name {
        "section" => {
            let tag = tag_for(block);
            block.set_property("tag", tag);
            block.set_property("label", accumulator.section_label());
            block
                .properties
                .entry("level".to_string())
                .or_insert_with(|| "1".to_string());
        }
        "chapter" => {
            let tag = tag_for(block);
            block.set_property("tag", tag);
            block.set_property("label", accumulator.chapter_counter.to_string());
            block.set_property("chapter-number", accumulator.chapter_counter.to_string());
        }
        "numbered" => {
            if let Some(item) = accumulator.numbered_item_dict.get(&block.meta.id) {
                block.set_property("item-number", item.index.to_string());
                if let Some(tag) = explicit_tag(block) {
                    block.set_property("tag", tag);
                    block.set_property("label", item.index.to_string());
                }
            }
        }
        other if accumulator.numbered_block_names.contains(other) => {
            // tag comes from the source label, computed before the label
            // property is overwritten with the display number
            let tag = tag_for(block);
            block.set_property("tag", tag);
            block.set_property(
                "label",
                accumulator.numbered_label(accumulator.block_counter),
            );
            expand_text_macros(accumulator, block);
        }
        _ => {}
    }
}

fn rewrite_verbatim(accumulator: &Accumulator, name: &str, block: &mut ExpressionBlock) {
    match name {
        "book" | "article" => {
            // key-value bodies merge into the block properties
            if let Body::Raw(text) = &block.body {
                let pairs: Vec<(String, String)> = text
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .filter(|(key, _)| !key.trim().is_empty())
                    .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                    .collect();
                for (key, value) in pairs {
                    block.set_property(&key, value);
                }
            }
        }
        "mathmacros" | "textmacros" | "settings" => {}
        _ => {
            match explicit_tag(block) {
                Some(tag) => {
                    let key = reduce_name(name);
                    let number = accumulator.counter_value(key);
                    block.set_property("tag", tag);
                    block.set_property("label", accumulator.numbered_label(number));
                    match key {
                        "equation" => block.set_property("equation-number", number.to_string()),
                        "figure" => block.set_property("figure", number.to_string()),
                        "listing" => block.set_property("listing", number.to_string()),
                        _ => {}
                    }
                }
                None => {
                    // numbered kinds still carry a label property, empty
                    // when nothing references them
                    if accumulator.numbered_block_names.contains(name) {
                        block.set_property("label", "");
                    }
                }
            }
        }
    }
}

/// Numbered ordinary blocks get their body traversed for text-macro
/// expansion; everything else keeps its body as parsed.
fn expand_text_macros(accumulator: &Accumulator, block: &mut ExpressionBlock) {
    if accumulator.text_macro_dict.is_empty() {
        return;
    }
    let body = std::mem::replace(&mut block.body, Body::Raw(String::new()));
    block.body = match body {
        Body::Parsed(expressions) => Body::Parsed(
            expressions
                .into_iter()
                .map(|expression| macros::text::expand(&accumulator.text_macro_dict, expression))
                .collect(),
        ),
        raw => raw,
    };
}
