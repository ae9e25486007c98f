//! Update phase
//!
//! The first half of the paired fold: dispatch on the block kind and
//! update counters, reference tables and dictionaries. The state observed
//! by the rewrite phase is always the state *after* this update.

use tracing::{debug, trace};

use crate::ast::{Body, Expression, ExpressionBlock, Heading};
use crate::blocks::names;
use crate::macros;

use super::{tag_for, Accumulator, IndexVector, InListState, NumberedItem, ReferenceEntry, TermLocation};

/// Collapse related block kinds onto one counter: equations share one,
/// code listings another, and the figure-like media a third.
pub fn reduce_name(name: &str) -> &str {
    match name {
        "equation" | "aligned" => "equation",
        "code" => "listing",
        "quiver" | "image" | "iframe" | "chart" | "table" | "csvtable" | "svg" | "tikz" => {
            "figure"
        }
        other => other,
    }
}

pub(crate) fn update(accumulator: &mut Accumulator, block: &ExpressionBlock) {
    match &block.heading {
        Heading::Paragraph => update_with_paragraph(accumulator, block),
        Heading::Ordinary { name } => update_with_ordinary(accumulator, name, block),
        Heading::Verbatim { name } => update_with_verbatim(accumulator, name, block),
    }
}

fn update_with_ordinary(accumulator: &mut Accumulator, name: &str, block: &ExpressionBlock) {
    match name {
        "title" => {
            if accumulator.delta_level != 1 {
                accumulator.heading_index.reset();
            }
            if let Some(first) = block
                .get_property("first-section")
                .and_then(|value| value.parse::<i32>().ok())
            {
                // seed so the next level-1 section comes out as `first`
                accumulator.heading_index = IndexVector::from_first(first - 1);
            }
            if let Some(value) = block.get_property("number-to-level") {
                accumulator
                    .key_value_dict
                    .insert("number-to-level".to_string(), value.to_string());
            }
        }
        "setcounter" => {
            accumulator.heading_index = IndexVector::from_first(single_integer(block));
        }
        "shiftandsetcounter" => {
            accumulator.heading_index = IndexVector::from_first(single_integer(block));
            accumulator.delta_level = 1;
        }
        "chapter" => {
            accumulator.chapter_counter += 1;
            accumulator.heading_index.reset();
            accumulator.counter.insert("equation".to_string(), 0);
            accumulator.block_counter = 0;
            accumulator
                .key_value_dict
                .insert("has-chapters".to_string(), "true".to_string());
            let num_ref = accumulator.chapter_counter.to_string();
            register(accumulator, tag_for(block), block, num_ref);
        }
        "section" => {
            let effective = effective_level(accumulator, block);
            accumulator.heading_index.increment(effective);
            if effective <= accumulator.max_level {
                accumulator.block_counter = 0;
                accumulator.counter.insert("equation".to_string(), 0);
            }
            let num_ref = accumulator.section_label();
            trace!(section = %num_ref, level = effective, "section incremented");
            register(accumulator, tag_for(block), block, num_ref);
        }
        "document" => {
            let title = block.first_text_line();
            if !names::is_unnumbered_title(&title) {
                let level = block
                    .get_property("level")
                    .and_then(|value| value.parse::<usize>().ok())
                    .unwrap_or(1);
                accumulator.document_index.increment(level);
            }
        }
        "q" => {
            accumulator.block_counter += 1;
            accumulator.q_and_a_list = vec![(block.meta.id.clone(), "??".to_string())];
            let num_ref = accumulator.numbered_label(accumulator.block_counter);
            register(accumulator, tag_for(block), block, num_ref);
        }
        "a" => {
            if let Some((q_id, _)) = accumulator.q_and_a_list.first().cloned() {
                accumulator.q_and_a_dict.insert(q_id, block.meta.id.clone());
            }
            accumulator.q_and_a_list.clear();
        }
        "set-key" => {
            if block.args.len() >= 2 {
                accumulator
                    .key_value_dict
                    .insert(block.args[0].clone(), block.args[1..].join(" "));
            }
        }
        "list" => accumulator.item_vector.reset(),
        "bibitem" => {
            if let Some(key) = block.args.first() {
                let number = match accumulator.bibliography.get(key) {
                    // a later bibitem with the same key takes over the number
                    Some(Some(existing)) => *existing,
                    _ => {
                        accumulator
                            .bibliography
                            .values()
                            .filter(|entry| entry.is_some())
                            .count() as i32
                            + 1
                    }
                };
                accumulator.bibliography.insert(key.clone(), Some(number));
                accumulator.reference.insert(
                    key.clone(),
                    ReferenceEntry {
                        id: block.meta.id.clone(),
                        num_ref: number.to_string(),
                    },
                );
            }
        }
        "numbered" => {
            let level = block.indent / names::INDENTATION_QUANTUM;
            accumulator.item_vector.increment(level + 1);
            accumulator.in_list_state = InListState::InList;
            let index = accumulator.item_vector.get(level + 1);
            accumulator
                .numbered_item_dict
                .insert(block.meta.id.clone(), NumberedItem { level, index });
            if let Some(tag) = super::explicit_tag(block) {
                let num_ref = accumulator.item_vector.truncate_to(level + 1).label();
                register(accumulator, tag, block, num_ref);
            }
        }
        "item" => {
            accumulator.in_list_state = match accumulator.in_list_state {
                InListState::InList => InListState::NotInList,
                InListState::NotInList => InListState::InList,
            };
        }
        "itemList" | "numberedList" => {
            accumulator.in_list_state = InListState::InList;
        }
        other if accumulator.numbered_block_names.contains(other) => {
            accumulator.block_counter += 1;
            let num_ref = accumulator.numbered_label(accumulator.block_counter);
            register(accumulator, tag_for(block), block, num_ref);
        }
        _ => {}
    }
}

fn update_with_verbatim(accumulator: &mut Accumulator, name: &str, block: &ExpressionBlock) {
    match name {
        "mathmacros" => {
            if let Body::Raw(text) = &block.body {
                accumulator
                    .math_macro_dict
                    .extend(macros::math::build_dictionary(text));
            }
        }
        "textmacros" => {
            if let Body::Raw(text) = &block.body {
                accumulator
                    .text_macro_dict
                    .extend(macros::text::build_dictionary(text));
            }
        }
        "settings" => {
            accumulator.key_value_dict.extend(
                block
                    .properties
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
        "book" | "article" => {
            if let Body::Raw(text) = &block.body {
                for line in text.lines() {
                    if let Some((key, value)) = line.split_once(':') {
                        let key = key.trim();
                        if !key.is_empty() {
                            accumulator
                                .key_value_dict
                                .insert(key.to_string(), value.trim().to_string());
                        }
                    }
                }
            }
        }
        _ => {
            if let Some(tag) = super::explicit_tag(block) {
                let key = reduce_name(name).to_string();
                let next = accumulator.counter_value(&key) + 1;
                accumulator.counter.insert(key, next);
                let num_ref = accumulator.numbered_label(next);
                register(accumulator, tag, block, num_ref);
            }
        }
    }
}

fn update_with_paragraph(accumulator: &mut Accumulator, block: &ExpressionBlock) {
    accumulator.in_list_state = InListState::NotInList;
    let section_label = accumulator.section_label();
    scan_expressions(
        accumulator,
        block.body.expressions(),
        &block.meta.id,
        &section_label,
    );
}

/// Collect `term`/`term_`, `cite` and `footnote` expressions from a
/// paragraph body, recursing into arguments and list items.
fn scan_expressions(
    accumulator: &mut Accumulator,
    expressions: &[Expression],
    block_id: &str,
    section_label: &str,
) {
    for expression in expressions {
        match expression {
            Expression::Fun { name, args, meta } => {
                match name.as_str() {
                    "term" | "term_" => {
                        let text = args_text(args);
                        if !text.is_empty() {
                            accumulator.terms.insert(
                                text,
                                TermLocation {
                                    id: block_id.to_string(),
                                    label: section_label.to_string(),
                                },
                            );
                        }
                    }
                    "cite" => {
                        let key = args_text(args);
                        let key = key.split_whitespace().next().unwrap_or("").to_string();
                        if !key.is_empty() {
                            accumulator.bibliography.entry(key).or_insert(None);
                        }
                    }
                    "footnote" => {
                        let text = args_text(args);
                        let number = accumulator.footnote_numbers.len() as i32 + 1;
                        accumulator.footnote_numbers.insert(meta.id.clone(), number);
                        accumulator.footnotes.insert(
                            text,
                            TermLocation {
                                id: meta.id.clone(),
                                label: number.to_string(),
                            },
                        );
                    }
                    _ => {}
                }
                scan_expressions(accumulator, args, block_id, section_label);
            }
            Expression::List { items, .. } => {
                scan_expressions(accumulator, items, block_id, section_label);
            }
            _ => {}
        }
    }
}

fn args_text(args: &[Expression]) -> String {
    args.iter()
        .map(|arg| arg.plain_text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Section level from the `level` property, shifted by `deltaLevel` and
/// pushed one deeper when the document has chapters.
pub(crate) fn effective_level(accumulator: &Accumulator, block: &ExpressionBlock) -> usize {
    let level: i32 = block
        .get_property("level")
        .and_then(|value| value.parse().ok())
        .unwrap_or(1);
    let bias = if accumulator.has_chapters() { 1 } else { 0 };
    (level + accumulator.delta_level + bias).max(1) as usize
}

/// Single integer literal expected; anything else falls back to 1.
fn single_integer(block: &ExpressionBlock) -> i32 {
    match &block.body {
        Body::Parsed(expressions) if expressions.len() == 1 => expressions[0]
            .text_content()
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(1),
        _ => 1,
    }
}

fn register(accumulator: &mut Accumulator, tag: String, block: &ExpressionBlock, num_ref: String) {
    if tag.is_empty() {
        return;
    }
    debug!(tag = %tag, num_ref = %num_ref, "reference registered");
    accumulator.reference.insert(
        tag,
        ReferenceEntry {
            id: block.meta.id.clone(),
            num_ref,
        },
    );
}
