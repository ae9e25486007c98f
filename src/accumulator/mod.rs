//! The accumulating tree transform
//!
//! A depth-first, left-to-right fold over the expression forest. For each
//! block the fold first updates the accumulator (counters, references,
//! dictionaries; see [`update`]) and then rewrites the block using the new
//! state (labels, tags, equation numbers; see [`rewrite`]). The
//! accumulator is exclusively owned by the fold and surfaced as part of
//! the compile output. It never fails: malformed input defaults or is
//! skipped.

pub mod rewrite;
pub mod update;
pub mod vector;

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ast::ExpressionBlock;
use crate::blocks::names;
use crate::forest::Tree;
use crate::macros::{MathMacroDict, TextMacroDict};

pub use vector::IndexVector;

/// A cross-reference target: the block's DOM id plus the display number
/// `[ref tag]` resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: String,
    pub num_ref: String,
}

/// Where a term or footnote was seen: the owning id and the section label
/// current at that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermLocation {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InListState {
    InList,
    NotInList,
}

/// Position of a numbered list item: nesting level and index at that
/// level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberedItem {
    pub level: usize,
    pub index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accumulator {
    pub heading_index: IndexVector,
    pub document_index: IndexVector,
    pub counter: HashMap<String, i32>,
    pub block_counter: i32,
    pub chapter_counter: i32,
    pub delta_level: i32,
    pub max_level: usize,
    pub item_vector: IndexVector,
    pub in_list_state: InListState,
    pub numbered_item_dict: HashMap<String, NumberedItem>,
    pub numbered_block_names: HashSet<String>,
    pub reference: HashMap<String, ReferenceEntry>,
    pub terms: HashMap<String, TermLocation>,
    pub footnotes: HashMap<String, TermLocation>,
    pub footnote_numbers: HashMap<String, i32>,
    pub math_macro_dict: MathMacroDict,
    pub text_macro_dict: TextMacroDict,
    pub key_value_dict: HashMap<String, String>,
    pub q_and_a_list: Vec<(String, String)>,
    pub q_and_a_dict: HashMap<String, String>,
    pub bibliography: HashMap<String, Option<i32>>,
}

impl Accumulator {
    pub fn new(max_level: usize) -> Self {
        Self {
            heading_index: IndexVector::new(),
            document_index: IndexVector::new(),
            counter: HashMap::new(),
            block_counter: 0,
            chapter_counter: 0,
            delta_level: 0,
            max_level,
            item_vector: IndexVector::new(),
            in_list_state: InListState::NotInList,
            numbered_item_dict: HashMap::new(),
            numbered_block_names: names::NUMBERED_BLOCK_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            reference: HashMap::new(),
            terms: HashMap::new(),
            footnotes: HashMap::new(),
            footnote_numbers: HashMap::new(),
            math_macro_dict: MathMacroDict::new(),
            text_macro_dict: TextMacroDict::new(),
            key_value_dict: HashMap::new(),
            q_and_a_list: Vec::new(),
            q_and_a_dict: HashMap::new(),
            bibliography: HashMap::new(),
        }
    }

    pub fn get_reference(&self, tag: &str) -> Option<&ReferenceEntry> {
        self.reference.get(tag)
    }

    pub fn footnote_number(&self, id: &str) -> Option<i32> {
        self.footnote_numbers.get(id).copied()
    }

    pub fn bib_number(&self, key: &str) -> Option<i32> {
        self.bibliography.get(key).copied().flatten()
    }

    pub fn has_chapters(&self) -> bool {
        self.key_value_dict
            .get("has-chapters")
            .map(String::as_str)
            == Some("true")
    }

    pub fn counter_value(&self, key: &str) -> i32 {
        self.counter.get(key).copied().unwrap_or(0)
    }

    /// The current section number, chapter-prefixed when chapters exist:
    /// `"2.3"` or `"1.2.3"`.
    pub fn section_label(&self) -> String {
        join_label_parts(self.chapter_part(), self.heading_index.label())
    }

    /// A numbered-block label: `<chapter.>?<section.>?<counter>` where the
    /// section part is the heading index truncated at `max_level`.
    pub fn numbered_label(&self, counter: i32) -> String {
        let section = self.heading_index.truncate_to(self.max_level).label();
        join_label_parts(self.chapter_part(), join_label_parts(section, counter.to_string()))
    }

    fn chapter_part(&self) -> String {
        if self.chapter_counter > 0 {
            self.chapter_counter.to_string()
        } else {
            String::new()
        }
    }
}

fn join_label_parts(left: String, right: String) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right,
        (_, true) => left,
        (false, false) => format!("{left}.{right}"),
    }
}

/// Run the paired fold: thread the accumulator through the forest in
/// depth-first, left-to-right order, rewriting every block.
pub fn transform_accumulate(
    max_level: usize,
    forest: Vec<Tree<ExpressionBlock>>,
) -> (Accumulator, Vec<Tree<ExpressionBlock>>) {
    let mut accumulator = Accumulator::new(max_level);
    let forest = forest
        .into_iter()
        .map(|tree| transform_tree(&mut accumulator, tree))
        .collect();
    (accumulator, forest)
}

fn transform_tree(
    accumulator: &mut Accumulator,
    tree: Tree<ExpressionBlock>,
) -> Tree<ExpressionBlock> {
    update::update(accumulator, &tree.value);
    let value = rewrite::transform_block(accumulator, tree.value);
    let children = tree
        .children
        .into_iter()
        .map(|child| transform_tree(accumulator, child))
        .collect();
    Tree { value, children }
}

/// Slug of a block title: lowercased, spaces to dashes, stripped of
/// everything outside `[a-z0-9-_]`.
pub fn slug(text: &str) -> String {
    static NON_SLUG: OnceLock<Regex> = OnceLock::new();
    let pattern = NON_SLUG.get_or_init(|| {
        Regex::new(r"[^a-z0-9\-_]").expect("valid regex pattern")
    });
    let lowered = text.trim().to_lowercase().replace(' ', "-");
    pattern.replace_all(&lowered, "").to_string()
}

/// An explicitly written reference tag: the `tag` property once the
/// rewrite phase has run, otherwise the source `label` property. Empty
/// values count as absent.
pub fn explicit_tag(block: &ExpressionBlock) -> Option<String> {
    block
        .get_property("tag")
        .filter(|value| !value.is_empty())
        .or_else(|| block.get_property("label").filter(|value| !value.is_empty()))
        .map(str::to_string)
}

/// The reference tag of a block: an explicit tag when one was written in
/// the source, otherwise the slug of the first text line.
pub fn tag_for(block: &ExpressionBlock) -> String {
    match explicit_tag(block) {
        Some(tag) => tag,
        None => slug(&block.first_text_line()),
    }
}
