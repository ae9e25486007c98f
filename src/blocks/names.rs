//! Fixed block-name sets
//!
//! The verbatim set decides whether a `| name` header keeps its body raw;
//! the numbered set decides which ordinary blocks receive sequential
//! labels from the accumulator.

/// Spaces per list-nesting level.
pub const INDENTATION_QUANTUM: usize = 3;

/// Block kinds whose body is preserved verbatim, line by line.
pub const VERBATIM_BLOCK_NAMES: &[&str] = &[
    "math",
    "chem",
    "compute",
    "equation",
    "aligned",
    "array",
    "textarray",
    "table",
    "code",
    "verse",
    "verbatim",
    "load",
    "load-data",
    "load-files",
    "include",
    "hide",
    "texComment",
    "docinfo",
    "mathmacros",
    "textmacros",
    "csvtable",
    "chart",
    "svg",
    "quiver",
    "image",
    "tikz",
    "setup",
    "iframe",
    "settings",
    "book",
    "article",
];

/// Block kinds that get numbered labels from the accumulator.
pub const NUMBERED_BLOCK_NAMES: &[&str] = &[
    "q",
    "axiom",
    "box",
    "theorem",
    "definition",
    "lemma",
    "construction",
    "principle",
    "proposition",
    "corollary",
    "note",
    "remark",
    "exercise",
    "question",
    "problem",
    "example",
    "equation",
    "aligned",
    "quiver",
    "image",
    "iframe",
    "chart",
];

/// Document titles that suppress incrementing the document index.
pub const ITEMS_NOT_NUMBERED: &[&str] = &[
    "preface",
    "introduction",
    "appendix",
    "references",
    "index",
    "scratch",
];

/// Structural ordinary block names the block parser knows about, used to
/// tell a `| ` header continuation from the start of a new header.
const ORDINARY_BLOCK_NAMES: &[&str] = &[
    "section",
    "subsection",
    "title",
    "chapter",
    "document",
    "item",
    "numbered",
    "itemList",
    "numberedList",
    "list",
    "desc",
    "abstract",
    "a",
    "set-key",
    "setcounter",
    "shiftandsetcounter",
    "bibitem",
    "banner",
    "contents",
    "env",
    "comment",
    "collection",
    "ilist",
    "reflink",
    "visibleBanner",
];

pub fn is_verbatim_name(name: &str) -> bool {
    VERBATIM_BLOCK_NAMES.contains(&name)
}

pub fn is_numbered_name(name: &str) -> bool {
    NUMBERED_BLOCK_NAMES.contains(&name)
}

pub fn is_unnumbered_title(title: &str) -> bool {
    ITEMS_NOT_NUMBERED.contains(&title.to_lowercase().as_str())
}

/// Any name the block layer recognizes as a block kind.
pub fn is_known_block_name(name: &str) -> bool {
    is_verbatim_name(name) || is_numbered_name(name) || ORDINARY_BLOCK_NAMES.contains(&name)
}
