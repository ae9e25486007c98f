//! Primitive block parser tests
//!
//! The 5-state line machine: headers, paragraphs, verbatim bodies, list
//! coalescing, extended headers and block metadata.

use rstest::rstest;
use scripta::ast::Heading;
use scripta::blocks::parse_source;

// =============================================================================
// Opening headers
// =============================================================================

#[rstest]
#[case("| equation\nx\n", Heading::Verbatim { name: "equation".into() })]
#[case("|| anything\nx\n", Heading::Verbatim { name: "anything".into() })]
#[case("| theorem\nx\n", Heading::Ordinary { name: "theorem".into() })]
#[case("```\nx\n", Heading::Verbatim { name: "code".into() })]
#[case("$$\nx\n", Heading::Verbatim { name: "math".into() })]
#[case("just text\n", Heading::Paragraph)]
fn header_prefixes_pick_the_heading(#[case] source: &str, #[case] expected: Heading) {
    let blocks = parse_source(source);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].heading, expected);
}

#[rstest]
#[case("# Intro\n", "1")]
#[case("## Depths\n", "2")]
#[case("### Crevices\n", "3")]
fn markdown_sections_carry_their_level(#[case] source: &str, #[case] level: &str) {
    let blocks = parse_source(source);
    assert_eq!(
        blocks[0].heading,
        Heading::Ordinary {
            name: "section".into()
        }
    );
    assert_eq!(blocks[0].properties.get("level").map(String::as_str), Some(level));
}

#[test]
fn section_keyword_takes_level_argument() {
    let blocks = parse_source("| section 2\nDeeper\n");
    assert_eq!(blocks[0].args, vec!["2"]);
    assert_eq!(blocks[0].properties.get("level").map(String::as_str), Some("2"));
}

#[test]
fn header_args_and_properties_are_disjoint() {
    let blocks = parse_source("| image width:400 caption:A small bird fig1\nurl\n");
    let block = &blocks[0];
    assert!(block.args.is_empty());
    assert_eq!(block.properties.get("width").map(String::as_str), Some("400"));
    // bare tokens after a property attach to it
    assert_eq!(
        block.properties.get("caption").map(String::as_str),
        Some("A small bird fig1")
    );
}

// =============================================================================
// Bodies, termination, metadata
// =============================================================================

#[test]
fn verbatim_block_keeps_body_lines() {
    let blocks = parse_source("| equation\na^2 + b^2 = c^2\n");
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].heading.is_verbatim());
    assert_eq!(blocks[0].body, vec!["a^2 + b^2 = c^2"]);
    assert_eq!(blocks[0].meta.number_of_lines, 2);
}

#[test]
fn verbatim_body_strips_the_header_indent() {
    let blocks = parse_source("  | code\n  let x = 1\n    nested\n");
    assert_eq!(blocks[0].indent, 2);
    assert_eq!(blocks[0].body, vec!["let x = 1", "  nested"]);
}

#[test]
fn blank_with_spaces_terminates_a_block() {
    let blocks = parse_source("one\n   \ntwo\n");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].first_line, "one");
    assert_eq!(blocks[1].first_line, "two");
}

#[test]
fn source_text_equals_the_consumed_lines() {
    let source = "| theorem\n| title:Euclid\nThere are many primes\n";
    let blocks = parse_source(source);
    assert_eq!(
        blocks[0].meta.source_text,
        "| theorem\n| title:Euclid\nThere are many primes"
    );
}

#[test]
fn four_block_fixture_has_stable_ids_and_line_counts() {
    let source = "Pythagoras said:\nlet us consider\n\n| equation\na^2+b^2=c^2\n\n| Theorem\nThere are infinitely many primes\n\n$$\nint_0^1 x^n dx\n";
    let blocks = parse_source(source);
    let headings: Vec<_> = blocks.iter().map(|b| b.heading.clone()).collect();
    assert_eq!(
        headings,
        vec![
            Heading::Paragraph,
            Heading::Verbatim {
                name: "equation".into()
            },
            Heading::Ordinary {
                name: "Theorem".into()
            },
            Heading::Verbatim {
                name: "math".into()
            },
        ]
    );
    let ids: Vec<_> = blocks.iter().map(|b| b.meta.id.as_str()).collect();
    assert_eq!(ids, vec!["1-0", "4-1", "7-2", "10-3"]);
    let line_counts: Vec<_> = blocks.iter().map(|b| b.meta.number_of_lines).collect();
    assert_eq!(line_counts, vec![2, 2, 2, 2]);
}

// =============================================================================
// Extended headers
// =============================================================================

#[test]
fn continuation_lines_merge_into_the_header() {
    let blocks = parse_source("| theorem\n| title:Pythagorean\na^2+b^2=c^2\n");
    let block = &blocks[0];
    assert_eq!(
        block.heading,
        Heading::Ordinary {
            name: "theorem".into()
        }
    );
    assert_eq!(
        block.properties.get("title").map(String::as_str),
        Some("Pythagorean")
    );
    assert_eq!(block.body, vec!["a^2+b^2=c^2"]);
    assert_eq!(block.meta.number_of_lines, 3);
    assert_eq!(block.meta.body_line_number, Some(3));
}

#[test]
fn continuation_keys_win_on_conflict() {
    let blocks = parse_source("| image width:300\n| width:500\nurl\n");
    assert_eq!(blocks[0].properties.get("width").map(String::as_str), Some("500"));
}

#[test]
fn known_block_name_ends_the_header() {
    let blocks = parse_source("| theorem\n| note this is body\n");
    // "note" is a known block name, so the line is body, not header
    assert_eq!(blocks[0].body, vec!["| note this is body"]);
    assert!(blocks[0].properties.is_empty());
}

// =============================================================================
// List coalescing
// =============================================================================

#[test]
fn two_items_coalesce_into_one_item_list() {
    let blocks = parse_source("- milk\n- eggs\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].heading,
        Heading::Ordinary {
            name: "itemList".into()
        }
    );
    assert_eq!(blocks[0].first_line, "- milk");
    assert_eq!(blocks[0].body, vec!["- eggs"]);
}

#[test]
fn a_single_item_stays_an_item() {
    let blocks = parse_source("- milk\n");
    assert_eq!(
        blocks[0].heading,
        Heading::Ordinary {
            name: "item".into()
        }
    );
}

#[test]
fn numbered_items_coalesce_symmetrically() {
    let blocks = parse_source(". first\n. second\n. third\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].heading,
        Heading::Ordinary {
            name: "numberedList".into()
        }
    );
    assert_eq!(blocks[0].body.len(), 2);
}

#[test]
fn non_item_lines_join_the_previous_entry() {
    let blocks = parse_source("- milk\n- eggs from\n  the farm\n");
    assert_eq!(blocks[0].body, vec!["- eggs from the farm"]);
}

#[test]
fn nested_entries_keep_their_relative_indent() {
    let blocks = parse_source("- top\n   - nested\n");
    assert_eq!(blocks[0].body, vec!["   - nested"]);
}
