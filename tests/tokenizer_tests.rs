//! Tokenizer tests using rstest
//!
//! Covers token kinds, inclusive offsets, indices, and the round-trip
//! property: re-running the tokenizer on its own emitted text payloads is
//! the identity.

use rstest::rstest;
use scripta::tokenizer::{tokenize, Token};

// =============================================================================
// Token kinds and offsets
// =============================================================================

#[rstest]
#[case("hello", 0, 4)]
#[case("a", 0, 0)]
#[case("longer-word_9", 0, 12)]
fn text_run_offsets_are_inclusive(#[case] input: &str, #[case] begin: usize, #[case] end: usize) {
    let tokens = tokenize(input);
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::Str { content, meta } => {
            assert_eq!(content, input);
            assert_eq!((meta.begin, meta.end, meta.index), (begin, end, 0));
        }
        other => panic!("expected Str, got {other:?}"),
    }
}

#[test]
fn delimiters_and_indices() {
    let tokens = tokenize("[b x] $m$ `c`");
    assert!(matches!(tokens[0], Token::LeftBracket { .. }));
    assert!(matches!(tokens[4], Token::RightBracket { .. }));
    assert!(matches!(tokens[6], Token::MathDelim { .. }));
    assert!(matches!(tokens[10], Token::CodeDelim { .. }));
    for (position, token) in tokens.iter().enumerate() {
        assert_eq!(token.index(), position);
    }
}

#[rstest]
#[case(r"\(x\)")]
#[case("$x$")]
fn math_delimiters_collapse(#[case] input: &str) {
    let tokens = tokenize(input);
    assert_eq!(tokens.len(), 3);
    assert!(matches!(tokens[0], Token::MathDelim { .. }));
    assert!(matches!(tokens[1], Token::Str { .. }));
    assert!(matches!(tokens[2], Token::MathDelim { .. }));
}

#[test]
fn spaces_are_their_own_tokens() {
    let tokens = tokenize("a  b");
    assert_eq!(tokens.len(), 3);
    match &tokens[1] {
        Token::Space { content, .. } => assert_eq!(content, "  "),
        other => panic!("expected Space, got {other:?}"),
    }
}

// =============================================================================
// Totality and round-trip
// =============================================================================

#[rstest]
#[case("")]
#[case("[[[")]
#[case("]]]")]
#[case("$`[")]
#[case("héllo wörld")]
fn tokenizer_never_fails(#[case] input: &str) {
    let _ = tokenize(input);
}

#[rstest]
#[case("some plain words here")]
#[case("a [b c] d $e$")]
fn literals_reconstruct_the_input(#[case] input: &str) {
    let tokens = tokenize(input);
    let rebuilt: String = tokens.iter().map(Token::literal).collect();
    assert_eq!(rebuilt, input);
}

#[test]
fn retokenizing_text_payloads_is_identity() {
    let tokens = tokenize("alpha beta [gamma] delta");
    for token in tokens {
        if let Token::Str { content, .. } = token {
            let again = tokenize(&content);
            assert_eq!(again.len(), 1);
            match &again[0] {
                Token::Str {
                    content: roundtrip, ..
                } => assert_eq!(roundtrip, &content),
                other => panic!("expected Str, got {other:?}"),
            }
        }
    }
}
