//! Inline tokenizer
//!
//! Turns a single content line into an ordered stream of tokens: text runs,
//! whitespace runs, brackets, math and code delimiters. Bracket escaping is
//! not supported at this layer; mismatches are recovered by the expression
//! parser, never here.

pub mod lexer;
pub mod tokens;

pub use lexer::Lexer;
pub use tokens::{Token, TokenMeta};

/// Tokenize one line of Scripta source.
///
/// ```rust
/// use scripta::tokenizer::{tokenize, Token};
///
/// let tokens = tokenize("a [b c]");
/// assert!(matches!(tokens[0], Token::Str { .. }));
/// assert!(matches!(tokens[2], Token::LeftBracket { .. }));
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}
