//! Inline token definitions
//!
//! Tokens are produced per content line. Each token carries a [`TokenMeta`]
//! with inclusive character offsets into the line and its running token
//! index, which later becomes part of expression ids (`"e-<line>.<index>"`).

use serde::{Deserialize, Serialize};

/// Character offsets of a token within its source line.
///
/// `end` is inclusive: the token `"hello"` at the start of a line covers
/// `begin == 0, end == 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMeta {
    pub begin: usize,
    pub end: usize,
    pub index: usize,
}

/// One inline token.
///
/// `MathDelim` covers `$` as well as `\(` and `\)`, which both collapse to
/// the same delimiter kind. `Error` exists for completeness of the symbol
/// alphabet; the scanner itself is total and never emits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Str { content: String, meta: TokenMeta },
    Space { content: String, meta: TokenMeta },
    LeftBracket { meta: TokenMeta },
    RightBracket { meta: TokenMeta },
    MathDelim { meta: TokenMeta },
    CodeDelim { meta: TokenMeta },
    Error { message: String, meta: TokenMeta },
}

impl Token {
    pub fn meta(&self) -> &TokenMeta {
        match self {
            Token::Str { meta, .. }
            | Token::Space { meta, .. }
            | Token::LeftBracket { meta }
            | Token::RightBracket { meta }
            | Token::MathDelim { meta }
            | Token::CodeDelim { meta }
            | Token::Error { meta, .. } => meta,
        }
    }

    pub fn index(&self) -> usize {
        self.meta().index
    }

    /// The literal text this token stands for. Used when a math or code
    /// span swallows its interior verbatim.
    pub fn literal(&self) -> &str {
        match self {
            Token::Str { content, .. } | Token::Space { content, .. } => content,
            Token::LeftBracket { .. } => "[",
            Token::RightBracket { .. } => "]",
            Token::MathDelim { .. } => "$",
            Token::CodeDelim { .. } => "`",
            Token::Error { .. } => "",
        }
    }
}
