//! Inline expression parsing
//!
//! Three layers: token-to-symbol projection ([`symbol`]), balance and
//! matching primitives over symbol lists ([`matcher`]), and the
//! error-recovering shift-reduce machine itself ([`expr`]).

pub mod expr;
pub mod matcher;
pub mod symbol;

pub use expr::{parse, parse_expressions, ExprParser};
pub use matcher::{is_reducible, match_symbols};
pub use symbol::{to_symbol, to_symbols, Symbol};
