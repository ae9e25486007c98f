//! Reducibility and delimiter matching
//!
//! Decides when the parser stack may collapse to an expression and where
//! the closing symbol for a stack head lies.

use crate::tokenizer::Token;

use super::symbol::Symbol;

/// True when the symbol list is a fully balanced expression of one of the
/// forms `[M ... M]`, `[C ... C]`, or `[L St ... R]`.
///
/// The bracket form requires the first interior symbol to be text (the
/// function name) and the head bracket to close exactly at the end.
pub fn is_reducible(symbols: &[Symbol]) -> bool {
    match symbols.first() {
        Some(Symbol::M) => symbols.len() >= 2 && symbols.last() == Some(&Symbol::M),
        Some(Symbol::C) => symbols.len() >= 2 && symbols.last() == Some(&Symbol::C),
        Some(Symbol::L) => {
            symbols.len() >= 3
                && symbols.get(1) == Some(&Symbol::St)
                && match_symbols(symbols) == Some(symbols.len() - 1)
        }
        _ => false,
    }
}

/// Offset of the symbol matching the head, or `None`.
///
/// For `L` this is classic balanced-bracket matching over the `L`/`R`
/// weights; the search aborts with `None` if the running count ever goes
/// negative. For `M` and `C` it is the first later occurrence of the same
/// kind.
pub fn match_symbols(symbols: &[Symbol]) -> Option<usize> {
    match symbols.first()? {
        Symbol::L => {
            let mut sum = 0;
            for (offset, symbol) in symbols.iter().enumerate() {
                sum += symbol.value();
                if sum == 0 && *symbol == Symbol::R {
                    return Some(offset);
                }
                if sum < 0 {
                    return None;
                }
            }
            None
        }
        Symbol::M => symbols[1..]
            .iter()
            .position(|s| *s == Symbol::M)
            .map(|offset| offset + 1),
        Symbol::C => symbols[1..]
            .iter()
            .position(|s| *s == Symbol::C)
            .map(|offset| offset + 1),
        _ => None,
    }
}

/// Split a token list at offset `k`: the first `k` tokens and the rest.
pub fn split_at(k: usize, tokens: &[Token]) -> (&[Token], &[Token]) {
    let k = k.min(tokens.len());
    tokens.split_at(k)
}

/// The segment of tokens from the head through its matching close,
/// inclusive, together with the remainder.
pub fn get_segment<'a>(symbols: &[Symbol], tokens: &'a [Token]) -> Option<(&'a [Token], &'a [Token])> {
    let close = match_symbols(symbols)?;
    Some(split_at(close + 1, tokens))
}
