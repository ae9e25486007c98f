//! Text-macro dictionary and expander
//!
//! The expander contract is `expand(dict, expr) -> expr`. Expansion is
//! deliberately minimal: zero-argument aliases are rewritten, everything
//! else passes through untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ast::Expression;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMacro {
    pub name: String,
    pub body: String,
}

pub type TextMacroDict = HashMap<String, TextMacro>;

/// Build the dictionary from the raw body of a `textmacros` block.
/// Lines have the form `name: body`; malformed lines are skipped.
pub fn build_dictionary(source: &str) -> TextMacroDict {
    let mut dict = TextMacroDict::new();
    for line in source.lines() {
        let Some((name, body)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            continue;
        }
        dict.insert(
            name.to_string(),
            TextMacro {
                name: name.to_string(),
                body: body.trim().to_string(),
            },
        );
    }
    dict
}

/// Expand text macros in one expression. A `Fun` with no arguments whose
/// name is a dictionary entry becomes the entry's body; all other nodes
/// are returned unchanged apart from recursion into their children.
pub fn expand(dict: &TextMacroDict, expression: Expression) -> Expression {
    match expression {
        Expression::Fun { name, args, meta } if args.is_empty() => match dict.get(&name) {
            Some(entry) => Expression::Text {
                content: entry.body.clone(),
                meta,
            },
            None => Expression::Fun {
                name,
                args,
                meta,
            },
        },
        Expression::Fun { name, args, meta } => Expression::Fun {
            name,
            args: args.into_iter().map(|a| expand(dict, a)).collect(),
            meta,
        },
        Expression::List {
            indent,
            items,
            meta,
        } => Expression::List {
            indent,
            items: items.into_iter().map(|i| expand(dict, i)).collect(),
            meta,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expressions;

    #[test]
    fn zero_argument_alias_expands() {
        let dict = build_dictionary("club: Royal Club of Amsterdam");
        let parsed = parse_expressions("the [club] rules");
        let expanded: Vec<_> = parsed.into_iter().map(|e| expand(&dict, e)).collect();
        let texts: String = expanded.iter().map(|e| e.plain_text()).collect();
        assert_eq!(texts, "the Royal Club of Amsterdam rules");
    }

    #[test]
    fn unknown_names_are_identity() {
        let dict = TextMacroDict::new();
        let parsed = parse_expressions("[b bold]");
        let expanded: Vec<_> = parsed.clone().into_iter().map(|e| expand(&dict, e)).collect();
        assert_eq!(expanded, parsed);
    }
}
