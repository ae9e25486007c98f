//! Math-macro dictionary builder
//!
//! Parses the body of a `mathmacros` block into an expansion dictionary.
//! Two line forms are accepted: LaTeX-style
//! `\newcommand{\name}[arity]{body}` (arity optional) and the bare
//! `name: body` shorthand. Malformed lines are skipped line by line.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathMacro {
    pub name: String,
    pub arity: usize,
    pub body: String,
}

pub type MathMacroDict = HashMap<String, MathMacro>;

fn newcommand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\\newcommand\{\\([a-zA-Z]+)\}(?:\[(\d+)\])?\{(.*)\}$")
            .expect("valid regex pattern")
    })
}

/// Build the dictionary from the raw body of a `mathmacros` block.
pub fn build_dictionary(source: &str) -> MathMacroDict {
    let mut dict = MathMacroDict::new();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(entry) = parse_line(line) {
            dict.insert(entry.name.clone(), entry);
        }
    }
    dict
}

fn parse_line(line: &str) -> Option<MathMacro> {
    if let Some(captures) = newcommand_pattern().captures(line) {
        let name = captures.get(1)?.as_str().to_string();
        let arity = captures
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let body = captures.get(3)?.as_str().to_string();
        return Some(MathMacro { name, arity, body });
    }
    // bare "name: body" shorthand
    let (name, body) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(MathMacro {
        name: name.to_string(),
        arity: 0,
        body: body.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_newcommand_lines() {
        let dict = build_dictionary("\\newcommand{\\nat}{\\mathbb{N}}");
        let entry = dict.get("nat").expect("nat should be defined");
        assert_eq!(entry.arity, 0);
        assert_eq!(entry.body, "\\mathbb{N}");
    }

    #[test]
    fn parses_arity() {
        let dict = build_dictionary("\\newcommand{\\pair}[2]{(#1, #2)}");
        assert_eq!(dict.get("pair").map(|m| m.arity), Some(2));
    }

    #[test]
    fn parses_bare_shorthand_and_skips_garbage() {
        let dict = build_dictionary("alpha: \\alpha\n=== not a macro ===\n");
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("alpha").map(|m| m.body.as_str()), Some("\\alpha"));
    }
}
