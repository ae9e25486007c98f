//! Block header recognition
//!
//! Recognizes the header form of an opening line and splits the remainder
//! into positional arguments and `key:value` properties. Also decides
//! whether a `| ` line inside a headed block continues the header.

use std::collections::HashMap;

use super::names;

/// The recognized form of a block-opening line (indent already stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    Verbatim { name: String, rest: String },
    Ordinary { name: String, rest: String },
    Section { level: usize, title: String },
    Item,
    Numbered,
    Paragraph,
}

pub fn recognize(content: &str) -> Header {
    if let Some(rest) = content.strip_prefix("||") {
        let (name, rest) = first_token(rest);
        return Header::Verbatim { name, rest };
    }
    if let Some(rest) = content.strip_prefix("| ") {
        let (name, rest) = first_token(rest);
        if names::is_verbatim_name(&name) {
            return Header::Verbatim { name, rest };
        }
        return Header::Ordinary { name, rest };
    }
    if let Some(rest) = content.strip_prefix("```") {
        return Header::Verbatim {
            name: "code".to_string(),
            rest: rest.trim().to_string(),
        };
    }
    if let Some(rest) = content.strip_prefix("$$") {
        return Header::Verbatim {
            name: "math".to_string(),
            rest: rest.trim().to_string(),
        };
    }
    for (marker, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(title) = content.strip_prefix(marker) {
            return Header::Section {
                level,
                title: title.trim().to_string(),
            };
        }
    }
    if content.starts_with("- ") || content == "-" {
        return Header::Item;
    }
    if content.starts_with(". ") || content == "." {
        return Header::Numbered;
    }
    Header::Paragraph
}

fn first_token(rest: &str) -> (String, String) {
    let rest = rest.trim_start();
    match rest.split_once(char::is_whitespace) {
        Some((name, tail)) => (name.to_string(), tail.trim_start().to_string()),
        None => (rest.to_string(), String::new()),
    }
}

/// Split the text after a header keyword into positional args and
/// properties. A `key:value` token opens a property; bare tokens that
/// follow a property attach to it, joined by spaces.
pub fn parse_args_and_properties(rest: &str) -> (Vec<String>, HashMap<String, String>) {
    let mut args = Vec::new();
    let mut properties: HashMap<String, String> = HashMap::new();
    let mut last_key: Option<String> = None;
    for token in rest.split_whitespace() {
        match token.split_once(':') {
            Some((key, value)) if !key.is_empty() => {
                properties.insert(key.to_string(), value.to_string());
                last_key = Some(key.to_string());
            }
            _ => match &last_key {
                Some(key) => {
                    let entry = properties.entry(key.clone()).or_default();
                    if entry.is_empty() {
                        entry.push_str(token);
                    } else {
                        entry.push(' ');
                        entry.push_str(token);
                    }
                }
                None => args.push(token.to_string()),
            },
        }
    }
    (args, properties)
}

/// Header-continuation test for a line inside an `Ordinary`/`Verbatim`
/// header. A `| ` line continues the header iff its first token contains
/// a colon or is not a known block name. Returns the continuation's
/// argument text.
pub fn continuation(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("| ")?;
    let rest = rest.trim_start();
    match rest.split_whitespace().next() {
        None => Some(rest),
        Some(token) => {
            if token.contains(':') || !names::is_known_block_name(token) {
                Some(rest)
            } else {
                None
            }
        }
    }
}

/// Strip a list-item marker (`- ` or `. `) from an entry.
pub fn strip_list_marker(entry: &str) -> &str {
    if let Some(rest) = entry.strip_prefix("- ") {
        return rest;
    }
    if let Some(rest) = entry.strip_prefix(". ") {
        return rest;
    }
    match entry {
        "-" | "." => "",
        other => other,
    }
}

/// True when a (trimmed) line is itself a list entry.
pub fn is_list_entry(content: &str) -> bool {
    matches!(recognize(content), Header::Item | Header::Numbered)
}
