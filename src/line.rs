//! Line classification
//!
//! The first phase of the pipeline attaches indentation, byte position and
//! a 1-indexed line number to every raw source line. Everything downstream
//! (block opening, forest construction, id assignment) works on [`Line`]
//! records instead of bare strings.

use serde::{Deserialize, Serialize};

/// A classified source line.
///
/// `content` is the full original line with the trailing newline already
/// stripped by the caller. `indent` counts leading ASCII spaces only; tabs
/// are not expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub indent: usize,
    pub prefix: String,
    pub content: String,
    pub line_number: usize,
    pub position: usize,
}

impl Line {
    /// True for a fully empty line (no indent, no content).
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True for a line made of spaces only. Such lines carry no content
    /// and terminate the current block just like empty lines do.
    pub fn is_blank(&self) -> bool {
        !self.content.is_empty() && self.content.trim().is_empty()
    }

    /// The line content with its leading indent removed.
    pub fn body(&self) -> &str {
        &self.content[self.indent..]
    }
}

/// Classify a single line at the given running position.
pub fn classify(content: &str, position: usize, line_number: usize) -> Line {
    let indent = content.chars().take_while(|&c| c == ' ').count();
    Line {
        indent,
        prefix: content[..indent].to_string(),
        content: content.to_string(),
        line_number,
        position,
    }
}

/// Split a source string into classified lines.
///
/// Positions are byte offsets of each line start; line numbers start at 1.
pub fn classify_lines(source: &str) -> Vec<Line> {
    let mut position = 0;
    source
        .lines()
        .enumerate()
        .map(|(i, raw)| {
            let line = classify(raw, position, i + 1);
            position += raw.len() + 1;
            line
        })
        .collect()
}
