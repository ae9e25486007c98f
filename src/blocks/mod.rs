//! Primitive block parsing
//!
//! Converts classified source lines into a flat sequence of primitive
//! blocks: header recognition and argument/property splitting live in
//! [`header`], the fixed name sets in [`names`], and the 5-state line
//! machine in [`primitive`].

pub mod header;
pub mod names;
pub mod primitive;

pub use names::{INDENTATION_QUANTUM, NUMBERED_BLOCK_NAMES, VERBATIM_BLOCK_NAMES};
pub use primitive::{parse_lines, parse_source, BlockParser};
