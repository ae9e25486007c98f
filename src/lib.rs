//! Scripta compiler front end
//!
//! This crate turns source text written in the Scripta markup language (a
//! pipe-prefixed block syntax mixed with `[name ...]` inline functions,
//! `$...$` math and `` `...` `` code spans) into a numbered, cross-referenced
//! forest of expression blocks ready for a downstream renderer.
//!
//! ## Pipeline
//!
//! Compilation is a straight line with no back edges:
//!
//! 1. [`line`] - classify raw lines (indent, position, line number)
//! 2. [`tokenizer`] - turn each content line into inline tokens
//! 3. [`blocks`] - the 5-state line machine producing primitive blocks
//! 4. [`forest`] - lift the flat block list to a forest using indentation
//! 5. [`pipeline`] - parse block bodies into expressions ([`parser`])
//! 6. [`accumulator`] - the paired fold that numbers, labels and
//!    cross-references every block
//!
//! [`compiler::compile`] composes the phases behind a single call:
//!
//! ```rust
//! use scripta::compiler::{compile, CompilerParameters};
//!
//! let output = compile(&CompilerParameters::default(), "This is [b bold]!");
//! assert_eq!(output.forest.len(), 1);
//! ```
//!
//! A compile is synchronous, single-threaded and total: malformed input is
//! recovered in-band (`errorHighlight` expressions plus block messages),
//! never surfaced as an error.

pub mod accumulator;
pub mod api;
pub mod ast;
pub mod blocks;
pub mod compiler;
pub mod forest;
pub mod line;
pub mod macros;
pub mod parser;
pub mod pipeline;
pub mod tokenizer;
pub mod tools;

pub use ast::{Body, Expression, ExpressionBlock, Heading, PrimitiveBlock};
pub use compiler::{compile, CompilerOutput, CompilerParameters, Filter};
pub use forest::Tree;
