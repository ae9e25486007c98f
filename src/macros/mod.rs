//! Macro dictionaries
//!
//! `mathmacros` and `textmacros` blocks feed two dictionaries carried by
//! the accumulator. Macros defined later in the document are not visible
//! to earlier blocks; the fold only sees what it has already passed.

pub mod math;
pub mod text;

pub use math::{build_dictionary as build_math_dictionary, MathMacro, MathMacroDict};
pub use text::{build_dictionary as build_text_dictionary, expand, TextMacro, TextMacroDict};
