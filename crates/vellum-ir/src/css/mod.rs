//! Cascading stylesheet application and per-node style resolution.
//!
//! Declaration merging is deliberately last-write-wins in stylesheet
//! application order (built-in sheets, caller-supplied global CSS, document
//! `<style>` blocks, inline `style` attribute) rather than specificity-ordered.

mod defaults;
mod diagnostics;
mod parser;
mod resolve;
mod stylesheet;

pub use defaults::{BASELINE_SHEET, LEGACY_COMPAT_SHEET};
pub use parser::{CssRule, Declaration, parse_inline_declarations, parse_rules};
pub use resolve::{INHERITED_PROPERTIES, ResolvedStyle, is_inherited_property};
pub use stylesheet::StyleEngine;

pub(crate) use diagnostics::diagnostics_enabled;
