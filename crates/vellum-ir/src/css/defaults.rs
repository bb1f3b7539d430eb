//! Built-in stylesheets.
//!
//! Both sheets are applied by [`super::StyleEngine::apply_defaults`] before
//! any caller or document CSS, in the order below. They are plain constants
//! handed to the engine rather than process-global state, so every render
//! pass sees the same deterministic inputs.

/// Baseline typographic defaults: heading scale, semantic tag styling and
/// the vertical margins that become cursor moves after block containers.
pub const BASELINE_SHEET: &str = "\
    p { margin: 1em 0 }\n\
    h1 { font-size: 2em; font-weight: bold; margin: 0.67em 0 }\n\
    h2 { font-size: 1.5em; font-weight: bold; margin: 0.83em 0 }\n\
    h3 { font-size: 1.17em; font-weight: bold; margin: 1em 0 }\n\
    h4 { font-weight: bold; margin: 1.33em 0 }\n\
    h5 { font-size: 0.83em; font-weight: bold; margin: 1.67em 0 }\n\
    h6 { font-size: 0.67em; font-weight: bold; margin: 2.33em 0 }\n\
    b, strong { font-weight: bold }\n\
    i, em, cite, dfn, var, address { font-style: italic }\n\
    u, ins { text-decoration: underline }\n\
    s, del, strike { text-decoration: line-through }\n\
    a { text-decoration: underline }\n\
    pre, code, kbd, samp, tt { font-family: Courier }\n\
    blockquote { margin: 1em 40px }\n\
    ul, ol, dl { margin: 1em 0 }\n\
    small { font-size: smaller }\n\
    big { font-size: larger }\n";

/// Legacy-engine compatibility sheet: block/inline display hints for elements
/// the continuation logic must treat as line-breaking containers.
pub const LEGACY_COMPAT_SHEET: &str = "\
    html, body, div, p, h1, h2, h3, h4, h5, h6, ul, ol, dl, dt, dd, blockquote, \
    pre, address, hr, form, fieldset, header, footer, section, article, aside, \
    nav, main, figure, figcaption { display: block }\n\
    li { display: list-item }\n\
    center { display: block; text-align: center }\n";
