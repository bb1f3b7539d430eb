//! Intermediate representation pipeline for Vellum documents.
//!
//! The pipeline turns a restricted subset of HTML+CSS into an ordered stream
//! of styled text-run instructions for a page/PDF backend:
//!
//! 1. [`HtmlDocument::parse`] builds the tree and drops non-renderable
//!    elements.
//! 2. [`css::StyleEngine`] applies the built-in stylesheets, any caller-supplied
//!    global CSS and the document's own `<style>` blocks onto matched nodes,
//!    then resolves per-node styles through a restricted inheritance model.
//! 3. [`render::emit`] walks the tree in document order and drives a
//!    [`PageRenderer`] with font, color, text, break and cursor-move calls.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod css;
pub mod font;
pub mod html;
pub mod render;

pub use font::{FontDescriptor, FontFamily, FontTable};
pub use html::HtmlDocument;
pub use render::{PageRenderer, RecordingRenderer, RenderInstruction, TextOptions};

/// Default text colors for runs without an explicit `color` style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    /// Color for ordinary text.
    pub base: String,
    /// Color for text inside a link.
    pub link: String,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            base: "black".to_string(),
            link: "blue".to_string(),
        }
    }
}

/// Caller configuration for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Extra global CSS applied after the built-in sheets but before the
    /// document's own `<style>` blocks.
    pub style: Option<String>,
    /// Default text colors.
    pub colors: ColorOptions,
    /// Root font size in points. Also the fallback for unrecognized
    /// `font-size` values.
    pub base_size: f32,
    /// Caller-registered font families. The first family is the preferred
    /// fallback when `font-family` names nothing in the table.
    pub fonts: FontTable,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: None,
            colors: ColorOptions::default(),
            base_size: 12.0,
            fonts: FontTable::default(),
        }
    }
}

/// Render an HTML string into `out`.
pub fn render_html<R: PageRenderer>(
    html: &str,
    options: &RenderOptions,
    out: &mut R,
) -> Result<()> {
    let doc = HtmlDocument::parse(html);
    render_document(&doc, options, out)
}

/// Render an HTML file into `out`.
pub fn render_html_file<R: PageRenderer>(
    path: &Path,
    options: &RenderOptions,
    out: &mut R,
) -> Result<()> {
    let doc = HtmlDocument::from_file(path)?;
    render_document(&doc, options, out)
}

/// Render an already-parsed document into `out`.
pub fn render_document<R: PageRenderer>(
    doc: &HtmlDocument,
    options: &RenderOptions,
    out: &mut R,
) -> Result<()> {
    let mut styles = css::StyleEngine::new();
    styles.apply_defaults(doc, options.style.as_deref());
    for block in doc.style_blocks() {
        styles.apply(doc, block, "document-style");
    }
    render::emit(doc, &styles, options, out)
}
