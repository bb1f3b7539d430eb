//! Vellum: simple HTML+CSS documents to styled text-run instructions.
//!
//! This facade re-exports the pipeline entry points from `vellum-ir`. Callers
//! that want a materialized instruction list instead of streaming into their
//! own backend can use [`instructions_for`].

use anyhow::Result;

pub use vellum_ir::{
    ColorOptions, FontDescriptor, FontFamily, FontTable, HtmlDocument, PageRenderer,
    RecordingRenderer, RenderInstruction, RenderOptions, TextOptions, render_html,
    render_html_file,
};

/// Render `html` with `options` and collect the resulting instruction stream.
pub fn instructions_for(html: &str, options: &RenderOptions) -> Result<Vec<RenderInstruction>> {
    let mut recorder = RecordingRenderer::new();
    render_html(html, options, &mut recorder)?;
    Ok(recorder.into_instructions())
}
