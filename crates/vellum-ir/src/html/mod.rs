//! HTML document loading for the render pipeline.
//!
//! Parsing proper is delegated to `scraper`; this module only collects the
//! document's `<style>` blocks and detaches elements that never contribute
//! rendered text (scripts, metadata, tables, form controls, media).

use std::path::Path;

use anyhow::{Context, Result};
use scraper::{Html, Node, Selector};
use tracing::debug;

use crate::css::diagnostics_enabled;

/// Elements removed from the tree before styling. Their text content would
/// otherwise leak into the instruction stream.
const STRIPPED_ELEMENTS: &str = "style, script, head, meta, area, audio, map, track, video, \
     embed, source, canvas, noscript, table, tbody, thead, td, th, tr, button, datalist, \
     input, legend, meter, optgroup, option, output, progress, select, details, dialog, \
     menu, summary, template, img";

/// A parsed document, stripped down to its renderable subset.
pub struct HtmlDocument {
    html: Html,
    style_blocks: Vec<String>,
}

impl HtmlDocument {
    /// Parse `html`, remember its `<style>` block texts in document order,
    /// and drop non-renderable elements.
    pub fn parse(html: &str) -> Self {
        let mut html = Html::parse_document(html);
        let style_blocks = collect_style_blocks(&html);
        strip_non_renderable(&mut html);
        Self { html, style_blocks }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read HTML file '{}'", path.display()))?;
        Ok(Self::parse(&html))
    }

    /// Raw CSS text of every `<style>` element, in document order, captured
    /// before the elements themselves were stripped.
    pub fn style_blocks(&self) -> &[String] {
        &self.style_blocks
    }

    pub(crate) fn html(&self) -> &Html {
        &self.html
    }

    pub(crate) fn tree(&self) -> &ego_tree::Tree<Node> {
        &self.html.tree
    }
}

fn collect_style_blocks(html: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("style") else {
        return Vec::new();
    };
    html.select(&selector)
        .map(|node| node.text().collect::<String>())
        .filter(|css| !css.trim().is_empty())
        .collect()
}

fn strip_non_renderable(html: &mut Html) {
    let Ok(selector) = Selector::parse(STRIPPED_ELEMENTS) else {
        return;
    };
    let ids: Vec<_> = html.select(&selector).map(|el| el.id()).collect();
    if diagnostics_enabled("html") && !ids.is_empty() {
        debug!(count = ids.len(), "stripped non-renderable elements");
    }
    for id in ids {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_style_blocks_in_document_order() {
        let doc = HtmlDocument::parse(
            "<html><head><style>p { color: red }</style></head>\
             <body><style>b { color: blue }</style><p>x</p></body></html>",
        );
        let blocks = doc.style_blocks();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("color: red"));
        assert!(blocks[1].contains("color: blue"));
    }

    #[test]
    fn strips_scripts_and_tables() {
        let doc = HtmlDocument::parse(
            "<body><script>var x = 1;</script><table><tr><td>cell</td></tr></table><p>keep</p></body>",
        );
        let text: String = doc
            .tree()
            .root()
            .descendants()
            .filter_map(|node| node.value().as_text().map(|t| t.text[..].to_string()))
            .collect();
        assert!(text.contains("keep"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("cell"));
    }
}
