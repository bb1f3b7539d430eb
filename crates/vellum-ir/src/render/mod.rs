//! Depth-first emission of styled text-run instructions.
//!
//! The walk visits text nodes and explicit `<br>` breaks in document order,
//! resolves each one's style, and drives a [`PageRenderer`] with font, color,
//! text, break and cursor-move calls. Container elements emit nothing
//! themselves; their bottom margins become cursor moves once their last
//! descendant instruction is out.

use anyhow::Result;
use ego_tree::NodeId;
use scraper::Node;
use tracing::debug;

use crate::RenderOptions;
use crate::css::{ResolvedStyle, StyleEngine, diagnostics_enabled};
use crate::font::{face_request, resolve_font, resolve_font_size, strip_unit};
use crate::html::HtmlDocument;

/// px are converted to points at the fixed CSS ratio before margins are
/// divided by the current font size.
const PX_TO_PT: f32 = 0.75;

/// Options attached to one emitted text run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Whether this run visually joins the next one without an implicit break.
    pub continued: bool,
    pub underline: bool,
    pub strike: bool,
    /// Target of the nearest enclosing `<a href>`, if any.
    pub link: Option<String>,
}

/// The external paint backend. Calls arrive in strict document order; later
/// cursor-dependent operations assume earlier ones have been applied.
pub trait PageRenderer {
    fn set_font(&mut self, name: &str, size: f32);
    fn fill_color(&mut self, color: &str, alpha: f32);
    fn text(&mut self, text: &str, options: &TextOptions);
    fn line_break(&mut self);
    /// Move the cursor down by a fractional number of lines.
    fn move_down(&mut self, lines: f32);
}

/// One unit of output work, as materialized by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    Font { name: String, size: f32 },
    FillColor { color: String, alpha: f32 },
    Text { text: String, options: TextOptions },
    LineBreak,
    MoveDown(f32),
}

/// Backend that records the instruction stream instead of painting it.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    instructions: Vec<RenderInstruction>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[RenderInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<RenderInstruction> {
        self.instructions
    }
}

impl PageRenderer for RecordingRenderer {
    fn set_font(&mut self, name: &str, size: f32) {
        self.instructions.push(RenderInstruction::Font {
            name: name.to_string(),
            size,
        });
    }

    fn fill_color(&mut self, color: &str, alpha: f32) {
        self.instructions.push(RenderInstruction::FillColor {
            color: color.to_string(),
            alpha,
        });
    }

    fn text(&mut self, text: &str, options: &TextOptions) {
        self.instructions.push(RenderInstruction::Text {
            text: text.to_string(),
            options: options.clone(),
        });
    }

    fn line_break(&mut self) {
        self.instructions.push(RenderInstruction::LineBreak);
    }

    fn move_down(&mut self, lines: f32) {
        self.instructions.push(RenderInstruction::MoveDown(lines));
    }
}

#[derive(Debug)]
enum RenderNodeKind {
    Text(String),
    Break,
}

/// One emission unit: a non-whitespace text node or an explicit `<br>`.
#[derive(Debug)]
struct RenderNode {
    id: NodeId,
    kind: RenderNodeKind,
}

/// Decorations and link context gathered from the ancestor tag chain.
#[derive(Debug, Default)]
struct TagContext {
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    link: Option<String>,
}

/// Walk the document and emit instructions into `out`.
pub fn emit<R: PageRenderer>(
    doc: &HtmlDocument,
    styles: &StyleEngine,
    options: &RenderOptions,
    out: &mut R,
) -> Result<()> {
    let nodes = collect_render_nodes(doc);
    let containers: Vec<Option<NodeId>> = nodes
        .iter()
        .map(|node| block_container(doc, styles, node.id))
        .collect();
    let chains: Vec<Vec<NodeId>> = nodes
        .iter()
        .map(|node| element_chain(doc, node.id))
        .collect();

    // Current font size: cascades along text order, root-sized until the
    // first text run.
    let mut size = options.base_size;
    let mut emitted = 0usize;

    for (index, node) in nodes.iter().enumerate() {
        match &node.kind {
            RenderNodeKind::Break => {
                out.line_break();
                emitted += 1;
            }
            RenderNodeKind::Text(raw) => {
                if let Some(text) = normalize_text(raw, index, &nodes, &containers) {
                    let style = styles.resolve(doc, node.id);
                    let tags = tag_context(doc, node.id);

                    let request = face_request(&style, tags.bold, tags.italic);
                    let face = resolve_font(request, &style, &options.fonts);
                    size = resolve_font_size(&style, size, options.base_size);

                    let decoration = style
                        .get("text-decoration")
                        .map(String::as_str)
                        .unwrap_or("");
                    let text_options = TextOptions {
                        continued: is_continued(index, &nodes, &containers, styles, doc, &style),
                        underline: tags.underline || decoration.contains("underline"),
                        strike: tags.strike || decoration.contains("line-through"),
                        link: tags.link.clone(),
                    };
                    let color = resolve_color(&style, tags.link.is_some(), options);
                    // Opacity is not an inherited property; it lives on the
                    // owning element's style, not the text node's.
                    let alpha = chains[index]
                        .first()
                        .map(|owner| styles.resolve(doc, *owner))
                        .and_then(|owner_style| {
                            owner_style
                                .get("opacity")
                                .and_then(|o| o.trim().parse::<f32>().ok())
                        })
                        .unwrap_or(1.0);

                    out.set_font(&face.source, size);
                    out.fill_color(&color, alpha);
                    out.text(&text, &text_options);
                    emitted += 1;
                }
            }
        }

        // Containers whose last instruction this was: turn their bottom
        // margins into downward cursor moves, innermost first.
        let next_chain: &[NodeId] = match chains.get(index + 1) {
            Some(chain) => chain,
            None => &[],
        };
        for closing in chains[index].iter().copied().filter(|id| !next_chain.contains(id)) {
            let container_style = styles.resolve(doc, closing);
            if let Some(lines) = bottom_margin_move(&container_style, size, options.base_size) {
                out.move_down(lines);
                emitted += 1;
            }
        }
    }

    if diagnostics_enabled("render") {
        debug!(nodes = nodes.len(), emitted, "instruction stream complete");
    }
    Ok(())
}

/// Text and break nodes in depth-first document order. Whitespace-only text
/// never becomes an instruction.
fn collect_render_nodes(doc: &HtmlDocument) -> Vec<RenderNode> {
    let mut out = Vec::new();
    for node in doc.tree().root().descendants() {
        match node.value() {
            Node::Text(text) => {
                let raw: &str = &text.text;
                if !raw.trim().is_empty() {
                    out.push(RenderNode {
                        id: node.id(),
                        kind: RenderNodeKind::Text(raw.to_string()),
                    });
                }
            }
            Node::Element(el) if el.name().eq_ignore_ascii_case("br") => {
                out.push(RenderNode {
                    id: node.id(),
                    kind: RenderNodeKind::Break,
                });
            }
            _ => {}
        }
    }
    out
}

/// Strip a leading newline after a block boundary (document start, explicit
/// break, or a container change), then join runs with a single trailing
/// space. Returns `None` when nothing printable remains.
fn normalize_text(
    raw: &str,
    index: usize,
    nodes: &[RenderNode],
    containers: &[Option<NodeId>],
) -> Option<String> {
    let after_block = match index.checked_sub(1) {
        None => true,
        Some(prev) => {
            matches!(nodes[prev].kind, RenderNodeKind::Break)
                || containers[prev] != containers[index]
        }
    };
    let mut text = raw;
    if after_block {
        text = text.strip_prefix('\n').unwrap_or(text);
    }
    let trimmed = text.trim_end();
    if trimmed.trim_start().is_empty() {
        return None;
    }
    Some(format!("{trimmed} "))
}

/// A run is continued when it and the next run are inline-like and share the
/// same nearest block-level container, and no explicit break sits between.
fn is_continued(
    index: usize,
    nodes: &[RenderNode],
    containers: &[Option<NodeId>],
    styles: &StyleEngine,
    doc: &HtmlDocument,
    style: &ResolvedStyle,
) -> bool {
    if !is_inline_display(style.get("display").map(String::as_str)) {
        return false;
    }
    let Some(next) = nodes.get(index + 1) else {
        return false;
    };
    if !matches!(next.kind, RenderNodeKind::Text(_)) {
        return false;
    }
    if containers[index] != containers[index + 1] {
        return false;
    }
    let next_style = styles.resolve(doc, next.id);
    is_inline_display(next_style.get("display").map(String::as_str))
}

fn is_inline_display(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), None | Some("inline") | Some("inline-block"))
}

/// Nearest ancestor element whose resolved `display` is not inline-like.
/// `None` means the node sits directly under the tree root.
fn block_container(doc: &HtmlDocument, styles: &StyleEngine, id: NodeId) -> Option<NodeId> {
    let node = doc.tree().get(id)?;
    for ancestor in node.ancestors() {
        if ancestor.value().as_element().is_none() {
            continue;
        }
        let style = styles.resolve(doc, ancestor.id());
        if !is_inline_display(style.get("display").map(String::as_str)) {
            return Some(ancestor.id());
        }
    }
    None
}

/// Element ancestors of a node, nearest first.
fn element_chain(doc: &HtmlDocument, id: NodeId) -> Vec<NodeId> {
    let Some(node) = doc.tree().get(id) else {
        return Vec::new();
    };
    node.ancestors()
        .filter(|a| a.value().as_element().is_some())
        .map(|a| a.id())
        .collect()
}

/// Semantic tag membership across the ancestor chain. The nearest `<a>`
/// supplies the link target.
fn tag_context(doc: &HtmlDocument, id: NodeId) -> TagContext {
    let mut tags = TagContext::default();
    let Some(node) = doc.tree().get(id) else {
        return tags;
    };
    for ancestor in node.ancestors() {
        let Some(el) = ancestor.value().as_element() else {
            continue;
        };
        match el.name() {
            "b" | "strong" => tags.bold = true,
            "i" | "em" => tags.italic = true,
            "u" | "ins" => tags.underline = true,
            "s" | "del" => tags.strike = true,
            "a" => {
                if tags.link.is_none() {
                    tags.link = el.attr("href").map(str::to_string);
                }
            }
            _ => {}
        }
    }
    tags
}

/// Explicit `color` wins; otherwise the configured link color inside a link,
/// else the configured base color. Unparseable explicit colors degrade to the
/// defaults rather than aborting the run.
fn resolve_color(style: &ResolvedStyle, in_link: bool, options: &RenderOptions) -> String {
    if let Some(value) = style.get("color") {
        if let Ok(color) = csscolorparser::parse(value) {
            return color.to_hex_string();
        }
    }
    if in_link {
        options.colors.link.clone()
    } else {
        options.colors.base.clone()
    }
}

/// Bottom margin of a container as a fractional line count, if any.
fn bottom_margin_move(style: &ResolvedStyle, size: f32, root: f32) -> Option<f32> {
    let value = match style.get("margin-bottom") {
        Some(direct) => direct.clone(),
        None => margin_shorthand_bottom(style.get("margin")?)?,
    };
    margin_to_lines(&value, size, root)
}

/// Positional bottom component of the `margin` shorthand. The 3-value form
/// is deliberately not expanded.
fn margin_shorthand_bottom(value: &str) -> Option<String> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.len() {
        1 | 2 => Some(parts[0].to_string()),
        4 | 5 => Some(parts[2].to_string()),
        _ => None,
    }
}

/// Convert one margin value into a line fraction at the current font size.
/// Zero and unparseable values produce no move; percentages are ignored.
fn margin_to_lines(value: &str, size: f32, root: f32) -> Option<f32> {
    let value = value.trim();
    let lines = if let Some(n) = strip_unit(value, "px") {
        n * PX_TO_PT / size
    } else if let Some(n) = strip_unit(value, "pt") {
        n / size
    } else if let Some(n) = strip_unit(value, "rem") {
        n * root / size
    } else if let Some(n) = strip_unit(value, "em") {
        n
    } else if value.ends_with('%') {
        return None;
    } else {
        value.parse::<f32>().ok()?
    };
    (lines != 0.0).then_some(lines)
}
