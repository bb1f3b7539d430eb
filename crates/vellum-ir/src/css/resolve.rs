//! Per-node style resolution with restricted inheritance.

use std::collections::BTreeMap;
use std::rc::Rc;

use ego_tree::NodeId;

use super::parser::parse_inline_declarations;
use super::stylesheet::StyleEngine;
use crate::html::HtmlDocument;

/// Final computed property map for one node.
pub type ResolvedStyle = BTreeMap<String, String>;

/// Properties that propagate from ancestors to descendants during resolution.
/// `text-decoration` is not inherited per CSS, but runs of decorated text are
/// from this pipeline's point of view. Everything else set on an ancestor
/// stays on that ancestor.
pub const INHERITED_PROPERTIES: &[&str] = &[
    "text-decoration",
    "azimuth",
    "border-collapse",
    "border-spacing",
    "caption-side",
    "color",
    "cursor",
    "direction",
    "elevation",
    "empty-cells",
    "font-family",
    "font-size",
    "font-style",
    "font-variant",
    "font-weight",
    "font",
    "letter-spacing",
    "line-height",
    "list-style-image",
    "list-style-position",
    "list-style-type",
    "list-style",
    "orphans",
    "pitch-range",
    "pitch",
    "quotes",
    "richness",
    "speak-header",
    "speak-numeral",
    "speak-punctuation",
    "speak",
    "speech-rate",
    "stress",
    "text-align",
    "text-indent",
    "text-transform",
    "visibility",
    "voice-family",
    "volume",
    "white-space",
    "widows",
    "word-spacing",
];

pub fn is_inherited_property(name: &str) -> bool {
    INHERITED_PROPERTIES.contains(&name)
}

impl StyleEngine {
    /// Resolve the final computed style for a node.
    ///
    /// Walks from the document root down to the node: strictly-above levels
    /// contribute only whitelisted properties, the node's own level
    /// contributes everything, with its values winning over inherited ones.
    /// Idempotent; the result is computed once per node and cached.
    pub fn resolve(&self, doc: &HtmlDocument, id: NodeId) -> Rc<ResolvedStyle> {
        if let Some(hit) = self.memo.borrow().get(&id) {
            return Rc::clone(hit);
        }
        let mut running = ResolvedStyle::new();
        if let Some(node) = doc.tree().get(id) {
            let mut path: Vec<NodeId> = node.ancestors().map(|a| a.id()).collect();
            path.reverse();
            path.push(id);
            let last = path.len() - 1;
            for (depth, level_id) in path.into_iter().enumerate() {
                let own = self.own_declarations(doc, level_id);
                if depth == last {
                    running.extend(own);
                } else {
                    for (name, value) in own {
                        if is_inherited_property(&name) {
                            running.insert(name, value);
                        }
                    }
                }
            }
        }
        let style = Rc::new(running);
        self.memo.borrow_mut().insert(id, Rc::clone(&style));
        style
    }

    /// One node's own property map: accumulated stylesheet declarations first,
    /// then the inline `style` attribute, later entries winning.
    fn own_declarations(&self, doc: &HtmlDocument, id: NodeId) -> BTreeMap<String, String> {
        let mut own = BTreeMap::new();
        if let Some(declarations) = self.annotations.get(&id) {
            for decl in declarations {
                own.insert(decl.property.clone(), decl.value.clone());
            }
        }
        let inline = doc
            .tree()
            .get(id)
            .and_then(|node| node.value().as_element())
            .and_then(|el| el.attr("style"));
        if let Some(inline) = inline {
            for (name, value) in parse_inline_declarations(inline) {
                own.insert(name, value);
            }
        }
        own
    }
}
