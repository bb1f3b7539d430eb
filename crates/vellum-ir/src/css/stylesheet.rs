//! Stylesheet compilation: applying parsed rules onto matched nodes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ego_tree::NodeId;
use scraper::Selector;
use tracing::debug;

use super::defaults::{BASELINE_SHEET, LEGACY_COMPAT_SHEET};
use super::diagnostics::diagnostics_enabled;
use super::parser::{Declaration, parse_rules};
use super::resolve::ResolvedStyle;
use crate::html::HtmlDocument;

/// Accumulates per-node declarations during compilation and memoizes resolved
/// styles during the render pass.
///
/// The lifecycle is strictly two-phase: every `apply` call happens before the
/// first `resolve`, so the memo never needs invalidation.
pub struct StyleEngine {
    pub(super) annotations: HashMap<NodeId, Vec<Declaration>>,
    pub(super) memo: RefCell<HashMap<NodeId, Rc<ResolvedStyle>>>,
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleEngine {
    pub fn new() -> Self {
        Self {
            annotations: HashMap::new(),
            memo: RefCell::new(HashMap::new()),
        }
    }

    /// Parse `css` and append each rule's merged declarations to every node
    /// matched by each of its selectors. Malformed rules and unsupported
    /// selectors are skipped; compilation always continues.
    pub fn apply(&mut self, doc: &HtmlDocument, css: &str, source: &str) {
        let rules = parse_rules(css);
        let mut applied = 0usize;
        for rule in &rules {
            let merged = merge_rule_declarations(&rule.declarations);
            if merged.is_empty() {
                continue;
            }
            for selector_text in &rule.selectors {
                let Ok(selector) = Selector::parse(selector_text) else {
                    if diagnostics_enabled("css") {
                        debug!(source, selector = %selector_text, "skipped unsupported selector");
                    }
                    continue;
                };
                for element in doc.html().select(&selector) {
                    self.annotations
                        .entry(element.id())
                        .or_default()
                        .extend(merged.iter().cloned());
                    applied += 1;
                }
            }
        }
        if diagnostics_enabled("css") {
            debug!(source, rules = rules.len(), applied, "applied stylesheet");
        }
    }

    /// Apply the two built-in sheets, then any caller-supplied global CSS.
    /// Document `<style>` blocks follow via separate `apply` calls.
    pub fn apply_defaults(&mut self, doc: &HtmlDocument, extra: Option<&str>) {
        self.apply(doc, BASELINE_SHEET, "baseline");
        self.apply(doc, LEGACY_COMPAT_SHEET, "legacy-compat");
        if let Some(css) = extra {
            self.apply(doc, css, "caller-style");
        }
    }
}

/// Duplicate properties within one rule collapse to the last occurrence,
/// keeping the first-seen property order.
fn merge_rule_declarations(declarations: &[Declaration]) -> Vec<Declaration> {
    let mut merged: Vec<Declaration> = Vec::with_capacity(declarations.len());
    for decl in declarations {
        match merged.iter_mut().find(|d| d.property == decl.property) {
            Some(existing) => existing.value = decl.value.clone(),
            None => merged.push(decl.clone()),
        }
    }
    merged
}
