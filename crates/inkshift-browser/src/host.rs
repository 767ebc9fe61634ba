//! DOM-side host probing: editability tests, editable-ancestor walks, and
//! block discovery, all driven by the page's [`HostRules`].

use inkshift_core::{ElementFacts, HostRules, HostVariant, is_plain_field_tag, refine_target, rules_for};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node};

use crate::dom;

/// Owned snapshot of the attributes [`ElementFacts`] borrows from.
#[derive(Debug, Default)]
pub struct OwnedFacts {
    tag: String,
    classes: String,
    role: Option<String>,
    content_editable: bool,
    has_block_id: bool,
}

impl OwnedFacts {
    pub fn of(el: &Element) -> Self {
        let content_editable = el
            .dyn_ref::<HtmlElement>()
            .map(|h| h.is_content_editable())
            .unwrap_or(false);
        Self {
            tag: el.tag_name().to_ascii_lowercase(),
            classes: el.get_attribute("class").unwrap_or_default(),
            role: el.get_attribute("role"),
            content_editable,
            has_block_id: el.has_attribute("data-block-id"),
        }
    }

    pub fn as_facts(&self) -> ElementFacts<'_> {
        ElementFacts {
            tag: &self.tag,
            classes: &self.classes,
            role: self.role.as_deref(),
            content_editable: self.content_editable,
            has_block_id: self.has_block_id,
        }
    }
}

/// Page-level host handle: classified once per load from the hostname.
pub struct BrowserHost {
    rules: &'static dyn HostRules,
}

impl BrowserHost {
    pub fn new(rules: &'static dyn HostRules) -> Self {
        Self { rules }
    }

    /// Classify from the current page's hostname.
    pub fn from_location() -> Self {
        let hostname = dom::window()
            .ok()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default();
        let rules = rules_for(&hostname);
        tracing::debug!(target: "inkshift::host", hostname, variant = ?rules.variant(), "page classified");
        Self::new(rules)
    }

    pub fn rules(&self) -> &'static dyn HostRules {
        self.rules
    }

    /// Target-level variant for a concrete element.
    pub fn refine(&self, el: &Element) -> HostVariant {
        let facts = OwnedFacts::of(el);
        refine_target(self.rules.variant(), &facts.as_facts())
    }

    /// Whether one element counts as editable on this page: a text form
    /// control, an editable-content element, or a host-specific editor marker.
    pub fn is_editable(&self, el: &Element) -> bool {
        let facts = OwnedFacts::of(el);
        let facts = facts.as_facts();
        is_plain_field_tag(facts.tag)
            || facts.content_editable
            || self.rules.is_editor_marker(&facts)
    }

    /// Walk up from `node` looking for an editable element.
    pub fn find_editable_ancestor(&self, node: &Node) -> Option<HtmlElement> {
        let mut current = as_element(node);
        while let Some(el) = current {
            if self.is_editable(&el) {
                return el.dyn_into::<HtmlElement>().ok();
            }
            current = el.parent_element();
        }
        None
    }

    /// Document-level probe for a well-known editor container, used when the
    /// ancestor walk finds nothing (selection anchored across an iframe
    /// boundary, or inside a virtualized overlay).
    ///
    /// A selector can match a structural wrapper around the editor rather
    /// than the editable surface itself, so candidates that fail the
    /// editability test are skipped and the probe keeps going down the list.
    pub fn probe_container(&self, document: &Document) -> Option<HtmlElement> {
        for selector in self.rules.container_selectors() {
            let Ok(Some(el)) = document.query_selector(selector) else {
                continue;
            };
            if !self.is_editable(&el) {
                continue;
            }
            if let Ok(el) = el.dyn_into::<HtmlElement>() {
                return Some(el);
            }
        }
        None
    }

    /// Find the enclosing paragraph-level block for a caret position.
    ///
    /// Host-specific block selectors win; otherwise walk up from the anchor
    /// until a block-level (or list-item) ancestor inside the editable root,
    /// stopping at the root itself.
    pub fn find_enclosing_block(&self, anchor: &Node) -> Option<Element> {
        let start = as_element(anchor)?;

        for selector in self.rules.block_selectors() {
            if let Ok(Some(el)) = start.closest(selector) {
                return Some(el);
            }
        }

        let root: Element = match self.find_editable_ancestor(anchor) {
            Some(el) => el.into(),
            None => {
                let document = dom::document().ok()?;
                self.probe_container(&document)?.into()
            }
        };

        let mut current = start;
        loop {
            if current == root {
                return Some(root);
            }
            if is_block_level(&current) {
                return Some(current);
            }
            match current.parent_element() {
                Some(parent) if parent == root => return Some(current),
                Some(parent) => current = parent,
                None => return Some(root),
            }
        }
    }
}

/// The element for a node: itself if it is one, else its parent element.
pub fn as_element(node: &Node) -> Option<Element> {
    if let Some(el) = node.dyn_ref::<Element>() {
        return Some(el.clone());
    }
    node.parent_element()
}

fn is_block_level(el: &Element) -> bool {
    let Ok(window) = dom::window() else {
        return false;
    };
    let Ok(Some(style)) = window.get_computed_style(el) else {
        return false;
    };
    matches!(
        style.get_property_value("display").as_deref(),
        Ok("block") | Ok("list-item")
    )
}
