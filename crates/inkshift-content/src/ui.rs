//! The floating UI: trigger icon, action menu, submenus, result panel, and
//! transient toasts.
//!
//! Every element carries an id starting with [`UI_PREFIX`]; the dismissal
//! handler uses that to tell our UI from the page. Elements are owned by the
//! [`Ui`] value and removed from the DOM on drop, so teardown is just
//! dropping the panel.

use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Element, HtmlElement, Node};

use inkshift_browser::dom;

/// Id prefix shared by every element this extension injects.
pub const UI_PREFIX: &str = "inkshift-";

/// How long a toast stays visible.
const TOAST_MS: u32 = 2500;

const PANEL_STYLE: &str = "position:absolute;z-index:2147483647;background:#fff;\
    border:1px solid #d0d0d0;border-radius:6px;box-shadow:0 2px 8px rgba(0,0,0,.15);\
    font:13px/1.4 system-ui,sans-serif;color:#222;padding:4px;max-width:360px;";

const ITEM_STYLE: &str = "display:block;width:100%;text-align:left;border:0;\
    background:none;padding:4px 10px;cursor:pointer;font:inherit;color:inherit;";

/// One mounted UI element plus the listeners keeping it interactive.
/// Dropping it removes the element and unhooks the listeners.
struct Panel {
    element: HtmlElement,
    _listeners: Vec<EventListener>,
}

impl Drop for Panel {
    fn drop(&mut self) {
        self.element.remove();
    }
}

#[derive(Default)]
pub struct Ui {
    icon: Option<Panel>,
    menu: Option<Panel>,
    submenu: Option<Panel>,
    result: Option<Panel>,
    /// Anchor rect of the current selection, reused for panel placement.
    anchor: Option<DomRect>,
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `node` is inside any element this extension injected.
    pub fn is_inside(node: &Node) -> bool {
        let mut current = if let Some(el) = node.dyn_ref::<Element>() {
            Some(el.clone())
        } else {
            node.parent_element()
        };
        while let Some(el) = current {
            if el.id().starts_with(UI_PREFIX) {
                return true;
            }
            current = el.parent_element();
        }
        false
    }

    pub fn hide_all(&mut self) {
        self.icon = None;
        self.menu = None;
        self.submenu = None;
        self.result = None;
        self.anchor = None;
    }

    /// Show the trigger icon next to the selection.
    pub fn show_icon(&mut self, anchor: DomRect, on_activate: Rc<dyn Fn()>) {
        self.hide_all();
        let Ok(document) = dom::document() else {
            return;
        };
        let Some(icon) = make_div(&document, "icon") else {
            return;
        };
        icon.set_text_content(Some("✦"));
        let style = format!(
            "{PANEL_STYLE}padding:2px 7px;cursor:pointer;user-select:none;{}",
            position_style(&anchor, 4.0)
        );
        let _ = icon.set_attribute("style", &style);

        let mut listeners = Vec::new();
        listeners.push(EventListener::new(&icon, "click", move |_| on_activate()));
        if append(&document, &icon) {
            self.icon = Some(Panel {
                element: icon,
                _listeners: listeners,
            });
            self.anchor = Some(anchor);
        }
    }

    /// Swap the icon for the primary action menu.
    pub fn show_menu(&mut self, items: Vec<(String, Rc<dyn Fn()>)>) {
        self.icon = None;
        self.menu = self.build_list("menu", items, 4.0);
    }

    /// Show a submenu below the menu. An existing submenu is replaced.
    pub fn show_submenu(&mut self, items: Vec<(String, Rc<dyn Fn()>)>) {
        self.submenu = self.build_list("submenu", items, 40.0);
    }

    pub fn show_result_loading(&mut self) {
        self.menu = None;
        self.submenu = None;
        self.result = self.build_result(|_, panel| {
            panel.set_text_content(Some("Working…"));
            Vec::new()
        });
    }

    pub fn show_result_error(&mut self, message: &str) {
        self.menu = None;
        self.submenu = None;
        self.result = self.build_result(|_, panel| {
            panel.set_text_content(Some(message));
            let _ = panel.style().set_property("color", "#b00020");
            Vec::new()
        });
    }

    /// A result that could not be applied in place: show the text with a
    /// copy button so it is never lost.
    pub fn show_result_single(&mut self, text: &str, on_copy: Rc<dyn Fn()>) {
        let text = text.to_owned();
        self.menu = None;
        self.submenu = None;
        self.result = self.build_result(move |document, panel| {
            let mut listeners = Vec::new();
            if let Some(body) = make_div(document, "result-text") {
                body.set_text_content(Some(&text));
                let _ = panel.append_child(&body);
            }
            if let Some(button) = make_button(document, "Copy") {
                let on_copy = on_copy.clone();
                listeners.push(EventListener::new(&button, "click", move |_| on_copy()));
                let _ = panel.append_child(&button);
            }
            listeners
        });
    }

    /// Rewrite alternatives, one clickable row each.
    pub fn show_result_alternatives(
        &mut self,
        alternatives: &[String],
        on_pick: Rc<dyn Fn(String)>,
    ) {
        let alternatives = alternatives.to_vec();
        self.menu = None;
        self.submenu = None;
        self.result = self.build_result(move |document, panel| {
            let mut listeners = Vec::new();
            for alternative in &alternatives {
                let Some(button) = make_button(document, alternative) else {
                    continue;
                };
                let choice = alternative.clone();
                let on_pick = on_pick.clone();
                listeners.push(EventListener::new(&button, "click", move |_| {
                    on_pick(choice.clone())
                }));
                let _ = panel.append_child(&button);
            }
            listeners
        });
    }

    fn build_list(
        &self,
        name: &str,
        items: Vec<(String, Rc<dyn Fn()>)>,
        dy: f64,
    ) -> Option<Panel> {
        let document = dom::document().ok()?;
        let panel = make_div(&document, name)?;
        let anchor = self.anchor.clone()?;
        let _ = panel.set_attribute("style", &format!("{PANEL_STYLE}{}", position_style(&anchor, dy)));

        let mut listeners = Vec::new();
        for (label, action) in items {
            let button = make_button(&document, &label)?;
            listeners.push(EventListener::new(&button, "click", move |_| action()));
            panel.append_child(&button).ok()?;
        }
        append(&document, &panel).then_some(Panel {
            element: panel,
            _listeners: listeners,
        })
    }

    fn build_result(
        &self,
        fill: impl FnOnce(&Document, &HtmlElement) -> Vec<EventListener>,
    ) -> Option<Panel> {
        let document = dom::document().ok()?;
        let panel = make_div(&document, "result")?;
        let anchor = self.anchor.clone()?;
        let _ = panel.set_attribute("style", &format!("{PANEL_STYLE}{}", position_style(&anchor, 4.0)));
        let listeners = fill(&document, &panel);
        append(&document, &panel).then_some(Panel {
            element: panel,
            _listeners: listeners,
        })
    }
}

/// A transient confirmation toast, bottom-centered, self-removing.
pub fn toast(message: &str) {
    let Ok(document) = dom::document() else {
        return;
    };
    let Some(el) = make_div(&document, "toast") else {
        return;
    };
    el.set_text_content(Some(message));
    let _ = el.set_attribute(
        "style",
        "position:fixed;left:50%;bottom:40px;transform:translateX(-50%);\
         z-index:2147483647;background:#323232;color:#fff;border-radius:4px;\
         padding:8px 16px;font:13px system-ui,sans-serif;",
    );
    if !append(&document, &el) {
        return;
    }
    Timeout::new(TOAST_MS, move || el.remove()).forget();
}

fn make_div(document: &Document, name: &str) -> Option<HtmlElement> {
    let el = document.create_element("div").ok()?;
    el.set_id(&format!("{UI_PREFIX}{name}"));
    el.dyn_into::<HtmlElement>().ok()
}

fn make_button(document: &Document, label: &str) -> Option<HtmlElement> {
    let el = document.create_element("button").ok()?;
    el.set_text_content(Some(label));
    let _ = el.set_attribute("style", ITEM_STYLE);
    el.dyn_into::<HtmlElement>().ok()
}

fn append(document: &Document, el: &HtmlElement) -> bool {
    document
        .body()
        .map(|body| body.append_child(el).is_ok())
        .unwrap_or(false)
}

/// Absolute placement below the anchor rect, in document coordinates.
fn position_style(rect: &DomRect, dy: f64) -> String {
    let (scroll_x, scroll_y) = dom::window()
        .ok()
        .map(|w| {
            (
                w.scroll_x().unwrap_or(0.0),
                w.scroll_y().unwrap_or(0.0),
            )
        })
        .unwrap_or((0.0, 0.0));
    format!(
        "left:{}px;top:{}px;",
        rect.left() + scroll_x,
        rect.bottom() + scroll_y + dy
    )
}
