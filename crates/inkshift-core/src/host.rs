//! Host classification and per-host editor rules.
//!
//! Different editors virtualize their DOM differently: Google Docs renders
//! per-line overlays, Notion tags every block with a stable block-id
//! attribute, GitHub embeds CodeMirror/Ace. One generic heuristic is not
//! enough, so a page is classified once per load and all editability, block,
//! and strategy decisions go through that variant's rules.
//!
//! The rules are a registry of variants behind the [`HostRules`] trait; new
//! hosts are added by registering a new variant, not by editing a shared
//! conditional chain.

use crate::engine::{self, StrategyKind};

/// Host/editor classification.
///
/// `GoogleDocs`, `Notion`, `GitHubEditor`, and `Generic` are page-level,
/// decided from the hostname. `PlainField` and `GenericEditable` are
/// refinements of a concrete selection target within any page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostVariant {
    PlainField,
    GenericEditable,
    GoogleDocs,
    Notion,
    GitHubEditor,
    Generic,
}

/// The facts about a DOM element that the rules need, precomputed by the
/// platform layer so the rules stay pure and natively testable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementFacts<'a> {
    /// Lowercased tag name.
    pub tag: &'a str,
    /// Raw `class` attribute value (space separated).
    pub classes: &'a str,
    /// ARIA `role` attribute, if any.
    pub role: Option<&'a str>,
    /// Whether the editable-content flag is set on the element.
    pub content_editable: bool,
    /// Whether the element carries a `data-block-id` attribute.
    pub has_block_id: bool,
}

impl ElementFacts<'_> {
    /// Whole-token match against the `class` attribute.
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.split_ascii_whitespace().any(|c| c == name)
    }

    /// Substring match against the `class` attribute, for fragment
    /// allow-lists.
    pub fn class_contains(&self, fragment: &str) -> bool {
        self.classes.contains(fragment)
    }
}

/// True for native single/multi-line text form controls.
pub fn is_plain_field_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea")
}

/// Capability interface for one host variant: editability markers, block
/// selectors, document-level container probes, and the replacement strategy
/// order. Selected once per page load via [`rules_for`].
pub trait HostRules: Sync {
    fn variant(&self) -> HostVariant;

    /// Host-specific editor-container markers, checked after the generic
    /// form-control and editable-content tests.
    fn is_editor_marker(&self, el: &ElementFacts<'_>) -> bool;

    /// Per-paragraph/block container selectors, most specific first, used by
    /// the live-typing block finder.
    fn block_selectors(&self) -> &'static [&'static str] {
        &[]
    }

    /// Document-level selectors probed for a single well-known editor
    /// container when the ancestor walk yields nothing (e.g. a selection
    /// anchored across an iframe boundary).
    fn container_selectors(&self) -> &'static [&'static str] {
        &[]
    }

    /// Replacement strategies in attempt order. Order is contractual:
    /// least invasive first, clipboard fallback last.
    fn strategy_order(&self) -> &'static [StrategyKind] {
        engine::GENERIC_ORDER
    }
}

/// Refine a page-level variant to a target-level one for a concrete element.
pub fn refine_target(page: HostVariant, el: &ElementFacts<'_>) -> HostVariant {
    if is_plain_field_tag(el.tag) {
        HostVariant::PlainField
    } else if el.content_editable {
        HostVariant::GenericEditable
    } else {
        page
    }
}

/// Strategy order for a (possibly refined) variant.
///
/// A plain form control or ordinary editable-content element behaves the
/// same on every page, so the target-level refinements use the generic
/// order even inside a specialized host. Only an unrefined page-level
/// variant keeps its host-specific order.
pub fn order_for(variant: HostVariant) -> &'static [StrategyKind] {
    match variant {
        HostVariant::PlainField | HostVariant::GenericEditable | HostVariant::Generic => {
            engine::GENERIC_ORDER
        }
        HostVariant::GoogleDocs => engine::GOOGLE_DOCS_ORDER,
        HostVariant::Notion => engine::NOTION_ORDER,
        HostVariant::GitHubEditor => engine::GITHUB_ORDER,
    }
}

struct GoogleDocsRules;

impl HostRules for GoogleDocsRules {
    fn variant(&self) -> HostVariant {
        HostVariant::GoogleDocs
    }

    fn is_editor_marker(&self, el: &ElementFacts<'_>) -> bool {
        el.has_class("kix-lineview-content")
            || el.has_class("kix-paragraphrenderer")
            || el.has_class("kix-lineview")
            || el.role == Some("textbox")
    }

    fn block_selectors(&self) -> &'static [&'static str] {
        &[
            ".kix-paragraphrenderer",
            ".kix-lineview",
            ".kix-lineview-content",
            ".kix-wordhtmlgenerator-word-node",
        ]
    }

    fn container_selectors(&self) -> &'static [&'static str] {
        &[
            ".kix-page-content-wrap",
            "[role='textbox']",
            ".kix-appview-editor",
        ]
    }

    fn strategy_order(&self) -> &'static [StrategyKind] {
        engine::GOOGLE_DOCS_ORDER
    }
}

struct NotionRules;

impl HostRules for NotionRules {
    fn variant(&self) -> HostVariant {
        HostVariant::Notion
    }

    fn is_editor_marker(&self, el: &ElementFacts<'_>) -> bool {
        el.has_block_id || el.has_class("notion-page-content")
    }

    fn block_selectors(&self) -> &'static [&'static str] {
        &["[data-block-id]"]
    }

    fn container_selectors(&self) -> &'static [&'static str] {
        &[".notion-page-content", "[contenteditable='true']"]
    }

    fn strategy_order(&self) -> &'static [StrategyKind] {
        engine::NOTION_ORDER
    }
}

struct GitHubRules;

impl HostRules for GitHubRules {
    fn variant(&self) -> HostVariant {
        HostVariant::GitHubEditor
    }

    fn is_editor_marker(&self, el: &ElementFacts<'_>) -> bool {
        el.has_class("CodeMirror")
            || el.has_class("CodeMirror-line")
            || el.class_contains("ace_editor")
    }

    fn block_selectors(&self) -> &'static [&'static str] {
        &[".CodeMirror-line"]
    }

    fn container_selectors(&self) -> &'static [&'static str] {
        &[".CodeMirror", ".ace_editor"]
    }

    fn strategy_order(&self) -> &'static [StrategyKind] {
        engine::GITHUB_ORDER
    }
}

struct GenericRules;

/// Class-name fragments of rich editors seen in the wild, used when the page
/// is otherwise unrecognized.
const GENERIC_EDITOR_FRAGMENTS: &[&str] = &["ProseMirror", "ql-editor", "cm-content", "ace_editor"];

impl HostRules for GenericRules {
    fn variant(&self) -> HostVariant {
        HostVariant::Generic
    }

    fn is_editor_marker(&self, el: &ElementFacts<'_>) -> bool {
        el.role == Some("textbox")
            || GENERIC_EDITOR_FRAGMENTS
                .iter()
                .any(|f| el.class_contains(f))
    }
}

static GOOGLE_DOCS: GoogleDocsRules = GoogleDocsRules;
static NOTION: NotionRules = NotionRules;
static GITHUB: GitHubRules = GitHubRules;
static GENERIC: GenericRules = GenericRules;

/// The registry: hostname fragments mapped to rule sets, checked in order.
static REGISTRY: &[(&[&str], &(dyn HostRules + Sync))] = &[
    (&["docs.google.com"], &GOOGLE_DOCS),
    (&["notion.so", "notion.site"], &NOTION),
    (&["github.com"], &GITHUB),
];

/// Classify a page by hostname, once per page load.
pub fn rules_for(hostname: &str) -> &'static dyn HostRules {
    for (fragments, rules) in REGISTRY {
        if fragments.iter().any(|f| hostname.contains(f)) {
            return *rules;
        }
    }
    &GENERIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_classification() {
        assert_eq!(rules_for("docs.google.com").variant(), HostVariant::GoogleDocs);
        assert_eq!(rules_for("www.notion.so").variant(), HostVariant::Notion);
        assert_eq!(rules_for("acme.notion.site").variant(), HostVariant::Notion);
        assert_eq!(rules_for("github.com").variant(), HostVariant::GitHubEditor);
        assert_eq!(rules_for("example.org").variant(), HostVariant::Generic);
    }

    #[test]
    fn plain_field_tags() {
        assert!(is_plain_field_tag("input"));
        assert!(is_plain_field_tag("TEXTAREA"));
        assert!(!is_plain_field_tag("div"));
    }

    #[test]
    fn target_refinement() {
        let input = ElementFacts {
            tag: "input",
            ..Default::default()
        };
        assert_eq!(
            refine_target(HostVariant::Generic, &input),
            HostVariant::PlainField
        );

        let editable = ElementFacts {
            tag: "div",
            content_editable: true,
            ..Default::default()
        };
        assert_eq!(
            refine_target(HostVariant::Notion, &editable),
            HostVariant::GenericEditable
        );

        let plain = ElementFacts {
            tag: "div",
            ..Default::default()
        };
        assert_eq!(
            refine_target(HostVariant::GoogleDocs, &plain),
            HostVariant::GoogleDocs
        );
    }

    #[test]
    fn refined_targets_use_the_generic_order() {
        let input = ElementFacts {
            tag: "textarea",
            ..Default::default()
        };
        // A plain field inside Docs splices like any form control.
        assert_eq!(
            order_for(refine_target(HostVariant::GoogleDocs, &input)),
            engine::GENERIC_ORDER
        );

        let editable = ElementFacts {
            tag: "div",
            content_editable: true,
            ..Default::default()
        };
        assert_eq!(
            order_for(refine_target(HostVariant::Notion, &editable)),
            engine::GENERIC_ORDER
        );

        // An unrefined page-level variant keeps its host order.
        let canvas = ElementFacts {
            tag: "div",
            ..Default::default()
        };
        assert_eq!(
            order_for(refine_target(HostVariant::GoogleDocs, &canvas)),
            engine::GOOGLE_DOCS_ORDER
        );
        assert_eq!(
            order_for(refine_target(HostVariant::GitHubEditor, &canvas)),
            engine::GITHUB_ORDER
        );
    }

    #[test]
    fn notion_markers() {
        let rules = rules_for("notion.so");
        let block = ElementFacts {
            tag: "div",
            has_block_id: true,
            ..Default::default()
        };
        assert!(rules.is_editor_marker(&block));

        let other = ElementFacts {
            tag: "div",
            classes: "sidebar",
            ..Default::default()
        };
        assert!(!rules.is_editor_marker(&other));
    }

    #[test]
    fn google_docs_markers_and_blocks() {
        let rules = rules_for("docs.google.com");
        let line = ElementFacts {
            tag: "div",
            classes: "kix-lineview-content magic",
            ..Default::default()
        };
        assert!(rules.is_editor_marker(&line));

        let textbox = ElementFacts {
            tag: "div",
            role: Some("textbox"),
            ..Default::default()
        };
        assert!(rules.is_editor_marker(&textbox));
        assert!(!rules.block_selectors().is_empty());
        assert!(!rules.container_selectors().is_empty());
    }

    #[test]
    fn generic_fallback_allow_list() {
        let rules = rules_for("example.com");
        let quill = ElementFacts {
            tag: "div",
            classes: "ql-editor ql-blank",
            ..Default::default()
        };
        assert!(rules.is_editor_marker(&quill));

        let textbox = ElementFacts {
            tag: "div",
            role: Some("textbox"),
            ..Default::default()
        };
        assert!(rules.is_editor_marker(&textbox));

        let plain = ElementFacts {
            tag: "span",
            classes: "nav-item",
            ..Default::default()
        };
        assert!(!rules.is_editor_marker(&plain));
    }
}
