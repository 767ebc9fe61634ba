//! Replacement strategy kinds, outcomes, and per-host attempt order.
//!
//! Host editors frequently no-op the standard selection-replace command, and
//! blind DOM mutation can desync a rich editor's internal model from the
//! visible tree. The engine therefore escalates through an ordered list of
//! strategies, least invasive first, bottoming out at a clipboard copy that
//! never loses the generated text. The order is part of the contract; the
//! platform layer executes it and stops at the first success.

/// One replacement technique. See the browser layer for the implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Restore the saved range, verify the selected string still matches the
    /// recorded text, then issue a single undoable insert-text command.
    ReselectInsert,
    /// Splice the new text into a form control's value at the first
    /// occurrence of the original, then synthesize one `input` event.
    ValueSplice,
    /// First-occurrence string replacement inside the editable node's
    /// serialized markup.
    MarkupSplice,
    /// Operate on the saved range endpoints directly: same-node offset
    /// splice, or clear the spanned contents and insert a fresh text node.
    RangeSplice,
    /// Write the text to the clipboard, restore the range, and issue a paste
    /// command.
    SimulatedPaste,
    /// Dispatch a synthetic insert-text input event at the active element.
    SyntheticInput,
    /// Dispatch a synthetic keydown per character. Last resort before the
    /// clipboard.
    SyntheticKeys,
    /// Terminal fallback: copy to the clipboard and tell the user to paste.
    ClipboardCopy,
}

/// Why a single strategy attempt failed. Failure never propagates beyond the
/// attempt; it only selects fallthrough to the next strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The saved range no longer selects the recorded text.
    StaleRange,
    /// The original text was not found verbatim where this strategy looks.
    TextNotFound,
    /// The strategy does not apply to this target kind.
    NotApplicable,
    /// The editing command was rejected or reported no effect.
    CommandRejected,
    /// The platform call itself failed.
    Platform(String),
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailReason::StaleRange => write!(f, "saved range is stale"),
            FailReason::TextNotFound => write!(f, "original text not found"),
            FailReason::NotApplicable => write!(f, "strategy not applicable"),
            FailReason::CommandRejected => write!(f, "editing command rejected"),
            FailReason::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

/// Result of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Terminal: stop trying further strategies.
    Replaced,
    /// Non-terminal: fall through to the next strategy.
    Failed(FailReason),
}

/// Result of a whole engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome {
    /// A strategy mutated the page in place.
    Applied(StrategyKind),
    /// Everything in-place failed; the text is on the clipboard and the user
    /// was asked to paste manually.
    CopiedToClipboard,
    /// Even the clipboard write failed. The designed floor is the clipboard,
    /// so this only happens when the platform denies clipboard access.
    Failed,
}

impl EngineOutcome {
    /// Whether the new text ended up in the page without user help.
    pub fn replaced_in_place(&self) -> bool {
        matches!(self, EngineOutcome::Applied(_))
    }
}

use StrategyKind::*;

/// Plain fields, generic contenteditable, and unrecognized pages.
pub const GENERIC_ORDER: &[StrategyKind] = &[
    ReselectInsert,
    ValueSplice,
    MarkupSplice,
    RangeSplice,
    ClipboardCopy,
];

/// Google Docs virtualizes its text layer; generic DOM splices desync it, so
/// after the standard insert the engine goes straight to the simulated
/// editor-level inputs.
pub const GOOGLE_DOCS_ORDER: &[StrategyKind] = &[
    ReselectInsert,
    SimulatedPaste,
    SyntheticInput,
    SyntheticKeys,
    ClipboardCopy,
];

/// Notion tolerates direct range splices but needs an input event afterward
/// to notice the change, hence the synthetic input before the paste path.
pub const NOTION_ORDER: &[StrategyKind] = &[
    ReselectInsert,
    RangeSplice,
    SyntheticInput,
    SimulatedPaste,
    SyntheticKeys,
    ClipboardCopy,
];

/// GitHub's embedded editors keep a hidden textarea, so the value splice is
/// worth trying before the synthetic paths.
pub const GITHUB_ORDER: &[StrategyKind] = &[
    ReselectInsert,
    ValueSplice,
    MarkupSplice,
    RangeSplice,
    SyntheticInput,
    ClipboardCopy,
];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ORDERS: &[&[StrategyKind]] =
        &[GENERIC_ORDER, GOOGLE_DOCS_ORDER, NOTION_ORDER, GITHUB_ORDER];

    #[test]
    fn every_order_starts_least_invasive() {
        for order in ALL_ORDERS {
            assert_eq!(order.first(), Some(&ReselectInsert));
        }
    }

    #[test]
    fn every_order_bottoms_out_at_clipboard_exactly_once() {
        for order in ALL_ORDERS {
            assert_eq!(order.last(), Some(&ClipboardCopy));
            assert_eq!(
                order.iter().filter(|s| **s == ClipboardCopy).count(),
                1,
                "clipboard fallback must be terminal and unique"
            );
        }
    }

    #[test]
    fn orders_have_no_duplicates() {
        for order in ALL_ORDERS {
            for (i, a) in order.iter().enumerate() {
                assert!(!order[i + 1..].contains(a));
            }
        }
    }

    #[test]
    fn failure_display_is_human_readable() {
        let reason = FailReason::Platform("no window".into());
        assert_eq!(reason.to_string(), "platform error: no window");
        assert_eq!(FailReason::StaleRange.to_string(), "saved range is stale");
    }
}
