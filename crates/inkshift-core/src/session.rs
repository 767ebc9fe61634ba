//! Interaction session: the single live selection slot and the UI state machine.
//!
//! The original design kept the live selection, the active UI elements, and the
//! event-race guard timestamps in free-floating module globals. Here they are
//! explicit state on one `Session` value owned by the interaction controller,
//! which makes the "exactly one live selection" invariant and the dismissal
//! guard testable without a DOM.

use web_time::{Duration, Instant};

/// Delay between the raw pointer-up event and reading the selection, letting
/// the browser finalize it first.
pub const SELECTION_SETTLE_MS: u64 = 10;

/// Pointer-downs within this window after a UI-internal pointer interaction
/// are treated as part of that interaction, not as "click outside".
pub const UI_POINTER_GUARD_MS: u64 = 100;

/// Delay before the deferred outside-click re-check, letting competing
/// handlers (menu open, submenu create) run first.
pub const DISMISS_RECHECK_MS: u64 = 10;

/// How long an error stays in the result panel before auto-dismissing.
pub const ERROR_DISMISS_MS: u64 = 3000;

/// A captured text selection. `N` is the platform's node handle type; the
/// browser layer instantiates it with an element reference, tests with
/// anything cheap.
///
/// Invariant: `text` is trimmed and never empty.
#[derive(Debug, Clone)]
pub struct SelectionSnapshot<N> {
    text: String,
    target: Option<N>,
}

impl<N> SelectionSnapshot<N> {
    /// Build a snapshot from the raw selected string. Returns `None` when the
    /// trimmed text is empty; empty selections are never recorded.
    pub fn new(raw_text: &str, target: Option<N>) -> Option<Self> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_owned(),
            target,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> Option<&N> {
        self.target.as_ref()
    }

    /// True iff no editable ancestor was found at capture time.
    pub fn is_read_only(&self) -> bool {
        self.target.is_none()
    }
}

/// Which submenu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubMenu {
    Languages,
    Tones,
}

/// What the result panel is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView {
    Loading,
    Error,
    Single,
    Alternatives,
}

/// Interaction controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    IconShown,
    MenuShown,
    SubMenuShown(SubMenu),
    ResultShown(ResultView),
}

/// Outcome of the pointer-down dismissal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissDecision {
    /// The pointer targeted our UI or landed inside the guard window.
    Ignore,
    /// Re-check after [`DISMISS_RECHECK_MS`]; tear down if still outside.
    RecheckAfterDelay,
}

/// Identifies one outbound backend request. A response is applied only when
/// its token still matches the session; anything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Per-page interaction session. Exactly one live selection at a time,
/// last-write-wins; superseded snapshots are simply dropped.
#[derive(Debug)]
pub struct Session<N> {
    state: UiState,
    selection: Option<SelectionSnapshot<N>>,
    last_ui_pointer: Option<Instant>,
    seq: u64,
}

impl<N> Default for Session<N> {
    fn default() -> Self {
        Self {
            state: UiState::Idle,
            selection: None,
            last_ui_pointer: None,
            seq: 0,
        }
    }
}

impl<N> Session<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn selection(&self) -> Option<&SelectionSnapshot<N>> {
        self.selection.as_ref()
    }

    /// Record a new selection, replacing any previous one, and show the icon.
    /// Any pending backend response becomes stale.
    pub fn capture(&mut self, snapshot: SelectionSnapshot<N>) {
        tracing::debug!(
            target: "inkshift::session",
            text_len = snapshot.text().len(),
            read_only = snapshot.is_read_only(),
            "selection captured"
        );
        self.invalidate_pending();
        self.selection = Some(snapshot);
        self.state = UiState::IconShown;
    }

    /// Tear everything down: UI back to idle, selection discarded, pending
    /// responses stale.
    pub fn dismiss(&mut self) {
        self.invalidate_pending();
        self.selection = None;
        self.state = UiState::Idle;
    }

    /// Icon activated: show the primary menu.
    pub fn icon_activated(&mut self) -> bool {
        if self.state == UiState::IconShown {
            self.state = UiState::MenuShown;
            true
        } else {
            false
        }
    }

    /// A menu choice that opens a submenu (translate or tone).
    pub fn open_submenu(&mut self, which: SubMenu) -> bool {
        if self.state == UiState::MenuShown {
            self.state = UiState::SubMenuShown(which);
            true
        } else {
            false
        }
    }

    /// Begin a backend request and move to the loading result panel. Rewrite
    /// goes here straight from the menu; translate/tone from their submenus.
    ///
    /// Returns `None` when there is no live selection to operate on.
    pub fn begin_request(&mut self) -> Option<RequestToken> {
        self.selection.as_ref()?;
        self.seq += 1;
        self.state = UiState::ResultShown(ResultView::Loading);
        Some(RequestToken(self.seq))
    }

    /// Whether a response for `token` is still current. Captures, dismissals,
    /// and newer requests all invalidate older tokens.
    pub fn accepts_response(&self, token: RequestToken) -> bool {
        token.0 == self.seq
    }

    /// Record what the result panel now shows.
    pub fn show_result(&mut self, view: ResultView) {
        self.state = UiState::ResultShown(view);
    }

    /// The user picked a result and it was applied; back to idle.
    pub fn result_applied(&mut self) {
        self.dismiss();
    }

    /// Note a pointer interaction on our own UI, arming the guard window.
    pub fn note_ui_pointer(&mut self, now: Instant) {
        self.last_ui_pointer = Some(now);
    }

    /// The dismissal rule for a raw pointer-down. UI creation and teardown
    /// are not atomic with respect to native event dispatch, so a click that
    /// opens a submenu must not also count as "click outside".
    pub fn dismissal(&self, now: Instant, target_in_ui: bool) -> DismissDecision {
        if target_in_ui {
            return DismissDecision::Ignore;
        }
        if let Some(last) = self.last_ui_pointer {
            if now.saturating_duration_since(last) < Duration::from_millis(UI_POINTER_GUARD_MS) {
                return DismissDecision::Ignore;
            }
        }
        DismissDecision::RecheckAfterDelay
    }

    fn invalidate_pending(&mut self) {
        self.seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(text: &str, editable: bool) -> SelectionSnapshot<u32> {
        SelectionSnapshot::new(text, editable.then_some(1)).unwrap()
    }

    #[test]
    fn empty_selection_is_never_recorded() {
        assert!(SelectionSnapshot::<u32>::new("   \n ", None).is_none());
        assert!(SelectionSnapshot::<u32>::new("", Some(1)).is_none());
    }

    #[test]
    fn snapshot_trims_and_derives_read_only() {
        let s = SelectionSnapshot::<u32>::new("  hello world \n", None).unwrap();
        assert_eq!(s.text(), "hello world");
        assert!(s.is_read_only());
        assert!(!snap("x", true).is_read_only());
    }

    #[test]
    fn single_slot_last_write_wins() {
        let mut session = Session::new();
        session.capture(snap("first", true));
        session.capture(snap("second", false));
        assert_eq!(session.selection().unwrap().text(), "second");
        assert_eq!(session.state(), UiState::IconShown);
    }

    #[test]
    fn menu_flow_transitions() {
        let mut session = Session::new();
        session.capture(snap("text", true));
        assert!(session.icon_activated());
        assert_eq!(session.state(), UiState::MenuShown);
        assert!(session.open_submenu(SubMenu::Languages));
        assert_eq!(session.state(), UiState::SubMenuShown(SubMenu::Languages));
        let token = session.begin_request().unwrap();
        assert_eq!(session.state(), UiState::ResultShown(ResultView::Loading));
        assert!(session.accepts_response(token));
    }

    #[test]
    fn begin_request_requires_selection() {
        let mut session = Session::<u32>::new();
        assert!(session.begin_request().is_none());
    }

    #[test]
    fn stale_response_is_rejected_after_new_selection() {
        let mut session = Session::new();
        session.capture(snap("one", true));
        session.icon_activated();
        let token = session.begin_request().unwrap();
        // A fast follow-up selection supersedes the in-flight request.
        session.capture(snap("two", true));
        assert!(!session.accepts_response(token));
    }

    #[test]
    fn stale_response_is_rejected_after_dismiss() {
        let mut session = Session::new();
        session.capture(snap("one", true));
        let token = session.begin_request().unwrap();
        session.dismiss();
        assert!(!session.accepts_response(token));
    }

    #[test]
    fn error_view_stays_current_until_superseded() {
        // The condition an error auto-dismiss timer re-checks when it fires:
        // the arming token still accepted and the error view still up.
        let mut session = Session::new();
        session.capture(snap("text", true));
        let token = session.begin_request().unwrap();
        session.show_result(ResultView::Error);
        assert!(session.accepts_response(token));
        assert_eq!(session.state(), UiState::ResultShown(ResultView::Error));

        // A new selection makes the timer a no-op.
        session.capture(snap("next", true));
        assert!(!session.accepts_response(token));
    }

    #[test]
    fn newer_request_invalidates_older_token() {
        let mut session = Session::new();
        session.capture(snap("one", true));
        let first = session.begin_request().unwrap();
        let second = session.begin_request().unwrap();
        assert!(!session.accepts_response(first));
        assert!(session.accepts_response(second));
    }

    #[test]
    fn pointer_on_ui_never_dismisses() {
        let session = Session::<u32>::new();
        assert_eq!(
            session.dismissal(Instant::now(), true),
            DismissDecision::Ignore
        );
    }

    #[test]
    fn pointer_inside_guard_window_is_ignored() {
        let mut session = Session::<u32>::new();
        let t0 = Instant::now();
        session.note_ui_pointer(t0);
        assert_eq!(
            session.dismissal(t0 + Duration::from_millis(UI_POINTER_GUARD_MS / 2), false),
            DismissDecision::Ignore
        );
    }

    #[test]
    fn pointer_outside_guard_window_defers_recheck() {
        let mut session = Session::<u32>::new();
        let t0 = Instant::now();
        session.note_ui_pointer(t0);
        assert_eq!(
            session.dismissal(t0 + Duration::from_millis(UI_POINTER_GUARD_MS * 2), false),
            DismissDecision::RecheckAfterDelay
        );
    }

    #[test]
    fn pointer_with_no_prior_ui_interaction_defers_recheck() {
        let session = Session::<u32>::new();
        assert_eq!(
            session.dismissal(Instant::now(), false),
            DismissDecision::RecheckAfterDelay
        );
    }
}
