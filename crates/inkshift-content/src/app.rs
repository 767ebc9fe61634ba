//! Shared per-page state.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{Element, HtmlElement};

use inkshift_browser::inkshift_core::{LiveTranslate, Session, Settings};
use inkshift_browser::{BrowserHost, CapturedSelection};

use crate::ui::Ui;

/// Everything the content script keeps between events. Single-threaded by
/// construction; interior mutability is `RefCell` all the way down.
pub struct App {
    pub host: BrowserHost,
    pub session: RefCell<Session<HtmlElement>>,
    /// The DOM side of the live selection, in lockstep with the session's
    /// snapshot slot.
    pub captured: RefCell<Option<CapturedSelection>>,
    pub settings: RefCell<Settings>,
    pub ui: RefCell<Ui>,
    pub live: RefCell<LiveTranslate>,
    pub live_timer: RefCell<Option<Timeout>>,
    pub live_block: RefCell<Option<Element>>,
}

impl App {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            host: BrowserHost::from_location(),
            session: RefCell::new(Session::new()),
            captured: RefCell::new(None),
            settings: RefCell::new(Settings::default()),
            ui: RefCell::new(Ui::new()),
            live: RefCell::new(LiveTranslate::new()),
            live_timer: RefCell::new(None),
            live_block: RefCell::new(None),
        })
    }

    /// Tear down all UI and forget the live selection.
    pub fn dismiss_all(&self) {
        self.session.borrow_mut().dismiss();
        self.captured.borrow_mut().take();
        self.ui.borrow_mut().hide_all();
    }
}
