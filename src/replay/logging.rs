use crate::browser::{Browser, Frame};
use crate::client::{Client, DisplayHandler, FocusHandler, LoadHandler, RequestHandler};
use crate::event::{ConsoleLevel, PageTransition, TerminationStatus};
use crate::observer::ContentsObserver;
use crate::state::StateChangeMask;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use tracing::{info, trace, warn};
use url::Url;

/// Observer that records every change mask and logs it
#[derive(Debug)]
pub struct TransitionJournal {
    browser_id: i32,
    transitions: RefCell<Vec<StateChangeMask>>,
    destroyed: Cell<bool>,
}

impl TransitionJournal {
    pub fn new(browser_id: i32) -> Self {
        Self {
            browser_id,
            transitions: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
        }
    }

    pub fn transitions(&self) -> Vec<StateChangeMask> {
        self.transitions.borrow().clone()
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed.get()
    }
}

impl ContentsObserver for TransitionJournal {
    fn on_state_changed(&self, changed: StateChangeMask) {
        info!(browser_id = self.browser_id, ?changed, "State changed");
        self.transitions.borrow_mut().push(changed);
    }

    fn on_web_contents_destroyed(&self) {
        info!(browser_id = self.browser_id, "Contents destroyed");
        self.destroyed.set(true);
    }
}

/// Client that logs every callback it receives
#[derive(Debug, Default)]
pub struct LoggingClient {
    handlers: Rc<LoggingHandlers>,
}

impl LoggingClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Client for LoggingClient {
    fn display_handler(&self) -> Option<Rc<dyn DisplayHandler>> {
        Some(Rc::clone(&self.handlers) as Rc<dyn DisplayHandler>)
    }

    fn load_handler(&self) -> Option<Rc<dyn LoadHandler>> {
        Some(Rc::clone(&self.handlers) as Rc<dyn LoadHandler>)
    }

    fn request_handler(&self) -> Option<Rc<dyn RequestHandler>> {
        Some(Rc::clone(&self.handlers) as Rc<dyn RequestHandler>)
    }

    fn focus_handler(&self) -> Option<Rc<dyn FocusHandler>> {
        Some(Rc::clone(&self.handlers) as Rc<dyn FocusHandler>)
    }
}

#[derive(Debug, Default)]
struct LoggingHandlers;

impl DisplayHandler for LoggingHandlers {
    fn on_address_change(&self, browser: &Browser, frame: &Frame, url: &Url) {
        info!(browser_id = browser.id(), frame = %frame.id(), url = %url, "Address changed");
    }

    fn on_title_change(&self, browser: &Browser, title: &str) {
        info!(browser_id = browser.id(), title, "Title changed");
    }

    fn on_favicon_url_change(&self, browser: &Browser, icon_urls: &[Url]) {
        info!(browser_id = browser.id(), count = icon_urls.len(), "Favicon URLs changed");
    }

    fn on_fullscreen_mode_change(&self, browser: &Browser, fullscreen: bool) {
        info!(browser_id = browser.id(), fullscreen, "Fullscreen mode changed");
    }

    fn on_status_message(&self, browser: &Browser, value: Option<&str>) {
        info!(browser_id = browser.id(), status = value, "Status message");
    }

    fn on_console_message(
        &self,
        browser: &Browser,
        level: ConsoleLevel,
        message: &str,
        source: &str,
        line: i32,
    ) -> bool {
        trace!(browser_id = browser.id(), ?level, source, line, "Console message seen");
        // Observe only; forwarding is left to the delegate's config
        false
    }

    fn on_loading_progress_change(&self, browser: &Browser, progress: f64) {
        info!(browser_id = browser.id(), progress, "Loading progress");
    }
}

impl LoadHandler for LoggingHandlers {
    fn on_loading_state_change(
        &self,
        browser: &Browser,
        is_loading: bool,
        can_go_back: bool,
        can_go_forward: bool,
    ) {
        info!(
            browser_id = browser.id(),
            is_loading,
            can_go_back,
            can_go_forward,
            "Loading state changed"
        );
    }

    fn on_load_start(&self, browser: &Browser, frame: &Frame, transition: PageTransition) {
        info!(browser_id = browser.id(), frame = %frame.id(), ?transition, "Load start");
    }

    fn on_load_end(&self, browser: &Browser, frame: &Frame, http_status: i32) {
        info!(browser_id = browser.id(), frame = %frame.id(), http_status, "Load end");
    }

    fn on_load_error(&self, browser: &Browser, frame: &Frame, error_code: i32, failed_url: Option<&Url>) {
        warn!(
            browser_id = browser.id(),
            frame = %frame.id(),
            error_code,
            url = failed_url.map(Url::as_str),
            "Load error"
        );
    }
}

impl RequestHandler for LoggingHandlers {
    fn on_render_view_ready(&self, browser: &Browser) {
        info!(browser_id = browser.id(), "Render view ready");
    }

    fn on_render_process_terminated(&self, browser: &Browser, status: TerminationStatus) {
        warn!(browser_id = browser.id(), ?status, "Render process terminated");
    }

    fn on_plugin_crashed(&self, browser: &Browser, plugin_path: &Path) {
        warn!(browser_id = browser.id(), path = %plugin_path.display(), "Plugin crashed");
    }
}

impl FocusHandler for LoggingHandlers {
    fn on_got_focus(&self, browser: &Browser) {
        info!(browser_id = browser.id(), "Got focus");
    }
}
