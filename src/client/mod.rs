// Client contract: higher-level callbacks resolved through the browser handle

use crate::browser::{Browser, Frame};
use crate::event::{ConsoleLevel, PageTransition, TerminationStatus};
use std::path::Path;
use std::rc::Rc;
use url::Url;

/// Client object attached to a browser. Every handler is optional.
pub trait Client {
    fn display_handler(&self) -> Option<Rc<dyn DisplayHandler>> {
        None
    }

    fn load_handler(&self) -> Option<Rc<dyn LoadHandler>> {
        None
    }

    fn request_handler(&self) -> Option<Rc<dyn RequestHandler>> {
        None
    }

    fn focus_handler(&self) -> Option<Rc<dyn FocusHandler>> {
        None
    }
}

/// Browser display state notifications
#[allow(unused_variables)]
pub trait DisplayHandler {
    fn on_address_change(&self, browser: &Browser, frame: &Frame, url: &Url) {}

    fn on_title_change(&self, browser: &Browser, title: &str) {}

    fn on_favicon_url_change(&self, browser: &Browser, icon_urls: &[Url]) {}

    fn on_fullscreen_mode_change(&self, browser: &Browser, fullscreen: bool) {}

    /// Target URL hint, e.g. for a hovered link. `None` clears it.
    fn on_status_message(&self, browser: &Browser, value: Option<&str>) {}

    /// Return `true` to stop the message from being logged elsewhere.
    fn on_console_message(
        &self,
        browser: &Browser,
        level: ConsoleLevel,
        message: &str,
        source: &str,
        line: i32,
    ) -> bool {
        false
    }

    fn on_loading_progress_change(&self, browser: &Browser, progress: f64) {}
}

/// Load lifecycle notifications
#[allow(unused_variables)]
pub trait LoadHandler {
    fn on_loading_state_change(
        &self,
        browser: &Browser,
        is_loading: bool,
        can_go_back: bool,
        can_go_forward: bool,
    ) {
    }

    fn on_load_start(&self, browser: &Browser, frame: &Frame, transition: PageTransition) {}

    fn on_load_end(&self, browser: &Browser, frame: &Frame, http_status: i32) {}

    fn on_load_error(&self, browser: &Browser, frame: &Frame, error_code: i32, failed_url: Option<&Url>) {}
}

/// Renderer and plugin lifecycle notifications
#[allow(unused_variables)]
pub trait RequestHandler {
    fn on_render_view_ready(&self, browser: &Browser) {}

    fn on_render_process_terminated(&self, browser: &Browser, status: TerminationStatus) {}

    fn on_plugin_crashed(&self, browser: &Browser, plugin_path: &Path) {}
}

#[allow(unused_variables)]
pub trait FocusHandler {
    fn on_got_focus(&self, browser: &Browser) {}
}
