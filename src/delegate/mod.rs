// Contents state tracker: engine callbacks in, observer and client callbacks out

mod dispatch;

use crate::browser::{Browser, BrowserInfo, Frame, FrameHost, GlobalFrameId};
use crate::client::{Client, DisplayHandler, FocusHandler, LoadHandler, RequestHandler};
use crate::config::ContentsConfig;
use crate::contents::{NavigationState, WebContents};
use crate::event::{
    ConsoleLevel, FaviconUrl, IconType, NavigationHandle, PageTransition, TerminationStatus,
};
use crate::observer::{ContentsObserver, ObserverList};
use crate::state::{StateChangeMask, StateRecord, StateSnapshot, StateTransition};
use chrono::Utc;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};
use url::Url;

/// Tracks browser state and executes client callbacks based on engine
/// callbacks.
///
/// Only used on the control thread. Every entry point takes `&self` and runs
/// to completion, including the observer fan-out, before returning; observers
/// may call back into the delegate while being notified.
pub struct ContentsDelegate {
    browser_info: Rc<BrowserInfo>,

    /// Content object currently observed
    contents: RefCell<Option<Rc<dyn WebContents>>>,

    state: RefCell<StateRecord>,

    /// Observers that want to be notified of changes to this object
    observers: ObserverList<dyn ContentsObserver>,

    /// Feed of state transitions for consumers off the control thread
    transition_tx: Option<broadcast::Sender<StateTransition>>,

    forward_console_to_log: bool,

    /// Set once the contents report destruction; the delegate is inert after
    destroyed: Cell<bool>,
}

impl ContentsDelegate {
    pub fn new(browser_info: Rc<BrowserInfo>) -> Self {
        Self::with_config(browser_info, &ContentsConfig::default())
    }

    pub fn with_config(browser_info: Rc<BrowserInfo>, config: &ContentsConfig) -> Self {
        let transition_tx = config.transitions.enabled.then(|| {
            let (tx, _) = broadcast::channel(config.transitions.capacity.max(1));
            tx
        });

        Self {
            browser_info,
            contents: RefCell::new(None),
            state: RefCell::new(StateRecord::new()),
            observers: ObserverList::new(),
            transition_tx,
            forward_console_to_log: config.console.forward_to_log,
            destroyed: Cell::new(false),
        }
    }

    /// Start observing `contents`, replacing any previous content object.
    /// Rebinding does not reset state.
    pub fn observe_web_contents(&self, contents: Option<Rc<dyn WebContents>>) {
        if self.destroyed.get() {
            warn!(browser_id = self.browser_id(), "Ignoring observe request after contents destroyed");
            return;
        }
        debug!(
            browser_id = self.browser_id(),
            attached = contents.is_some(),
            "Observing web contents"
        );
        self.contents.replace(contents);
    }

    /// The observer must either outlive this object or be removed before it
    /// is dropped. Registering twice is a no-op.
    pub fn add_observer(&self, observer: Rc<dyn ContentsObserver>) {
        if !self.observers.add(observer) {
            trace!(browser_id = self.browser_id(), "Observer already registered");
        }
    }

    /// Removing an unregistered observer is a no-op
    pub fn remove_observer(&self, observer: &Rc<dyn ContentsObserver>) {
        if !self.observers.remove(observer) {
            trace!(browser_id = self.browser_id(), "Observer was not registered");
        }
    }

    pub fn has_observer(&self, observer: &Rc<dyn ContentsObserver>) -> bool {
        self.observers.contains(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Subscribe to the state transition feed, if enabled
    pub fn subscribe_transitions(&self) -> Option<broadcast::Receiver<StateTransition>> {
        self.transition_tx.as_ref().map(|tx| tx.subscribe())
    }

    // Engine content callbacks

    pub fn loading_state_changed(&self, to_different_document: bool) {
        if self.is_inert("loading_state_changed") {
            return;
        }
        let Some(navigation) = self.current_navigation() else {
            debug!(browser_id = self.browser_id(), "Loading state changed without observed contents");
            return;
        };
        trace!(
            browser_id = self.browser_id(),
            to_different_document,
            is_loading = navigation.is_loading,
            "Loading state changed"
        );

        // The engine may repeat this call with unchanged values
        let changed = self.state.borrow_mut().apply_navigation(navigation);
        self.notify_state_changed(changed);
    }

    pub fn update_target_url(&self, url: Option<&Url>) {
        if self.is_inert("update_target_url") {
            return;
        }
        if let Some((browser, handler)) = self.display_handler() {
            handler.on_status_message(&browser, url.map(Url::as_str));
        }
    }

    /// Returns true if the client handled the message
    pub fn did_add_message_to_console(
        &self,
        level: ConsoleLevel,
        message: &str,
        line_no: i32,
        source_id: &str,
    ) -> bool {
        if self.is_inert("console_message") {
            return false;
        }

        if let Some((browser, handler)) = self.display_handler() {
            if handler.on_console_message(&browser, level, message, source_id, line_no) {
                return true;
            }
        }

        if self.forward_console_to_log {
            let browser_id = self.browser_id();
            match level {
                ConsoleLevel::Error => warn!(browser_id, source = source_id, line = line_no, "console: {}", message),
                ConsoleLevel::Warning => info!(browser_id, source = source_id, line = line_no, "console: {}", message),
                ConsoleLevel::Info => debug!(browser_id, source = source_id, line = line_no, "console: {}", message),
                ConsoleLevel::Verbose => trace!(browser_id, source = source_id, line = line_no, "console: {}", message),
            }
        }
        false
    }

    pub fn did_navigate_main_frame_post_commit(&self) {
        if self.is_inert("main_frame_navigated") {
            return;
        }
        debug!(browser_id = self.browser_id(), "Main frame navigation committed");
    }

    pub fn enter_fullscreen_mode_for_tab(&self, requesting_frame: Option<GlobalFrameId>) {
        if self.is_inert("enter_fullscreen") {
            return;
        }
        debug!(
            browser_id = self.browser_id(),
            frame = ?requesting_frame,
            "Fullscreen requested"
        );
        self.on_fullscreen_mode_change(true);
    }

    pub fn exit_fullscreen_mode_for_tab(&self) {
        if self.is_inert("exit_fullscreen") {
            return;
        }
        self.on_fullscreen_mode_change(false);
    }

    // Engine observer callbacks

    pub fn render_frame_created(&self, host: FrameHost) {
        if self.is_inert("frame_created") {
            return;
        }
        self.browser_info.maybe_create_frame(host);
    }

    pub fn render_frame_host_changed(&self, old_host: Option<FrameHost>, new_host: FrameHost) {
        if self.is_inert("frame_host_changed") {
            return;
        }
        trace!(
            browser_id = self.browser_id(),
            old = ?old_host.map(|h| h.id),
            new = %new_host.id,
            "Frame host changed"
        );
        // The old host reports its own deletion
        self.browser_info.maybe_create_frame(new_host);
    }

    pub fn render_frame_deleted(&self, id: GlobalFrameId) {
        if self.is_inert("frame_deleted") {
            return;
        }
        self.browser_info.remove_frame(id);

        let changed = self.state.borrow_mut().clear_focused_frame_if(id);
        self.notify_state_changed(changed);
    }

    pub fn render_view_ready(&self) {
        if self.is_inert("render_view_ready") {
            return;
        }
        if let Some((browser, handler)) = self.request_handler() {
            handler.on_render_view_ready(&browser);
        }
    }

    pub fn render_process_gone(&self, status: TerminationStatus) {
        if self.is_inert("render_process_gone") {
            return;
        }
        if status.is_abnormal() {
            warn!(browser_id = self.browser_id(), ?status, "Render process gone");
        } else {
            info!(browser_id = self.browser_id(), ?status, "Render process gone");
        }

        let changed = self.state.borrow_mut().set_loading(false);
        self.notify_state_changed(changed);

        if let Some((browser, handler)) = self.request_handler() {
            handler.on_render_process_terminated(&browser, status);
        }
    }

    pub fn on_frame_focused(&self, id: GlobalFrameId) {
        if self.is_inert("frame_focused") {
            return;
        }
        let Some(frame) = self.browser_info.frame_for_host(id) else {
            debug!(browser_id = self.browser_id(), frame = %id, "Focus on unknown frame");
            return;
        };
        if frame.is_focused() {
            return;
        }

        let previous = self.focused_frame().or_else(|| self.browser_info.main_frame());
        if let Some(previous) = previous {
            previous.set_focused(false);
        }
        frame.set_focused(true);

        let focused = (!frame.is_main()).then_some(&frame);
        let changed = self.state.borrow_mut().set_focused_frame(focused);
        self.notify_state_changed(changed);
    }

    pub fn document_available_in_main_frame(&self) {
        if self.is_inert("document_available") {
            return;
        }
        let changed = self.state.borrow_mut().set_document(true);
        self.notify_state_changed(changed);
    }

    pub fn load_progress_changed(&self, progress: f64) {
        if self.is_inert("load_progress") {
            return;
        }
        if let Some((browser, handler)) = self.display_handler() {
            handler.on_loading_progress_change(&browser, progress);
        }
    }

    pub fn did_stop_loading(&self) {
        if self.is_inert("stop_loading") {
            return;
        }
        let changed = self.state.borrow_mut().set_loading(false);
        self.notify_state_changed(changed);

        for frame in self.browser_info.all_frames() {
            if let Some(load) = frame.take_pending_load() {
                self.on_load_end(&frame, load.url.as_ref(), load.http_status);
            }
        }
    }

    pub fn did_finish_navigation(&self, navigation: &NavigationHandle) {
        if self.is_inert("navigation_finished") {
            return;
        }
        // E.g. a browser created without an initial URL
        if !navigation.has_committed && !navigation.is_error() {
            trace!(browser_id = self.browser_id(), frame = %navigation.frame, "Navigation finished without commit");
            return;
        }

        self.refresh_navigation();

        let frame = self
            .browser_info
            .frame_or_temporary(navigation.frame, navigation.is_main_frame);

        if navigation.is_error() {
            // No load start was sent for a failed navigation, so no load end either
            self.on_load_error(&frame, navigation.url.as_ref(), navigation.net_error);
            return;
        }

        frame.begin_load(navigation.url.clone(), navigation.http_status);
        self.on_load_start(&frame, navigation.transition);
        if frame.is_main() {
            if let Some(url) = &navigation.url {
                self.on_address_change(&frame, url);
            }
        }
    }

    pub fn did_fail_load(
        &self,
        id: GlobalFrameId,
        is_main_frame: bool,
        url: Option<&Url>,
        error_code: i32,
    ) {
        if self.is_inert("load_failed") {
            return;
        }
        self.refresh_navigation();

        let frame = self.browser_info.frame_or_temporary(id, is_main_frame);

        // The load started, so it also ends
        frame.take_pending_load();
        self.on_load_error(&frame, url, error_code);
        self.on_load_end(&frame, url, error_code);
    }

    /// `None` falls back to the observed contents' title
    pub fn title_was_set(&self, title: Option<&str>) {
        if self.is_inert("title_set") {
            return;
        }
        match title {
            Some(title) => self.on_title_change(title),
            None => {
                let title = self
                    .contents
                    .borrow()
                    .as_ref()
                    .map(|c| c.title())
                    .unwrap_or_default();
                self.on_title_change(&title);
            }
        }
    }

    pub fn plugin_crashed(&self, plugin_path: &Path, plugin_pid: u32) {
        if self.is_inert("plugin_crashed") {
            return;
        }
        warn!(
            browser_id = self.browser_id(),
            path = %plugin_path.display(),
            pid = plugin_pid,
            "Plugin crashed"
        );
        if let Some((browser, handler)) = self.request_handler() {
            handler.on_plugin_crashed(&browser, plugin_path);
        }
    }

    pub fn did_update_favicon_urls(&self, candidates: &[FaviconUrl]) {
        if self.is_inert("favicon_urls_updated") {
            return;
        }
        let icon_urls: Vec<Url> = candidates
            .iter()
            .filter(|c| c.icon_type == IconType::Favicon)
            .map(|c| c.icon_url.clone())
            .collect();

        if let Some((browser, handler)) = self.display_handler() {
            handler.on_favicon_url_change(&browser, &icon_urls);
        }
    }

    pub fn on_web_contents_focused(&self) {
        if self.is_inert("contents_focused") {
            return;
        }
        if let Some((browser, handler)) = self.focus_handler() {
            handler.on_got_focus(&browser);
        }
    }

    /// Terminal: notifies every observer once and leaves the delegate inert
    pub fn web_contents_destroyed(&self) {
        if self.destroyed.replace(true) {
            debug!(browser_id = self.browser_id(), "Contents already destroyed");
            return;
        }
        self.contents.replace(None);
        info!(browser_id = self.browser_id(), "Web contents destroyed");

        self.observers.for_each(|observer| observer.on_web_contents_destroyed());
    }

    // Accessors for state information. Changes are signaled to
    // ContentsObserver::on_state_changed.

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.borrow().can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.borrow().can_go_forward()
    }

    pub fn has_document(&self) -> bool {
        self.state.borrow().has_document()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.borrow().is_fullscreen()
    }

    /// Currently focused frame, or `None` if the main frame is focused
    pub fn focused_frame(&self) -> Option<Rc<Frame>> {
        self.state.borrow().focused_frame()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn browser_info(&self) -> &Rc<BrowserInfo> {
        &self.browser_info
    }

    pub fn browser(&self) -> Option<Rc<Browser>> {
        self.browser_info.browser()
    }

    pub fn client(&self) -> Option<Rc<dyn Client>> {
        self.browser().and_then(|b| b.client())
    }

    // Helpers for executing client callbacks

    pub fn on_address_change(&self, frame: &Frame, url: &Url) {
        if let Some((browser, handler)) = self.display_handler() {
            handler.on_address_change(&browser, frame, url);
        }
    }

    pub fn on_load_start(&self, frame: &Frame, transition: PageTransition) {
        trace!(browser_id = self.browser_id(), frame = %frame.id(), ?transition, "Load start");
        if let Some((browser, handler)) = self.load_handler() {
            handler.on_load_start(&browser, frame, transition);
        }
    }

    pub fn on_load_error(&self, frame: &Frame, url: Option<&Url>, error_code: i32) {
        debug!(
            browser_id = self.browser_id(),
            frame = %frame.id(),
            url = url.map(Url::as_str),
            error_code,
            "Load error"
        );
        if let Some((browser, handler)) = self.load_handler() {
            handler.on_load_error(&browser, frame, error_code, url);
        }
    }

    pub fn on_load_end(&self, frame: &Frame, url: Option<&Url>, http_status: i32) {
        trace!(
            browser_id = self.browser_id(),
            frame = %frame.id(),
            url = url.map(Url::as_str),
            http_status,
            "Load end"
        );
        if let Some((browser, handler)) = self.load_handler() {
            handler.on_load_end(&browser, frame, http_status);
        }
    }

    pub fn on_title_change(&self, title: &str) {
        if let Some((browser, handler)) = self.display_handler() {
            handler.on_title_change(&browser, title);
        }
    }

    fn on_fullscreen_mode_change(&self, fullscreen: bool) {
        let changed = self.state.borrow_mut().set_fullscreen(fullscreen);
        self.notify_state_changed(changed);

        // Acknowledged even when the state was already current
        if let Some((browser, handler)) = self.display_handler() {
            handler.on_fullscreen_mode_change(&browser, fullscreen);
        }
    }

    /// Fan out a non-empty change to observers, then the transition feed, then
    /// the client's loading-state callback when navigation changed.
    fn notify_state_changed(&self, changed: StateChangeMask) {
        if changed.is_empty() {
            return;
        }
        let state = self.snapshot();
        debug!(browser_id = self.browser_id(), ?changed, "Contents state changed");

        self.observers.for_each(|observer| observer.on_state_changed(changed));

        if let Some(tx) = &self.transition_tx {
            let _ = tx.send(StateTransition {
                browser_id: self.browser_id(),
                changed,
                state: state.clone(),
                timestamp: Utc::now(),
            });
        }

        if changed.contains(StateChangeMask::NAVIGATION) {
            if let Some((browser, handler)) = self.load_handler() {
                handler.on_loading_state_change(
                    &browser,
                    state.is_loading,
                    state.can_go_back,
                    state.can_go_forward,
                );
            }
        }
    }

    fn refresh_navigation(&self) {
        if let Some(navigation) = self.current_navigation() {
            let changed = self.state.borrow_mut().apply_navigation(navigation);
            self.notify_state_changed(changed);
        }
    }

    fn current_navigation(&self) -> Option<NavigationState> {
        self.contents.borrow().as_ref().map(|c| c.navigation_state())
    }

    fn browser_id(&self) -> i32 {
        self.browser_info.browser_id()
    }

    fn is_inert(&self, event: &'static str) -> bool {
        if self.destroyed.get() {
            debug!(browser_id = self.browser_id(), event, "Ignoring event after contents destroyed");
            return true;
        }
        false
    }

    fn display_handler(&self) -> Option<(Rc<Browser>, Rc<dyn DisplayHandler>)> {
        let browser = self.browser()?;
        let handler = browser.client()?.display_handler()?;
        Some((browser, handler))
    }

    fn load_handler(&self) -> Option<(Rc<Browser>, Rc<dyn LoadHandler>)> {
        let browser = self.browser()?;
        let handler = browser.client()?.load_handler()?;
        Some((browser, handler))
    }

    fn request_handler(&self) -> Option<(Rc<Browser>, Rc<dyn RequestHandler>)> {
        let browser = self.browser()?;
        let handler = browser.client()?.request_handler()?;
        Some((browser, handler))
    }

    fn focus_handler(&self) -> Option<(Rc<Browser>, Rc<dyn FocusHandler>)> {
        let browser = self.browser()?;
        let handler = browser.client()?.focus_handler()?;
        Some((browser, handler))
    }
}
