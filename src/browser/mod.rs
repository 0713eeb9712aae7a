// Browser identity, browser handle and frame registry

mod frame;

pub use frame::{Frame, FrameHost, GlobalFrameId};

use crate::client::Client;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Public handle for one browser instance, carrying its client
pub struct Browser {
    id: i32,
    client: Option<Rc<dyn Client>>,
}

impl Browser {
    pub fn new(id: i32, client: Option<Rc<dyn Client>>) -> Self {
        Self { id, client }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn client(&self) -> Option<Rc<dyn Client>> {
        self.client.clone()
    }
}

impl fmt::Debug for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("id", &self.id)
            .field("has_client", &self.client.is_some())
            .finish()
    }
}

/// Stable identity of a logical browser.
///
/// Outlives content-object churn (e.g. renderer process swaps). The browser
/// handle is set after construction and cleared during teardown, so lookups
/// through it may legitimately come back empty.
pub struct BrowserInfo {
    browser_id: i32,
    browser: RefCell<Option<Rc<Browser>>>,
    frames: RefCell<BTreeMap<GlobalFrameId, Rc<Frame>>>,
}

impl BrowserInfo {
    pub fn new(browser_id: i32) -> Rc<Self> {
        Rc::new(Self {
            browser_id,
            browser: RefCell::new(None),
            frames: RefCell::new(BTreeMap::new()),
        })
    }

    pub fn browser_id(&self) -> i32 {
        self.browser_id
    }

    pub fn browser(&self) -> Option<Rc<Browser>> {
        self.browser.borrow().clone()
    }

    pub fn set_browser(&self, browser: Option<Rc<Browser>>) {
        self.browser.replace(browser);
    }

    /// Register the frame for `host`, or return the existing registration
    pub fn maybe_create_frame(&self, host: FrameHost) -> Rc<Frame> {
        let mut frames = self.frames.borrow_mut();
        Rc::clone(frames.entry(host.id).or_insert_with(|| {
            trace!(browser_id = self.browser_id, frame = %host.id, main = host.is_main(), "Frame registered");
            Rc::new(Frame::new(host))
        }))
    }

    pub fn remove_frame(&self, id: GlobalFrameId) -> Option<Rc<Frame>> {
        let removed = self.frames.borrow_mut().remove(&id);
        if removed.is_some() {
            trace!(browser_id = self.browser_id, frame = %id, "Frame removed");
        }
        removed
    }

    pub fn frame_for_host(&self, id: GlobalFrameId) -> Option<Rc<Frame>> {
        self.frames.borrow().get(&id).cloned()
    }

    /// Frame for `id`, falling back to the main frame for main-frame
    /// navigations and to an unregistered temporary frame otherwise.
    pub fn frame_or_temporary(&self, id: GlobalFrameId, is_main_frame: bool) -> Rc<Frame> {
        if let Some(frame) = self.frame_for_host(id) {
            return frame;
        }
        if is_main_frame {
            if let Some(main) = self.main_frame() {
                return main;
            }
        }
        trace!(browser_id = self.browser_id, frame = %id, main = is_main_frame, "Using temporary frame");
        Rc::new(Frame::temporary(id, is_main_frame))
    }

    pub fn main_frame(&self) -> Option<Rc<Frame>> {
        self.frames.borrow().values().find(|f| f.is_main()).cloned()
    }

    /// All registered frames, ordered by id
    pub fn all_frames(&self) -> Vec<Rc<Frame>> {
        self.frames.borrow().values().cloned().collect()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }
}

impl fmt::Debug for BrowserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserInfo")
            .field("browser_id", &self.browser_id)
            .field("has_browser", &self.browser.borrow().is_some())
            .field("frames", &self.frame_count())
            .finish()
    }
}

#[cfg(test)]
mod tests;
