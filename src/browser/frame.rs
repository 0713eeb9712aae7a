use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use url::Url;

/// Engine-wide frame identifier (renderer process id + frame routing id)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GlobalFrameId {
    pub child_id: i32,
    pub frame_routing_id: i32,
}

impl GlobalFrameId {
    pub fn new(child_id: i32, frame_routing_id: i32) -> Self {
        Self {
            child_id,
            frame_routing_id,
        }
    }
}

impl fmt::Display for GlobalFrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.child_id, self.frame_routing_id)
    }
}

/// Frame host as described by the engine in lifecycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHost {
    pub id: GlobalFrameId,

    /// Parent frame; absent for the main frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<GlobalFrameId>,
}

impl FrameHost {
    pub fn main(id: GlobalFrameId) -> Self {
        Self { id, parent: None }
    }

    pub fn child(id: GlobalFrameId, parent: GlobalFrameId) -> Self {
        Self {
            id,
            parent: Some(parent),
        }
    }

    pub fn is_main(&self) -> bool {
        self.parent.is_none()
    }
}

/// Load that committed in a frame and has not reported load end yet
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PendingLoad {
    pub url: Option<Url>,
    pub http_status: i32,
}

/// Addressable navigation context (main document or sub-frame).
///
/// Owned by [`BrowserInfo`](super::BrowserInfo); everything else holds weak
/// references or short-lived clones of the registry's `Rc`.
#[derive(Debug)]
pub struct Frame {
    id: GlobalFrameId,
    parent: Option<GlobalFrameId>,
    main: bool,
    url: RefCell<Option<Url>>,
    focused: Cell<bool>,
    pending_load: RefCell<Option<PendingLoad>>,
}

impl Frame {
    pub(crate) fn new(host: FrameHost) -> Self {
        Self {
            id: host.id,
            parent: host.parent,
            main: host.is_main(),
            url: RefCell::new(None),
            focused: Cell::new(false),
            pending_load: RefCell::new(None),
        }
    }

    /// Unregistered stand-in for a frame the registry does not know. Its
    /// parent is unknown.
    pub(crate) fn temporary(id: GlobalFrameId, is_main_frame: bool) -> Self {
        Self {
            id,
            parent: None,
            main: is_main_frame,
            url: RefCell::new(None),
            focused: Cell::new(false),
            pending_load: RefCell::new(None),
        }
    }

    pub fn id(&self) -> GlobalFrameId {
        self.id
    }

    pub fn parent(&self) -> Option<GlobalFrameId> {
        self.parent
    }

    pub fn is_main(&self) -> bool {
        self.main
    }

    /// Last committed URL
    pub fn url(&self) -> Option<Url> {
        self.url.borrow().clone()
    }

    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.borrow().is_some()
    }

    pub(crate) fn set_focused(&self, focused: bool) {
        self.focused.set(focused);
    }

    /// Record a committed navigation; replaces any unfinished load
    pub(crate) fn begin_load(&self, url: Option<Url>, http_status: i32) {
        self.url.replace(url.clone());
        self.pending_load.replace(Some(PendingLoad { url, http_status }));
    }

    pub(crate) fn take_pending_load(&self) -> Option<PendingLoad> {
        self.pending_load.borrow_mut().take()
    }
}
