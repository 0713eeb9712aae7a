use super::{StateChangeMask, StateSnapshot};
use crate::browser::{Frame, GlobalFrameId};
use crate::contents::NavigationState;
use std::rc::{Rc, Weak};

/// Weak back-reference to the focused sub-frame
#[derive(Debug, Clone)]
struct FocusedFrame {
    id: GlobalFrameId,
    frame: Weak<Frame>,
}

/// Mutable browser state owned by the delegate.
///
/// Every setter compares against the stored value and returns the tag of the
/// dimension it changed, or an empty mask when the value was already current.
#[derive(Debug, Default)]
pub struct StateRecord {
    is_loading: bool,
    can_go_back: bool,
    can_go_forward: bool,
    has_document: bool,
    is_fullscreen: bool,
    focused_frame: Option<FocusedFrame>,
}

fn update_flag(slot: &mut bool, value: bool, tag: StateChangeMask) -> StateChangeMask {
    if *slot == value {
        return StateChangeMask::empty();
    }
    *slot = value;
    tag
}

impl StateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    pub fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }

    pub fn has_document(&self) -> bool {
        self.has_document
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Focused sub-frame, if it is still alive
    pub fn focused_frame(&self) -> Option<Rc<Frame>> {
        self.focused_frame.as_ref().and_then(|f| f.frame.upgrade())
    }

    pub fn focused_frame_id(&self) -> Option<GlobalFrameId> {
        self.focused_frame.as_ref().map(|f| f.id)
    }

    pub fn navigation(&self) -> NavigationState {
        NavigationState {
            is_loading: self.is_loading,
            can_go_back: self.can_go_back,
            can_go_forward: self.can_go_forward,
        }
    }

    /// Recompute the navigation triple from the engine's current values
    pub fn apply_navigation(&mut self, navigation: NavigationState) -> StateChangeMask {
        update_flag(&mut self.is_loading, navigation.is_loading, StateChangeMask::NAVIGATION)
            | update_flag(&mut self.can_go_back, navigation.can_go_back, StateChangeMask::NAVIGATION)
            | update_flag(
                &mut self.can_go_forward,
                navigation.can_go_forward,
                StateChangeMask::NAVIGATION,
            )
    }

    pub fn set_loading(&mut self, is_loading: bool) -> StateChangeMask {
        update_flag(&mut self.is_loading, is_loading, StateChangeMask::NAVIGATION)
    }

    pub fn set_document(&mut self, has_document: bool) -> StateChangeMask {
        update_flag(&mut self.has_document, has_document, StateChangeMask::DOCUMENT)
    }

    pub fn set_fullscreen(&mut self, is_fullscreen: bool) -> StateChangeMask {
        update_flag(&mut self.is_fullscreen, is_fullscreen, StateChangeMask::FULLSCREEN)
    }

    /// Point the focus at `frame`; `None` means the main frame has focus.
    pub fn set_focused_frame(&mut self, frame: Option<&Rc<Frame>>) -> StateChangeMask {
        let new_id = frame.map(|f| f.id());
        if self.focused_frame_id() == new_id {
            return StateChangeMask::empty();
        }
        self.focused_frame = frame.map(|f| FocusedFrame {
            id: f.id(),
            frame: Rc::downgrade(f),
        });
        StateChangeMask::FOCUSED_FRAME
    }

    /// Drop the focus reference if it points at the deleted frame
    pub fn clear_focused_frame_if(&mut self, deleted: GlobalFrameId) -> StateChangeMask {
        if self.focused_frame_id() != Some(deleted) {
            return StateChangeMask::empty();
        }
        self.focused_frame = None;
        StateChangeMask::FOCUSED_FRAME
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            is_loading: self.is_loading,
            can_go_back: self.can_go_back,
            can_go_forward: self.can_go_forward,
            has_document: self.has_document,
            is_fullscreen: self.is_fullscreen,
            focused_frame: self.focused_frame_id(),
        }
    }
}
