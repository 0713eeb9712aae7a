// Coarse browser state and change flags

mod record;

pub use record::StateRecord;

use crate::browser::GlobalFrameId;
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags that represent which state dimensions changed as the result of
    /// one engine event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct StateChangeMask: u8 {
        const NAVIGATION = 1 << 0;
        const DOCUMENT = 1 << 1;
        const FULLSCREEN = 1 << 2;
        const FOCUSED_FRAME = 1 << 3;
    }
}

/// Copy of the state record that can leave the control thread
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub is_loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub has_document: bool,
    pub is_fullscreen: bool,

    /// None while the main frame is focused
    pub focused_frame: Option<GlobalFrameId>,
}

/// State transition message broadcast to feed subscribers
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateTransition {
    pub browser_id: i32,
    pub changed: StateChangeMask,
    pub state: StateSnapshot,
    pub timestamp: DateTime<Utc>,
}
