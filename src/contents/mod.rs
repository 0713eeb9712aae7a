// Engine content object boundary

use serde::{Deserialize, Serialize};

/// Navigation capability as reported by the engine's navigation controller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default)]
    pub can_go_back: bool,
    #[serde(default)]
    pub can_go_forward: bool,
}

/// Live engine handle for one browser view's document and navigation state
pub trait WebContents {
    fn navigation_state(&self) -> NavigationState;

    /// Title of the last committed entry
    fn title(&self) -> String {
        String::new()
    }
}
