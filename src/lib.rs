// Browser identity, frames and the browser handle
pub mod browser;

// Client callback contract
pub mod client;

// Configuration (TOML + environment overrides)
pub mod config;

// Engine content object boundary
pub mod contents;

// State tracker fed by engine callbacks
pub mod delegate;

// Engine event model
pub mod event;

// Observer contract and observer list
pub mod observer;

// Trace replay harness
pub mod replay;

// State record, change mask and transitions
pub mod state;

#[cfg(test)]
mod test_support;

pub use browser::{Browser, BrowserInfo, Frame, FrameHost, GlobalFrameId};
pub use delegate::ContentsDelegate;
pub use event::EngineEvent;
pub use observer::ContentsObserver;
pub use state::{StateChangeMask, StateSnapshot, StateTransition};
