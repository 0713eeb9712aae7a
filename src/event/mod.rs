use crate::browser::{FrameHost, GlobalFrameId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;


/// Network error code meaning "no error"
pub const NET_OK: i32 = 0;

/// EngineEvent names one lifecycle callback delivered by the rendering engine.
///
/// Events carry the engine-level payload of the callback. The delegate's
/// `dispatch` routes each variant to its entry point, and the replay harness
/// reads them from recorded traces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    LoadingStateChanged {
        #[serde(default)]
        to_different_document: bool,
    },
    UpdateTargetUrl {
        #[serde(default)]
        url: Option<Url>,
    },
    ConsoleMessage {
        #[serde(default)]
        level: ConsoleLevel,
        message: String,
        #[serde(default)]
        line_no: i32,
        #[serde(default)]
        source_id: String,
    },
    MainFrameNavigated,
    EnterFullscreen {
        #[serde(default)]
        requesting_frame: Option<GlobalFrameId>,
    },
    ExitFullscreen,
    FrameCreated {
        frame: FrameHost,
    },
    FrameHostChanged {
        #[serde(default)]
        old: Option<FrameHost>,
        new: FrameHost,
    },
    FrameDeleted {
        frame: GlobalFrameId,
    },
    RenderViewReady,
    RenderProcessGone {
        status: TerminationStatus,
    },
    FrameFocused {
        frame: GlobalFrameId,
    },
    DocumentAvailable,
    LoadProgress {
        progress: f64,
    },
    StopLoading,
    NavigationFinished(NavigationHandle),
    LoadFailed {
        frame: GlobalFrameId,
        #[serde(default)]
        is_main_frame: bool,
        #[serde(default)]
        url: Option<Url>,
        error_code: i32,
    },
    TitleSet {
        #[serde(default)]
        title: Option<String>,
    },
    PluginCrashed {
        plugin_path: PathBuf,
        #[serde(default)]
        plugin_pid: u32,
    },
    FaviconUrlsUpdated {
        #[serde(default)]
        candidates: Vec<FaviconUrl>,
    },
    ContentsFocused,
    ContentsDestroyed,
}

impl EngineEvent {
    /// Stable snake_case name, matching the serialized `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::LoadingStateChanged { .. } => "loading_state_changed",
            EngineEvent::UpdateTargetUrl { .. } => "update_target_url",
            EngineEvent::ConsoleMessage { .. } => "console_message",
            EngineEvent::MainFrameNavigated => "main_frame_navigated",
            EngineEvent::EnterFullscreen { .. } => "enter_fullscreen",
            EngineEvent::ExitFullscreen => "exit_fullscreen",
            EngineEvent::FrameCreated { .. } => "frame_created",
            EngineEvent::FrameHostChanged { .. } => "frame_host_changed",
            EngineEvent::FrameDeleted { .. } => "frame_deleted",
            EngineEvent::RenderViewReady => "render_view_ready",
            EngineEvent::RenderProcessGone { .. } => "render_process_gone",
            EngineEvent::FrameFocused { .. } => "frame_focused",
            EngineEvent::DocumentAvailable => "document_available",
            EngineEvent::LoadProgress { .. } => "load_progress",
            EngineEvent::StopLoading => "stop_loading",
            EngineEvent::NavigationFinished(_) => "navigation_finished",
            EngineEvent::LoadFailed { .. } => "load_failed",
            EngineEvent::TitleSet { .. } => "title_set",
            EngineEvent::PluginCrashed { .. } => "plugin_crashed",
            EngineEvent::FaviconUrlsUpdated { .. } => "favicon_urls_updated",
            EngineEvent::ContentsFocused => "contents_focused",
            EngineEvent::ContentsDestroyed => "contents_destroyed",
        }
    }
}

/// Completed navigation as reported by the engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationHandle {
    pub frame: GlobalFrameId,
    #[serde(default)]
    pub is_main_frame: bool,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub has_committed: bool,

    /// Network error code, [`NET_OK`] on success
    #[serde(default)]
    pub net_error: i32,
    #[serde(default)]
    pub http_status: i32,
    #[serde(default)]
    pub transition: PageTransition,
}

impl NavigationHandle {
    pub fn is_error(&self) -> bool {
        self.net_error != NET_OK
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleLevel {
    Verbose,
    #[default]
    Info,
    Warning,
    Error,
}

/// How a renderer process went away
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationStatus {
    NormalTermination,
    AbnormalTermination,
    ProcessWasKilled,
    ProcessCrashed,
    OutOfMemory,
    LaunchFailed,
}

impl TerminationStatus {
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, TerminationStatus::NormalTermination)
    }
}

/// Core navigation transition type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageTransition {
    #[default]
    Link,
    Typed,
    AutoBookmark,
    AutoSubframe,
    ManualSubframe,
    Generated,
    AutoToplevel,
    FormSubmit,
    Reload,
    Keyword,
    KeywordGenerated,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconType {
    #[default]
    Favicon,
    TouchIcon,
    TouchPrecomposedIcon,
    WebManifestIcon,
}

/// Icon candidate advertised by a document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaviconUrl {
    pub icon_url: Url,
    #[serde(default)]
    pub icon_type: IconType,
}
