use super::ContentsDelegate;
use crate::event::EngineEvent;
use tracing::trace;

impl ContentsDelegate {
    /// Route an engine event to its entry point.
    ///
    /// Returns the client's verdict for console messages and `false` for
    /// every other event.
    pub fn dispatch(&self, event: &EngineEvent) -> bool {
        trace!(event = event.name(), "Dispatching engine event");

        match event {
            EngineEvent::LoadingStateChanged {
                to_different_document,
            } => self.loading_state_changed(*to_different_document),
            EngineEvent::UpdateTargetUrl { url } => self.update_target_url(url.as_ref()),
            EngineEvent::ConsoleMessage {
                level,
                message,
                line_no,
                source_id,
            } => return self.did_add_message_to_console(*level, message, *line_no, source_id),
            EngineEvent::MainFrameNavigated => self.did_navigate_main_frame_post_commit(),
            EngineEvent::EnterFullscreen { requesting_frame } => {
                self.enter_fullscreen_mode_for_tab(*requesting_frame)
            }
            EngineEvent::ExitFullscreen => self.exit_fullscreen_mode_for_tab(),
            EngineEvent::FrameCreated { frame } => self.render_frame_created(*frame),
            EngineEvent::FrameHostChanged { old, new } => self.render_frame_host_changed(*old, *new),
            EngineEvent::FrameDeleted { frame } => self.render_frame_deleted(*frame),
            EngineEvent::RenderViewReady => self.render_view_ready(),
            EngineEvent::RenderProcessGone { status } => self.render_process_gone(*status),
            EngineEvent::FrameFocused { frame } => self.on_frame_focused(*frame),
            EngineEvent::DocumentAvailable => self.document_available_in_main_frame(),
            EngineEvent::LoadProgress { progress } => self.load_progress_changed(*progress),
            EngineEvent::StopLoading => self.did_stop_loading(),
            EngineEvent::NavigationFinished(navigation) => self.did_finish_navigation(navigation),
            EngineEvent::LoadFailed {
                frame,
                is_main_frame,
                url,
                error_code,
            } => self.did_fail_load(*frame, *is_main_frame, url.as_ref(), *error_code),
            EngineEvent::TitleSet { title } => self.title_was_set(title.as_deref()),
            EngineEvent::PluginCrashed {
                plugin_path,
                plugin_pid,
            } => self.plugin_crashed(plugin_path, *plugin_pid),
            EngineEvent::FaviconUrlsUpdated { candidates } => self.did_update_favicon_urls(candidates),
            EngineEvent::ContentsFocused => self.on_web_contents_focused(),
            EngineEvent::ContentsDestroyed => self.web_contents_destroyed(),
        }

        false
    }
}
