use tracing::{debug, trace};

use crate::widget::{WebWidget, WidgetEvent};

use super::WidgetBridge;

impl<W: WebWidget> WidgetBridge<W> {
    /// Fold one widget callback into the view state.
    pub(super) fn handle_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::LoadStarted { url } => {
                let url = url.or_else(|| self.widget.current_url());
                debug!(url = ?url, "load started");
                self.state.begin_load(url);
            }
            WidgetEvent::Progress(progress) => {
                trace!(progress, "load progress");
                self.state.update_progress(progress);
            }
            WidgetEvent::LoadFinished { url } => {
                let url = url.or_else(|| self.widget.current_url());
                debug!(url = ?url, "load finished");
                self.state.finish_load(url);
                self.refresh_history_flags();
            }
            WidgetEvent::Error(error) => {
                debug!(
                    code = error.error.code,
                    main_frame = error.is_main_frame(),
                    description = %error.error.description,
                    "load error"
                );
                self.state.push_error(error);
            }
            WidgetEvent::TitleReceived(title) => {
                debug!(title = %title, "title received");
                self.state.set_page_title(title);
            }
            WidgetEvent::IconReceived(icon) => {
                trace!(width = icon.width, height = icon.height, "icon received");
                self.state.set_page_icon(icon);
            }
            WidgetEvent::HistoryUpdated => self.refresh_history_flags(),
        }
    }
}
