//! Drain widget callbacks and queued intents, then sleep until woken.

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::WvApp;
use super::types::WINDOW_TITLE;

impl WvApp {
    pub(super) fn pump(&mut self) {
        if let Some(bridge) = self.bridge.as_mut() {
            let handled = bridge.pump();
            if handled > 0 {
                tracing::trace!(handled, "bridge pumped");
            }
        }
        self.update_window_title();
    }

    /// Intents and widget callbacks both post [`UserEvent::Wake`], so the
    /// loop can wait without a timer.
    ///
    /// [`UserEvent::Wake`]: super::types::UserEvent::Wake
    pub(super) fn pump_and_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump();
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn update_window_title(&mut self) {
        let (Some(window), Some(state)) = (&self.window, &self.state) else {
            return;
        };
        let title = state.page_title().or_else(|| state.last_loaded_url());
        if title == self.shown_title {
            return;
        }
        match &title {
            Some(page) if !page.is_empty() => window.set_title(&format!("{page} - {WINDOW_TITLE}")),
            _ => window.set_title(WINDOW_TITLE),
        }
        self.shown_title = title;
    }
}
