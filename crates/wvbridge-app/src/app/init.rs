//! Window creation and widget attachment.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;
use wvbridge_config::WebViewSection;
use wvbridge_webview::{BridgeHooks, SavedViewState, ViewState, WebViewConfig, WidgetBridge, WryWidget};

use super::bounds::window_bounds;
use super::core::WvApp;
use super::types::WINDOW_TITLE;

fn webview_config(section: &WebViewSection) -> WebViewConfig {
    WebViewConfig {
        transparent: section.transparent,
        devtools: section.devtools,
        user_agent: section.user_agent.clone(),
        clipboard: section.clipboard,
        autoplay: section.autoplay,
    }
}

impl WvApp {
    /// Create the window and attach a webview to it.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_transparent(self.config.webview.transparent)
            .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 768.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let state = Arc::new(self.initial_state());
        let bounds = window_bounds(&window);
        let config = webview_config(&self.config.webview);
        let hooks = BridgeHooks::<WryWidget>::new()
            .on_dispose(|_| tracing::debug!("Webview disposed"));

        let attached = WidgetBridge::attach(
            Arc::clone(&state),
            &self.navigator,
            |sink| WryWidget::build_as_child(&*window, bounds, &config, sink),
            hooks,
        );
        match attached {
            Ok(bridge) => {
                self.bridge = Some(bridge);
                self.state = Some(state);
                self.window = Some(window);
                true
            }
            Err(e) => {
                tracing::error!("Failed to attach webview: {e}");
                false
            }
        }
    }

    /// Saved history for this session when restoring, otherwise the start page.
    fn initial_state(&self) -> ViewState {
        match self.load_saved() {
            Some(saved) => {
                tracing::info!(session = %self.session_id, "Restoring session");
                let state = ViewState::from_saved(saved);
                // Shown if the saved history is rejected.
                state.set_content(self.start.clone());
                state
            }
            None => ViewState::new(self.start.clone()),
        }
    }

    fn load_saved(&self) -> Option<SavedViewState> {
        if !self.restore {
            return None;
        }
        let store = self.store.as_ref()?;
        match store.load(&self.session_id) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Ignoring saved session: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webview_config_mirrors_section() {
        let section = WebViewSection {
            transparent: true,
            devtools: false,
            user_agent: None,
            clipboard: false,
            autoplay: true,
        };
        let config = webview_config(&section);
        assert!(config.transparent);
        assert!(!config.devtools);
        assert!(config.user_agent.is_none());
        assert!(!config.clipboard);
        assert!(config.autoplay);
    }
}
