use std::sync::Arc;

use tracing::{debug, info, warn};
use wvbridge_common::BridgeError;

use crate::navigator::Navigator;
use crate::state::{SavedViewState, ViewState};
use crate::widget::{WebWidget, WidgetEventSink};

use super::{BridgeHooks, WidgetBridge};

impl<W: WebWidget> WidgetBridge<W> {
    /// Create a widget and attach it to `state` and `navigator`.
    ///
    /// `create` receives the sink the widget must report its callbacks to.
    /// After `on_created` runs, the widget either restores the history
    /// persisted in `state` or, when there is none, loads `state.content()`.
    /// Intents already queued on the navigator are applied by the next
    /// [`pump`](Self::pump) or [`run_until`](Self::run_until).
    pub fn attach<F>(
        state: Arc<ViewState>,
        navigator: &Navigator,
        create: F,
        hooks: BridgeHooks<W>,
    ) -> Result<Self, BridgeError>
    where
        F: FnOnce(WidgetEventSink) -> Result<W, BridgeError>,
    {
        let attachment = state.try_attach().inspect_err(|_| {
            warn!("attach refused: view state already has a widget");
        })?;
        let intents = navigator.take_receiver().inspect_err(|_| {
            warn!("attach refused: navigator is consumed by another widget");
        })?;

        let (sink, events) = WidgetEventSink::channel(navigator.waker());
        let mut widget = create(sink)?;
        if let Some(setup) = hooks.on_created {
            setup(&mut widget);
        }

        let mut bridge = Self {
            widget,
            state,
            navigator: navigator.clone(),
            intents,
            events,
            on_dispose: hooks.on_dispose,
            _attachment: attachment,
        };
        bridge.load_initial();
        info!("widget attached");
        Ok(bridge)
    }

    /// Tear the attachment down. Equivalent to dropping the bridge.
    pub fn detach(self) {}

    /// Snapshot the live widget for persistence without detaching.
    pub fn save(&self) -> SavedViewState {
        SavedViewState {
            page_title: self.state.page_title(),
            last_loaded_url: self.state.last_loaded_url(),
            navigation_state: self.widget.save_state(),
        }
    }

    fn load_initial(&mut self) {
        if let Some(blob) = self.state.navigation_state() {
            match self.widget.restore_state(&blob) {
                Ok(()) => {
                    debug!(bytes = blob.len(), "navigation history restored");
                    self.refresh_history_flags();
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "history restore rejected, loading content instead");
                }
            }
        }

        let content = self.state.content();
        self.load_content(&content);
    }

    fn teardown(&mut self) {
        // Callbacks raised before teardown still belong to this session.
        self.drain_events();

        let snapshot = self.widget.save_state();
        debug!(
            bytes = snapshot.as_ref().map_or(0, Vec::len),
            "navigation history snapshotted"
        );
        self.state.set_navigation_state(snapshot);

        if let Some(dispose) = self.on_dispose.take() {
            dispose(&mut self.widget);
        }
        info!("widget detached");
    }
}

impl<W: WebWidget> Drop for WidgetBridge<W> {
    fn drop(&mut self) {
        self.teardown();
    }
}
