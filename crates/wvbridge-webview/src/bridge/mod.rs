//! Binds one attached widget to a [`ViewState`] and a [`Navigator`].
//!
//! The bridge is the single writer of the view state. Widget callbacks
//! arrive as [`WidgetEvent`]s and navigation intents arrive through the
//! navigator queue; both are handled on the UI context, either by calling
//! [`WidgetBridge::pump`] from a polling loop or by awaiting
//! [`WidgetBridge::run_until`] on a local executor.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::navigator::{IntentReceiver, Navigator};
use crate::state::{AttachGuard, ViewState};
use crate::widget::{WebWidget, WidgetEvent};

mod dispatch;
mod handlers;
mod lifecycle;


type Hook<W> = Box<dyn FnOnce(&mut W)>;

/// Caller-supplied setup and teardown for the widget.
pub struct BridgeHooks<W> {
    on_created: Option<Hook<W>>,
    on_dispose: Option<Hook<W>>,
}

impl<W> BridgeHooks<W> {
    pub fn new() -> Self {
        Self {
            on_created: None,
            on_dispose: None,
        }
    }

    /// Runs once after the widget is built, before any content loads.
    pub fn on_created(mut self, f: impl FnOnce(&mut W) + 'static) -> Self {
        self.on_created = Some(Box::new(f));
        self
    }

    /// Runs once at teardown, after the history snapshot is taken.
    pub fn on_dispose(mut self, f: impl FnOnce(&mut W) + 'static) -> Self {
        self.on_dispose = Some(Box::new(f));
        self
    }
}

impl<W> Default for BridgeHooks<W> {
    fn default() -> Self {
        Self::new()
    }
}

/// An attached widget together with the state it drives.
///
/// Dropping the bridge (or calling [`detach`](Self::detach)) tears the
/// attachment down: the widget's history is snapshotted into the view
/// state and the navigator becomes available to the next widget.
pub struct WidgetBridge<W: WebWidget> {
    widget: W,
    state: Arc<ViewState>,
    navigator: Navigator,
    intents: IntentReceiver,
    events: mpsc::UnboundedReceiver<WidgetEvent>,
    on_dispose: Option<Hook<W>>,
    _attachment: AttachGuard,
}

impl<W: WebWidget> WidgetBridge<W> {
    pub fn state(&self) -> &Arc<ViewState> {
        &self.state
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Direct widget access for host concerns such as bounds or focus.
    /// Navigation should still go through the navigator.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Handle every widget event and navigation intent available right now,
    /// without waiting. Events raised while applying an intent are handled
    /// before the next intent. Returns how many items were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            handled += self.drain_events();
            match self.intents.try_recv() {
                Ok(intent) => {
                    self.apply(intent);
                    handled += 1;
                }
                Err(_) => break,
            }
        }
        handled
    }

    /// Consume events and intents as they arrive until `shutdown`
    /// completes. Must be awaited on the UI context.
    pub async fn run_until<F: Future<Output = ()>>(&mut self, shutdown: F) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                Some(event) = self.events.recv() => self.handle_event(event),
                Some(intent) = self.intents.recv() => self.apply(intent),
                else => break,
            }
        }
    }

    fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    fn refresh_history_flags(&self) {
        self.navigator
            .set_history_flags(self.widget.can_go_back(), self.widget.can_go_forward());
    }
}
