//! The contract between the bridge and an embeddable browser widget.

use std::fmt;

use tokio::sync::mpsc;
use tracing::trace;
use wvbridge_common::BridgeError;

use crate::content::{Headers, MarkupLoad};
use crate::error::{ResourceError, ResourceRequest, WebError};
use crate::navigator::Waker;
use crate::state::PageIcon;

/// Operations the bridge performs on a widget.
///
/// All methods are called on the UI context. Failures are not returned;
/// the widget reports them through its [`WidgetEventSink`] as
/// [`WidgetEvent::Error`], the same way it reports load failures.
pub trait WebWidget {
    fn navigate_url(&mut self, url: &str, headers: &Headers);
    fn load_markup(&mut self, load: &MarkupLoad);
    fn submit_post(&mut self, url: &str, body: &[u8]);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);
    fn stop_loading(&mut self);

    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn current_url(&self) -> Option<String>;

    /// Serialize the navigation history. `None` when there is nothing worth
    /// keeping, e.g. before the first load.
    fn save_state(&self) -> Option<Vec<u8>>;

    /// Replace the navigation history with a snapshot from `save_state`
    /// and show its current entry.
    fn restore_state(&mut self, blob: &[u8]) -> Result<(), BridgeError>;
}

/// Callbacks from the widget, in the order the widget raised them.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    LoadStarted { url: Option<String> },
    Progress(f32),
    LoadFinished { url: Option<String> },
    Error(WebError),
    TitleReceived(String),
    IconReceived(PageIcon),
    /// The back/forward list changed without a completed load, e.g. a
    /// same-document navigation.
    HistoryUpdated,
}

/// Thread-safe producer side of a widget's event stream.
///
/// Carries the navigator's waker, so a host that sleeps between pumps is
/// woken for widget callbacks as well as for intents.
#[derive(Clone)]
pub struct WidgetEventSink {
    tx: mpsc::UnboundedSender<WidgetEvent>,
    waker: Option<Waker>,
}

impl WidgetEventSink {
    pub(crate) fn channel(waker: Option<Waker>) -> (Self, mpsc::UnboundedReceiver<WidgetEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, waker }, rx)
    }

    /// Send an event. Events raised after the bridge detached are dropped.
    pub fn send(&self, event: WidgetEvent) {
        if self.tx.send(event).is_err() {
            trace!("widget event after detach dropped");
            return;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
    }

    pub fn load_started(&self, url: Option<String>) {
        self.send(WidgetEvent::LoadStarted { url });
    }

    pub fn progress(&self, progress: f32) {
        self.send(WidgetEvent::Progress(progress));
    }

    pub fn load_finished(&self, url: Option<String>) {
        self.send(WidgetEvent::LoadFinished { url });
    }

    pub fn error(&self, request: Option<ResourceRequest>, error: ResourceError) {
        self.send(WidgetEvent::Error(WebError { request, error }));
    }

    pub fn title(&self, title: impl Into<String>) {
        self.send(WidgetEvent::TitleReceived(title.into()));
    }

    pub fn icon(&self, icon: PageIcon) {
        self.send(WidgetEvent::IconReceived(icon));
    }

    pub fn history_updated(&self) {
        self.send(WidgetEvent::HistoryUpdated);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl fmt::Debug for WidgetEventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetEventSink")
            .field("closed", &self.is_closed())
            .field("wakes", &self.waker.is_some())
            .finish()
    }
}
