//! Ordered command queue for navigation intents.
//!
//! Any thread may emit intents; the bridge of the currently attached
//! widget consumes them on the UI context. Intents emitted while no widget
//! is attached wait in the queue and are applied, in emission order, once
//! one attaches.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex, OwnedMutexGuard};
use tracing::{debug, trace};
use wvbridge_common::BridgeError;

use crate::content::{Headers, MarkupLoad};
use crate::intent::NavigationIntent;

pub(crate) type Waker = Arc<dyn Fn() + Send + Sync>;

pub(crate) type IntentReceiver = OwnedMutexGuard<mpsc::UnboundedReceiver<NavigationIntent>>;

/// Cheap to clone; all clones share one queue and one pair of history flags.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<Inner>,
}

struct Inner {
    tx: mpsc::UnboundedSender<NavigationIntent>,
    /// Locked by the consuming bridge for its whole attachment.
    rx: Arc<Mutex<mpsc::UnboundedReceiver<NavigationIntent>>>,
    can_go_back: watch::Sender<bool>,
    can_go_forward: watch::Sender<bool>,
    waker: Option<Waker>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A navigator that calls `waker` after every emit, from the emitting
    /// thread. Polling hosts use it to schedule a bridge pump.
    pub fn with_waker(waker: impl Fn() + Send + Sync + 'static) -> Self {
        Self::build(Some(Arc::new(waker)))
    }

    fn build(waker: Option<Waker>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(Inner {
                tx,
                rx: Arc::new(Mutex::new(rx)),
                can_go_back: watch::channel(false).0,
                can_go_forward: watch::channel(false).0,
                waker,
            }),
        }
    }

    /// Queue `intent` for the attached (or next attached) widget.
    /// Never blocks and never fails.
    pub fn emit(&self, intent: NavigationIntent) {
        trace!(kind = intent.kind(), "navigation intent queued");
        // The receiver lives in `inner`, so the channel cannot be closed here.
        if self.inner.tx.send(intent).is_err() {
            debug!("navigation queue closed, intent dropped");
            return;
        }
        if let Some(waker) = &self.inner.waker {
            waker();
        }
    }

    pub fn load_url(&self, url: impl Into<String>) {
        self.load_url_with_headers(url, Headers::new());
    }

    pub fn load_url_with_headers(&self, url: impl Into<String>, headers: Headers) {
        self.emit(NavigationIntent::LoadUrl {
            url: url.into(),
            headers,
        });
    }

    /// Load inline markup. A plain string uses utf-8 and no base URL;
    /// pass a [`MarkupLoad`] for the other parameters.
    pub fn load_html(&self, load: impl Into<MarkupLoad>) {
        self.emit(NavigationIntent::LoadHtml(load.into()));
    }

    pub fn post_url(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.emit(NavigationIntent::PostUrl {
            url: url.into(),
            body: body.into(),
        });
    }

    pub fn back(&self) {
        self.emit(NavigationIntent::Back);
    }

    pub fn forward(&self) {
        self.emit(NavigationIntent::Forward);
    }

    pub fn reload(&self) {
        self.emit(NavigationIntent::Reload);
    }

    /// Queued like every other intent; it does not cancel intents that
    /// are already waiting behind it.
    pub fn stop_loading(&self) {
        self.emit(NavigationIntent::StopLoading);
    }

    pub fn can_go_back(&self) -> bool {
        *self.inner.can_go_back.borrow()
    }

    pub fn can_go_forward(&self) -> bool {
        *self.inner.can_go_forward.borrow()
    }

    pub fn watch_can_go_back(&self) -> watch::Receiver<bool> {
        self.inner.can_go_back.subscribe()
    }

    pub fn watch_can_go_forward(&self) -> watch::Receiver<bool> {
        self.inner.can_go_forward.subscribe()
    }

    /// The waker, shared with the attached widget's event sink.
    pub(crate) fn waker(&self) -> Option<Waker> {
        self.inner.waker.clone()
    }

    pub(crate) fn set_history_flags(&self, back: bool, forward: bool) {
        self.inner.can_go_back.send_if_modified(|v| std::mem::replace(v, back) != back);
        self.inner
            .can_go_forward
            .send_if_modified(|v| std::mem::replace(v, forward) != forward);
    }

    /// Become the single consumer of this queue.
    pub(crate) fn take_receiver(&self) -> Result<IntentReceiver, BridgeError> {
        Arc::clone(&self.inner.rx)
            .try_lock_owned()
            .map_err(|_| BridgeError::NavigatorBusy)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("can_go_back", &self.can_go_back())
            .field("can_go_forward", &self.can_go_forward())
            .finish_non_exhaustive()
    }
}
