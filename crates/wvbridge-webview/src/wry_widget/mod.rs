//! [`WebWidget`] backed by a `wry::WebView` embedded in a host window.
//!
//! wry reports only page-load start/finish and title changes, so the
//! widget keeps its own back/forward list ([`NavHistory`]) and serializes
//! that as its navigation state.

mod config;
mod history;
mod post;

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};
use wry::http::header::{HeaderMap, HeaderName, HeaderValue};
use wry::raw_window_handle::HasWindowHandle;
use wry::{PageLoadEvent, WebView, WebViewBuilder};
use wvbridge_common::BridgeError;

use crate::content::{Headers, MarkupLoad};
use crate::error::{ResourceError, ResourceRequest};
use crate::widget::{WebWidget, WidgetEventSink};

pub use config::WebViewConfig;
use history::{HistoryEntry, NavHistory};

/// Error code reported for failures raised by wry itself rather than the page.
const WRY_ERROR_CODE: i32 = -1;

pub struct WryWidget {
    webview: WebView,
    sink: WidgetEventSink,
    history: Arc<Mutex<NavHistory>>,
}

impl WryWidget {
    /// Build the webview as a child of `window`, positioned at `bounds`.
    ///
    /// Nothing is loaded; the bridge issues the initial load after attach.
    pub fn build_as_child<W: HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: &WebViewConfig,
        sink: WidgetEventSink,
    ) -> Result<Self, BridgeError> {
        let history = Arc::new(Mutex::new(NavHistory::default()));

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_focused(true);
        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        let load_sink = sink.clone();
        let load_history = Arc::clone(&history);
        builder = builder.with_on_page_load_handler(move |event, url| {
            let Ok(mut history) = load_history.lock() else {
                return;
            };
            match event {
                PageLoadEvent::Started => {
                    debug!(url = %url, "page load started");
                    let changed = history.record(&url);
                    load_sink.load_started(Some(history.shown_url(&url)));
                    if changed {
                        load_sink.history_updated();
                    }
                }
                PageLoadEvent::Finished => {
                    debug!(url = %url, "page load finished");
                    load_sink.load_finished(Some(history.shown_url(&url)));
                }
            }
        });

        let title_sink = sink.clone();
        builder = builder.with_document_title_changed_handler(move |title| {
            title_sink.title(title);
        });

        let webview = builder
            .build_as_child(window)
            .map_err(|e| BridgeError::WidgetCreation(e.to_string()))?;
        debug!("wry webview created");

        Ok(Self {
            webview,
            sink,
            history,
        })
    }

    /// Reposition the webview inside its parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) {
        if let Err(e) = self.webview.set_bounds(bounds) {
            warn!(error = %e, "failed to resize webview");
        }
    }

    fn history(&self) -> MutexGuard<'_, NavHistory> {
        // Recover the list after a panicking handler.
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Report a refused webview call as a load error.
    fn report(&self, request: Option<ResourceRequest>, result: wry::Result<()>) {
        if let Err(e) = result {
            warn!(url = ?request.as_ref().map(|r| &r.url), error = %e, "webview operation failed");
            self.sink.error(request, ResourceError::new(WRY_ERROR_CODE, e.to_string()));
        }
    }

    /// Like [`report`](Self::report) for a page load. A refused load never
    /// starts, so the history expectation set for it is dropped.
    fn report_load(&self, request: Option<ResourceRequest>, result: wry::Result<()>) {
        if result.is_err() {
            self.history().abandon_pending();
        }
        self.report(request, result);
    }

    /// Show a recorded entry without recording it again.
    fn show(&mut self, entry: &HistoryEntry) {
        let result = match &entry.markup {
            Some(markup) => self.webview.load_html(&markup.html),
            None => self.webview.load_url(&entry.url),
        };
        self.report_load(Some(ResourceRequest::main_frame(entry.shown_url())), result);
    }

    fn traverse(&mut self, delta: isize) {
        let target = self.history().step(delta);
        match target {
            Some(entry) => {
                self.show(&entry);
                self.sink.history_updated();
            }
            None => debug!(delta, "no history entry to traverse to"),
        }
    }
}

fn header_map(headers: &Headers) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => warn!(header = %name, "invalid request header skipped"),
        }
    }
    map
}

impl WebWidget for WryWidget {
    fn navigate_url(&mut self, url: &str, headers: &Headers) {
        self.history().abandon_pending();
        let result = if headers.is_empty() {
            self.webview.load_url(url)
        } else {
            self.webview.load_url_with_headers(url, header_map(headers))
        };
        self.report(Some(ResourceRequest::main_frame(url)), result);
    }

    fn load_markup(&mut self, load: &MarkupLoad) {
        if load.base_url.is_some() {
            debug!("base url is not supported by wry, ignored");
        }
        self.history().expect_markup(load.clone());
        let result = self.webview.load_html(&load.html);
        self.report_load(load.history_url.clone().map(ResourceRequest::main_frame), result);
    }

    fn submit_post(&mut self, url: &str, body: &[u8]) {
        self.history().expect_post_form();
        let result = self.webview.load_html(&post::post_form_html(url, body));
        self.report_load(
            Some(ResourceRequest::main_frame(url).with_method("POST")),
            result,
        );
    }

    fn go_back(&mut self) {
        self.traverse(-1);
    }

    fn go_forward(&mut self) {
        self.traverse(1);
    }

    fn reload(&mut self) {
        let result = self.webview.reload();
        self.report(None, result);
    }

    fn stop_loading(&mut self) {
        let result = self.webview.evaluate_script("window.stop();");
        self.report(None, result);
    }

    fn can_go_back(&self) -> bool {
        self.history().can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.history().can_go_forward()
    }

    fn current_url(&self) -> Option<String> {
        let reported = self.webview.url().ok()?;
        Some(self.history().shown_url(&reported))
    }

    fn save_state(&self) -> Option<Vec<u8>> {
        let history = self.history();
        if history.is_empty() {
            return None;
        }
        serde_json::to_vec(&*history)
            .inspect_err(|e| warn!(error = %e, "failed to serialize history"))
            .ok()
    }

    fn restore_state(&mut self, blob: &[u8]) -> Result<(), BridgeError> {
        let parsed: NavHistory = serde_json::from_slice(blob)
            .map_err(|e| BridgeError::Restore(format!("invalid history blob: {e}")))?;
        let (restored, entry) = parsed
            .into_restored()
            .ok_or_else(|| BridgeError::Restore("history blob has no entries".into()))?;

        *self.history() = restored;
        self.show(&entry);
        self.sink.history_updated();
        Ok(())
    }
}
