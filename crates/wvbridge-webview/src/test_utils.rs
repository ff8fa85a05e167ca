//! Test-only widget that records every call made by the bridge.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wvbridge_common::BridgeError;

use crate::content::{Headers, MarkupLoad};
use crate::widget::{WebWidget, WidgetEventSink};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Setup,
    Navigate { url: String, headers: Headers },
    LoadMarkup(MarkupLoad),
    SubmitPost { url: String, body: Vec<u8> },
    Back,
    Forward,
    Reload,
    Stop,
    Restore(Vec<u8>),
    Dispose,
}

pub(crate) type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct History {
    entries: Vec<String>,
    index: usize,
}

/// Simulates a widget with a linear history. With `auto_events` on, every
/// navigation immediately reports load-start and load-finish.
pub(crate) struct RecordingWidget {
    pub calls: CallLog,
    pub sink: WidgetEventSink,
    pub auto_events: bool,
    pub reject_restore: bool,
    history: History,
}

impl RecordingWidget {
    pub fn new(sink: WidgetEventSink, calls: CallLog) -> Self {
        Self {
            calls,
            sink,
            auto_events: true,
            reject_restore: false,
            history: History::default(),
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn visit(&mut self, url: &str) {
        if !self.history.entries.is_empty() {
            self.history.entries.truncate(self.history.index + 1);
        }
        self.history.entries.push(url.to_string());
        self.history.index = self.history.entries.len() - 1;
        self.report_load();
    }

    fn report_load(&self) {
        if self.auto_events {
            let url = self.current_url();
            self.sink.load_started(url.clone());
            self.sink.load_finished(url);
        }
    }
}

impl WebWidget for RecordingWidget {
    fn navigate_url(&mut self, url: &str, headers: &Headers) {
        self.record(Call::Navigate {
            url: url.to_string(),
            headers: headers.clone(),
        });
        self.visit(url);
    }

    fn load_markup(&mut self, load: &MarkupLoad) {
        self.record(Call::LoadMarkup(load.clone()));
        let url = load.history_url.as_deref().unwrap_or("about:blank").to_string();
        self.visit(&url);
    }

    fn submit_post(&mut self, url: &str, body: &[u8]) {
        self.record(Call::SubmitPost {
            url: url.to_string(),
            body: body.to_vec(),
        });
        self.visit(url);
    }

    fn go_back(&mut self) {
        self.record(Call::Back);
        if self.can_go_back() {
            self.history.index -= 1;
            self.report_load();
        }
    }

    fn go_forward(&mut self) {
        self.record(Call::Forward);
        if self.can_go_forward() {
            self.history.index += 1;
            self.report_load();
        }
    }

    fn reload(&mut self) {
        self.record(Call::Reload);
        self.report_load();
    }

    fn stop_loading(&mut self) {
        self.record(Call::Stop);
    }

    fn can_go_back(&self) -> bool {
        self.history.index > 0
    }

    fn can_go_forward(&self) -> bool {
        self.history.index + 1 < self.history.entries.len()
    }

    fn current_url(&self) -> Option<String> {
        self.history.entries.get(self.history.index).cloned()
    }

    fn save_state(&self) -> Option<Vec<u8>> {
        if self.history.entries.is_empty() {
            return None;
        }
        serde_json::to_vec(&self.history).ok()
    }

    fn restore_state(&mut self, blob: &[u8]) -> Result<(), BridgeError> {
        self.record(Call::Restore(blob.to_vec()));
        if self.reject_restore {
            return Err(BridgeError::Restore("rejected by test widget".into()));
        }
        self.history =
            serde_json::from_slice(blob).map_err(|e| BridgeError::Restore(e.to_string()))?;
        self.report_load();
        Ok(())
    }
}

pub(crate) fn navigations(calls: &CallLog) -> Vec<String> {
    calls
        .borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Navigate { url, .. } => Some(url.clone()),
            _ => None,
        })
        .collect()
}
