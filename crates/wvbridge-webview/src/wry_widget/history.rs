//! Back/forward list kept alongside the wry webview, which exposes none.

use serde::{Deserialize, Serialize};

use crate::content::MarkupLoad;

/// One history entry. `url` is what wry reported when the page started
/// loading; inline documents also keep their markup so they can be shown
/// again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct HistoryEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<MarkupLoad>,
}

impl HistoryEntry {
    /// URL the entry is known by: the markup's history URL when it has one.
    pub fn shown_url(&self) -> &str {
        self.markup
            .as_ref()
            .and_then(|m| m.history_url.as_deref())
            .unwrap_or(&self.url)
    }
}

/// What the next load start belongs to.
#[derive(Debug, Default, Clone, PartialEq)]
enum Pending {
    #[default]
    None,
    /// Back/forward/restore: the entry already exists.
    Traversal,
    /// The auto-submitting POST form page, never kept.
    PostForm,
    Markup(MarkupLoad),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct NavHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
    #[serde(skip)]
    pending: Pending,
}

impl NavHistory {
    /// The next load start is inline `markup`.
    pub fn expect_markup(&mut self, markup: MarkupLoad) {
        self.pending = Pending::Markup(markup);
    }

    /// The next load start is the POST form page.
    pub fn expect_post_form(&mut self) {
        self.pending = Pending::PostForm;
    }

    /// Drop the expectation set for a load the webview refused.
    pub fn abandon_pending(&mut self) {
        self.pending = Pending::None;
    }

    /// Record a main-frame load start. Returns whether the list changed.
    pub fn record(&mut self, url: &str) -> bool {
        let markup = match std::mem::take(&mut self.pending) {
            Pending::Traversal | Pending::PostForm => return false,
            Pending::Markup(markup) => Some(markup),
            Pending::None => {
                if self.current().is_some_and(|e| e.url == url) {
                    return false;
                }
                None
            }
        };
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(HistoryEntry {
            url: url.to_string(),
            markup,
        });
        self.index = self.entries.len() - 1;
        true
    }

    /// Move the cursor by `delta` and return the entry to load.
    pub fn step(&mut self, delta: isize) -> Option<HistoryEntry> {
        let target = self.index.checked_add_signed(delta)?;
        let entry = self.entries.get(target)?.clone();
        self.index = target;
        self.pending = Pending::Traversal;
        Some(entry)
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.index)
    }

    /// The URL to report for a load of `reported`: the current entry's
    /// history URL when the load is that entry.
    pub fn shown_url(&self, reported: &str) -> String {
        match self.current() {
            Some(entry) if entry.url == reported => entry.shown_url().to_string(),
            _ => reported.to_string(),
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate a deserialized history and mark its current entry as the
    /// pending traversal target.
    pub fn into_restored(mut self) -> Option<(Self, HistoryEntry)> {
        let entry = self.current()?.clone();
        self.pending = Pending::Traversal;
        Some((self, entry))
    }
}
