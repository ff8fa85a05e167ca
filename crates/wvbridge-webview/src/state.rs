//! Observable state of one browser session.
//!
//! Every field lives in its own `watch` channel so UI code can observe
//! exactly the fields it renders. Only the bridge that owns the attached
//! widget writes to them, always from the UI context.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use wvbridge_common::BridgeError;

use crate::content::ContentRequest;
use crate::error::WebError;
use crate::loading::LoadingState;

/// Favicon delivered by the widget, as tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageIcon {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// The part of a [`ViewState`] that survives process recreation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedViewState {
    pub page_title: Option<String>,
    pub last_loaded_url: Option<String>,
    /// Opaque widget history snapshot.
    #[serde(default, with = "blob")]
    pub navigation_state: Option<Vec<u8>>,
}

#[derive(Debug)]
pub struct ViewState {
    last_loaded_url: watch::Sender<Option<String>>,
    content: watch::Sender<ContentRequest>,
    loading_state: watch::Sender<LoadingState>,
    page_title: watch::Sender<Option<String>>,
    page_icon: watch::Sender<Option<PageIcon>>,
    errors: watch::Sender<Vec<WebError>>,
    navigation_state: watch::Sender<Option<Vec<u8>>>,
    attached: AtomicBool,
}

fn sender<T>(initial: T) -> watch::Sender<T> {
    watch::channel(initial).0
}

impl ViewState {
    pub fn new(content: ContentRequest) -> Self {
        Self {
            last_loaded_url: sender(None),
            content: sender(content),
            loading_state: sender(LoadingState::Initializing),
            page_title: sender(None),
            page_icon: sender(None),
            errors: sender(Vec::new()),
            navigation_state: sender(None),
            attached: AtomicBool::new(false),
        }
    }

    /// Rebuild a state from a saved snapshot.
    ///
    /// The content is `NavigatorOnly`: the next attached widget restores
    /// the saved history instead of loading anything.
    pub fn from_saved(saved: SavedViewState) -> Self {
        let state = Self::new(ContentRequest::NavigatorOnly);
        state.page_title.send_replace(saved.page_title);
        state.last_loaded_url.send_replace(saved.last_loaded_url);
        state.navigation_state.send_replace(saved.navigation_state);
        state
    }

    /// Snapshot of the persistable fields, using the history captured at
    /// the last teardown.
    pub fn saved(&self) -> SavedViewState {
        SavedViewState {
            page_title: self.page_title(),
            last_loaded_url: self.last_loaded_url(),
            navigation_state: self.navigation_state(),
        }
    }

    // -- readers --

    /// URL of the last load that started or finished in the widget.
    pub fn last_loaded_url(&self) -> Option<String> {
        self.last_loaded_url.borrow().clone()
    }

    pub fn content(&self) -> ContentRequest {
        self.content.borrow().clone()
    }

    pub fn loading_state(&self) -> LoadingState {
        *self.loading_state.borrow()
    }

    pub fn is_loading(&self) -> bool {
        self.loading_state().is_loading()
    }

    pub fn page_title(&self) -> Option<String> {
        self.page_title.borrow().clone()
    }

    pub fn page_icon(&self) -> Option<PageIcon> {
        self.page_icon.borrow().clone()
    }

    /// Errors captured since the last load started, main frame and
    /// sub-resources alike, in arrival order.
    pub fn errors_for_current_request(&self) -> Vec<WebError> {
        self.errors.borrow().clone()
    }

    /// History snapshot taken when the last widget was torn down.
    pub fn navigation_state(&self) -> Option<Vec<u8>> {
        self.navigation_state.borrow().clone()
    }

    pub fn has_navigation_state(&self) -> bool {
        self.navigation_state.borrow().is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    // -- observers --

    pub fn watch_last_loaded_url(&self) -> watch::Receiver<Option<String>> {
        self.last_loaded_url.subscribe()
    }

    pub fn watch_content(&self) -> watch::Receiver<ContentRequest> {
        self.content.subscribe()
    }

    pub fn watch_loading_state(&self) -> watch::Receiver<LoadingState> {
        self.loading_state.subscribe()
    }

    pub fn watch_page_title(&self) -> watch::Receiver<Option<String>> {
        self.page_title.subscribe()
    }

    pub fn watch_page_icon(&self) -> watch::Receiver<Option<PageIcon>> {
        self.page_icon.subscribe()
    }

    pub fn watch_errors(&self) -> watch::Receiver<Vec<WebError>> {
        self.errors.subscribe()
    }

    // -- writers --

    /// Replace the content request. This never navigates on its own; the
    /// new request is loaded by the next widget attachment.
    pub fn set_content(&self, content: ContentRequest) {
        self.content.send_replace(content);
    }

    pub(crate) fn begin_load(&self, url: Option<String>) {
        self.loading_state.send_replace(LoadingState::loading(0.0));
        self.errors.send_if_modified(|errors| {
            let had_errors = !errors.is_empty();
            errors.clear();
            had_errors
        });
        self.page_title.send_replace(None);
        self.page_icon.send_replace(None);
        if url.is_some() {
            self.last_loaded_url.send_replace(url);
        }
    }

    /// Progress reported after the load finished is stale and dropped.
    pub(crate) fn update_progress(&self, progress: f32) {
        self.loading_state.send_if_modified(|state| {
            if matches!(state, LoadingState::Finished) {
                return false;
            }
            *state = LoadingState::loading(progress);
            true
        });
    }

    pub(crate) fn finish_load(&self, url: Option<String>) {
        self.loading_state.send_replace(LoadingState::Finished);
        if url.is_some() {
            self.last_loaded_url.send_replace(url);
        }
    }

    pub(crate) fn push_error(&self, error: WebError) {
        self.errors.send_modify(|errors| errors.push(error));
    }

    pub(crate) fn set_page_title(&self, title: String) {
        self.page_title.send_replace(Some(title));
    }

    pub(crate) fn set_page_icon(&self, icon: PageIcon) {
        self.page_icon.send_replace(Some(icon));
    }

    pub(crate) fn set_navigation_state(&self, blob: Option<Vec<u8>>) {
        self.navigation_state.send_replace(blob);
    }

    /// Mark a widget as attached. Fails if another one already is.
    pub(crate) fn try_attach(self: &Arc<Self>) -> Result<AttachGuard, BridgeError> {
        self.attached
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BridgeError::AlreadyAttached)?;
        Ok(AttachGuard {
            state: Arc::clone(self),
        })
    }
}

/// Held for as long as a widget is attached to a view state.
#[derive(Debug)]
pub(crate) struct AttachGuard {
    state: Arc<ViewState>,
}

impl Drop for AttachGuard {
    fn drop(&mut self) {
        self.state.attached.store(false, Ordering::Release);
    }
}

/// Base64 encoding for the history blob inside JSON.
mod blob {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_some(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(d)?;
        encoded
            .map(|e| STANDARD.decode(e).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceError;

    fn error(code: i32) -> WebError {
        WebError {
            request: None,
            error: ResourceError::new(code, "boom"),
        }
    }

    #[test]
    fn new_state_defaults() {
        let state = ViewState::new(ContentRequest::url("https://a.test"));
        assert_eq!(state.loading_state(), LoadingState::Initializing);
        assert!(state.is_loading());
        assert!(state.last_loaded_url().is_none());
        assert!(state.page_title().is_none());
        assert!(state.page_icon().is_none());
        assert!(state.errors_for_current_request().is_empty());
        assert!(!state.has_navigation_state());
        assert!(!state.is_attached());
    }

    #[test]
    fn begin_load_resets_per_page_fields() {
        let state = ViewState::new(ContentRequest::NavigatorOnly);
        state.push_error(error(-2));
        state.set_page_title("old".into());
        state.begin_load(Some("https://c.test".into()));

        assert_eq!(state.loading_state(), LoadingState::loading(0.0));
        assert!(state.errors_for_current_request().is_empty());
        assert!(state.page_title().is_none());
        assert_eq!(state.last_loaded_url().as_deref(), Some("https://c.test"));
    }

    #[test]
    fn progress_after_finish_is_ignored() {
        let state = ViewState::new(ContentRequest::NavigatorOnly);
        state.begin_load(None);
        state.update_progress(0.5);
        assert_eq!(state.loading_state().progress(), Some(0.5));

        state.finish_load(None);
        state.update_progress(0.9);
        assert_eq!(state.loading_state(), LoadingState::Finished);
    }

    #[test]
    fn progress_may_arrive_before_load_start() {
        let state = ViewState::new(ContentRequest::NavigatorOnly);
        state.update_progress(0.1);
        assert_eq!(state.loading_state().progress(), Some(0.1));
    }

    #[test]
    fn finish_without_url_keeps_last_url() {
        let state = ViewState::new(ContentRequest::NavigatorOnly);
        state.begin_load(Some("https://a.test".into()));
        state.finish_load(None);
        assert_eq!(state.last_loaded_url().as_deref(), Some("https://a.test"));
    }

    #[test]
    fn set_content_touches_only_content() {
        let state = ViewState::new(ContentRequest::url("https://a.test"));
        let loading = state.watch_loading_state();
        state.set_content(ContentRequest::url("https://b.test"));
        assert_eq!(state.content(), ContentRequest::url("https://b.test"));
        assert!(!loading.has_changed().unwrap());
    }

    #[tokio::test]
    async fn observers_wake_on_change() {
        let state = ViewState::new(ContentRequest::NavigatorOnly);
        let mut title = state.watch_page_title();
        let mut errors = state.watch_errors();

        state.set_page_title("Hello".into());
        title.changed().await.unwrap();
        assert_eq!(title.borrow_and_update().as_deref(), Some("Hello"));

        state.push_error(error(404));
        errors.changed().await.unwrap();
        assert_eq!(errors.borrow_and_update().len(), 1);
    }

    #[test]
    fn clearing_empty_errors_does_not_notify() {
        let state = ViewState::new(ContentRequest::NavigatorOnly);
        let errors = state.watch_errors();
        state.begin_load(None);
        assert!(!errors.has_changed().unwrap());
    }

    #[test]
    fn only_one_attachment_at_a_time() {
        let state = Arc::new(ViewState::new(ContentRequest::NavigatorOnly));
        let guard = state.try_attach().unwrap();
        assert!(state.is_attached());
        assert!(matches!(
            state.try_attach(),
            Err(BridgeError::AlreadyAttached)
        ));

        drop(guard);
        assert!(!state.is_attached());
        assert!(state.try_attach().is_ok());
    }

    #[test]
    fn from_saved_is_navigator_only_with_history() {
        let saved = SavedViewState {
            page_title: Some("Docs".into()),
            last_loaded_url: Some("https://docs.test".into()),
            navigation_state: Some(vec![7, 7, 7]),
        };
        let state = ViewState::from_saved(saved.clone());
        assert!(state.content().is_navigator_only());
        assert_eq!(state.page_title().as_deref(), Some("Docs"));
        assert_eq!(state.saved(), saved);
    }

    #[test]
    fn saved_state_encodes_history_as_base64() {
        let saved = SavedViewState {
            page_title: None,
            last_loaded_url: None,
            navigation_state: Some(b"hist".to_vec()),
        };
        let json = serde_json::to_string(&saved).unwrap();
        assert!(json.contains("\"aGlzdA==\""));

        let back: SavedViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, saved);
    }

    #[test]
    fn saved_state_without_history_field() {
        let back: SavedViewState = serde_json::from_str(r#"{"page_title":null,"last_loaded_url":null}"#).unwrap();
        assert!(back.navigation_state.is_none());
    }
}
