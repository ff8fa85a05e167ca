use std::sync::{Arc, Mutex};

use winit::event_loop::EventLoopProxy;
use winit::keyboard::ModifiersState;
use winit::window::Window;
use wvbridge_common::SessionId;
use wvbridge_config::WvConfig;
use wvbridge_webview::{ContentRequest, Navigator, SessionStore, ViewState, WidgetBridge, WryWidget};

use crate::cli::Args;

use super::types::UserEvent;

pub struct WvApp {
    pub(super) config: WvConfig,
    /// Content loaded when there is no history to restore.
    pub(super) start: ContentRequest,
    /// False when `--url` asked for a fresh page.
    pub(super) restore: bool,
    pub(super) session_id: SessionId,
    pub(super) store: Option<SessionStore>,
    pub(super) navigator: Navigator,
    pub(super) window: Option<Arc<Window>>,
    pub(super) state: Option<Arc<ViewState>>,
    pub(super) bridge: Option<WidgetBridge<WryWidget>>,
    pub(super) modifiers: ModifiersState,
    pub(super) shown_title: Option<String>,
}

impl WvApp {
    pub fn new(config: WvConfig, args: &Args, proxy: EventLoopProxy<UserEvent>) -> Self {
        let proxy = Mutex::new(proxy);
        let navigator = Navigator::with_waker(move || {
            if let Ok(proxy) = proxy.lock() {
                let _ = proxy.send_event(UserEvent::Wake);
            }
        });

        let start = start_content(&config, args.url.as_deref());
        let session_id = session_id(&config, args.session.as_deref());
        let store = match config.session.resolved_state_dir() {
            Ok(dir) => Some(SessionStore::new(dir)),
            Err(e) => {
                tracing::warn!("Session persistence disabled: {e}");
                None
            }
        };
        let restore = config.session.restore && args.url.is_none();
        tracing::info!(session = %session_id, restore, "App configured");

        Self {
            config,
            start,
            restore,
            session_id,
            store,
            navigator,
            window: None,
            state: None,
            bridge: None,
            modifiers: ModifiersState::empty(),
            shown_title: None,
        }
    }
}

fn start_content(config: &WvConfig, url_override: Option<&str>) -> ContentRequest {
    match url_override {
        Some(url) => ContentRequest::url(url),
        None => match &config.start.url {
            Some(url) => ContentRequest::url_with_headers(url, config.start.headers.clone()),
            None => ContentRequest::url("about:blank"),
        },
    }
}

fn session_id(config: &WvConfig, requested: Option<&str>) -> SessionId {
    if let Some(raw) = requested {
        match SessionId::parse(raw) {
            Some(id) => return id,
            None => tracing::warn!("Invalid session id {raw:?}, using {:?}", config.session.id),
        }
    }
    SessionId::parse(&config.session.id).unwrap_or_default()
}
