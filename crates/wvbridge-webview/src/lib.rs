//! State and navigation bridge for an embedded browser widget.
//!
//! Provides:
//! - [`ViewState`]: observable session state (URL, loading, title, icon, errors)
//! - [`Navigator`]: an ordered command queue of navigation intents
//! - [`WidgetBridge`]: applies intents to an attached widget and folds its
//!   callbacks back into the state
//! - [`SessionStore`]: persistence of navigation history across restarts
//! - `WryWidget` (feature `wry`): a widget backed by the platform webview

pub mod bridge;
pub mod content;
pub mod error;
pub mod intent;
pub mod loading;
pub mod navigator;
pub mod session;
pub mod state;
pub mod widget;
#[cfg(feature = "wry")]
pub mod wry_widget;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bridge::{BridgeHooks, WidgetBridge};
pub use content::{ContentRequest, Headers, MarkupLoad};
pub use error::{ResourceError, ResourceRequest, WebError};
pub use intent::NavigationIntent;
pub use loading::LoadingState;
pub use navigator::Navigator;
pub use session::SessionStore;
pub use state::{PageIcon, SavedViewState, ViewState};
pub use widget::{WebWidget, WidgetEvent, WidgetEventSink};
#[cfg(feature = "wry")]
pub use wry_widget::{WebViewConfig, WryWidget};
