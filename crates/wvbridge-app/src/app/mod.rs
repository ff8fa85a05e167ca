//! Host application: one window, one webview, one persisted session.

mod bounds;
mod core;
mod event_handler;
mod init;
mod keys;
mod polling;
mod shutdown;
mod types;

pub use self::core::WvApp;
pub use self::types::UserEvent;
