//! Browser shortcuts.

use winit::keyboard::{Key, ModifiersState, NamedKey};
use wvbridge_webview::NavigationIntent;

/// Alt+Left/Right traverse history, F5 or Ctrl+R reload, Escape stops.
pub(super) fn intent_for_key(key: &Key, modifiers: ModifiersState) -> Option<NavigationIntent> {
    match key {
        Key::Named(NamedKey::ArrowLeft) if modifiers.alt_key() => Some(NavigationIntent::Back),
        Key::Named(NamedKey::ArrowRight) if modifiers.alt_key() => {
            Some(NavigationIntent::Forward)
        }
        Key::Named(NamedKey::BrowserBack) => Some(NavigationIntent::Back),
        Key::Named(NamedKey::BrowserForward) => Some(NavigationIntent::Forward),
        Key::Named(NamedKey::F5) | Key::Named(NamedKey::BrowserRefresh) => {
            Some(NavigationIntent::Reload)
        }
        Key::Named(NamedKey::Escape) | Key::Named(NamedKey::BrowserStop) => {
            Some(NavigationIntent::StopLoading)
        }
        Key::Character(c) if c.eq_ignore_ascii_case("r") && modifiers.control_key() => {
            Some(NavigationIntent::Reload)
        }
        _ => None,
    }
}
