/// Events posted to the winit loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    /// A navigation intent was queued or the widget raised a callback.
    Wake,
}

pub(super) const WINDOW_TITLE: &str = "wvbridge";
