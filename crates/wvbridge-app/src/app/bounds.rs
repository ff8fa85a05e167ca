//! Webview placement inside the host window.

use winit::window::Window;

/// A rect covering the whole client area, in logical coordinates.
pub(super) fn fill_rect(width: f64, height: f64) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(width, height)),
    }
}

pub(super) fn window_bounds(window: &Window) -> wry::Rect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    fill_rect(size.width, size.height)
}
