use crate::display::domain::overlay::Overlay;
use crate::shared::frame::Frame;

/// Where annotated frames are shown and key presses are read from.
pub trait DisplaySurface: Send {
    /// Draws `overlays` on top of `frame` and shows the result.
    fn present(
        &mut self,
        frame: &Frame,
        overlays: &[Overlay],
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `timeout_ms` for a key press. Returns a negative code
    /// when no key was pressed.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<i32, Box<dyn std::error::Error>>;
}
