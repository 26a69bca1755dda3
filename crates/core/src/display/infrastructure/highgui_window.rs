use opencv::core::{Mat, Point, Rect, Scalar, Size};
use opencv::highgui;
use opencv::imgproc;

use crate::display::domain::display_surface::DisplaySurface;
use crate::display::domain::overlay::{Color, Overlay};
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::frame_to_mat;

/// Preview window drawn with OpenCV's highgui.
///
/// The window is created lazily on the first [`present`](DisplaySurface::present),
/// so a session that fails before its first frame never opens one.
pub struct HighGuiWindow {
    title: String,
    created: bool,
}

impl HighGuiWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created: false,
        }
    }

    fn ensure_created(&mut self) -> opencv::Result<()> {
        if !self.created {
            highgui::named_window(&self.title, highgui::WINDOW_AUTOSIZE)?;
            self.created = true;
        }
        Ok(())
    }
}

fn scalar(color: Color) -> Scalar {
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 255.0)
}

fn draw(mat: &mut Mat, overlay: &Overlay) -> opencv::Result<()> {
    match overlay {
        Overlay::Ellipse {
            center,
            axes,
            color,
            thickness,
        } => imgproc::ellipse(
            mat,
            Point::new(center.0, center.1),
            Size::new(axes.0, axes.1),
            0.0,
            0.0,
            360.0,
            scalar(*color),
            *thickness,
            imgproc::LINE_8,
            0,
        ),
        Overlay::Rectangle {
            region,
            color,
            thickness,
        } => imgproc::rectangle(
            mat,
            Rect::new(region.x, region.y, region.width, region.height),
            scalar(*color),
            *thickness,
            imgproc::LINE_8,
            0,
        ),
        Overlay::Text {
            text,
            origin,
            scale,
            color,
        } => imgproc::put_text(
            mat,
            text,
            Point::new(origin.0, origin.1),
            imgproc::FONT_HERSHEY_DUPLEX,
            *scale,
            scalar(*color),
            1,
            imgproc::LINE_8,
            false,
        ),
    }
}

impl DisplaySurface for HighGuiWindow {
    fn present(
        &mut self,
        frame: &Frame,
        overlays: &[Overlay],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.ensure_created()?;
        let mut mat = frame_to_mat(frame)?;
        for overlay in overlays {
            draw(&mut mat, overlay)?;
        }
        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<i32, Box<dyn std::error::Error>> {
        Ok(highgui::wait_key(timeout_ms)?)
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        if self.created {
            if let Err(e) = highgui::destroy_window(&self.title) {
                log::debug!("Failed to close window '{}': {e}", self.title);
            }
        }
    }
}
