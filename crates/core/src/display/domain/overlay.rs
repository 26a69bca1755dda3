use crate::shared::region::Region;

/// BGR(A) colour, the channel order the display backend draws in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const MAGENTA: Color = Color::new(255, 0, 255);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(255, 0, 0);

    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// A single draw command, rasterised by the display surface in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    Ellipse {
        center: (i32, i32),
        axes: (i32, i32),
        color: Color,
        thickness: i32,
    },
    Rectangle {
        region: Region,
        color: Color,
        thickness: i32,
    },
    Text {
        text: String,
        origin: (i32, i32),
        scale: f64,
        color: Color,
    },
}

const FACE_ELLIPSE_THICKNESS: i32 = 2;
const FACE_RECT_THICKNESS: i32 = 1;
const TIMING_ORIGIN: (i32, i32) = (10, 30);
const TIMING_SCALE: f64 = 1.0;

/// Ellipse then bounding rectangle for every face, in detector order.
pub fn face_overlays(regions: &[Region]) -> Vec<Overlay> {
    regions
        .iter()
        .flat_map(|r| {
            [
                Overlay::Ellipse {
                    center: r.ellipse_center(),
                    axes: r.ellipse_axes(),
                    color: Color::MAGENTA,
                    thickness: FACE_ELLIPSE_THICKNESS,
                },
                Overlay::Rectangle {
                    region: *r,
                    color: Color::GREEN,
                    thickness: FACE_RECT_THICKNESS,
                },
            ]
        })
        .collect()
}

/// Time-per-frame and FPS readout for the top-left corner.
pub fn timing_overlay(elapsed_ms: u64, fps: u32) -> Overlay {
    Overlay::Text {
        text: format!("TPF : {elapsed_ms}ms. FPS : {fps}"),
        origin: TIMING_ORIGIN,
        scale: TIMING_SCALE,
        color: Color::BLUE,
    }
}
