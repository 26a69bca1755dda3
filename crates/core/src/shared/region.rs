/// An axis-aligned face rectangle in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centre of the inscribed ellipse, using integer division like the
    /// rasteriser expects.
    pub fn ellipse_center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn ellipse_axes(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }
}
