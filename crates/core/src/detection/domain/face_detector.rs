use crate::shared::constants::{DETECT_MIN_NEIGHBORS, DETECT_MIN_SIZE, DETECT_SCALE_FACTOR};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for face detection.
///
/// Implementations may keep scratch buffers between calls, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

/// Multi-scale search parameters passed to the detector backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    /// Image pyramid step between scales.
    pub scale_factor: f64,
    /// Overlapping candidates required to keep a detection.
    pub min_neighbors: i32,
    /// Smallest face considered, as (width, height).
    pub min_size: (i32, i32),
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: DETECT_SCALE_FACTOR,
            min_neighbors: DETECT_MIN_NEIGHBORS,
            min_size: DETECT_MIN_SIZE,
        }
    }
}
