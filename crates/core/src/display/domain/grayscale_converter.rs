use crate::shared::frame::Frame;

/// Colour-to-intensity conversion used by the grayscale display modes.
///
/// Implementations wrap an image-processing backend; the mode logic only
/// decides when to convert.
pub trait GrayscaleConverter: Send {
    /// Replaces a three-channel BGR `frame` with its single-channel
    /// intensity image, keeping geometry and capture index.
    fn to_grayscale(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>>;
}
