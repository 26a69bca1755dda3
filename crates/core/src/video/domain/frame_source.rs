use crate::shared::frame::Frame;

/// A live stream of frames, typically a camera.
pub trait FrameSource: Send {
    /// Grabs the next frame.
    ///
    /// `Ok(None)` means the backend returned a blank frame, which ends the
    /// stream.
    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}

/// Opens camera devices by index.
pub trait CameraOpener {
    fn open(&mut self, index: u32) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>>;
}

impl<F> CameraOpener for F
where
    F: FnMut(u32) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>>,
{
    fn open(&mut self, index: u32) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
        self(index)
    }
}
