use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::shared::frame::Frame;
use crate::shared::mat_conversion::mat_to_frame;
use crate::video::domain::frame_source::{CameraOpener, FrameSource};

/// Camera device read through OpenCV's video I/O.
pub struct OpenCvCamera {
    capture: VideoCapture,
    buffer: Mat,
    next_index: usize,
}

impl OpenCvCamera {
    /// Opens camera `index` with any available backend.
    pub fn open(index: u32) -> Result<Self, Box<dyn std::error::Error>> {
        let capture = VideoCapture::new(index as i32, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(format!("camera #{index} did not open").into());
        }
        Ok(Self {
            capture,
            buffer: Mat::default(),
            next_index: 0,
        })
    }
}

impl FrameSource for OpenCvCamera {
    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let grabbed = self.capture.read(&mut self.buffer)?;
        if !grabbed || self.buffer.empty() {
            return Ok(None);
        }
        let frame = mat_to_frame(&self.buffer, self.next_index)?;
        self.next_index += 1;
        Ok(Some(frame))
    }
}

/// [`CameraOpener`] backed by [`OpenCvCamera::open`].
pub struct OpenCvCameraOpener;

impl CameraOpener for OpenCvCameraOpener {
    fn open(&mut self, index: u32) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
        Ok(Box::new(OpenCvCamera::open(index)?))
    }
}
