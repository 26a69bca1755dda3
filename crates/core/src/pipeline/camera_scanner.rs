use crate::pipeline::live_detection_error::LiveDetectionError;
use crate::video::domain::frame_source::{CameraOpener, FrameSource};

/// Tries camera indices `0..count` in order and returns the first that opens.
pub fn open_first_camera(
    opener: &mut dyn CameraOpener,
    count: u32,
) -> Result<(u32, Box<dyn FrameSource>), LiveDetectionError> {
    for index in 0..count {
        match opener.open(index) {
            Ok(source) => {
                log::info!("Opened camera #{index}");
                return Ok((index, source));
            }
            Err(e) => log::error!("Unable to open camera #{index}: {e}"),
        }
    }
    Err(LiveDetectionError::CameraUnavailable { tried: count })
}
