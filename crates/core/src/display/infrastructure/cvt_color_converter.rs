use opencv::core::{AlgorithmHint, Mat};
use opencv::imgproc;

use crate::display::domain::grayscale_converter::GrayscaleConverter;
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::{frame_to_mat, mat_to_frame};

/// BGR to gray through `imgproc::cvt_color`.
pub struct CvtColorConverter;

impl GrayscaleConverter for CvtColorConverter {
    fn to_grayscale(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        if frame.is_gray() {
            return Ok(());
        }
        let src = frame_to_mat(frame)?;
        let mut gray = Mat::default();
        imgproc::cvt_color(
            &src,
            &mut gray,
            imgproc::COLOR_BGR2GRAY,
            0,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;
        *frame = mat_to_frame(&gray, frame.index())?;
        Ok(())
    }
}
