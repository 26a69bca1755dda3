use ndarray::Zip;

use crate::display::domain::display_mode::{DisplayMode, GrayFilter};
use crate::display::domain::grayscale_converter::GrayscaleConverter;
use crate::shared::frame::Frame;

/// Applies `mode` to `frame` in place.
///
/// `previous` is the grayscale reference kept for motion mode. It is only
/// read or replaced while motion is the active filter, dropped on a
/// grayscale frame without motion, and left alone while grayscale is off.
/// Only a failing colour conversion is an error.
pub fn transform_frame(
    mode: DisplayMode,
    converter: &dyn GrayscaleConverter,
    previous: &mut Option<Frame>,
    frame: &mut Frame,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(filter) = mode.active_filter() else {
        return Ok(());
    };

    if !frame.is_gray() {
        converter.to_grayscale(frame)?;
    }

    match filter {
        GrayFilter::Threshold => apply_threshold(frame, mode.threshold()),
        GrayFilter::Motion => {
            let current = frame.clone();
            if let Some(reference) = previous.as_ref().filter(|p| p.same_shape(frame)) {
                absolute_difference(frame, reference);
            }
            *previous = Some(current);
        }
        GrayFilter::None => *previous = None,
    }
    Ok(())
}

/// Binary threshold: strictly above `threshold` becomes 255, the rest 0.
pub fn apply_threshold(frame: &mut Frame, threshold: u8) {
    frame
        .as_ndarray_mut()
        .mapv_inplace(|v| if v > threshold { 255 } else { 0 });
}

/// Overwrites `frame` with `|frame - reference|` per sample.
///
/// Both frames must have the same shape.
pub fn absolute_difference(frame: &mut Frame, reference: &Frame) {
    debug_assert!(frame.same_shape(reference), "frames must share a shape");
    Zip::from(frame.as_ndarray_mut())
        .and(reference.as_ndarray())
        .for_each(|cur, &prev| *cur = cur.abs_diff(prev));
}
