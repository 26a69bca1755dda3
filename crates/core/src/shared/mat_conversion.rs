use opencv::core::{self, Mat, Scalar};
use opencv::prelude::*;
use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum MatConversionError {
    #[error("unsupported channel count: {0}")]
    Channels(i32),
    #[error("unsupported matrix depth {0}, expected 8-bit")]
    Depth(i32),
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

fn mat_type(channels: i32) -> Result<i32, MatConversionError> {
    match channels {
        1 => Ok(core::CV_8UC1),
        3 => Ok(core::CV_8UC3),
        other => Err(MatConversionError::Channels(other)),
    }
}

/// Copies a frame into a freshly allocated 8-bit matrix.
pub fn frame_to_mat(frame: &Frame) -> Result<Mat, MatConversionError> {
    let typ = mat_type(frame.channels() as i32)?;
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        typ,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    Ok(mat)
}

/// Copies an 8-bit matrix into a frame. An empty matrix yields an empty frame.
pub fn mat_to_frame(mat: &Mat, index: usize) -> Result<Frame, MatConversionError> {
    if mat.empty() {
        return Ok(Frame::new(Vec::new(), 0, 0, 3, index));
    }
    if mat.depth() != core::CV_8U {
        return Err(MatConversionError::Depth(mat.depth()));
    }
    let channels = mat.channels();
    mat_type(channels)?;

    let data = if mat.is_continuous() {
        mat.data_bytes()?.to_vec()
    } else {
        mat.try_clone()?.data_bytes()?.to_vec()
    };
    Ok(Frame::new(
        data,
        mat.cols() as u32,
        mat.rows() as u32,
        channels as u8,
        index,
    ))
}
