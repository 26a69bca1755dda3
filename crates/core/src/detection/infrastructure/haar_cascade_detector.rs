use std::path::{Path, PathBuf};

use opencv::core::{Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use thiserror::Error;

use crate::detection::domain::face_detector::{DetectionParams, FaceDetector};
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::frame_to_mat;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum CascadeError {
    #[error("cascade file not found: {0}")]
    Missing(PathBuf),
    #[error("cascade file could not be parsed: {0}")]
    Empty(PathBuf),
    #[error("failed to load cascade: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// Face detector backed by a pre-trained OpenCV Haar cascade.
pub struct HaarCascadeDetector {
    classifier: CascadeClassifier,
    params: DetectionParams,
}

impl HaarCascadeDetector {
    pub fn new(cascade_path: &Path, params: DetectionParams) -> Result<Self, CascadeError> {
        if !cascade_path.is_file() {
            return Err(CascadeError::Missing(cascade_path.to_path_buf()));
        }
        let classifier = CascadeClassifier::new(&cascade_path.to_string_lossy())?;
        if classifier.empty()? {
            return Err(CascadeError::Empty(cascade_path.to_path_buf()));
        }
        log::info!("Loaded face cascade from {}", cascade_path.display());
        Ok(Self { classifier, params })
    }
}

impl FaceDetector for HaarCascadeDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let image = frame_to_mat(frame)?;
        let mut faces = Vector::<Rect>::new();
        let (min_w, min_h) = self.params.min_size;
        self.classifier.detect_multi_scale(
            &image,
            &mut faces,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::new(min_w, min_h),
            Size::default(),
        )?;
        Ok(faces
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}
