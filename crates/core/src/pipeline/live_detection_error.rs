use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiveDetectionError {
    #[error("unable to open any camera (tried indices 0..{tried})")]
    CameraUnavailable { tried: u32 },
    #[error("colour conversion failed: {0}")]
    Conversion(#[source] Box<dyn std::error::Error>),
    #[error("face detection failed: {0}")]
    Detection(#[source] Box<dyn std::error::Error>),
    #[error("display failed: {0}")]
    Display(#[source] Box<dyn std::error::Error>),
}
