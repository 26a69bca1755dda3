//! Real-time webcam face detection.
//!
//! The domain layer (`display::domain`, `detection::domain`,
//! `video::domain`, `pipeline`) is backend-agnostic and fully testable.
//! OpenCV adapters for the camera, the Haar cascade and the preview window
//! live in the `infrastructure` modules behind the default `opencv` feature.

pub mod config;
pub mod detection;
pub mod display;
pub mod pipeline;
pub mod shared;
pub mod video;
