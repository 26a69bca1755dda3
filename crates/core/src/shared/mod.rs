pub mod constants;
pub mod frame;
#[cfg(feature = "opencv")]
pub mod mat_conversion;
pub mod region;
