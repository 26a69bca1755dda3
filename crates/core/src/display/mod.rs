pub mod domain;
#[cfg(feature = "opencv")]
pub mod infrastructure;
