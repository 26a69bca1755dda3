pub mod camera_scanner;
pub mod frame_timer;
pub mod live_detection_error;
pub mod live_detection_use_case;
pub mod session_logger;
