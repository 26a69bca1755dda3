/// Haar cascade loaded at startup, relative to the working directory.
pub const CASCADE_PATH: &str = "resources/haarcascade_frontalface_default.xml";

/// Camera device indices probed at startup (0..N).
pub const CAMERA_INDICES_TO_TRY: u32 = 5;

pub const WINDOW_TITLE: &str = "output";

/// Key poll wait per iteration, in milliseconds.
pub const KEY_POLL_MS: i32 = 5;

pub const DETECT_SCALE_FACTOR: f64 = 1.5;
pub const DETECT_MIN_NEIGHBORS: i32 = 7;
pub const DETECT_MIN_SIZE: (i32, i32) = (30, 30);

pub const DEFAULT_THRESHOLD: u8 = 128;
pub const THRESHOLD_STEP: u8 = 5;

pub const CASCADE_ENV_VAR: &str = "FACECAM_CASCADE";
pub const CAMERA_INDICES_ENV_VAR: &str = "FACECAM_CAMERA_INDICES";
