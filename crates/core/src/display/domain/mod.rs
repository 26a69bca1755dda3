pub mod display_mode;
pub mod display_surface;
pub mod frame_transform;
pub mod grayscale_converter;
pub mod key_command;
pub mod mode_state_machine;
pub mod overlay;
