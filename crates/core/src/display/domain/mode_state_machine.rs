use crate::display::domain::display_mode::DisplayMode;
use crate::display::domain::frame_transform::transform_frame;
use crate::display::domain::grayscale_converter::GrayscaleConverter;
use crate::display::domain::key_command::KeyCommand;
use crate::shared::frame::Frame;

/// What the capture loop should do after a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

/// Owns the current [`DisplayMode`] and the motion reference frame.
///
/// Key presses replace the mode value; [`apply_transform`] hands both to
/// [`transform_frame`] explicitly.
///
/// [`apply_transform`]: ModeStateMachine::apply_transform
#[derive(Debug, Default)]
pub struct ModeStateMachine {
    mode: DisplayMode,
    previous: Option<Frame>,
}

impl ModeStateMachine {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            previous: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn has_previous_frame(&self) -> bool {
        self.previous.is_some()
    }

    /// Decodes a raw key code and applies it. Unknown codes are ignored.
    pub fn handle_input(&mut self, key_code: i32) -> InputOutcome {
        match KeyCommand::from_key_code(key_code) {
            Some(command) => self.handle_command(command),
            None => InputOutcome::Continue,
        }
    }

    pub fn handle_command(&mut self, command: KeyCommand) -> InputOutcome {
        match command {
            KeyCommand::Quit => {
                log::info!("Exiting...");
                return InputOutcome::Quit;
            }
            KeyCommand::ToggleGrayscale => {
                self.mode = self.mode.toggle_grayscale();
                if !self.mode.grayscale() {
                    // Switching grayscale off releases the motion reference;
                    // motion restarts from a new frame once grayscale is back.
                    self.previous = None;
                }
                log::info!("Grayscale mode is: {}", on_off(self.mode.grayscale()));
            }
            KeyCommand::ToggleThreshold => match self.mode.toggle_threshold() {
                Some(mode) => {
                    self.mode = mode;
                    log::info!("Threshold mode is: {}", on_off(mode.threshold_enabled()));
                }
                None => log::debug!("Threshold toggle ignored ({})", self.mode),
            },
            KeyCommand::ToggleMotion => match self.mode.toggle_motion() {
                Some(mode) => {
                    self.mode = mode;
                    log::info!("Motion mode is: {}", on_off(mode.motion_enabled()));
                }
                None => log::debug!("Motion toggle ignored ({})", self.mode),
            },
            KeyCommand::RaiseThreshold => {
                self.mode = self.mode.raise_threshold();
                log::info!("Threshold value is: {}", self.mode.threshold());
            }
            KeyCommand::LowerThreshold => {
                self.mode = self.mode.lower_threshold();
                log::info!("Threshold value is: {}", self.mode.threshold());
            }
        }
        InputOutcome::Continue
    }

    pub fn apply_transform(
        &mut self,
        converter: &dyn GrayscaleConverter,
        frame: &mut Frame,
    ) -> Result<(), Box<dyn std::error::Error>> {
        transform_frame(self.mode, converter, &mut self.previous, frame)
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
