/// Keyboard commands recognised by the live view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    ToggleGrayscale,
    ToggleThreshold,
    ToggleMotion,
    RaiseThreshold,
    LowerThreshold,
}

impl KeyCommand {
    /// Decodes a polled key code.
    ///
    /// Negative codes mean no key was pressed. Some window backends set
    /// modifier bits above the low byte, so only the low byte is decoded.
    pub fn from_key_code(code: i32) -> Option<Self> {
        if code < 0 {
            return None;
        }
        match (code & 0xff) as u8 {
            b'q' | b'Q' => Some(Self::Quit),
            b'g' | b'G' => Some(Self::ToggleGrayscale),
            b't' | b'T' => Some(Self::ToggleThreshold),
            b'm' | b'M' => Some(Self::ToggleMotion),
            b'+' => Some(Self::RaiseThreshold),
            b'-' => Some(Self::LowerThreshold),
            _ => None,
        }
    }
}

/// Key bindings as shown in help output and the startup banner.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Q", "exit"),
    ("G", "enable/disable grayscale mode"),
    ("T", "enable/disable threshold (grayscale only)"),
    ("+/-", "increase/decrease threshold value"),
    ("M", "enable/disable motion filter (grayscale only)"),
];

/// Renders [`KEY_BINDINGS`] one per line, indented for help text.
pub fn key_bindings_help() -> String {
    KEY_BINDINGS
        .iter()
        .map(|(key, action)| format!("  '{key}' - {action}"))
        .collect::<Vec<_>>()
        .join("\n")
}
