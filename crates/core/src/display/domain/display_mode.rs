use std::fmt;

use crate::shared::constants::{DEFAULT_THRESHOLD, THRESHOLD_STEP};

/// Sub-mode applied on top of grayscale conversion.
///
/// Threshold and motion are alternatives, never combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrayFilter {
    #[default]
    None,
    Threshold,
    Motion,
}

/// Per-frame display settings driven by key presses.
///
/// A plain value: every transition returns a new `DisplayMode`, and a
/// transition whose guard fails returns `None` so callers can tell an
/// ignored key apart from an accepted one.
///
/// The sub-mode survives grayscale being switched off; it is simply inert
/// until grayscale comes back on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    grayscale: bool,
    filter: GrayFilter,
    threshold: u8,
}

impl DisplayMode {
    pub fn new(grayscale: bool, filter: GrayFilter, threshold: u8) -> Self {
        Self {
            grayscale,
            filter,
            threshold,
        }
    }

    pub fn grayscale(&self) -> bool {
        self.grayscale
    }

    pub fn filter(&self) -> GrayFilter {
        self.filter
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn threshold_enabled(&self) -> bool {
        self.filter == GrayFilter::Threshold
    }

    pub fn motion_enabled(&self) -> bool {
        self.filter == GrayFilter::Motion
    }

    /// Filter that actually runs this frame: `None` while grayscale is off.
    pub fn active_filter(&self) -> Option<GrayFilter> {
        self.grayscale.then_some(self.filter)
    }

    pub fn toggle_grayscale(self) -> Self {
        Self {
            grayscale: !self.grayscale,
            ..self
        }
    }

    /// Requires grayscale on and motion off.
    pub fn toggle_threshold(self) -> Option<Self> {
        if !self.grayscale {
            return None;
        }
        let filter = match self.filter {
            GrayFilter::None => GrayFilter::Threshold,
            GrayFilter::Threshold => GrayFilter::None,
            GrayFilter::Motion => return None,
        };
        Some(Self { filter, ..self })
    }

    /// Requires grayscale on and threshold off.
    pub fn toggle_motion(self) -> Option<Self> {
        if !self.grayscale {
            return None;
        }
        let filter = match self.filter {
            GrayFilter::None => GrayFilter::Motion,
            GrayFilter::Motion => GrayFilter::None,
            GrayFilter::Threshold => return None,
        };
        Some(Self { filter, ..self })
    }

    pub fn raise_threshold(self) -> Self {
        Self {
            threshold: self.threshold.saturating_add(THRESHOLD_STEP),
            ..self
        }
    }

    pub fn lower_threshold(self) -> Self {
        Self {
            threshold: self.threshold.saturating_sub(THRESHOLD_STEP),
            ..self
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::new(false, GrayFilter::None, DEFAULT_THRESHOLD)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filter = match self.filter {
            GrayFilter::None => "none",
            GrayFilter::Threshold => "threshold",
            GrayFilter::Motion => "motion",
        };
        write!(
            f,
            "grayscale={} filter={} threshold={}",
            self.grayscale, filter, self.threshold
        )
    }
}
