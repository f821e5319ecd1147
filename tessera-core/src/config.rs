//! Panel configuration
//!
//! Board-agnostic settings fixed at attach time. With the `serde` feature
//! the whole structure deserializes from a TOML table such as:
//!
//! ```toml
//! fps = 30
//! orientation = "portrait"
//!
//! [pins]
//! data = [9, 11, 18, 23, 24, 25, 8, 7]
//! dc = 4
//! cs = 27
//! rd = 14
//! wr = 15
//! im0 = 10
//! reset = 17
//! ```
//!
//! Every key is optional, including each key of `[pins]`; missing keys keep
//! the defaults. A partial `[pins]` table is still checked for duplicates
//! against the default lines it keeps.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Orientation;
use tessera_hal::PinMap;

/// Frame rate used when none (or zero) is configured
pub const DEFAULT_FPS: u32 = 25;

/// Highest flush rate; keeps the period at a whole millisecond
pub const MAX_FPS: u32 = 1000;

/// Settings for one attached panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Physical wiring of the bus
    pub pins: PinMap,
    /// How the framebuffer maps onto the controller
    pub orientation: Orientation,
    /// Flush rate; 0 selects [`DEFAULT_FPS`], anything above [`MAX_FPS`] is capped
    pub fps: u32,
}

impl PanelConfig {
    /// Effective flush rate
    pub fn fps(&self) -> u32 {
        match self.fps {
            0 => DEFAULT_FPS,
            fps => fps.min(MAX_FPS),
        }
    }

    /// Flush period in microseconds
    pub fn frame_period_us(&self) -> u32 {
        1_000_000 / self.fps()
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            pins: PinMap::RPI_DEFAULT,
            orientation: Orientation::Landscape,
            fps: DEFAULT_FPS,
        }
    }
}
