//! Panel geometry and controller addressing
//!
//! The framebuffer is always 320 pixels wide and 240 high. Orientation only
//! decides how that buffer lands in the controller's memory: which address
//! command carries which axis, and in which order pixels are streamed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::script::cmd;

/// Framebuffer width in pixels
pub const PANEL_WIDTH: u16 = 320;

/// Framebuffer height in pixels
pub const PANEL_HEIGHT: u16 = 240;

/// How the framebuffer maps onto controller memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Column address carries x, page address carries y; rows are streamed
    #[default]
    Landscape,
    /// Column address carries y, page address carries x; columns are streamed
    Portrait,
}

impl Orientation {
    /// Address command for the horizontal (buffer x) range
    pub const fn x_command(self) -> u8 {
        match self {
            Orientation::Landscape => cmd::CASET,
            Orientation::Portrait => cmd::PASET,
        }
    }

    /// Address command for the vertical (buffer y) range
    pub const fn y_command(self) -> u8 {
        match self {
            Orientation::Landscape => cmd::PASET,
            Orientation::Portrait => cmd::CASET,
        }
    }
}

/// Rectangle within a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width` × `height` buffer
    pub const fn full(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Check if the region covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the region lies inside a `width` × `height` buffer
    ///
    /// Computed in `u32`, so large origins cannot wrap into range.
    pub const fn fits_within(&self, width: u16, height: u16) -> bool {
        self.x as u32 + self.width as u32 <= width as u32
            && self.y as u32 + self.height as u32 <= height as u32
    }

    /// Intersection with a `width` × `height` buffer
    pub fn clipped_to(&self, width: u16, height: u16) -> Region {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = (self.x as u32 + self.width as u32).min(width as u32) as u16;
        let bottom = (self.y as u32 + self.height as u32).min(height as u32) as u16;
        Region::new(x, y, right - x, bottom - y)
    }
}

/// Inclusive controller address range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressRange {
    pub start: u16,
    pub end: u16,
}

impl AddressRange {
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Range of `extent` addresses beginning at `start`
    ///
    /// Returns `None` for an empty extent or one running past `u16::MAX`.
    pub fn spanning(start: u16, extent: u16) -> Option<Self> {
        let last = extent.checked_sub(1)?;
        Some(Self {
            start,
            end: start.checked_add(last)?,
        })
    }

    /// Parameter bytes: start high, start low, end high, end low
    pub const fn to_bytes(self) -> [u8; 4] {
        let [sh, sl] = self.start.to_be_bytes();
        let [eh, el] = self.end.to_be_bytes();
        [sh, sl, eh, el]
    }

    /// Number of addresses covered
    pub const fn len(&self) -> u32 {
        self.end as u32 - self.start as u32 + 1
    }
}

/// Controller write window: column range (0x2A) and page range (0x2B)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub column: AddressRange,
    pub page: AddressRange,
}

impl Window {
    /// Window addressing `region` in the given orientation
    ///
    /// Returns `None` for an empty region.
    pub fn for_region(orientation: Orientation, region: Region) -> Option<Self> {
        let xs = AddressRange::spanning(region.x, region.width)?;
        let ys = AddressRange::spanning(region.y, region.height)?;
        Some(match orientation {
            Orientation::Landscape => Window {
                column: xs,
                page: ys,
            },
            Orientation::Portrait => Window {
                column: ys,
                page: xs,
            },
        })
    }
}
