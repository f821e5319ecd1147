//! Board-agnostic core logic for the Tessera panel driver
//!
//! This crate contains everything about driving an ILI9341-class panel that
//! does not depend on how the bus lines are toggled:
//!
//! - Panel geometry, orientation and addressing windows
//! - RGB565 pixel buffer views and scan order
//! - Framebuffer byte-stream access and in-buffer drawing
//! - The controller init script and lifecycle state machine
//! - Frame sync policy
//! - Configuration type definitions
//! - Bus and panel traits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod framebuffer;
pub mod geometry;
pub mod pixel;
pub mod script;
pub mod state;
pub mod sync;
pub mod traits;

pub use config::PanelConfig;
pub use framebuffer::{FbAccessError, FrameBuffer};
pub use geometry::{AddressRange, Orientation, Region, Window, PANEL_HEIGHT, PANEL_WIDTH};
pub use pixel::{BufferError, PixelBuffer, Rgb565};
pub use state::{ControllerEvent, ControllerState};
pub use sync::{SyncAction, SyncEvent, SyncPolicy};

// Pin types are defined in the HAL; re-export so configs only need this crate
pub use tessera_hal::{PinAssignment, PinMap, PinMapError, Signal};
