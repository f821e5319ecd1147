//! Board wiring and panel settings
//!
//! Generated by build.rs from panel.toml, which is validated on the host
//! before the firmware is compiled.

use tessera_core::geometry::Orientation;
use tessera_core::PinAssignment;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
