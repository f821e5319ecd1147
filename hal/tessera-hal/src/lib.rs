//! Tessera Hardware Abstraction Layer
//!
//! This crate defines the line-level traits that chip-specific HALs
//! (BCM2835, RP2040, generic embedded-hal pins) implement. The bus
//! transactor in `tessera-drivers` only ever talks to these traits, so the
//! same panel code runs against real GPIO registers or a recording fake.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tessera-drivers (bus, init, blit)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tessera-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tessera-hal-  │       │ tessera-hal-  │
//! │    bcm2835    │       │    rp2040     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::LineDriver`] - Configure and drive the bus lines
//! - [`gpio::LineAccess`] - Reserve and release the line resource
//!
//! The logical signal set ([`Signal`]) and its binding to physical line
//! numbers ([`PinMap`]) live here too, since every implementation keys on them.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pins;
pub mod signal;

// Re-export key traits at crate root for convenience
pub use gpio::{LineAccess, LineDriver};
pub use pins::{PinAssignment, PinMap, PinMapError};
pub use signal::{Signal, SIGNAL_COUNT};
