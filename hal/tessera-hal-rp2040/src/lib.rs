//! RP2040-specific HAL for Tessera panel boards
//!
//! This crate provides the RP2040 implementation of the shared
//! `tessera-hal` line traits:
//!
//! - Dynamic pin allocation for config-driven wiring
//! - A `Flex` pin bank lending the fourteen bus lines to the panel driver

#![no_std]
#![deny(unsafe_code)]

pub mod lines;
pub mod pins;

pub use lines::{FlexBank, FlexLines};
pub use pins::{BankPins, PinBank, PinError, GPIO_COUNT};

// Re-export shared traits from tessera-hal for convenience
pub use tessera_hal::{LineAccess, LineDriver};
