//! BCM2835-family HAL for Tessera
//!
//! Drives the bus lines by writing the Raspberry Pi GPIO controller
//! registers directly. Supported SoCs:
//!
//! - BCM2835 / BCM2708 (Pi 1, Zero) - peripheral base `0x2020_0000`
//! - BCM2711 (Pi 4) - peripheral base `0xFE20_0000`
//!
//! # Register access
//!
//! All register traffic goes through [`registers::RegisterBlock`]. On
//! hardware that is [`registers::MmioRegisters`] over an already-mapped GPIO
//! block; in tests it is [`registers::MemoryRegisters`], which also emulates
//! the pin level register so the driven levels can be inspected.
//!
//! # Usage
//!
//! ```ignore
//! let regs = unsafe { MmioRegisters::new(mapped_base) }.ok_or(MapFailed)?;
//! let gpio = Bcm2835Gpio::new(regs);
//! let panel = Ili9341::new(gpio, PanelConfig::default());
//! ```

#![no_std]

pub mod gpio;
pub mod lines;
pub mod registers;

pub use gpio::{GpioAllocator, GPIO_COUNT};
pub use lines::{Bcm2835Gpio, Bcm2835Lines, LineAccessError};
pub use registers::{MemoryRegisters, MmioRegisters, RegisterBlock};
