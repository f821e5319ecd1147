//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in tessera-core:
//!
//! - 8080 parallel bus transactor over GPIO lines
//! - ILI9341 controller lifecycle and blit engine
//! - Mutex-guarded panel sharing and policy-driven flushing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod flush;
pub mod ili9341;
pub mod shared;

#[cfg(test)]
mod testing;

pub use bus::{ParallelBus, PinLines, PinSet, PinSetError};
pub use flush::FlushScheduler;
pub use ili9341::{AttachError, BlitError, Ili9341};
pub use shared::SharedPanel;
