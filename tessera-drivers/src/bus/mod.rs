//! Bus transports
//!
//! - [`ParallelBus`] - command/data transactions over any [`LineDriver`](tessera_hal::LineDriver)
//! - [`PinSet`] - lines backed by embedded-hal output pins

pub mod parallel;
pub mod pinset;

pub use parallel::ParallelBus;
pub use pinset::{PinLines, PinSet, PinSetError};
