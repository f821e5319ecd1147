//! GPIO line abstractions
//!
//! Provides the two traits a chip-specific HAL implements to carry the
//! parallel bus: reserving the lines, then configuring and driving them.

use crate::pins::PinMap;
use crate::signal::Signal;

/// Driver for the bus lines
///
/// Implementations handle the actual hardware register manipulation
/// for the specific chip. Level changes take effect immediately; there is
/// no buffering between `set_level` and the physical pin.
pub trait LineDriver {
    /// Configure the line carrying `signal` as a push-pull output
    ///
    /// Must be called once for every signal before the first `set_level`
    /// on it. Behaviour of `set_level` on an unconfigured line is
    /// platform-defined.
    fn configure_output(&mut self, signal: Signal);

    /// Drive the line carrying `signal` high (`true`) or low (`false`)
    fn set_level(&mut self, signal: Signal, high: bool);

    /// Set the line high (logic 1)
    fn set_high(&mut self, signal: Signal) {
        self.set_level(signal, true);
    }

    /// Set the line low (logic 0)
    fn set_low(&mut self, signal: Signal) {
        self.set_level(signal, false);
    }
}

impl<T: LineDriver + ?Sized> LineDriver for &mut T {
    fn configure_output(&mut self, signal: Signal) {
        T::configure_output(self, signal)
    }

    fn set_level(&mut self, signal: Signal, high: bool) {
        T::set_level(self, signal, high)
    }
}

/// Owner of the line resource
///
/// Acquiring the lines is the only fallible step of bringing up the bus:
/// an unreachable pin controller or a conflicting pin is reported here, at
/// attach time, and never during a transaction.
pub trait LineAccess {
    /// Driver handed out while the lines are reserved
    type Lines: LineDriver;

    /// Error when the lines cannot be reserved
    type Error;

    /// Reserve every line named in `pins`
    ///
    /// On error nothing stays reserved.
    fn acquire(&mut self, pins: &PinMap) -> Result<Self::Lines, Self::Error>;

    /// Give the lines back
    fn release(&mut self, lines: Self::Lines);
}
