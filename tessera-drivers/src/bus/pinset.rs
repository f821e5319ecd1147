//! Bus lines from embedded-hal output pins
//!
//! For boards whose HAL hands out typed `OutputPin`s rather than raw line
//! numbers. The pins are given in [`Signal`] order; the [`PinMap`] passed to
//! `acquire` is only used by register-level HALs and is ignored here.

use embedded_hal::digital::OutputPin;
use tessera_hal::{LineAccess, LineDriver, PinMap, Signal, SIGNAL_COUNT};

/// Errors when taking the pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinSetError {
    /// The pins are already lent to an attached panel
    Taken,
}

/// Owner of fourteen output pins, indexed by [`Signal::index`]
pub struct PinSet<P> {
    pins: Option<[P; SIGNAL_COUNT]>,
}

impl<P: OutputPin> PinSet<P> {
    pub fn new(pins: [P; SIGNAL_COUNT]) -> Self {
        Self { pins: Some(pins) }
    }

    /// Take the pins back, if not lent out
    pub fn into_pins(self) -> Option<[P; SIGNAL_COUNT]> {
        self.pins
    }
}

impl<P: OutputPin> LineAccess for PinSet<P> {
    type Lines = PinLines<P>;
    type Error = PinSetError;

    fn acquire(&mut self, _pins: &PinMap) -> Result<PinLines<P>, PinSetError> {
        self.pins
            .take()
            .map(|pins| PinLines { pins })
            .ok_or(PinSetError::Taken)
    }

    fn release(&mut self, lines: PinLines<P>) {
        self.pins = Some(lines.pins);
    }
}

/// Pins lent out by a [`PinSet`]
pub struct PinLines<P> {
    pins: [P; SIGNAL_COUNT],
}

impl<P: OutputPin> LineDriver for PinLines<P> {
    fn configure_output(&mut self, _signal: Signal) {
        // An OutputPin is already configured as an output
    }

    #[inline]
    fn set_level(&mut self, signal: Signal, high: bool) {
        let pin = &mut self.pins[signal.index()];
        // Pin errors are Infallible on every supported target
        let _ = if high { pin.set_high() } else { pin.set_low() };
    }
}
