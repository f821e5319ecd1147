//! Bus lines on RP2040 SIO pins

use embassy_rp::gpio::Flex;
use tessera_hal::{LineAccess, LineDriver, PinMap, Signal, SIGNAL_COUNT};

use crate::pins::{PinBank, PinError, GPIO_COUNT};

/// Pool of `Flex` pins the panel bus is built from
///
/// Pins are wrapped once and moved between the bank and the acquired lines,
/// so a detach/attach cycle never has to re-take peripherals.
pub struct FlexBank {
    pins: [Option<Flex<'static>>; GPIO_COUNT as usize],
}

impl FlexBank {
    /// Take every pin named in `map` out of `bank`
    ///
    /// On error the pins taken so far are dropped (left disconnected).
    pub fn from_pin_bank(bank: &mut PinBank, map: &PinMap) -> Result<Self, PinError> {
        let mut pins: [Option<Flex<'static>>; GPIO_COUNT as usize] =
            core::array::from_fn(|_| None);

        for (_, line) in map.iter() {
            let pin = bank.take(line)?;
            pins[line as usize] = Some(Flex::new(pin));
        }

        Ok(Self { pins })
    }

    /// Check if a pin is currently held by the bank
    pub fn holds(&self, pin_num: u8) -> bool {
        self.pins
            .get(pin_num as usize)
            .is_some_and(|slot| slot.is_some())
    }
}

impl LineAccess for FlexBank {
    type Lines = FlexLines;
    type Error = PinError;

    fn acquire(&mut self, pins: &PinMap) -> Result<Self::Lines, Self::Error> {
        // Check first so a failure leaves the bank untouched
        for (_, line) in pins.iter() {
            if line >= GPIO_COUNT {
                return Err(PinError::InvalidPin(line));
            }
            if !self.holds(line) {
                return Err(PinError::AlreadyTaken(line));
            }
        }

        let mut lines: [Option<Flex<'static>>; SIGNAL_COUNT] = core::array::from_fn(|_| None);
        for (signal, line) in pins.iter() {
            lines[signal.index()] = self.pins[line as usize].take();
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("FlexBank: lent {} lines", SIGNAL_COUNT);

        Ok(FlexLines {
            lines,
            map: *pins,
        })
    }

    fn release(&mut self, mut lines: Self::Lines) {
        for (signal, line) in lines.map.iter() {
            if let Some(mut pin) = lines.lines[signal.index()].take() {
                pin.set_as_input();
                self.pins[line as usize] = Some(pin);
            }
        }
    }
}

/// Bus lines lent out by a [`FlexBank`]
pub struct FlexLines {
    lines: [Option<Flex<'static>>; SIGNAL_COUNT],
    map: PinMap,
}

impl LineDriver for FlexLines {
    fn configure_output(&mut self, signal: Signal) {
        if let Some(pin) = self.lines[signal.index()].as_mut() {
            pin.set_as_output();
        }
    }

    #[inline]
    fn set_level(&mut self, signal: Signal, high: bool) {
        if let Some(pin) = self.lines[signal.index()].as_mut() {
            if high {
                pin.set_high();
            } else {
                pin.set_low();
            }
        }
    }
}
