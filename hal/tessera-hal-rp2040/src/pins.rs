//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so the panel wiring
//! can come from a [`PinMap`](tessera_hal::PinMap) instead of being
//! hardcoded.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals;
use embassy_rp::Peri;

/// Number of user GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
}

/// GPIO pins moved out of the peripherals
///
/// Everything else in `Peripherals` stays with the caller.
pub struct BankPins {
    pub pin0: Peri<'static, peripherals::PIN_0>,
    pub pin1: Peri<'static, peripherals::PIN_1>,
    pub pin2: Peri<'static, peripherals::PIN_2>,
    pub pin3: Peri<'static, peripherals::PIN_3>,
    pub pin4: Peri<'static, peripherals::PIN_4>,
    pub pin5: Peri<'static, peripherals::PIN_5>,
    pub pin6: Peri<'static, peripherals::PIN_6>,
    pub pin7: Peri<'static, peripherals::PIN_7>,
    pub pin8: Peri<'static, peripherals::PIN_8>,
    pub pin9: Peri<'static, peripherals::PIN_9>,
    pub pin10: Peri<'static, peripherals::PIN_10>,
    pub pin11: Peri<'static, peripherals::PIN_11>,
    pub pin12: Peri<'static, peripherals::PIN_12>,
    pub pin13: Peri<'static, peripherals::PIN_13>,
    pub pin14: Peri<'static, peripherals::PIN_14>,
    pub pin15: Peri<'static, peripherals::PIN_15>,
    pub pin16: Peri<'static, peripherals::PIN_16>,
    pub pin17: Peri<'static, peripherals::PIN_17>,
    pub pin18: Peri<'static, peripherals::PIN_18>,
    pub pin19: Peri<'static, peripherals::PIN_19>,
    pub pin20: Peri<'static, peripherals::PIN_20>,
    pub pin21: Peri<'static, peripherals::PIN_21>,
    pub pin22: Peri<'static, peripherals::PIN_22>,
    pub pin23: Peri<'static, peripherals::PIN_23>,
    pub pin24: Peri<'static, peripherals::PIN_24>,
    pub pin25: Peri<'static, peripherals::PIN_25>,
    pub pin26: Peri<'static, peripherals::PIN_26>,
    pub pin27: Peri<'static, peripherals::PIN_27>,
    pub pin28: Peri<'static, peripherals::PIN_28>,
    pub pin29: Peri<'static, peripherals::PIN_29>,
}

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Create a pin bank owning every GPIO pin
    ///
    /// After this call, pins must be obtained through `take()`.
    pub fn new(p: BankPins) -> Self {
        Self {
            pins: [
                Some(p.pin0.into()),
                Some(p.pin1.into()),
                Some(p.pin2.into()),
                Some(p.pin3.into()),
                Some(p.pin4.into()),
                Some(p.pin5.into()),
                Some(p.pin6.into()),
                Some(p.pin7.into()),
                Some(p.pin8.into()),
                Some(p.pin9.into()),
                Some(p.pin10.into()),
                Some(p.pin11.into()),
                Some(p.pin12.into()),
                Some(p.pin13.into()),
                Some(p.pin14.into()),
                Some(p.pin15.into()),
                Some(p.pin16.into()),
                Some(p.pin17.into()),
                Some(p.pin18.into()),
                Some(p.pin19.into()),
                Some(p.pin20.into()),
                Some(p.pin21.into()),
                Some(p.pin22.into()),
                Some(p.pin23.into()),
                Some(p.pin24.into()),
                Some(p.pin25.into()),
                Some(p.pin26.into()),
                Some(p.pin27.into()),
                Some(p.pin28.into()),
                Some(p.pin29.into()),
            ],
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin(pin_num))?
            .take()
            .ok_or(PinError::AlreadyTaken(pin_num))
    }
}
