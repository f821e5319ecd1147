//! Bus lines on the BCM2835 GPIO controller
//!
//! [`Bcm2835Gpio`] owns the register block while idle and lends it to a
//! [`Bcm2835Lines`] for as long as the panel is attached.

use tessera_hal::{LineAccess, LineDriver, PinMap, Signal};

use crate::gpio::GpioAllocator;
use crate::registers::{regs, RegisterBlock};

/// Errors when reserving the bus lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineAccessError {
    /// Pin number outside the controller's range
    InvalidPin(u8),
    /// Pin already reserved by another owner
    AlreadyAllocated(u8),
    /// The register block is already lent to an attached panel
    Busy,
}

/// GPIO controller holding the register block
pub struct Bcm2835Gpio<R> {
    regs: Option<R>,
    allocator: GpioAllocator,
}

impl<R: RegisterBlock> Bcm2835Gpio<R> {
    /// Create a controller over a register block
    pub fn new(regs: R) -> Self {
        Self {
            regs: Some(regs),
            allocator: GpioAllocator::new(),
        }
    }

    /// Reserve an extra pin for a non-bus user (e.g. a backlight switch)
    pub fn reserve(&mut self, pin: u8) -> Result<(), LineAccessError> {
        self.allocator.allocate(pin).map_err(|p| self.classify(p))
    }

    /// Check if a pin is reserved
    pub fn is_reserved(&self, pin: u8) -> bool {
        self.allocator.is_allocated(pin)
    }

    /// Register block, when not lent out
    pub fn registers(&self) -> Option<&R> {
        self.regs.as_ref()
    }

    fn classify(&self, pin: u8) -> LineAccessError {
        if self.allocator.is_allocated(pin) {
            LineAccessError::AlreadyAllocated(pin)
        } else {
            LineAccessError::InvalidPin(pin)
        }
    }
}

impl<R: RegisterBlock> LineAccess for Bcm2835Gpio<R> {
    type Lines = Bcm2835Lines<R>;
    type Error = LineAccessError;

    fn acquire(&mut self, pins: &PinMap) -> Result<Self::Lines, Self::Error> {
        if self.regs.is_none() {
            return Err(LineAccessError::Busy);
        }

        for (i, (_, pin)) in pins.iter().enumerate() {
            if let Err(p) = self.allocator.allocate(pin) {
                let err = self.classify(p);
                // Roll back what this call reserved
                for (_, reserved) in pins.iter().take(i) {
                    self.allocator.release(reserved);
                }
                return Err(err);
            }
        }

        let regs = self.regs.take().ok_or(LineAccessError::Busy)?;
        Ok(Bcm2835Lines { regs, pins: *pins })
    }

    fn release(&mut self, lines: Self::Lines) {
        for (_, pin) in lines.pins.iter() {
            self.allocator.release(pin);
        }
        self.regs = Some(lines.regs);
    }
}

/// Reserved bus lines backed by the GPIO registers
pub struct Bcm2835Lines<R> {
    regs: R,
    pins: PinMap,
}

impl<R: RegisterBlock> Bcm2835Lines<R> {
    /// Register block, for inspection
    pub fn registers(&self) -> &R {
        &self.regs
    }
}

impl<R: RegisterBlock> LineDriver for Bcm2835Lines<R> {
    fn configure_output(&mut self, signal: Signal) {
        let pin = self.pins.line(signal);
        let reg = regs::GPFSEL0 + (pin / 10) as usize;
        let shift = (pin % 10) as u32 * 3;

        // The function field must pass through input (000) before output (001)
        let value = self.regs.read(reg) & !(0b111 << shift);
        self.regs.write(reg, value);
        self.regs.write(reg, value | (0b001 << shift));
    }

    #[inline]
    fn set_level(&mut self, signal: Signal, high: bool) {
        let pin = self.pins.line(signal);
        let bank = (pin / 32) as usize;
        let bit = 1u32 << (pin % 32);
        let reg = if high { regs::GPSET0 } else { regs::GPCLR0 };
        self.regs.write(reg + bank, bit);
    }
}
