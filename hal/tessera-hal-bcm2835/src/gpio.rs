//! GPIO allocation
//!
//! Tracks which GPIO pins are in use to prevent two owners driving the
//! same line.

/// Number of GPIO pins on the BCM2835 family
pub const GPIO_COUNT: u8 = 54;

/// GPIO allocator to track pin usage
pub struct GpioAllocator {
    /// Bitmask of allocated GPIO pins (54 pins)
    allocated: u64,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    /// Create a new GPIO allocator
    pub const fn new() -> Self {
        Self { allocated: 0 }
    }

    /// Allocate a GPIO pin
    ///
    /// Returns `Ok(())` if the pin was free, `Err(pin)` if it is out of
    /// range or already in use.
    pub fn allocate(&mut self, pin: u8) -> Result<(), u8> {
        if pin >= GPIO_COUNT {
            return Err(pin);
        }
        let mask = 1u64 << pin;
        if self.allocated & mask != 0 {
            return Err(pin);
        }
        self.allocated |= mask;
        Ok(())
    }

    /// Release a GPIO pin
    pub fn release(&mut self, pin: u8) {
        if pin < GPIO_COUNT {
            self.allocated &= !(1u64 << pin);
        }
    }

    /// Check if a pin is allocated
    pub fn is_allocated(&self, pin: u8) -> bool {
        if pin >= GPIO_COUNT {
            return false;
        }
        self.allocated & (1u64 << pin) != 0
    }

    /// Get the number of allocated pins
    pub fn allocated_count(&self) -> u32 {
        self.allocated.count_ones()
    }
}
