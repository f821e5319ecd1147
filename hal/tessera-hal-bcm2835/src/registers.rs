//! GPIO register block access
//!
//! Offsets are in 32-bit words from the start of the GPIO block.

use core::ptr::NonNull;

/// Peripheral base of the BCM2835/BCM2708
pub const BCM2835_PERI_BASE: usize = 0x2000_0000;

/// Peripheral base of the BCM2711
pub const BCM2711_PERI_BASE: usize = 0xFE00_0000;

/// Offset of the GPIO block from the peripheral base
pub const GPIO_OFFSET: usize = 0x20_0000;

/// Size of the GPIO block mapping
pub const GPIO_BLOCK_SIZE: usize = 4 * 1024;

/// Register word offsets
pub mod regs {
    /// Function select 0 (pins 0-9); GPFSEL1..5 follow
    pub const GPFSEL0: usize = 0;
    /// Pin output set 0 (pins 0-31); GPSET1 follows
    pub const GPSET0: usize = 7;
    /// Pin output clear 0 (pins 0-31); GPCLR1 follows
    pub const GPCLR0: usize = 10;
    /// Pin level 0 (pins 0-31); GPLEV1 follows
    pub const GPLEV0: usize = 13;
}

/// Number of words emulated by [`MemoryRegisters`] (through GPLEV1)
pub const BLOCK_WORDS: usize = regs::GPLEV0 + 2;

/// Word-addressed access to the GPIO register block
pub trait RegisterBlock {
    /// Read the register at `word`
    fn read(&self, word: usize) -> u32;

    /// Write `value` to the register at `word`
    fn write(&mut self, word: usize, value: u32);
}

/// Memory-mapped GPIO block
///
/// Owns the mapping exclusively; only one `MmioRegisters` may exist per
/// mapping.
pub struct MmioRegisters {
    base: NonNull<u32>,
}

impl MmioRegisters {
    /// Wrap an already-mapped GPIO block
    ///
    /// Returns `None` when `base` is null, i.e. the mapping failed.
    ///
    /// # Safety
    ///
    /// `base` must point to a mapped, device-memory GPIO block of at least
    /// [`GPIO_BLOCK_SIZE`] bytes that stays mapped for the lifetime of the
    /// returned value, and no other code may write the block concurrently.
    pub unsafe fn new(base: *mut u32) -> Option<Self> {
        NonNull::new(base).map(|base| Self { base })
    }
}

impl RegisterBlock for MmioRegisters {
    fn read(&self, word: usize) -> u32 {
        debug_assert!(word * 4 < GPIO_BLOCK_SIZE);
        // SAFETY: `new` requires a live mapping of GPIO_BLOCK_SIZE bytes and
        // every register offset used by this crate is inside it.
        unsafe { self.base.as_ptr().add(word).read_volatile() }
    }

    fn write(&mut self, word: usize, value: u32) {
        debug_assert!(word * 4 < GPIO_BLOCK_SIZE);
        // SAFETY: as for `read`; exclusive access is guaranteed by `&mut self`
        // and the ownership contract of `new`.
        unsafe { self.base.as_ptr().add(word).write_volatile(value) }
    }
}

/// In-memory GPIO block
///
/// Behaves like the controller for the registers the line driver uses:
/// writes to GPSETn/GPCLRn update the GPLEVn level registers instead of
/// being stored.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegisters {
    words: [u32; BLOCK_WORDS],
    writes: usize,
}

impl MemoryRegisters {
    /// Create a block with every pin an input at level low
    pub const fn new() -> Self {
        Self {
            words: [0; BLOCK_WORDS],
            writes: 0,
        }
    }

    /// Current level of `pin`
    pub fn level(&self, pin: u8) -> bool {
        let bank = (pin / 32) as usize;
        self.words
            .get(regs::GPLEV0 + bank)
            .is_some_and(|w| w & (1 << (pin % 32)) != 0)
    }

    /// 3-bit function select value of `pin` (0 = input, 1 = output)
    pub fn function(&self, pin: u8) -> u32 {
        let reg = regs::GPFSEL0 + (pin / 10) as usize;
        let shift = (pin % 10) as u32 * 3;
        self.words.get(reg).map_or(0, |w| (w >> shift) & 0b111)
    }

    /// Total register writes seen
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl RegisterBlock for MemoryRegisters {
    fn read(&self, word: usize) -> u32 {
        self.words.get(word).copied().unwrap_or(0)
    }

    fn write(&mut self, word: usize, value: u32) {
        self.writes += 1;
        match word {
            w if (regs::GPSET0..regs::GPSET0 + 2).contains(&w) => {
                self.words[regs::GPLEV0 + (w - regs::GPSET0)] |= value;
            }
            w if (regs::GPCLR0..regs::GPCLR0 + 2).contains(&w) => {
                self.words[regs::GPLEV0 + (w - regs::GPCLR0)] &= !value;
            }
            w => {
                if let Some(slot) = self.words.get_mut(w) {
                    *slot = value;
                }
            }
        }
    }
}
