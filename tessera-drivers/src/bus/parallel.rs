//! 8080-style write-only parallel bus
//!
//! A transaction is: data/command line to the mode, the byte onto the data
//! lines, write strobe low, write strobe high. The controller latches on the
//! rising edge.
//!
//! The transactor remembers the last mode and byte it drove and only touches
//! lines whose level changes. What the controller sees at each strobe edge
//! is the same as if every line were rewritten every time.

use tessera_core::traits::CommandBus;
use tessera_hal::{LineDriver, Signal};

/// Command/data transactor over fourteen GPIO lines
pub struct ParallelBus<L> {
    lines: L,
    /// Last driven data/command level (true = data)
    data_mode: bool,
    /// Last byte on the data lines
    latched: u8,
}

impl<L: LineDriver> ParallelBus<L> {
    /// Configure every line as an output and drive the idle levels
    ///
    /// Idle: data lines low, DC high, CS low (panel permanently selected),
    /// RD high, WR high, IM0 high, RESET high.
    pub fn new(mut lines: L) -> Self {
        for signal in Signal::ALL {
            lines.configure_output(signal);
        }

        for signal in Signal::DATA {
            lines.set_low(signal);
        }
        lines.set_high(Signal::DataCommand);
        lines.set_low(Signal::ChipSelect);
        lines.set_high(Signal::ReadStrobe);
        lines.set_high(Signal::WriteStrobe);
        lines.set_high(Signal::InterfaceMode);
        lines.set_high(Signal::Reset);

        Self {
            lines,
            data_mode: true,
            latched: 0,
        }
    }

    /// Give the lines back, leaving them at their current levels
    pub fn release(self) -> L {
        self.lines
    }

    /// Line driver, for inspection
    pub fn lines(&self) -> &L {
        &self.lines
    }

    #[inline]
    fn select(&mut self, data_mode: bool) {
        if self.data_mode != data_mode {
            self.lines.set_level(Signal::DataCommand, data_mode);
            self.data_mode = data_mode;
        }
    }

    #[inline]
    fn put(&mut self, byte: u8) {
        let changed = self.latched ^ byte;
        if changed == 0 {
            return;
        }
        for (bit, signal) in Signal::DATA.iter().enumerate() {
            if changed & (1 << bit) != 0 {
                self.lines.set_level(*signal, byte & (1 << bit) != 0);
            }
        }
        self.latched = byte;
    }

    #[inline]
    fn strobe(&mut self) {
        self.lines.set_low(Signal::WriteStrobe);
        self.lines.set_high(Signal::WriteStrobe);
    }
}

impl<L: LineDriver> CommandBus for ParallelBus<L> {
    fn write_command(&mut self, opcode: u8) {
        self.select(false);
        self.put(opcode);
        self.strobe();
    }

    fn write_data(&mut self, byte: u8) {
        self.select(true);
        self.put(byte);
        self.strobe();
    }

    fn set_reset(&mut self, asserted: bool) {
        self.lines.set_level(Signal::Reset, !asserted);
    }

    fn write_data_slice(&mut self, bytes: &[u8]) {
        self.select(true);
        for &b in bytes {
            self.put(b);
            self.strobe();
        }
    }
}
