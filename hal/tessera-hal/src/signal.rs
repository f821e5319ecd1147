//! Logical bus signals
//!
//! The 8080-style write bus is fourteen lines: eight data bits plus the
//! mode, select, strobe and reset controls.

/// Number of logical signals on the bus
pub const SIGNAL_COUNT: usize = 14;

/// A logical line of the parallel bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// Data bit 0 (LSB)
    Data0,
    /// Data bit 1
    Data1,
    /// Data bit 2
    Data2,
    /// Data bit 3
    Data3,
    /// Data bit 4
    Data4,
    /// Data bit 5
    Data5,
    /// Data bit 6
    Data6,
    /// Data bit 7 (MSB)
    Data7,
    /// Data/command select (low = command, high = data)
    DataCommand,
    /// Chip select (active low)
    ChipSelect,
    /// Read strobe (active low, held inactive on this write-only bus)
    ReadStrobe,
    /// Write strobe (controller samples on the rising edge)
    WriteStrobe,
    /// Interface mode select
    InterfaceMode,
    /// Controller reset (active low)
    Reset,
}

impl Signal {
    /// All signals in index order
    pub const ALL: [Signal; SIGNAL_COUNT] = [
        Signal::Data0,
        Signal::Data1,
        Signal::Data2,
        Signal::Data3,
        Signal::Data4,
        Signal::Data5,
        Signal::Data6,
        Signal::Data7,
        Signal::DataCommand,
        Signal::ChipSelect,
        Signal::ReadStrobe,
        Signal::WriteStrobe,
        Signal::InterfaceMode,
        Signal::Reset,
    ];

    /// The eight data signals, bit 0 first
    pub const DATA: [Signal; 8] = [
        Signal::Data0,
        Signal::Data1,
        Signal::Data2,
        Signal::Data3,
        Signal::Data4,
        Signal::Data5,
        Signal::Data6,
        Signal::Data7,
    ];

    /// Stable index of this signal (0..SIGNAL_COUNT)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Check if this is one of the eight data lines
    pub const fn is_data(self) -> bool {
        (self as usize) < 8
    }
}
