//! Logical-to-physical pin binding
//!
//! A [`PinMap`] is fixed at construction: every logical [`Signal`] resolves to
//! one physical line number, and no physical line carries two signals.

use core::fmt;

use heapless::FnvIndexSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::signal::{Signal, SIGNAL_COUNT};

/// Errors when building a pin map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMapError {
    /// The same physical line was assigned to two signals
    DuplicateLine(u8),
}

impl fmt::Display for PinMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinMapError::DuplicateLine(line) => {
                write!(f, "line {} is assigned to more than one signal", line)
            }
        }
    }
}

/// Raw, unvalidated pin numbers as they appear in configuration
///
/// Missing fields deserialize to the [`PinMap::RPI_DEFAULT`] wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinAssignment {
    /// Data lines, bit 0 first
    pub data: [u8; 8],
    /// Data/command select
    pub dc: u8,
    /// Chip select
    pub cs: u8,
    /// Read strobe
    pub rd: u8,
    /// Write strobe
    pub wr: u8,
    /// Interface mode select
    pub im0: u8,
    /// Controller reset
    pub reset: u8,
}

/// Validated binding of every bus signal to a physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "PinAssignment", into = "PinAssignment")
)]
pub struct PinMap {
    lines: [u8; SIGNAL_COUNT],
}

impl PinMap {
    /// Wiring of the Raspberry Pi (model B rev2) header board
    pub const RPI_DEFAULT: PinMap = PinMap {
        lines: [9, 11, 18, 23, 24, 25, 8, 7, 4, 27, 14, 15, 10, 17],
    };

    /// Build a pin map, rejecting any physical line used twice
    pub fn new(assignment: PinAssignment) -> Result<Self, PinMapError> {
        let lines = [
            assignment.data[0],
            assignment.data[1],
            assignment.data[2],
            assignment.data[3],
            assignment.data[4],
            assignment.data[5],
            assignment.data[6],
            assignment.data[7],
            assignment.dc,
            assignment.cs,
            assignment.rd,
            assignment.wr,
            assignment.im0,
            assignment.reset,
        ];

        let mut seen: FnvIndexSet<u8, 16> = FnvIndexSet::new();
        for &line in &lines {
            // Capacity is larger than SIGNAL_COUNT, so insert only fails on
            // a repeated value.
            match seen.insert(line) {
                Ok(true) => {}
                _ => return Err(PinMapError::DuplicateLine(line)),
            }
        }

        Ok(Self { lines })
    }

    /// Physical line carrying `signal`
    pub const fn line(&self, signal: Signal) -> u8 {
        self.lines[signal.index()]
    }

    /// Iterate over `(signal, line)` pairs in signal order
    pub fn iter(&self) -> impl Iterator<Item = (Signal, u8)> + '_ {
        Signal::ALL.iter().map(move |&s| (s, self.line(s)))
    }

    /// Raw assignment for serialization or display
    pub fn assignment(&self) -> PinAssignment {
        let l = &self.lines;
        PinAssignment {
            data: [l[0], l[1], l[2], l[3], l[4], l[5], l[6], l[7]],
            dc: l[8],
            cs: l[9],
            rd: l[10],
            wr: l[11],
            im0: l[12],
            reset: l[13],
        }
    }
}

impl Default for PinAssignment {
    fn default() -> Self {
        PinMap::RPI_DEFAULT.assignment()
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self::RPI_DEFAULT
    }
}

impl TryFrom<PinAssignment> for PinMap {
    type Error = PinMapError;

    fn try_from(assignment: PinAssignment) -> Result<Self, Self::Error> {
        Self::new(assignment)
    }
}

impl From<PinMap> for PinAssignment {
    fn from(map: PinMap) -> Self {
        map.assignment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpi_default_wiring() {
        let map = PinMap::RPI_DEFAULT;
        assert_eq!(map.line(Signal::Data0), 9);
        assert_eq!(map.line(Signal::Data1), 11);
        assert_eq!(map.line(Signal::Data7), 7);
        assert_eq!(map.line(Signal::DataCommand), 4);
        assert_eq!(map.line(Signal::ChipSelect), 27);
        assert_eq!(map.line(Signal::ReadStrobe), 14);
        assert_eq!(map.line(Signal::WriteStrobe), 15);
        assert_eq!(map.line(Signal::InterfaceMode), 10);
        assert_eq!(map.line(Signal::Reset), 17);
    }

    #[test]
    fn test_default_round_trips_through_assignment() {
        let map = PinMap::default();
        assert_eq!(PinMap::new(map.assignment()), Ok(map));
    }

    #[test]
    fn test_duplicate_line_rejected() {
        let mut assignment = PinMap::RPI_DEFAULT.assignment();
        assignment.reset = assignment.dc;

        assert_eq!(
            PinMap::new(assignment),
            Err(PinMapError::DuplicateLine(4))
        );
    }

    #[test]
    fn test_iter_covers_every_signal() {
        let map = PinMap::RPI_DEFAULT;
        let mut count = 0;
        for (signal, line) in map.iter() {
            assert_eq!(map.line(signal), line);
            count += 1;
        }
        assert_eq!(count, SIGNAL_COUNT);
    }
}
