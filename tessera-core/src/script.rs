//! ILI9341 command set and power-on register script
//!
//! The script is data: the init sequencer walks it after the hardware reset
//! and never branches on its contents.

use crate::geometry::{AddressRange, Window};

/// Controller opcodes
pub mod cmd {
    /// Sleep out
    pub const SLPOUT: u8 = 0x11;
    /// Gamma curve select
    pub const GAMSET: u8 = 0x26;
    /// Display off
    pub const DISPOFF: u8 = 0x28;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Page address set
    pub const PASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory access control
    pub const MADCTL: u8 = 0x36;
    /// Pixel format set
    pub const PIXSET: u8 = 0x3A;
    /// Frame rate control (normal mode)
    pub const FRMCTR1: u8 = 0xB1;
    /// Display function control
    pub const DISCTRL: u8 = 0xB6;
    /// Power control 1
    pub const PWCTR1: u8 = 0xC0;
    /// Power control 2
    pub const PWCTR2: u8 = 0xC1;
    /// VCOM control 1
    pub const VMCTR1: u8 = 0xC5;
    /// VCOM control 2
    pub const VMCTR2: u8 = 0xC7;
    /// Power control A
    pub const PWCTRA: u8 = 0xCB;
    /// Power control B
    pub const PWCTRB: u8 = 0xCF;
    /// Driver timing control A
    pub const DTCTRA: u8 = 0xE8;
    /// Driver timing control B
    pub const DTCTRB: u8 = 0xEA;
    /// Power-on sequence control
    pub const PONSEQ: u8 = 0xED;
    /// Enable 3-gamma control
    pub const EN3GAM: u8 = 0xF2;
    /// Pump ratio control
    pub const PUMPRT: u8 = 0xF7;
}

/// One command and its parameter bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    pub opcode: u8,
    pub params: &'static [u8],
}

const fn step(opcode: u8, params: &'static [u8]) -> ScriptStep {
    ScriptStep { opcode, params }
}

/// Register script run after reset, in order
pub const INIT_SCRIPT: &[ScriptStep] = &[
    step(cmd::DISPOFF, &[]),
    step(cmd::SLPOUT, &[0x00]),
    step(cmd::PWCTRA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    step(cmd::PWCTRB, &[0x00, 0x81, 0x30]),
    step(cmd::DTCTRA, &[0x85, 0x01, 0x79]),
    step(cmd::DTCTRB, &[0x00, 0x00]),
    step(cmd::PONSEQ, &[0x64, 0x03, 0x12, 0x81]),
    step(cmd::PUMPRT, &[0x20]),
    step(cmd::PWCTR1, &[0x26, 0x04]),
    step(cmd::PWCTR2, &[0x11]),
    step(cmd::VMCTR1, &[0x35, 0x3E]),
    step(cmd::VMCTR2, &[0xBE]),
    // Row address order reversed, BGR colour order
    step(cmd::MADCTL, &[0x88]),
    step(cmd::FRMCTR1, &[0x00, 0x10]),
    step(cmd::DISCTRL, &[0x0A, 0xA2]),
    // 16 bits per pixel
    step(cmd::PIXSET, &[0x55]),
    step(cmd::EN3GAM, &[0x02]),
    step(cmd::GAMSET, &[0x01]),
    step(cmd::CASET, &[0x00, 0x00, 0x00, 0xEF]),
    step(cmd::PASET, &[0x00, 0x00, 0x01, 0x3F]),
    step(cmd::DISPON, &[]),
];

/// Write window the script leaves configured: columns 0..=239, pages 0..=319
pub const INIT_WINDOW: Window = Window {
    column: AddressRange::new(0, 239),
    page: AddressRange::new(0, 319),
};

/// Total bus transactions (commands plus parameters) in [`INIT_SCRIPT`]
pub fn script_transactions() -> usize {
    INIT_SCRIPT.iter().map(|s| 1 + s.params.len()).sum()
}
