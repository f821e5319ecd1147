//! Tessera - ILI9341 panel firmware
//!
//! Main firmware binary for RP2040 boards with an ILI9341 panel wired to
//! fourteen GPIOs. Wiring, orientation and frame rate come from panel.toml.
//!
//! Named after the small tiles of a mosaic.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use tessera_core::config::PanelConfig;
use tessera_core::PinMap;
use tessera_drivers::Ili9341;
use tessera_hal_rp2040::{BankPins, FlexBank, PinBank};

mod board;
mod channels;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tessera firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Already checked by build.rs
    let pins = match PinMap::new(board::BOARD_PINS) {
        Ok(pins) => pins,
        Err(e) => {
            error!("Invalid panel wiring: {}", e);
            return;
        }
    };
    let config = PanelConfig {
        pins,
        orientation: board::ORIENTATION,
        fps: board::FPS,
    };
    for (signal, line) in config.pins.iter() {
        debug!("{} on GPIO{}", signal, line);
    }

    let mut bank = PinBank::new(BankPins {
        pin0: p.PIN_0,
        pin1: p.PIN_1,
        pin2: p.PIN_2,
        pin3: p.PIN_3,
        pin4: p.PIN_4,
        pin5: p.PIN_5,
        pin6: p.PIN_6,
        pin7: p.PIN_7,
        pin8: p.PIN_8,
        pin9: p.PIN_9,
        pin10: p.PIN_10,
        pin11: p.PIN_11,
        pin12: p.PIN_12,
        pin13: p.PIN_13,
        pin14: p.PIN_14,
        pin15: p.PIN_15,
        pin16: p.PIN_16,
        pin17: p.PIN_17,
        pin18: p.PIN_18,
        pin19: p.PIN_19,
        pin20: p.PIN_20,
        pin21: p.PIN_21,
        pin22: p.PIN_22,
        pin23: p.PIN_23,
        pin24: p.PIN_24,
        pin25: p.PIN_25,
        pin26: p.PIN_26,
        pin27: p.PIN_27,
        pin28: p.PIN_28,
        pin29: p.PIN_29,
    });

    let lines = match FlexBank::from_pin_bank(&mut bank, &config.pins) {
        Ok(lines) => lines,
        Err(e) => {
            error!("Failed to claim panel pins: {}", e);
            return;
        }
    };

    let mut panel = Ili9341::new(lines, config);
    match panel.attach(&mut Delay) {
        Ok(state) => info!("Panel {} ({})", state, config.orientation),
        Err(e) => {
            error!("Panel attach failed: {}", e);
            return;
        }
    }

    // The flush task becomes the panel's only owner
    spawner.spawn(tasks::flush_task(panel, config.fps())).unwrap();
    spawner.spawn(tasks::draw_task()).unwrap();

    info!("All tasks spawned");
}
