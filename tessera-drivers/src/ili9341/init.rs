//! Controller bring-up: hardware reset, then the register script

use embedded_hal::delay::DelayNs;
use tessera_core::script::INIT_SCRIPT;
use tessera_core::traits::CommandBus;

/// Time the reset line is held low
pub const RESET_PULSE_MS: u32 = 120;

/// Time allowed for the controller to come out of reset
pub const RESET_RECOVERY_MS: u32 = 120;

/// Pulse the reset line
pub fn hard_reset<B: CommandBus, D: DelayNs>(bus: &mut B, delay: &mut D) {
    bus.set_reset(true);
    delay.delay_ms(RESET_PULSE_MS);
    bus.set_reset(false);
    delay.delay_ms(RESET_RECOVERY_MS);
}

/// Reset the controller and write the full init script
///
/// There is nothing to read back on this bus, so this always runs to the
/// end.
pub fn initialize<B: CommandBus, D: DelayNs>(bus: &mut B, delay: &mut D) {
    hard_reset(bus, delay);
    for step in INIT_SCRIPT {
        bus.write_command_with(step.opcode, step.params);
    }
}
