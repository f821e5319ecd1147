//! Command/data transport to the panel controller

/// Write-only command/data channel
///
/// Every call is one complete bus transaction; the controller never
/// acknowledges, so none of them can fail.
pub trait CommandBus {
    /// Write a command opcode (data/command line low)
    fn write_command(&mut self, opcode: u8);

    /// Write one parameter or pixel byte (data/command line high)
    fn write_data(&mut self, byte: u8);

    /// Drive the controller reset line (`true` holds the controller in reset)
    fn set_reset(&mut self, asserted: bool);

    /// Write a run of data bytes
    fn write_data_slice(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_data(b);
        }
    }

    /// Write a command followed by its parameters
    fn write_command_with(&mut self, opcode: u8, params: &[u8]) {
        self.write_command(opcode);
        self.write_data_slice(params);
    }
}

impl<T: CommandBus + ?Sized> CommandBus for &mut T {
    fn write_command(&mut self, opcode: u8) {
        T::write_command(self, opcode)
    }

    fn write_data(&mut self, byte: u8) {
        T::write_data(self, byte)
    }

    fn set_reset(&mut self, asserted: bool) {
        T::set_reset(self, asserted)
    }

    fn write_data_slice(&mut self, bytes: &[u8]) {
        T::write_data_slice(self, bytes)
    }
}
