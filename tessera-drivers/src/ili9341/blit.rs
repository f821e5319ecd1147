//! Region blit engine
//!
//! Sets the controller's write window (when it differs from the one already
//! configured), opens a memory write and streams the region's pixels in the
//! orientation's scan order, high byte first.

use tessera_core::geometry::{Orientation, Region, Window};
use tessera_core::pixel::PixelBuffer;
use tessera_core::script::cmd;
use tessera_core::traits::CommandBus;

/// Bytes handed to the bus per `write_data_slice` call
const CHUNK_BYTES: usize = 64;

/// Stream `region` of `buffer` to the controller
///
/// `window` caches the controller's current write window and is updated
/// when a new one is programmed. The caller has checked that `region` fits
/// `buffer`; an empty region sends nothing.
pub fn blit_region<B: CommandBus>(
    bus: &mut B,
    window: &mut Option<Window>,
    orientation: Orientation,
    buffer: &PixelBuffer<'_>,
    region: Region,
) {
    let Some(wanted) = Window::for_region(orientation, region) else {
        return;
    };
    let Some(pixels) = buffer.scan(region, orientation) else {
        return;
    };

    if *window != Some(wanted) {
        let (x_range, y_range) = match orientation {
            Orientation::Landscape => (wanted.column, wanted.page),
            Orientation::Portrait => (wanted.page, wanted.column),
        };
        bus.write_command_with(orientation.x_command(), &x_range.to_bytes());
        bus.write_command_with(orientation.y_command(), &y_range.to_bytes());
        *window = Some(wanted);
    }

    bus.write_command(cmd::RAMWR);

    let mut chunk = [0u8; CHUNK_BYTES];
    let mut len = 0;
    for px in pixels {
        chunk[len] = px.high();
        chunk[len + 1] = px.low();
        len += 2;
        if len == CHUNK_BYTES {
            bus.write_data_slice(&chunk);
            len = 0;
        }
    }
    bus.write_data_slice(&chunk[..len]);

    bus.write_command(cmd::DISPON);
}
