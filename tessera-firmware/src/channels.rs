//! Inter-task communication
//!
//! The framebuffer lives here so drawing and flushing can share it; frame
//! events tell the flush task what happened to it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;

use tessera_core::geometry::{PANEL_HEIGHT, PANEL_WIDTH};
use tessera_core::sync::SyncEvent;

/// Bytes in one RGB565 frame
pub const FRAME_BYTES: usize = PANEL_WIDTH as usize * PANEL_HEIGHT as usize * 2;

/// Channel capacity for frame events
const FRAME_EVENT_CHANNEL_SIZE: usize = 8;

/// The framebuffer, row-major little-endian RGB565
pub static FRAMEBUFFER: Mutex<CriticalSectionRawMutex, [u8; FRAME_BYTES]> =
    Mutex::new([0u8; FRAME_BYTES]);

/// Changes to the framebuffer, consumed by the flush task
pub static FRAME_EVENTS: Channel<CriticalSectionRawMutex, SyncEvent, FRAME_EVENT_CHANNEL_SIZE> =
    Channel::new();
