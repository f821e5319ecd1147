//! Flush task
//!
//! Pushes the framebuffer to the panel on each tick (if dirty) and on
//! immediate-flush events from the drawing side.
//!
//! This task is the panel's single writer, so the lock around it is a
//! `NoopRawMutex`: a bit-banged frame must not run with interrupts masked,
//! or the time driver behind the ticker stalls.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::{Duration, Ticker};
use tessera_core::geometry::{PANEL_HEIGHT, PANEL_WIDTH};
use tessera_core::pixel::PixelBuffer;
use tessera_core::sync::{SyncAction, SyncEvent, SyncPolicy};
use tessera_drivers::{FlushScheduler, Ili9341, SharedPanel};
use tessera_hal_rp2040::FlexBank;

use crate::channels::{FRAMEBUFFER, FRAME_EVENTS};

/// Flush task - owns the sync policy for the attached panel
#[embassy_executor::task]
pub async fn flush_task(panel: Ili9341<FlexBank>, fps: u32) {
    let panel: SharedPanel<NoopRawMutex, _> = SharedPanel::new(panel);
    let policy = SyncPolicy::new(fps);
    info!("Flush task started ({} us period)", policy.period_us());

    let mut ticker = Ticker::every(Duration::from_micros(policy.period_us() as u64));
    let mut scheduler = FlushScheduler::new(&panel, policy);

    loop {
        let event = match select(ticker.next(), FRAME_EVENTS.receive()).await {
            Either::First(()) => SyncEvent::Tick,
            Either::Second(event) => event,
        };

        // Hold the frame for the whole flush so drawing can't tear it
        let frame = FRAMEBUFFER.lock().await;
        let buffer = match PixelBuffer::packed(&frame[..], PANEL_WIDTH, PANEL_HEIGHT) {
            Ok(buffer) => buffer,
            Err(e) => {
                error!("Framebuffer layout: {}", e);
                return;
            }
        };

        match scheduler.on_event(event, &buffer) {
            Ok(SyncAction::Flush) => trace!("Frame flushed on {}", event),
            Ok(_) => {}
            Err(e) => warn!("Flush failed: {}", e),
        }
    }
}
