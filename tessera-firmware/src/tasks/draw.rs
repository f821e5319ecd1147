//! Demo drawing task
//!
//! Paints colour bars, then scrolls them upward one row at a time, feeding
//! each change to the flush task with the matching sync event.

use defmt::*;
use embassy_time::{Duration, Ticker};
use tessera_core::framebuffer::FrameBuffer;
use tessera_core::geometry::{Region, PANEL_HEIGHT, PANEL_WIDTH};
use tessera_core::pixel::Rgb565;
use tessera_core::sync::SyncEvent;

use crate::channels::{FRAMEBUFFER, FRAME_EVENTS};

/// Interval between scroll steps
const SCROLL_INTERVAL_MS: u64 = 20;

/// Rows scrolled between separator lines
const SEPARATOR_EVERY: u32 = 48;

const BARS: [Rgb565; 8] = [
    Rgb565::WHITE,
    Rgb565::from_rgb888(255, 255, 0),
    Rgb565::from_rgb888(0, 255, 255),
    Rgb565::GREEN,
    Rgb565::from_rgb888(255, 0, 255),
    Rgb565::RED,
    Rgb565::BLUE,
    Rgb565::BLACK,
];

/// Draw task - the only writer of the framebuffer
#[embassy_executor::task]
pub async fn draw_task() {
    info!("Draw task started");

    {
        let mut frame = FRAMEBUFFER.lock().await;
        match FrameBuffer::packed(&mut frame[..], PANEL_WIDTH, PANEL_HEIGHT) {
            Ok(mut fb) => paint_bars(&mut fb),
            Err(e) => {
                error!("Framebuffer layout: {}", e);
                return;
            }
        }
    }
    FRAME_EVENTS.send(SyncEvent::Redraw).await;

    let mut ticker = Ticker::every(Duration::from_millis(SCROLL_INTERVAL_MS));
    let mut step: u32 = 0;

    loop {
        ticker.next().await;
        step = step.wrapping_add(1);

        let event = {
            let mut frame = FRAMEBUFFER.lock().await;
            let Ok(mut fb) = FrameBuffer::packed(&mut frame[..], PANEL_WIDTH, PANEL_HEIGHT) else {
                continue;
            };
            scroll_step(&mut fb, step)
        };
        FRAME_EVENTS.send(event).await;
    }
}

fn paint_bars(fb: &mut FrameBuffer<'_>) {
    let bar_width = PANEL_WIDTH / BARS.len() as u16;
    for (i, color) in BARS.iter().enumerate() {
        let x = i as u16 * bar_width;
        fb.fill_rect(Region::new(x, 0, bar_width, PANEL_HEIGHT), *color);
    }
}

/// Scroll up one row and fill the freed bottom row
///
/// Plain steps only touch memory; separator rows go through the byte-stream
/// write path so they flush at once.
fn scroll_step(fb: &mut FrameBuffer<'_>, step: u32) -> SyncEvent {
    let last = PANEL_HEIGHT - 1;
    fb.copy_area(Region::new(0, 1, PANEL_WIDTH, last), 0, 0);

    if step % SEPARATOR_EVERY == 0 {
        let mut row = [0u8; PANEL_WIDTH as usize * 2];
        for px in row.chunks_exact_mut(2) {
            px.copy_from_slice(&Rgb565::WHITE.to_le_bytes());
        }
        let offset = last as usize * PANEL_WIDTH as usize * 2;
        if let Err(e) = fb.write_at(offset, &row) {
            warn!("Separator write: {}", e);
        }
        SyncEvent::WriteCompleted
    } else {
        // Bottom row repeats the row above it, so the bars scroll through
        fb.copy_area(Region::new(0, last - 1, PANEL_WIDTH, 1), 0, last);
        SyncEvent::MemoryTouched
    }
}
