//! ILI9341 controller on the 8-bit parallel bus
//!
//! The driver owns the line resource for its whole life and the bus lines
//! only while attached:
//!
//! ```text
//!            attach()                      detach()
//!   Reset ─────────────► Configuring ─► Active ─────► Reset
//!     │  acquire lines,      script        │
//!     │  reset pulse         written       └─ blit_region / blit_full
//!     └─ AttachError::LineAccess leaves the driver in Reset
//! ```

pub mod blit;
pub mod init;

use embedded_hal::delay::DelayNs;
use tessera_core::config::PanelConfig;
use tessera_core::geometry::{Region, Window, PANEL_HEIGHT, PANEL_WIDTH};
use tessera_core::pixel::PixelBuffer;
use tessera_core::script::INIT_WINDOW;
use tessera_core::state::{ControllerEvent, ControllerState};
use tessera_core::traits::PanelDriver;
use tessera_hal::LineAccess;

use crate::bus::ParallelBus;

/// Errors from [`Ili9341::attach`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachError<E> {
    /// Already attached; detach first
    AlreadyAttached,
    /// The bus lines could not be reserved
    LineAccess(E),
}

/// Errors from a blit request; nothing is sent when one is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlitError {
    /// Panel not attached
    NotAttached,
    /// Region extends past the buffer
    OutOfBounds,
    /// Buffer is not 320x240
    GeometryMismatch,
}

/// ILI9341 panel driven through a [`LineAccess`]
pub struct Ili9341<A: LineAccess> {
    access: A,
    bus: Option<ParallelBus<A::Lines>>,
    config: PanelConfig,
    state: ControllerState,
    /// Write window currently programmed into the controller
    window: Option<Window>,
}

impl<A: LineAccess> Ili9341<A> {
    /// Create a detached driver
    pub fn new(access: A, config: PanelConfig) -> Self {
        Self {
            access,
            bus: None,
            config,
            state: ControllerState::Reset,
            window: None,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Write window the controller currently holds, if known
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Acquire the lines, reset the controller and run the init script
    ///
    /// Blocks for at least 240 ms of reset timing on `delay`.
    pub fn attach<D: DelayNs>(&mut self, delay: &mut D) -> Result<ControllerState, AttachError<A::Error>> {
        if self.bus.is_some() {
            #[cfg(feature = "defmt")]
            defmt::warn!("ili9341: attach while attached");
            return Err(AttachError::AlreadyAttached);
        }

        let lines = self
            .access
            .acquire(&self.config.pins)
            .map_err(AttachError::LineAccess)?;
        let mut bus = ParallelBus::new(lines);

        self.state = self.state.transition(ControllerEvent::BeginConfiguration);
        init::initialize(&mut bus, delay);
        self.window = Some(INIT_WINDOW);
        self.state = self.state.transition(ControllerEvent::ConfigurationComplete);
        self.bus = Some(bus);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ili9341: attached, {} at {} fps",
            self.config.orientation,
            self.config.fps()
        );

        Ok(self.state)
    }

    /// Release the lines and return to `Reset`
    ///
    /// Safe to call when already detached.
    pub fn detach(&mut self) {
        if let Some(bus) = self.bus.take() {
            self.access.release(bus.release());

            #[cfg(feature = "defmt")]
            defmt::debug!("ili9341: detached");
        }
        self.window = None;
        self.state = self.state.transition(ControllerEvent::Detach);
    }

    /// Detach and hand back the line resource
    pub fn into_access(mut self) -> A {
        self.detach();
        self.access
    }
}

impl<A: LineAccess> PanelDriver for Ili9341<A> {
    type Error = BlitError;

    fn blit_region(&mut self, buffer: &PixelBuffer<'_>, region: Region) -> Result<(), BlitError> {
        let bus = match self.bus.as_mut() {
            Some(bus) if self.state.accepts_pixels() => bus,
            _ => return Err(BlitError::NotAttached),
        };
        if buffer.width() != PANEL_WIDTH || buffer.height() != PANEL_HEIGHT {
            #[cfg(feature = "defmt")]
            defmt::warn!("ili9341: {}x{} buffer rejected", buffer.width(), buffer.height());
            return Err(BlitError::GeometryMismatch);
        }
        if !region.fits_within(PANEL_WIDTH, PANEL_HEIGHT) {
            #[cfg(feature = "defmt")]
            defmt::warn!("ili9341: region {} out of bounds", region);
            return Err(BlitError::OutOfBounds);
        }

        blit::blit_region(bus, &mut self.window, self.config.orientation, buffer, region);
        Ok(())
    }

    fn state(&self) -> ControllerState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pattern_frame, pattern_word, Bus, FakeDelay, RecordingAccess, Refused, Timeline};
    use proptest::prelude::*;
    use tessera_core::geometry::Orientation;
    use tessera_core::script::cmd;

    fn attached(orientation: Orientation) -> (Timeline, Ili9341<RecordingAccess>) {
        let timeline = Timeline::default();
        let config = PanelConfig::default().with_orientation(orientation);
        let mut panel = Ili9341::new(RecordingAccess::new(timeline.clone()), config);
        let state = panel.attach(&mut FakeDelay::new(timeline.clone())).unwrap();
        assert_eq!(state, ControllerState::Active);
        timeline.clear();
        (timeline, panel)
    }

    /// Split a decoded stream into (command, params) groups
    fn groups(tx: &[Bus]) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        for t in tx {
            match *t {
                Bus::Command(c) => out.push((c, Vec::new())),
                Bus::Data(d) => out.last_mut().unwrap().1.push(d),
                Bus::ResetLine(_) => {}
            }
        }
        out
    }

    fn words(params: &[u8]) -> Vec<u16> {
        params
            .chunks_exact(2)
            .map(|p| u16::from_be_bytes([p[0], p[1]]))
            .collect()
    }

    #[test]
    fn test_attach_runs_reset_and_script() {
        let timeline = Timeline::default();
        let mut panel = Ili9341::new(RecordingAccess::new(timeline.clone()), PanelConfig::default());
        assert_eq!(panel.state(), ControllerState::Reset);

        panel.attach(&mut FakeDelay::new(timeline.clone())).unwrap();

        let tx = timeline.transactions();
        assert_eq!(tx[1], Bus::ResetLine(false));
        assert_eq!(tx[2], Bus::ResetLine(true));
        assert_eq!(tx[3], Bus::Command(cmd::DISPOFF));
        assert_eq!(tx.last(), Some(&Bus::Command(cmd::DISPON)));
        assert!(timeline.now_ns() >= 240_000_000);
        assert_eq!(panel.window(), Some(INIT_WINDOW));
    }

    #[test]
    fn test_second_attach_rejected() {
        let (timeline, mut panel) = attached(Orientation::Landscape);
        let result = panel.attach(&mut FakeDelay::new(timeline.clone()));
        assert_eq!(result, Err(AttachError::AlreadyAttached));
        assert!(timeline.events().is_empty());
        assert_eq!(panel.state(), ControllerState::Active);
    }

    #[test]
    fn test_line_access_failure_stays_reset() {
        let timeline = Timeline::default();
        let mut panel = Ili9341::new(RecordingAccess::refusing(timeline.clone()), PanelConfig::default());
        let result = panel.attach(&mut FakeDelay::new(timeline.clone()));

        assert_eq!(result, Err(AttachError::LineAccess(Refused)));
        assert_eq!(panel.state(), ControllerState::Reset);
        assert!(timeline.events().is_empty());
    }

    #[test]
    fn test_detach_is_idempotent() {
        let (_timeline, mut panel) = attached(Orientation::Landscape);
        panel.detach();
        panel.detach();
        assert_eq!(panel.state(), ControllerState::Reset);
        assert_eq!(panel.window(), None);

        let access = panel.into_access();
        assert_eq!(access.acquired, 1);
        assert_eq!(access.released, 1);
        assert!(!access.held);
    }

    #[test]
    fn test_reattach_after_detach() {
        let (timeline, mut panel) = attached(Orientation::Landscape);
        panel.detach();
        assert!(panel.attach(&mut FakeDelay::new(timeline.clone())).is_ok());
    }

    #[test]
    fn test_blit_before_attach() {
        let timeline = Timeline::default();
        let mut panel = Ili9341::new(RecordingAccess::new(timeline.clone()), PanelConfig::default());
        let frame = pattern_frame();
        let buf = PixelBuffer::packed(&frame, 320, 240).unwrap();

        assert_eq!(panel.blit_full(&buf), Err(BlitError::NotAttached));
        assert!(timeline.events().is_empty());
    }

    #[test]
    fn test_full_landscape_frame() {
        let (timeline, mut panel) = attached(Orientation::Landscape);
        let frame = pattern_frame();
        let buf = PixelBuffer::packed(&frame, 320, 240).unwrap();

        panel.blit_full(&buf).unwrap();

        let g = groups(&timeline.transactions());
        assert_eq!(g.len(), 4);
        assert_eq!(g[0], (cmd::CASET, vec![0x00, 0x00, 0x01, 0x3F]));
        assert_eq!(g[1], (cmd::PASET, vec![0x00, 0x00, 0x00, 0xEF]));
        assert_eq!(g[2].0, cmd::RAMWR);
        assert_eq!(g[3], (cmd::DISPON, vec![]));

        let px = words(&g[2].1);
        assert_eq!(px.len(), 320 * 240);
        assert_eq!(px[0], pattern_word(0, 0));
        assert_eq!(px[1], pattern_word(1, 0));
        assert_eq!(px[320], pattern_word(0, 1));
        assert_eq!(px[320 * 240 - 1], pattern_word(319, 239));
    }

    #[test]
    fn test_full_portrait_frame_reuses_init_window() {
        let (timeline, mut panel) = attached(Orientation::Portrait);
        let frame = pattern_frame();
        let buf = PixelBuffer::packed(&frame, 320, 240).unwrap();

        panel.blit_full(&buf).unwrap();

        let g = groups(&timeline.transactions());
        assert_eq!(g.len(), 2);
        assert_eq!(g[0].0, cmd::RAMWR);
        assert_eq!(g[1].0, cmd::DISPON);

        let px = words(&g[0].1);
        assert_eq!(px.len(), 320 * 240);
        assert_eq!(px[1], pattern_word(0, 1));
        assert_eq!(px[240], pattern_word(1, 0));
    }

    #[test]
    fn test_second_landscape_frame_skips_window() {
        let (timeline, mut panel) = attached(Orientation::Landscape);
        let frame = pattern_frame();
        let buf = PixelBuffer::packed(&frame, 320, 240).unwrap();

        panel.blit_full(&buf).unwrap();
        timeline.clear();
        panel.blit_full(&buf).unwrap();

        let g = groups(&timeline.transactions());
        assert_eq!(g.iter().map(|(c, _)| *c).collect::<Vec<_>>(), [cmd::RAMWR, cmd::DISPON]);
    }

    #[test]
    fn test_out_of_bounds_rejected_silently() {
        let (timeline, mut panel) = attached(Orientation::Landscape);
        let frame = pattern_frame();
        let buf = PixelBuffer::packed(&frame, 320, 240).unwrap();

        let result = panel.blit_region(&buf, Region::new(300, 0, 21, 10));
        assert_eq!(result, Err(BlitError::OutOfBounds));
        assert!(timeline.events().is_empty());
    }

    #[test]
    fn test_geometry_mismatch() {
        let (timeline, mut panel) = attached(Orientation::Landscape);
        let small = [0u8; 8];
        let buf = PixelBuffer::packed(&small, 2, 2).unwrap();

        assert_eq!(panel.blit_full(&buf), Err(BlitError::GeometryMismatch));
        assert!(timeline.events().is_empty());
    }

    #[test]
    fn test_empty_region_is_noop() {
        let (timeline, mut panel) = attached(Orientation::Landscape);
        let frame = pattern_frame();
        let buf = PixelBuffer::packed(&frame, 320, 240).unwrap();

        assert_eq!(panel.blit_region(&buf, Region::new(10, 10, 0, 5)), Ok(()));
        assert!(timeline.events().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Any in-bounds region sends its own pixels in scan order
        #[test]
        fn region_blit_sends_region_pixels(
            x in 0u16..320, y in 0u16..240, w in 1u16..24, h in 1u16..24,
            portrait in any::<bool>(),
        ) {
            prop_assume!(x + w <= 320 && y + h <= 240);
            let orientation = if portrait { Orientation::Portrait } else { Orientation::Landscape };
            let (timeline, mut panel) = attached(orientation);
            let frame = pattern_frame();
            let buf = PixelBuffer::packed(&frame, 320, 240).unwrap();

            panel.blit_region(&buf, Region::new(x, y, w, h)).unwrap();

            let g = groups(&timeline.transactions());
            let ramwr = g.iter().find(|(c, _)| *c == cmd::RAMWR).unwrap();
            let px = words(&ramwr.1);
            prop_assert_eq!(px.len(), w as usize * h as usize);

            for (i, word) in px.iter().enumerate() {
                let i = i as u16;
                let (px_x, px_y) = match orientation {
                    Orientation::Landscape => (x + i % w, y + i / w),
                    Orientation::Portrait => (x + i / h, y + i % h),
                };
                prop_assert_eq!(*word, pattern_word(px_x, px_y));
            }
            prop_assert_eq!(g.last().map(|(c, _)| *c), Some(cmd::DISPON));
        }
    }
}
