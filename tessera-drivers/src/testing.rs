//! Recording fakes shared by the driver tests
//!
//! Lines and delays share one [`Timeline`], so a test can see both what was
//! driven and when.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;
use tessera_hal::{LineAccess, LineDriver, PinMap, Signal, SIGNAL_COUNT};

/// What happened to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOp {
    Configure,
    Level(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEvent {
    pub at_ns: u64,
    pub signal: Signal,
    pub op: LineOp,
}

/// Decoded bus activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bus {
    Command(u8),
    Data(u8),
    /// Reset line driven to the given level
    ResetLine(bool),
}

/// Shared clock and event log
///
/// [`clear`](Self::clear) hides earlier events from the queries but keeps
/// them for replay, so line configuration and levels carry over.
#[derive(Clone, Default)]
pub struct Timeline {
    now_ns: Arc<AtomicU64>,
    events: Arc<Mutex<Vec<LineEvent>>>,
    mark: Arc<AtomicUsize>,
}

impl Timeline {
    pub fn now_ns(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }

    /// Events since the last clear
    pub fn events(&self) -> Vec<LineEvent> {
        let all = self.events.lock().unwrap();
        all[self.mark.load(Ordering::SeqCst)..].to_vec()
    }

    pub fn clear(&self) {
        let all = self.events.lock().unwrap();
        self.mark.store(all.len(), Ordering::SeqCst);
    }

    fn all_events(&self) -> Vec<LineEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, signal: Signal, op: LineOp) {
        let at_ns = self.now_ns();
        self.events.lock().unwrap().push(LineEvent { at_ns, signal, op });
    }

    /// Replay the log and decode strobed bytes and reset changes since the
    /// last clear
    ///
    /// Bytes are sampled on the write strobe's rising edge. Panics if any
    /// line the controller samples changes while the strobe is low, or is
    /// driven before being configured.
    pub fn transactions(&self) -> Vec<Bus> {
        let mut configured = [false; SIGNAL_COUNT];
        let mut levels: [Option<bool>; SIGNAL_COUNT] = [None; SIGNAL_COUNT];
        let mut out = Vec::new();
        let mark = self.mark.load(Ordering::SeqCst);
        let mut skip = None;

        for (n, event) in self.all_events().into_iter().enumerate() {
            if n == mark {
                skip = Some(out.len());
            }
            let i = event.signal.index();
            match event.op {
                LineOp::Configure => configured[i] = true,
                LineOp::Level(high) => {
                    assert!(configured[i], "{:?} driven before configure", event.signal);
                    let strobe_low = levels[Signal::WriteStrobe.index()] == Some(false);
                    let sampled = event.signal.is_data() || event.signal == Signal::DataCommand;
                    if strobe_low && sampled {
                        assert_eq!(levels[i], Some(high), "{:?} changed while strobe low", event.signal);
                    }

                    if event.signal == Signal::WriteStrobe && high && strobe_low {
                        let byte = Signal::DATA.iter().enumerate().fold(0u8, |acc, (bit, s)| {
                            acc | ((levels[s.index()] == Some(true)) as u8) << bit
                        });
                        if levels[Signal::DataCommand.index()] == Some(false) {
                            out.push(Bus::Command(byte));
                        } else {
                            out.push(Bus::Data(byte));
                        }
                    }
                    if event.signal == Signal::Reset && levels[i] != Some(high) {
                        out.push(Bus::ResetLine(high));
                    }
                    levels[i] = Some(high);
                }
            }
        }
        let skip = skip.unwrap_or(out.len());
        out.split_off(skip)
    }

    /// Current level of every line after replaying the log
    pub fn levels(&self) -> [Option<bool>; SIGNAL_COUNT] {
        let mut levels = [None; SIGNAL_COUNT];
        for event in self.all_events() {
            if let LineOp::Level(high) = event.op {
                levels[event.signal.index()] = Some(high);
            }
        }
        levels
    }

    /// Number of level writes (a measure of bus work)
    pub fn level_writes(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e.op, LineOp::Level(_)))
            .count()
    }
}

/// Line driver that logs to a timeline
pub struct RecordingLines {
    timeline: Timeline,
}

impl RecordingLines {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl LineDriver for RecordingLines {
    fn configure_output(&mut self, signal: Signal) {
        self.timeline.push(signal, LineOp::Configure);
    }

    fn set_level(&mut self, signal: Signal, high: bool) {
        self.timeline.push(signal, LineOp::Level(high));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refused;

/// Line access handing out [`RecordingLines`]
pub struct RecordingAccess {
    timeline: Timeline,
    refuse: bool,
    pub held: bool,
    pub acquired: usize,
    pub released: usize,
}

impl RecordingAccess {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            refuse: false,
            held: false,
            acquired: 0,
            released: 0,
        }
    }

    /// Access whose lines are owned by someone else
    pub fn refusing(timeline: Timeline) -> Self {
        Self {
            refuse: true,
            ..Self::new(timeline)
        }
    }
}

impl LineAccess for RecordingAccess {
    type Lines = RecordingLines;
    type Error = Refused;

    fn acquire(&mut self, _pins: &PinMap) -> Result<RecordingLines, Refused> {
        if self.refuse || self.held {
            return Err(Refused);
        }
        self.held = true;
        self.acquired += 1;
        Ok(RecordingLines::new(self.timeline.clone()))
    }

    fn release(&mut self, _lines: RecordingLines) {
        self.held = false;
        self.released += 1;
    }
}

/// Delay that advances the timeline instead of sleeping
pub struct FakeDelay {
    timeline: Timeline,
}

impl FakeDelay {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.now_ns.fetch_add(ns as u64, Ordering::SeqCst);
    }
}

/// Word stored at `(x, y)` by [`pattern_frame`]
///
/// High and low bytes differ for most pixels, so byte-order mistakes show.
pub fn pattern_word(x: u16, y: u16) -> u16 {
    x ^ (y << 9)
}

/// Full 320x240 frame filled with [`pattern_word`]
pub fn pattern_frame() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(320 * 240 * 2);
    for y in 0..240u16 {
        for x in 0..320u16 {
            bytes.extend_from_slice(&pattern_word(x, y).to_le_bytes());
        }
    }
    bytes
}
