//! Frame sync policy
//!
//! Decides when the framebuffer is pushed to the panel. Direct memory
//! mutation is coalesced and flushed on the next tick; the write path and
//! drawing notifications flush at once. Every flush is a full frame.

use crate::config::{DEFAULT_FPS, MAX_FPS};

/// Something that happened to the framebuffer, or the passage of time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncEvent {
    /// Frame memory mutated directly (mapped memory)
    MemoryTouched,
    /// A byte-stream write into the frame finished
    WriteCompleted,
    /// A fill, copy or image operation finished
    Redraw,
    /// Flush period elapsed
    Tick,
}

/// What the caller should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncAction {
    /// Push the whole frame now
    Flush,
    /// Change recorded; wait for the next tick
    Defer,
    /// Nothing to do
    Idle,
}

/// Dirty tracking plus flush period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncPolicy {
    period_us: u32,
    dirty: bool,
}

impl SyncPolicy {
    /// Policy flushing at `fps` frames per second (0 selects the default)
    ///
    /// Rates above [`MAX_FPS`] are capped, so the period is never zero.
    pub fn new(fps: u32) -> Self {
        let fps = match fps {
            0 => DEFAULT_FPS,
            fps => fps.min(MAX_FPS),
        };
        Self {
            period_us: 1_000_000 / fps,
            dirty: false,
        }
    }

    /// Tick period in microseconds
    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Check if a change is waiting for the next tick
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a change without flushing (e.g. a failed flush to retry)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Process an event and return the action to take
    ///
    /// Returning [`SyncAction::Flush`] clears the dirty flag; the caller is
    /// expected to perform the flush.
    pub fn on_event(&mut self, event: SyncEvent) -> SyncAction {
        match event {
            SyncEvent::MemoryTouched => {
                self.dirty = true;
                SyncAction::Defer
            }
            SyncEvent::WriteCompleted | SyncEvent::Redraw => {
                self.dirty = false;
                SyncAction::Flush
            }
            SyncEvent::Tick if self.dirty => {
                self.dirty = false;
                SyncAction::Flush
            }
            SyncEvent::Tick => SyncAction::Idle,
        }
    }
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_period() {
        assert_eq!(SyncPolicy::new(0).period_us(), 40_000);
        assert_eq!(SyncPolicy::default().period_us(), 40_000);
        assert_eq!(SyncPolicy::new(50).period_us(), 20_000);
    }

    #[test]
    fn test_period_never_zero() {
        assert_eq!(SyncPolicy::new(MAX_FPS).period_us(), 1000);
        assert_eq!(SyncPolicy::new(2_000_000).period_us(), 1000);
        assert_eq!(SyncPolicy::new(u32::MAX).period_us(), 1000);
    }

    #[test]
    fn test_memory_touch_defers_until_tick() {
        let mut policy = SyncPolicy::default();
        assert_eq!(policy.on_event(SyncEvent::MemoryTouched), SyncAction::Defer);
        assert_eq!(policy.on_event(SyncEvent::MemoryTouched), SyncAction::Defer);
        assert!(policy.is_dirty());

        assert_eq!(policy.on_event(SyncEvent::Tick), SyncAction::Flush);
        assert!(!policy.is_dirty());
        assert_eq!(policy.on_event(SyncEvent::Tick), SyncAction::Idle);
    }

    #[test]
    fn test_write_and_redraw_flush_immediately() {
        let mut policy = SyncPolicy::default();
        assert_eq!(policy.on_event(SyncEvent::WriteCompleted), SyncAction::Flush);
        assert_eq!(policy.on_event(SyncEvent::Redraw), SyncAction::Flush);
    }

    #[test]
    fn test_immediate_flush_covers_pending_touch() {
        let mut policy = SyncPolicy::default();
        policy.on_event(SyncEvent::MemoryTouched);
        assert_eq!(policy.on_event(SyncEvent::Redraw), SyncAction::Flush);
        assert_eq!(policy.on_event(SyncEvent::Tick), SyncAction::Idle);
    }

    #[test]
    fn test_mark_dirty_retries_on_tick() {
        let mut policy = SyncPolicy::default();
        policy.mark_dirty();
        assert_eq!(policy.on_event(SyncEvent::Tick), SyncAction::Flush);
    }
}
