//! Frame flushing driven by the sync policy

use embassy_sync::blocking_mutex::raw::RawMutex;
use tessera_core::pixel::PixelBuffer;
use tessera_core::sync::{SyncAction, SyncEvent, SyncPolicy};
use tessera_core::traits::PanelDriver;

use crate::shared::SharedPanel;

/// Applies a [`SyncPolicy`] to a shared panel
pub struct FlushScheduler<'a, M: RawMutex, P> {
    panel: &'a SharedPanel<M, P>,
    policy: SyncPolicy,
}

impl<'a, M: RawMutex, P: PanelDriver> FlushScheduler<'a, M, P> {
    pub fn new(panel: &'a SharedPanel<M, P>, policy: SyncPolicy) -> Self {
        Self { panel, policy }
    }

    pub fn policy(&self) -> &SyncPolicy {
        &self.policy
    }

    /// Feed an event; flushes `frame` when the policy says so
    ///
    /// A failed flush leaves the frame dirty so the next tick retries it.
    pub fn on_event(&mut self, event: SyncEvent, frame: &PixelBuffer<'_>) -> Result<SyncAction, P::Error> {
        let action = self.policy.on_event(event);
        if action == SyncAction::Flush {
            if let Err(e) = self.panel.blit_full(frame) {
                self.policy.mark_dirty();
                return Err(e);
            }
        }
        Ok(action)
    }
}
