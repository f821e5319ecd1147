//! Panel shared between execution contexts
//!
//! Every blit runs to completion under the lock, so the controller never
//! sees two windows or pixel streams interleaved.
//!
//! The raw mutex is held for a whole frame. On a target where
//! `CriticalSectionRawMutex` masks interrupts, pick a mutex that does not
//! (`NoopRawMutex` for a single owner, `ThreadModeRawMutex` across tasks).

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use tessera_core::geometry::Region;
use tessera_core::pixel::PixelBuffer;
use tessera_core::state::ControllerState;
use tessera_core::traits::PanelDriver;

/// A [`PanelDriver`] behind a blocking mutex
pub struct SharedPanel<M: RawMutex, P> {
    inner: Mutex<M, RefCell<P>>,
}

impl<M: RawMutex, P> SharedPanel<M, P> {
    pub const fn new(panel: P) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(panel)),
        }
    }

    /// Run `f` with exclusive access to the panel
    ///
    /// # Panics
    ///
    /// If called again from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn into_inner(self) -> P {
        self.inner.into_inner().into_inner()
    }
}

impl<M: RawMutex, P: PanelDriver> SharedPanel<M, P> {
    pub fn blit_full(&self, buffer: &PixelBuffer<'_>) -> Result<(), P::Error> {
        self.with(|panel| panel.blit_full(buffer))
    }

    pub fn blit_region(&self, buffer: &PixelBuffer<'_>, region: Region) -> Result<(), P::Error> {
        self.with(|panel| panel.blit_region(buffer, region))
    }

    pub fn state(&self) -> ControllerState {
        self.with(|panel| panel.state())
    }
}
