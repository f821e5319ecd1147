//! Pixel sink trait

use crate::geometry::Region;
use crate::pixel::PixelBuffer;
use crate::state::ControllerState;

/// A panel that accepts pixel data from a buffer
pub trait PanelDriver {
    /// Error when a blit is refused
    type Error;

    /// Push `region` of `buffer` to the same position on the panel
    ///
    /// Rejected requests send nothing to the controller.
    fn blit_region(&mut self, buffer: &PixelBuffer<'_>, region: Region) -> Result<(), Self::Error>;

    /// Push the whole buffer
    fn blit_full(&mut self, buffer: &PixelBuffer<'_>) -> Result<(), Self::Error> {
        self.blit_region(buffer, buffer.bounds())
    }

    /// Current controller state
    fn state(&self) -> ControllerState;
}

impl<T: PanelDriver + ?Sized> PanelDriver for &mut T {
    type Error = T::Error;

    fn blit_region(&mut self, buffer: &PixelBuffer<'_>, region: Region) -> Result<(), Self::Error> {
        T::blit_region(self, buffer, region)
    }

    fn blit_full(&mut self, buffer: &PixelBuffer<'_>) -> Result<(), Self::Error> {
        T::blit_full(self, buffer)
    }

    fn state(&self) -> ControllerState {
        T::state(self)
    }
}
