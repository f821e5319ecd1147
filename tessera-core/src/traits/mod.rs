//! Driver abstraction traits
//!
//! These traits define the interface between the panel logic and the
//! transport that carries it to the controller.

pub mod bus;
pub mod panel;

pub use bus::CommandBus;
pub use panel::PanelDriver;
