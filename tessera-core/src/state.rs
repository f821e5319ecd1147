//! Controller lifecycle state machine
//!
//! The controller is write-only, so this tracks what the driver has done to
//! it, not anything read back from the panel.

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Not attached, or held in hardware reset
    #[default]
    Reset,
    /// Reset pulse issued, register script in progress
    Configuring,
    /// Script complete, display on, accepting pixel data
    Active,
}

/// Events that drive the controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// Lines acquired and the reset pulse started
    BeginConfiguration,
    /// Last script command written
    ConfigurationComplete,
    /// Lines released
    Detach,
}

impl ControllerState {
    /// Check if pixel data may be sent
    pub fn accepts_pixels(&self) -> bool {
        matches!(self, ControllerState::Active)
    }

    /// Check if the bus lines are held
    pub fn is_attached(&self) -> bool {
        !matches!(self, ControllerState::Reset)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: ControllerEvent) -> Self {
        use ControllerEvent::*;
        use ControllerState::*;

        match (self, event) {
            (Reset, BeginConfiguration) => Configuring,
            (Configuring, ConfigurationComplete) => Active,
            (_, Detach) => Reset,

            // Default: stay in current state
            _ => self,
        }
    }
}
