//! A device abstraction for the two farkle warning LEDs.

use embedded_hal::digital::{Error as _, OutputPin, PinState};

use crate::{Error, Result};

/// Yellow and red indicator LEDs that count consecutive farkles.
///
/// Each LED is driven HIGH to light it.
///
/// ```text
/// farkles   yellow   red
///    0       off     off
///    1       on      off
///    2+      on      on
/// ```
pub struct WarningLights<Y, R> {
    yellow: Y,
    red: R,
}

impl<Y, R> WarningLights<Y, R>
where
    Y: OutputPin,
    R: OutputPin,
{
    /// Creates the lights and turns both off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if either pin cannot be driven.
    pub fn new(yellow: Y, red: R) -> Result<Self> {
        let mut warning_lights = Self { yellow, red };
        warning_lights.show_farkles(0)?;
        Ok(warning_lights)
    }

    /// Shows how many farkles in a row the current player has.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if either pin cannot be driven.
    pub fn show_farkles(&mut self, count: u8) -> Result<()> {
        self.yellow
            .set_state(PinState::from(count >= 1))
            .map_err(|err| Error::Pin { kind: err.kind() })?;
        self.red
            .set_state(PinState::from(count >= 2))
            .map_err(|err| Error::Pin { kind: err.kind() })?;
        Ok(())
    }

    /// Gives the pins back.
    #[must_use]
    pub fn release(self) -> (Y, R) {
        (self.yellow, self.red)
    }
}
