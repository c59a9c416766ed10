//! A device abstraction for the console's button pad.
//!
//! See [`ControlPad`] for usage example.

use embassy_time::{Duration, Timer};
use embedded_hal::digital::{Error as _, InputPin};
use heapless::Vec;

use crate::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Interval between polls in [`ControlPad::wait_for_action`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Default number of consecutive identical reads before a sample counts.
pub const DEFAULT_SETTLE_READS: u8 = 1;

// ============================================================================
// ButtonAction - What a button means
// ============================================================================

/// Logical action bound to a button.
///
/// The four directional actions double as score increments, see [`Self::points`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// "Down" in menus, +50 points while scoring.
    Down50,
    /// "Left" in menus, +100 points while scoring.
    Left100,
    /// "Right" in menus, +500 points while scoring.
    Right500,
    /// "Up" in menus, +1000 points while scoring.
    Up1000,
    /// The current roll scored nothing.
    Farkle,
    /// Bank the points of the current turn.
    Bank,
    /// Clear the current turn.
    Clear,
}

impl ButtonAction {
    /// Points added by this action while scoring, if it is a scoring action.
    #[must_use]
    pub const fn points(self) -> Option<u16> {
        match self {
            Self::Down50 => Some(50),
            Self::Left100 => Some(100),
            Self::Right500 => Some(500),
            Self::Up1000 => Some(1000),
            Self::Farkle | Self::Bank | Self::Clear => None,
        }
    }
}

// ============================================================================
// PressedTo - How the buttons are wired
// ============================================================================

/// Describes how the buttons are physically wired.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressedTo {
    /// Button connects pin to voltage when pressed.
    /// Needs a pull-down. Pin reads HIGH when pressed.
    Voltage,

    /// Button connects pin to ground when pressed.
    /// Needs a pull-up. Pin reads LOW when pressed (active-low).
    #[default]
    Ground,
}

/// Runtime settings for a [`ControlPad`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ControlPadConfig {
    /// How every button on the pad is wired.
    pub pressed_to: PressedTo,
    /// Consecutive identical reads required before a sample is acted on.
    ///
    /// `1` (the default) acts on every read. Values above 1 filter contact
    /// bounce at the cost of that many polls of latency.
    pub settle_reads: u8,
}

impl Default for ControlPadConfig {
    fn default() -> Self {
        Self {
            pressed_to: PressedTo::Ground,
            settle_reads: DEFAULT_SETTLE_READS,
        }
    }
}

// ============================================================================
// Sample / PressFilter - the hardware-free read policy
// ============================================================================

/// What the pad looked like during one poll.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sample {
    /// No button pressed.
    Idle,
    /// Exactly one button pressed.
    Single(ButtonAction),
    /// More than one button pressed at once.
    Ambiguous,
}

/// Turns raw [`Sample`]s into newly activated actions.
///
/// Simultaneous presses are dropped as noise, and a held button is reported
/// once, on the poll where it becomes the only pressed button. Releasing
/// resets the memo to "nothing pressed", so the same button can be reported
/// again on its next press. Moving straight from one button to another
/// reports the second button without an intervening release.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PressFilter {
    last_action: Option<ButtonAction>,
    settle_reads: u8,
    candidate: Sample,
    streak: u8,
}

impl Default for PressFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_READS)
    }
}

impl PressFilter {
    /// Create a filter that acts on a sample after `settle_reads` identical reads.
    #[must_use]
    pub const fn new(settle_reads: u8) -> Self {
        Self {
            last_action: None,
            settle_reads,
            candidate: Sample::Idle,
            streak: 0,
        }
    }

    /// The action reported most recently, or `None` after a release.
    #[must_use]
    pub const fn last_action(&self) -> Option<ButtonAction> {
        self.last_action
    }

    /// Feed one poll and return the newly activated action, if any.
    pub fn resolve(&mut self, sample: Sample) -> Option<ButtonAction> {
        if self.settle_reads > 1 {
            if sample == self.candidate {
                self.streak = self.streak.saturating_add(1);
            } else {
                self.candidate = sample;
                self.streak = 1;
            }
            if self.streak < self.settle_reads {
                return None;
            }
        }

        let resolved = match sample {
            Sample::Ambiguous => {
                trace!("ControlPad: ignoring simultaneous presses");
                return None;
            }
            Sample::Idle => None,
            Sample::Single(action) => Some(action),
        };

        if resolved == self.last_action {
            // Held (or still released): report only the transition.
            return None;
        }

        self.last_action = resolved;
        resolved
    }
}

// ============================================================================
// ControlPad Virtual Device
// ============================================================================

/// A pin bound to a [`ButtonAction`].
#[derive(Debug)]
pub struct ButtonBinding<P> {
    pin_id: u8,
    pin: P,
    action: ButtonAction,
}

impl<P> ButtonBinding<P> {
    /// Identifier the pin was registered under.
    #[must_use]
    pub const fn pin_id(&self) -> u8 {
        self.pin_id
    }

    /// Action reported when this button is pressed.
    #[must_use]
    pub const fn action(&self) -> ButtonAction {
        self.action
    }
}

/// A device abstraction for a pad of up to `N` buttons that reports one
/// action per press.
///
/// # Hardware Requirements
///
/// Every button is wired the same way, as described by
/// [`ControlPadConfig::pressed_to`]. The default, [`PressedTo::Ground`],
/// expects each pin to be configured as an input with pull-up by the HAL
/// before it is handed to [`add_button`](Self::add_button).
///
/// # Example
///
/// ```rust,no_run
/// use farkle_console::control_pad::{ButtonAction, ControlPad, ControlPadConfig};
/// # use core::convert::Infallible;
/// # struct Pin;
/// # impl embedded_hal::digital::ErrorType for Pin { type Error = Infallible; }
/// # impl embedded_hal::digital::InputPin for Pin {
/// #     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(true) }
/// #     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(false) }
/// # }
/// # fn example(bank_pin: Pin, farkle_pin: Pin) -> farkle_console::Result<()> {
/// let mut pad: ControlPad<Pin, 7> = ControlPad::new(ControlPadConfig::default());
/// pad.add_button(4, bank_pin, ButtonAction::Bank)?;
/// pad.add_button(5, farkle_pin, ButtonAction::Farkle)?;
///
/// loop {
///     match pad.read()? {
///         Some(ButtonAction::Bank) => { /* bank the turn */ }
///         Some(action) => { /* handle other actions */ let _ = action; }
///         None => {}
///     }
/// #   break;
/// }
/// # Ok(())
/// # }
/// ```
pub struct ControlPad<P, const N: usize> {
    bindings: Vec<ButtonBinding<P>, N>,
    pressed_to: PressedTo,
    filter: PressFilter,
}

impl<P, const N: usize> ControlPad<P, N>
where
    P: InputPin,
{
    /// Creates an empty pad.
    #[must_use]
    pub const fn new(config: ControlPadConfig) -> Self {
        Self {
            bindings: Vec::new(),
            pressed_to: config.pressed_to,
            filter: PressFilter::new(config.settle_reads),
        }
    }

    /// Binds `pin`, registered as `pin_id`, to `action`.
    ///
    /// Binding a `pin_id` that is already bound replaces its pin and action
    /// and returns the action it had before.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControlPadFull`] if `N` different pins are already bound.
    pub fn add_button(
        &mut self,
        pin_id: u8,
        pin: P,
        action: ButtonAction,
    ) -> Result<Option<ButtonAction>> {
        if let Some(binding) = self
            .bindings
            .iter_mut()
            .find(|binding| binding.pin_id == pin_id)
        {
            let previous = binding.action;
            binding.pin = pin;
            binding.action = action;
            return Ok(Some(previous));
        }

        self.bindings
            .push(ButtonBinding {
                pin_id,
                pin,
                action,
            })
            .map_err(|_| Error::ControlPadFull { capacity: N })?;
        Ok(None)
    }

    /// Number of bound buttons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no buttons are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The bound buttons, in registration order.
    #[must_use]
    pub fn bindings(&self) -> &[ButtonBinding<P>] {
        &self.bindings
    }

    /// The action reported most recently, or `None` after a release.
    #[must_use]
    pub const fn last_action(&self) -> Option<ButtonAction> {
        self.filter.last_action()
    }

    /// Samples every button once and returns the newly pressed action.
    ///
    /// Returns `None` when nothing new happened: no button pressed, the same
    /// button still held, or more than one button pressed at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if a pin cannot be read.
    pub fn read(&mut self) -> Result<Option<ButtonAction>> {
        let mut pressed_count = 0_usize;
        let mut pressed_action = None;

        for binding in &mut self.bindings {
            let is_pressed = match self.pressed_to {
                PressedTo::Voltage => binding.pin.is_high(),
                PressedTo::Ground => binding.pin.is_low(),
            }
            .map_err(|err| Error::Pin { kind: err.kind() })?;

            if is_pressed {
                pressed_count = pressed_count.saturating_add(1);
                pressed_action = Some(binding.action);
            }
        }

        let sample = match pressed_action {
            None => Sample::Idle,
            Some(action) if pressed_count == 1 => Sample::Single(action),
            Some(_) => Sample::Ambiguous,
        };

        let action = self.filter.resolve(sample);
        if let Some(action) = action {
            debug!("ControlPad: {:?} pressed", action);
        }
        Ok(action)
    }

    /// Polls the pad every [`POLL_INTERVAL`] until a new action is reported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if a pin cannot be read.
    pub async fn wait_for_action(&mut self) -> Result<ButtonAction> {
        loop {
            if let Some(action) = self.read()? {
                return Ok(action);
            }
            Timer::after(POLL_INTERVAL).await;
        }
    }
}
