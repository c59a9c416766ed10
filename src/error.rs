//! Crate-wide error type.

use derive_more::{Display, Error, From};
use embedded_hal::{digital, spi};

/// Result alias used by every driver in this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors returned by the console drivers.
///
/// Hardware errors are reduced to their `embedded-hal` [`ErrorKind`](digital::ErrorKind)
/// so that `Error` stays independent of the HAL in use.
#[derive(Clone, Copy, Debug, Display, Eq, Error, From, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A digital pin could not be read or driven.
    #[display("digital pin error: {kind:?}")]
    #[from]
    Pin {
        /// What went wrong, as reported by the HAL.
        kind: digital::ErrorKind,
    },

    /// An SPI transaction failed.
    #[display("SPI error: {kind:?}")]
    #[from]
    Spi {
        /// What went wrong, as reported by the HAL.
        kind: spi::ErrorKind,
    },

    /// The LED strip driver rejected a frame.
    #[display("LED strip write failed")]
    LedWrite,

    /// The text display failed to draw or flush.
    #[display("text display draw or flush failed")]
    Display,

    /// Every binding slot of the control pad is in use.
    #[display("control pad is full ({capacity} bindings)")]
    ControlPadFull {
        /// Number of bindings the pad can hold.
        capacity: usize,
    },

    /// A score display device index is past the end of the daisy chain.
    #[display("device index {index} out of range (chain has {devices} devices)")]
    DeviceIndex {
        /// Requested device.
        index: usize,
        /// Devices in the chain.
        devices: usize,
    },

    /// A digit position is past the digits used on each device.
    #[display("digit index {index} out of range ({digits} digits per device)")]
    DigitIndex {
        /// Requested digit.
        index: usize,
        /// Digits per device.
        digits: usize,
    },

    /// A score did not fit the digit buffer.
    #[display("score does not fit the display")]
    ScoreFormat,
}
