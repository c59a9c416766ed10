//! A device abstraction for daisy-chained MAX7219 7-segment score displays.
//!
//! See [`ScoreDisplay`] for usage example.

use core::fmt::Write as _;

use embedded_hal::{
    digital::{Error as _, OutputPin},
    spi::{Error as _, SpiBus, SpiDevice},
};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use heapless::String;

use crate::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default LED intensity (0-15).
pub const DEFAULT_INTENSITY: u8 = 8;

/// Highest intensity the MAX7219 accepts.
pub const MAX_INTENSITY: u8 = 15;

/// Digits one MAX7219 can drive.
pub const MAX_DIGITS: usize = 8;

/// MAX7219 register addresses.
mod register {
    pub(super) const NOOP: u8 = 0x00;
    /// Digit 0; digit `n` is at `DIGIT_0 + n`.
    pub(super) const DIGIT_0: u8 = 0x01;
    pub(super) const DECODE_MODE: u8 = 0x09;
    pub(super) const INTENSITY: u8 = 0x0A;
    pub(super) const SCAN_LIMIT: u8 = 0x0B;
    pub(super) const SHUTDOWN: u8 = 0x0C;
    pub(super) const DISPLAY_TEST: u8 = 0x0F;
}

/// Scan-limit value that multiplexes all eight digits.
const SCAN_ALL_DIGITS: u8 = 7;

/// Segment bit for the decimal point. Bits 6..0 are segments A..G.
const SEGMENT_DP: u8 = 0b1000_0000;

// ============================================================================
// Formatting
// ============================================================================

/// Raw segment pattern for `ch` (bit 7 = DP, bits 6..0 = A..G).
///
/// Covers digits, space, `-`, `_`, and the letters a 7-segment digit can
/// draw legibly. Anything else is blank.
#[must_use]
pub const fn segments_for(ch: char) -> u8 {
    match ch {
        '0' | 'O' | 'o' => 0b0111_1110,
        '1' => 0b0011_0000,
        '2' => 0b0110_1101,
        '3' => 0b0111_1001,
        '4' => 0b0011_0011,
        '5' | 'S' | 's' => 0b0101_1011,
        '6' => 0b0101_1111,
        '7' => 0b0111_0000,
        '8' => 0b0111_1111,
        '9' => 0b0111_1011,
        'A' | 'a' => 0b0111_0111,
        'B' | 'b' => 0b0001_1111,
        'C' => 0b0100_1110,
        'c' => 0b0000_1101,
        'D' | 'd' => 0b0011_1101,
        'E' | 'e' => 0b0100_1111,
        'F' | 'f' => 0b0100_0111,
        'H' => 0b0011_0111,
        'h' => 0b0001_0111,
        'L' | 'l' => 0b0000_1110,
        'P' | 'p' => 0b0110_0111,
        'U' | 'u' => 0b0011_1110,
        '-' => 0b0000_0001,
        '_' => 0b0000_1000,
        '.' => SEGMENT_DP,
        _ => 0,
    }
}

/// Formats `score` for a `DIGITS`-digit display: only the lowest `DIGITS`
/// decimal digits are kept, right-aligned and padded with spaces.
///
/// ```rust
/// use farkle_console::score_display::format_score;
///
/// assert_eq!(format_score::<5>(1250).unwrap(), " 1250");
/// assert_eq!(format_score::<5>(123_456).unwrap(), "23456");
/// assert_eq!(format_score::<5>(0).unwrap(), "    0");
/// ```
///
/// # Errors
///
/// Returns [`Error::ScoreFormat`] if `DIGITS` is 0 or more than [`MAX_DIGITS`].
#[allow(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "modulus is at least 10"
)]
pub fn format_score<const DIGITS: usize>(score: u32) -> Result<String<DIGITS>> {
    if DIGITS == 0 || DIGITS > MAX_DIGITS {
        return Err(Error::ScoreFormat);
    }
    let modulus = (0..DIGITS).fold(1_u32, |acc, _| acc.saturating_mul(10));
    let mut text = String::new();
    write!(text, "{:>width$}", score % modulus, width = DIGITS).map_err(|_| Error::ScoreFormat)?;
    Ok(text)
}

// ============================================================================
// ScoreDisplay Virtual Device
// ============================================================================

/// Runtime settings for a [`ScoreDisplay`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScoreDisplayConfig {
    /// LED intensity for every device, 0-15 (clamped).
    pub intensity: u8,
}

impl Default for ScoreDisplayConfig {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
        }
    }
}

/// A chain of `DEVICES` MAX7219 drivers (3 by default), each showing one
/// score on its first `DIGITS` digits (5 by default).
///
/// # Hardware Requirements
///
/// The devices share clock and chip select; the first device's DIN is wired
/// to MOSI and each DOUT feeds the next device's DIN. Device 0 is the one
/// closest to the microcontroller. Digit 0 is the leftmost digit.
///
/// # Wire format
///
/// Every command is one SPI transaction of two bytes (register, data) per
/// device. The addressed device gets the command and every other device
/// gets a no-op. The pair for the last device goes out first, because it
/// shifts furthest down the chain.
///
/// # Example
///
/// ```rust,no_run
/// use farkle_console::score_display::{ScoreDisplay, ScoreDisplayConfig};
/// # use core::convert::Infallible;
/// # use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
/// # struct Spi;
/// # impl ErrorType for Spi { type Error = Infallible; }
/// # impl SpiDevice for Spi {
/// #     fn transaction(&mut self, _: &mut [Operation<'_, u8>]) -> Result<(), Infallible> { Ok(()) }
/// # }
/// # fn example(spi: Spi) -> farkle_console::Result<()> {
/// let mut scores: ScoreDisplay<Spi> = ScoreDisplay::new(spi, ScoreDisplayConfig::default())?;
///
/// scores.print_number(4_350, 0)?; // player 1
/// scores.print_number(10_050, 1)?; // player 2
/// # Ok(())
/// # }
/// ```
pub struct ScoreDisplay<SPI, const DEVICES: usize = 3, const DIGITS: usize = 5> {
    spi: SPI,
}

impl<BUS, CS, const DEVICES: usize, const DIGITS: usize>
    ScoreDisplay<ExclusiveDevice<BUS, CS, NoDelay>, DEVICES, DIGITS>
where
    BUS: SpiBus,
    CS: OutputPin,
{
    /// Creates the display from a bus and its chip-select pin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if chip select cannot be driven, or any error
    /// of [`ScoreDisplay::new`].
    pub fn from_bus(bus: BUS, cs: CS, config: ScoreDisplayConfig) -> Result<Self> {
        let spi = ExclusiveDevice::new_no_delay(bus, cs)
            .map_err(|err| Error::Pin { kind: err.kind() })?;
        Self::new(spi, config)
    }
}

impl<SPI, const DEVICES: usize, const DIGITS: usize> ScoreDisplay<SPI, DEVICES, DIGITS>
where
    SPI: SpiDevice,
{
    /// Wakes every device, sets its intensity, and blanks it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spi`] if a transaction fails.
    pub fn new(spi: SPI, config: ScoreDisplayConfig) -> Result<Self> {
        const {
            assert!(DEVICES > 0, "DEVICES must be positive");
            assert!(
                DIGITS > 0 && DIGITS <= MAX_DIGITS,
                "DIGITS must be between 1 and 8"
            );
        }

        let mut score_display = Self { spi };
        for device in 0..DEVICES {
            score_display.send(device, register::DISPLAY_TEST, 0)?;
            score_display.send(device, register::SCAN_LIMIT, SCAN_ALL_DIGITS)?;
            score_display.send(device, register::DECODE_MODE, 0)?;
            score_display.clear(device)?;
            score_display.shutdown(device, false)?;
            score_display.set_intensity(device, config.intensity)?;
        }
        info!("ScoreDisplay: {} devices ready", DEVICES);
        Ok(score_display)
    }

    /// Shows `number` on `device_index`, right-aligned. Only the lowest
    /// `DIGITS` decimal digits are shown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceIndex`] if `device_index >= DEVICES`, or
    /// [`Error::Spi`] if a transaction fails.
    pub fn print_number(&mut self, number: u32, device_index: usize) -> Result<()> {
        check_device::<DEVICES>(device_index)?;
        let text = format_score::<DIGITS>(number)?;
        for (digit, ch) in text.chars().enumerate() {
            self.set_char(device_index, digit, ch, false)?;
        }
        Ok(())
    }

    /// Shows `ch` on one digit, with or without its decimal point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceIndex`] or [`Error::DigitIndex`] for positions
    /// outside the chain, or [`Error::Spi`] if the transaction fails.
    pub fn set_char(&mut self, device: usize, digit: usize, ch: char, dot: bool) -> Result<()> {
        let digit_register = digit_register::<DIGITS>(digit)?;
        let mut segments = segments_for(ch);
        if dot {
            segments |= SEGMENT_DP;
        }
        self.send(device, digit_register, segments)
    }

    /// Blanks every digit of `device`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceIndex`] or [`Error::Spi`].
    pub fn clear(&mut self, device: usize) -> Result<()> {
        for digit in 0..MAX_DIGITS {
            let digit_register = digit_register::<MAX_DIGITS>(digit)?;
            self.send(device, digit_register, 0)?;
        }
        Ok(())
    }

    /// Sets the intensity of `device` (0-15, clamped).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceIndex`] or [`Error::Spi`].
    pub fn set_intensity(&mut self, device: usize, level: u8) -> Result<()> {
        self.send(device, register::INTENSITY, level.min(MAX_INTENSITY))
    }

    /// Puts `device` into (or takes it out of) low-power shutdown. Digit
    /// contents are kept while shut down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceIndex`] or [`Error::Spi`].
    pub fn shutdown(&mut self, device: usize, shut_down: bool) -> Result<()> {
        self.send(device, register::SHUTDOWN, u8::from(!shut_down))
    }

    /// Gives the SPI device back.
    #[must_use]
    pub fn release(self) -> SPI {
        self.spi
    }

    #[allow(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "check_device ensures device < DEVICES"
    )]
    fn send(&mut self, device: usize, address: u8, data: u8) -> Result<()> {
        check_device::<DEVICES>(device)?;
        let mut frame = [[register::NOOP; 2]; DEVICES];
        // The first pair out ends up in the last device of the chain.
        let slot = DEVICES - 1 - device;
        frame[slot] = [address, data];
        self.spi
            .write(frame.as_flattened())
            .map_err(|err| Error::Spi { kind: err.kind() })
    }
}

const fn check_device<const DEVICES: usize>(device: usize) -> Result<()> {
    if device < DEVICES {
        Ok(())
    } else {
        Err(Error::DeviceIndex {
            index: device,
            devices: DEVICES,
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::arithmetic_side_effects,
    reason = "digit < DIGITS <= MAX_DIGITS, so the register fits in u8"
)]
const fn digit_register<const DIGITS: usize>(digit: usize) -> Result<u8> {
    if digit < DIGITS {
        Ok(register::DIGIT_0 + digit as u8)
    } else {
        Err(Error::DigitIndex {
            index: digit,
            digits: DIGITS,
        })
    }
}
