//! Device abstractions for the peripherals of a tabletop Farkle score-keeping
//! console.
//!
//! Each module drives one peripheral through `embedded-hal` (or
//! `smart-leds` / `embedded-graphics`) traits, so the same code runs against
//! any microcontroller HAL and against mocks on the host.
//!
//! - [`control_pad`]: seven-button pad reporting one action per press.
//! - [`progress_grid`]: 8×8 serpentine LED grid drawn as per-player progress bars.
//! - [`score_display`]: daisy-chained MAX7219 7-segment score displays.
//! - [`text_display`]: monochrome OLED showing one centered message.
//! - [`warning_lights`]: yellow and red LEDs counting consecutive farkles.
//!
//! # Glossary
//!
//! - **Farkle:** a roll that scores nothing; the turn's points are lost.
//! - **Bank:** end the turn and add its points to the player's score.
//! - **Serpentine ("snake") wiring:** an LED strip folded into a grid, running
//!   left-to-right on even rows and right-to-left on odd rows.
//! - **Daisy chain:** devices sharing clock and chip select, with each one's
//!   data output feeding the next one's data input.
//!
//! # Logging
//!
//! Enable the `defmt` feature to log through [`defmt`](https://docs.rs/defmt).
//! Without it, logging compiles away.
#![no_std]

// Must come first so the logging macros are visible to every module.
mod fmt;

pub mod control_pad;
mod error;
pub mod progress_grid;
pub mod score_display;
pub mod text_display;
pub mod warning_lights;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
