//! Color math for the progress grid: 16-bit-hue HSV conversion and output
//! gamma/brightness tables.

use smart_leds::RGB8;

// ============================================================================
// Hue wheel
// ============================================================================

/// Steps per full turn of the coarse hue wheel used by [`color_hsv`].
const HUE_STEPS: u32 = 1530;

/// Hue increment that spaces successive rows by the golden ratio.
///
/// `65536 * 1.618` reduced modulo the 16-bit wheel (106_037 - 65_536), so
/// consecutive hues never line up for long.
pub const GOLDEN_HUE_STEP: u16 = 40_501;

/// Convert hue (full 16-bit wheel), saturation and value to RGB.
///
/// Hue 0 is red, then yellow, green, cyan, blue, magenta, and back to red at
/// 65535. Saturation 0 is white (scaled by value), value 0 is black.
#[must_use]
#[allow(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "hue * 1530 fits in u32 and each branch subtracts within its range"
)]
pub const fn color_hsv(hue: u16, sat: u8, val: u8) -> RGB8 {
    // Remap 0-65535 onto 0-1529; the pure-red end is widened slightly so the
    // wheel wraps evenly.
    let hue = (hue as u32 * HUE_STEPS + 32_768) / 65_536;

    let (r, g, b) = if hue < 510 {
        // Red to green
        if hue < 255 {
            (255, hue, 0)
        } else {
            (510 - hue, 255, 0)
        }
    } else if hue < 1020 {
        // Green to blue
        if hue < 765 {
            (0, 255, hue - 510)
        } else {
            (0, 1020 - hue, 255)
        }
    } else if hue < HUE_STEPS {
        // Blue to red
        if hue < 1275 {
            (hue - 1020, 0, 255)
        } else {
            (255, 0, HUE_STEPS - hue)
        }
    } else {
        (255, 0, 0)
    };

    RGB8::new(
        scale_channel(r, sat, val),
        scale_channel(g, sat, val),
        scale_channel(b, sat, val),
    )
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::arithmetic_side_effects,
    reason = "channel <= 255, so every product stays below 2^17 and the result fits in u8"
)]
const fn scale_channel(channel: u32, sat: u8, val: u8) -> u8 {
    let s1 = sat as u32 + 1;
    let s2 = 255 - sat as u32;
    let v1 = val as u32 + 1;
    (((((channel * s1) >> 8) + s2) * v1) >> 8) as u8
}

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode for the LED grid.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    #[default]
    Gamma2_2,
}

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Build the output lookup table: gamma correction followed by scaling to
/// `max_brightness`, so `table[value]` is the byte sent to the LED.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    clippy::integer_division_remainder_used,
    reason = "index < 256 and (x * brightness) / 255 <= 255"
)]
pub const fn output_table(gamma: Gamma, max_brightness: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        let corrected = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        table[index] = ((corrected as u16 * max_brightness as u16) / 255) as u8;
        index += 1;
    }
    table
}
