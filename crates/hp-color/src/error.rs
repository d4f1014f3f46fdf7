// SPDX-License-Identifier: MIT

//! Validation failures for color construction.

use thiserror::Error;

/// Why a color could not be constructed.
///
/// Returned by the `try_*` constructors. The clamping constructors never
/// fail; they fold out-of-range numbers back into range instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// The string is not `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// A coordinate was NaN or infinite.
    #[error("{channel} is not a finite number")]
    NonFinite { channel: &'static str },

    /// A coordinate fell outside its accepted range.
    #[error("{channel} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        channel: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
