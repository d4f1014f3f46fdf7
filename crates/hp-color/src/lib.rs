// SPDX-License-Identifier: MIT
//
// hp-color — perceptual color values for hueprint.
//
// Everything downstream (token derivation, contrast measurement, policy
// checks) is built on the `Color` type defined here. It is immutable,
// stores OKLCH coordinates, and derives every other representation lazily.

// Mathematical code uses small integer-to-float casts (loop indices, steps).
#![allow(clippy::cast_precision_loss)]
// f64→f32 truncation is intentional in HSL output.
#![allow(clippy::cast_possible_truncation)]

pub mod analysis;
pub mod color;
pub mod error;

pub use analysis::{Brightness, PerceptualAnalysis, Polarity, Saturation, Warmth};
pub use color::{Color, Hct, Hsl, HueDirection, Rgb8};
pub use error::ColorError;
