// SPDX-License-Identifier: MIT

//! Perceptual analysis: coarse human-readable classification of a color.
//!
//! Bands are fixed. Warmth follows the hue wheel (with low-chroma colors
//! forced to neutral), brightness follows OKLCH lightness, saturation
//! follows chroma. Content polarity decides whether text placed on this
//! color should be dark (the color is a light surface) or light.
//!
//! The polarity decision adjusts lightness slightly: warm hues read a
//! little lighter than their measured lightness, cool hues a little darker,
//! and strong chroma pulls the estimate down. The adjusted value is then
//! compared against [`POLARITY_THRESHOLD`]. Confidence is the distance from
//! the threshold normalized by [`POLARITY_UNCERTAINTY`], capped at 1.

use serde::{Deserialize, Serialize};

/// Adjusted lightness at or above which a color hosts dark content.
pub const POLARITY_THRESHOLD: f32 = 0.6;

/// Half-width of the band around the threshold where confidence is below 1.
pub const POLARITY_UNCERTAINTY: f32 = 0.15;

/// Chroma below which a color is treated as neutral regardless of hue.
const NEUTRAL_CHROMA: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Warmth {
    Hot,
    Warm,
    Neutral,
    Cool,
    Cold,
}

impl Warmth {
    /// Lightness correction applied before the polarity decision.
    #[must_use]
    pub const fn lightness_adjustment(self) -> f32 {
        match self {
            Self::Hot => 0.03,
            Self::Warm => 0.015,
            Self::Neutral => 0.0,
            Self::Cool => -0.015,
            Self::Cold => -0.03,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Brightness {
    Dark,
    Medium,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Saturation {
    Muted,
    Moderate,
    Vivid,
    Intense,
}

/// Which way content contrasts against this color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    /// The color is a light surface; put dark content on it.
    DarkOnLight,
    /// The color is a dark surface; put light content on it.
    LightOnDark,
}

/// Result of [`Color::analysis`](crate::Color::analysis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerceptualAnalysis {
    pub warmth: Warmth,
    pub brightness: Brightness,
    pub saturation: Saturation,
    pub polarity: Polarity,
    /// 0.0 (right at the threshold) to 1.0 (well clear of it).
    pub confidence: f32,
}

/// Classify a hue angle; `c` decides whether hue matters at all.
#[must_use]
pub fn warmth(c: f32, h: f32) -> Warmth {
    if c < NEUTRAL_CHROMA {
        return Warmth::Neutral;
    }
    match h {
        h if !(40.0..330.0).contains(&h) => Warmth::Hot,
        h if h < 100.0 => Warmth::Warm,
        h if h < 160.0 => Warmth::Neutral,
        h if h < 250.0 => Warmth::Cool,
        _ => Warmth::Cold,
    }
}

#[must_use]
pub fn brightness(l: f32) -> Brightness {
    if l < 0.4 {
        Brightness::Dark
    } else if l < 0.7 {
        Brightness::Medium
    } else {
        Brightness::Light
    }
}

#[must_use]
pub fn saturation(c: f32) -> Saturation {
    if c < 0.04 {
        Saturation::Muted
    } else if c < 0.10 {
        Saturation::Moderate
    } else if c < 0.20 {
        Saturation::Vivid
    } else {
        Saturation::Intense
    }
}

pub(crate) fn analyze(l: f32, c: f32, h: f32) -> PerceptualAnalysis {
    let warmth = warmth(c, h);
    let adjusted = 0.1f32.mul_add(-c.min(0.4), l + warmth.lightness_adjustment());

    let polarity = if adjusted >= POLARITY_THRESHOLD {
        Polarity::DarkOnLight
    } else {
        Polarity::LightOnDark
    };
    let confidence = ((adjusted - POLARITY_THRESHOLD).abs() / POLARITY_UNCERTAINTY).min(1.0);

    PerceptualAnalysis {
        warmth,
        brightness: brightness(l),
        saturation: saturation(c),
        polarity,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn low_chroma_is_neutral() {
        assert_eq!(warmth(0.005, 30.0), Warmth::Neutral);
        assert_eq!(warmth(0.1, 30.0), Warmth::Hot);
    }

    #[test]
    fn hue_bands() {
        assert_eq!(warmth(0.1, 350.0), Warmth::Hot);
        assert_eq!(warmth(0.1, 70.0), Warmth::Warm);
        assert_eq!(warmth(0.1, 130.0), Warmth::Neutral);
        assert_eq!(warmth(0.1, 200.0), Warmth::Cool);
        assert_eq!(warmth(0.1, 280.0), Warmth::Cold);
    }

    #[test]
    fn brightness_and_saturation_bands() {
        assert_eq!(brightness(0.2), Brightness::Dark);
        assert_eq!(brightness(0.5), Brightness::Medium);
        assert_eq!(brightness(0.9), Brightness::Light);
        assert_eq!(saturation(0.01), Saturation::Muted);
        assert_eq!(saturation(0.05), Saturation::Moderate);
        assert_eq!(saturation(0.15), Saturation::Vivid);
        assert_eq!(saturation(0.3), Saturation::Intense);
    }

    #[test]
    fn white_hosts_dark_content_confidently() {
        let a = Color::WHITE.analysis();
        assert_eq!(a.polarity, Polarity::DarkOnLight);
        assert!((a.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn black_hosts_light_content() {
        let a = Color::BLACK.analysis();
        assert_eq!(a.polarity, Polarity::LightOnDark);
        assert_eq!(a.brightness, Brightness::Dark);
    }

    #[test]
    fn near_threshold_has_low_confidence() {
        let a = Color::gray(0.61).analysis();
        assert_eq!(a.polarity, Polarity::DarkOnLight);
        assert!(a.confidence < 0.1, "confidence {}", a.confidence);
    }

    #[test]
    fn warm_hue_tips_the_decision() {
        // Measured lightness just under the threshold; a hot hue pushes it over.
        let hot = analyze(0.59, 0.05, 20.0);
        let cold = analyze(0.59, 0.05, 280.0);
        assert_eq!(hot.polarity, Polarity::DarkOnLight);
        assert_eq!(cold.polarity, Polarity::LightOnDark);
    }
}
