// SPDX-License-Identifier: MIT

//! Eleven-stop tonal scales (50 … 950).
//!
//! Each stop has a fixed OKLCH lightness. Chroma follows the base color but
//! tapers toward both ends: very light and very dark colors can't hold much
//! chroma inside sRGB, and pastel/near-black stops read better muted.

use std::fmt;

use hp_color::Color;
use hp_tokens::{Provenance, Token, TokenContext, TokenName, TokenValue};
use serde::{Deserialize, Serialize};

use crate::config::DerivationConfig;
use crate::error::DeriveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScaleStop {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl ScaleStop {
    pub const ALL: [Self; 11] = [
        Self::S50,
        Self::S100,
        Self::S200,
        Self::S300,
        Self::S400,
        Self::S500,
        Self::S600,
        Self::S700,
        Self::S800,
        Self::S900,
        Self::S950,
    ];

    /// Stops used as text/surfaces on the light side.
    pub const LIGHT: [Self; 5] = [Self::S50, Self::S100, Self::S200, Self::S300, Self::S400];

    /// Stops used as text/surfaces on the dark side.
    pub const DARK: [Self; 5] = [Self::S600, Self::S700, Self::S800, Self::S900, Self::S950];

    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::S50 => 50,
            Self::S100 => 100,
            Self::S200 => 200,
            Self::S300 => 300,
            Self::S400 => 400,
            Self::S500 => 500,
            Self::S600 => 600,
            Self::S700 => 700,
            Self::S800 => 800,
            Self::S900 => 900,
            Self::S950 => 950,
        }
    }

    #[must_use]
    pub const fn lightness(self) -> f32 {
        match self {
            Self::S50 => 0.97,
            Self::S100 => 0.93,
            Self::S200 => 0.87,
            Self::S300 => 0.78,
            Self::S400 => 0.68,
            Self::S500 => 0.58,
            Self::S600 => 0.49,
            Self::S700 => 0.41,
            Self::S800 => 0.33,
            Self::S900 => 0.25,
            Self::S950 => 0.18,
        }
    }

    #[must_use]
    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.value() == value)
    }
}

impl fmt::Display for ScaleStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Fraction of the base chroma a stop at lightness `l` keeps.
///
/// 0.3 above L 0.9, rising linearly to 1.0 at 0.7, flat through 0.4, then
/// falling linearly to 0.4 at 0.2 and flat below.
#[must_use]
pub fn chroma_multiplier(l: f32) -> f32 {
    if l > 0.9 {
        0.3
    } else if l > 0.7 {
        ((0.9 - l) / 0.2).mul_add(0.7, 0.3)
    } else if l >= 0.4 {
        1.0
    } else if l >= 0.2 {
        ((l - 0.2) / 0.2).mul_add(0.6, 0.4)
    } else {
        0.4
    }
}

/// Color of one stop of `base`'s scale. Always inside sRGB.
#[must_use]
pub fn scale_color(base: &Color, stop: ScaleStop, max_chroma: f32) -> Color {
    let l = stop.lightness();
    let c = (base.chroma() * chroma_multiplier(l)).min(max_chroma);
    Color::oklch(l, c, base.hue()).to_gamut()
}

/// All eleven stops in order.
#[must_use]
pub fn scale_colors(base: &Color, max_chroma: f32) -> Vec<(ScaleStop, Color)> {
    ScaleStop::ALL
        .into_iter()
        .map(|stop| (stop, scale_color(base, stop, max_chroma)))
        .collect()
}

/// One token per stop, named `{name}.{stop}`.
///
/// # Errors
///
/// Returns [`DeriveError::Token`] if `name` is not a valid token name.
pub fn derive_scale(name: &str, color: &Color, config: &DerivationConfig) -> Result<Vec<Token>, DeriveError> {
    let base = TokenName::parse(name)?;
    scale_colors(color, config.max_chroma)
        .into_iter()
        .map(|(stop, c)| {
            Ok(Token::new(
                base.child(&stop.to_string())?,
                TokenValue::Color(c),
                TokenContext::new(),
                Provenance::new(config.generator.clone(), config.issued_at).record(format!("scale:{stop}")),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn multiplier_is_continuous_at_breakpoints() {
        assert!(approx_eq(chroma_multiplier(0.9), 0.3, 1e-6));
        assert!(approx_eq(chroma_multiplier(0.7), 1.0, 1e-6));
        assert!(approx_eq(chroma_multiplier(0.4), 1.0, 1e-6));
        assert!(approx_eq(chroma_multiplier(0.2), 0.4, 1e-6));
        assert!(approx_eq(chroma_multiplier(0.97), 0.3, 1e-6));
        assert!(approx_eq(chroma_multiplier(0.1), 0.4, 1e-6));
        assert!(approx_eq(chroma_multiplier(0.8), 0.65, 1e-5));
    }

    #[test]
    fn scale_has_eleven_ordered_stops() {
        let tokens = derive_scale("brand", &Color::hex("#0EB58C").unwrap(), &DerivationConfig::default()).unwrap();
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[0].name().as_str(), "brand.50");
        assert_eq!(tokens[10].name().as_str(), "brand.950");

        let lightness: Vec<f32> = tokens
            .iter()
            .map(|t| t.value().as_color().map_or(0.0, Color::lightness))
            .collect();
        assert!(lightness.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn chroma_is_capped() {
        let vivid = Color::oklch(0.6, 0.38, 30.0);
        for (_, c) in scale_colors(&vivid, 0.1) {
            assert!(c.chroma() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn stop_lookup() {
        assert_eq!(ScaleStop::from_value(500), Some(ScaleStop::S500));
        assert_eq!(ScaleStop::from_value(550), None);
    }

    proptest! {
        #[test]
        fn every_stop_is_in_gamut(l in 0.0f32..=1.0, c in 0.0f32..=0.4, h in 0.0f32..360.0) {
            let base = Color::oklch(l, c, h);
            for (stop, color) in scale_colors(&base, 0.32) {
                prop_assert!(color.in_srgb_gamut(), "stop {stop} out of gamut");
                prop_assert!((color.lightness() - stop.lightness()).abs() < 1e-6);
            }
        }
    }
}
