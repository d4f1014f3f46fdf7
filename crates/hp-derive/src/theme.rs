// SPDX-License-Identifier: MIT

//! Full theme derivation from one brand color.
//!
//! A theme is the brand scale plus everything a UI needs around it:
//!
//! - a neutral ramp carrying a trace of the brand hue
//! - success / warning / error / info families, each a full scale
//! - six elevation levels of shadow tinted by the brand hue
//! - role tokens for light mode, and dark mode when enabled

use chrono::{DateTime, Utc};
use hp_color::Color;
use hp_tokens::{Provenance, Shadow, Token, TokenCollection, TokenContext, TokenName, TokenValue};
use tracing::debug;

use crate::component::{SemanticRole, ThemeMode};
use crate::config::DerivationConfig;
use crate::error::DeriveError;
use crate::scale::derive_scale;

/// Chroma of the neutral ramp.
pub const NEUTRAL_CHROMA: f32 = 0.012;

/// Status families and their hues.
pub const FAMILIES: [(&str, f32); 4] = [("success", 145.0), ("warning", 75.0), ("error", 27.0), ("info", 245.0)];

/// `(offset_y, blur, alpha)` per elevation level.
const ELEVATION: [(f32, f32, f32); 6] = [
    (0.0, 0.0, 0.0),
    (1.0, 3.0, 0.10),
    (2.0, 6.0, 0.12),
    (4.0, 12.0, 0.14),
    (8.0, 24.0, 0.16),
    (16.0, 48.0, 0.20),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeTokens {
    pub name: String,
    pub brand: Vec<Token>,
    pub neutral: Vec<Token>,
    /// `(family, scale)` in [`FAMILIES`] order.
    pub families: Vec<(String, Vec<Token>)>,
    pub elevation: Vec<Token>,
    pub light: Vec<Token>,
    /// Empty unless dark mode was requested.
    pub dark: Vec<Token>,
    issued_at: DateTime<Utc>,
}

impl ThemeTokens {
    /// Modes this theme has role tokens for.
    #[must_use]
    pub fn modes(&self) -> Vec<ThemeMode> {
        let mut modes = Vec::with_capacity(2);
        if !self.light.is_empty() {
            modes.push(ThemeMode::Light);
        }
        if !self.dark.is_empty() {
            modes.push(ThemeMode::Dark);
        }
        modes
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.brand
            .iter()
            .chain(&self.neutral)
            .chain(self.families.iter().flat_map(|(_, scale)| scale))
            .chain(&self.elevation)
            .chain(&self.light)
            .chain(&self.dark)
    }

    /// # Errors
    ///
    /// Returns [`DeriveError::Collection`] on a name collision.
    pub fn into_collection(self) -> Result<TokenCollection, DeriveError> {
        let description = format!("theme {}", self.name);
        let tokens: Vec<Token> = self.tokens().cloned().collect();
        Ok(TokenCollection::from_tokens(self.name, description, tokens, self.issued_at)?)
    }
}

/// Derive a complete theme from `brand`.
///
/// Token names are `brand.*`, `neutral.*`, `{family}.*`, `elevation.{0-5}`,
/// `light.{role}` and `dark.{role}`; `name` becomes the collection name.
///
/// # Errors
///
/// Only fails if a generated name is invalid, which fixed names never are.
pub fn derive_theme(name: &str, brand: &Color, config: &DerivationConfig) -> Result<ThemeTokens, DeriveError> {
    debug!(theme = name, dark_mode = config.dark_mode, "deriving theme");
    let hue = brand.hue();

    let brand_scale = derive_scale("brand", brand, config)?;
    let neutral = derive_scale("neutral", &Color::oklch(0.5, NEUTRAL_CHROMA, hue), config)?;

    let families = FAMILIES
        .iter()
        .map(|&(family, family_hue)| {
            let base = Color::oklch(brand.lightness().clamp(0.5, 0.7), brand.chroma().max(0.12), family_hue);
            Ok((family.to_string(), derive_scale(family, &base, config)?))
        })
        .collect::<Result<Vec<_>, DeriveError>>()?;

    let elevation = elevation_tokens(hue, config)?;
    let light = role_tokens(brand, ThemeMode::Light, config)?;
    let dark = if config.dark_mode {
        role_tokens(brand, ThemeMode::Dark, config)?
    } else {
        Vec::new()
    };

    Ok(ThemeTokens {
        name: name.to_string(),
        brand: brand_scale,
        neutral,
        families,
        elevation,
        light,
        dark,
        issued_at: config.issued_at,
    })
}

fn elevation_tokens(hue: f32, config: &DerivationConfig) -> Result<Vec<Token>, DeriveError> {
    let base = TokenName::parse("elevation")?;
    ELEVATION
        .iter()
        .enumerate()
        .map(|(level, &(offset_y, blur, alpha))| {
            let layers = if alpha > 0.0 {
                vec![Shadow {
                    offset_x: 0.0,
                    offset_y,
                    blur,
                    spread: 0.0,
                    color: Color::oklcha(0.20, 0.02, hue, alpha),
                    inset: false,
                }]
            } else {
                Vec::new()
            };
            Ok(Token::new(
                base.child(&level.to_string())?,
                TokenValue::Shadow(layers),
                TokenContext::new().role("elevation"),
                Provenance::new(config.generator.clone(), config.issued_at).record(format!("elevation:{level}")),
            ))
        })
        .collect()
}

fn role_tokens(brand: &Color, mode: ThemeMode, config: &DerivationConfig) -> Result<Vec<Token>, DeriveError> {
    let base = TokenName::parse(mode.name())?;
    SemanticRole::ALL
        .iter()
        .map(|&role| {
            Ok(Token::new(
                base.child(role.name())?,
                TokenValue::Color(role.apply_in(brand, mode)),
                TokenContext::new().role(role.name()).variant(mode.name()),
                Provenance::new(config.generator.clone(), config.issued_at).record(format!("role:{role}")),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn theme(dark_mode: bool) -> ThemeTokens {
        let config = DerivationConfig {
            dark_mode,
            ..DerivationConfig::default()
        };
        derive_theme("acme", &Color::hex("#0EB58C").unwrap(), &config).unwrap()
    }

    #[test]
    fn theme_sections_have_expected_sizes() {
        let t = theme(true);
        assert_eq!(t.brand.len(), 11);
        assert_eq!(t.neutral.len(), 11);
        assert_eq!(t.families.len(), 4);
        assert_eq!(t.elevation.len(), 6);
        assert_eq!(t.light.len(), SemanticRole::ALL.len());
        assert_eq!(t.modes(), [ThemeMode::Light, ThemeMode::Dark]);
    }

    #[test]
    fn light_only_without_dark_mode() {
        let t = theme(false);
        assert!(t.dark.is_empty());
        assert_eq!(t.modes(), [ThemeMode::Light]);
    }

    #[test]
    fn neutral_ramp_is_tinted_and_muted() {
        let t = theme(true);
        for token in &t.neutral {
            let c = token.value().as_color().unwrap();
            assert!(c.chroma() <= NEUTRAL_CHROMA + 1e-6);
        }
    }

    #[test]
    fn families_use_their_hues() {
        let t = theme(true);
        let (name, scale) = &t.families[2];
        assert_eq!(name, "error");
        let mid = scale.iter().find(|tok| tok.name().as_str() == "error.500").unwrap();
        assert!((mid.value().as_color().unwrap().hue() - 27.0).abs() < 1e-3);
    }

    #[test]
    fn elevation_zero_is_flat_and_rest_deepen() {
        let t = theme(true);
        assert_eq!(t.elevation[0].css_value(), "none");
        let blur = |i: usize| match t.elevation[i].value() {
            TokenValue::Shadow(layers) => layers[0].blur,
            _ => 0.0,
        };
        assert!(blur(5) > blur(1));
    }

    #[test]
    fn collection_holds_every_token() {
        let t = theme(true);
        let expected = t.tokens().count();
        let collection = t.into_collection().unwrap();
        assert_eq!(collection.len(), expected);
        assert_eq!(collection.name(), "acme");
        assert!(collection.contains("dark.surface"));
        assert!(collection.contains("info.950"));
    }
}
