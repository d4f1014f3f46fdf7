// SPDX-License-Identifier: MIT

//! Accessible foreground/background pairs drawn from a tonal scale.
//!
//! Light stops (50–400) are paired with dark stops (600–950) in both
//! directions. The 500 stop is the brand midpoint and rarely clears any
//! threshold against its neighbours, so it takes no part.

use std::collections::BTreeMap;

use bitflags::bitflags;
use hp_color::Color;
use hp_tokens::{Provenance, Token, TokenContext, TokenName, TokenValue};

use crate::config::DerivationConfig;
use crate::contrast::{perceptual_contrast, wcag_ratio};
use crate::error::DeriveError;
use crate::scale::{ScaleStop, scale_color};

bitflags! {
    /// Thresholds a pair clears.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct PairFlags: u8 {
        /// |Lc| ≥ 75.
        const PERCEPTUAL_BODY    = 0b0001;
        /// |Lc| ≥ 45.
        const PERCEPTUAL_HEADING = 0b0010;
        /// WCAG ≥ 4.5.
        const WCAG_AA            = 0b0100;
        /// WCAG ≥ 7.
        const WCAG_AAA           = 0b1000;
    }
}

impl PairFlags {
    #[must_use]
    pub fn from_metrics(wcag: f64, perceptual: f64) -> Self {
        let lc = perceptual.abs();
        let mut flags = Self::empty();
        flags.set(Self::PERCEPTUAL_BODY, lc >= 75.0);
        flags.set(Self::PERCEPTUAL_HEADING, lc >= 45.0);
        flags.set(Self::WCAG_AA, wcag >= 4.5);
        flags.set(Self::WCAG_AAA, wcag >= 7.0);
        flags
    }

    const LABELS: [(Self, &'static str); 4] = [
        (Self::WCAG_AAA, "wcag-aaa"),
        (Self::WCAG_AA, "wcag-aa"),
        (Self::PERCEPTUAL_BODY, "lc-body"),
        (Self::PERCEPTUAL_HEADING, "lc-heading"),
    ];

    /// Short labels for descriptions (`"wcag-aa lc-heading"`), strictest
    /// first.
    #[must_use]
    pub fn labels(self) -> Vec<&'static str> {
        Self::LABELS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|&(_, label)| label)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessiblePair {
    /// `{name}.{fg}-on-{bg}`.
    pub id: String,
    pub foreground: ScaleStop,
    pub background: ScaleStop,
    pub foreground_color: Color,
    pub background_color: Color,
    pub wcag_ratio: f64,
    /// Signed Lc of foreground on background.
    pub perceptual: f64,
    pub flags: PairFlags,
}

/// Every light×dark pairing of `color`'s scale that clears at least one
/// threshold, light-on-dark pairs first.
#[must_use]
pub fn derive_accessibility_pairs(name: &str, color: &Color, config: &DerivationConfig) -> Vec<AccessiblePair> {
    let light: Vec<_> = ScaleStop::LIGHT
        .into_iter()
        .map(|s| (s, scale_color(color, s, config.max_chroma)))
        .collect();
    let dark: Vec<_> = ScaleStop::DARK
        .into_iter()
        .map(|s| (s, scale_color(color, s, config.max_chroma)))
        .collect();

    let mut pairs = Vec::new();
    for (fg_side, bg_side) in [(&light, &dark), (&dark, &light)] {
        for (fg, fg_color) in fg_side {
            for (bg, bg_color) in bg_side {
                let wcag = wcag_ratio(fg_color, bg_color);
                let perceptual = perceptual_contrast(fg_color, bg_color);
                let flags = PairFlags::from_metrics(wcag, perceptual);
                if flags.is_empty() {
                    continue;
                }
                pairs.push(AccessiblePair {
                    id: format!("{name}.{fg}-on-{bg}"),
                    foreground: *fg,
                    background: *bg,
                    foreground_color: fg_color.clone(),
                    background_color: bg_color.clone(),
                    wcag_ratio: wcag,
                    perceptual,
                    flags,
                });
            }
        }
    }
    pairs
}

/// Pairs as composite tokens (`foreground` + `background` parts).
///
/// # Errors
///
/// Returns [`DeriveError::Token`] if `name` is not a valid token name.
pub fn accessibility_tokens(name: &str, color: &Color, config: &DerivationConfig) -> Result<Vec<Token>, DeriveError> {
    let base = TokenName::parse(name)?;
    derive_accessibility_pairs(name, color, config)
        .into_iter()
        .map(|pair| {
            let mut parts = BTreeMap::new();
            parts.insert("foreground".to_string(), TokenValue::Color(pair.foreground_color));
            parts.insert("background".to_string(), TokenValue::Color(pair.background_color));
            let token = Token::new(
                base.child(&format!("{}-on-{}", pair.foreground, pair.background))?,
                TokenValue::Composite(parts),
                TokenContext::new().role("accessibility-pair"),
                Provenance::new(config.generator.clone(), config.issued_at).record("accessibility-pair"),
            )
            .with_description(format!(
                "WCAG {:.2}:1, Lc {:.1} ({})",
                pair.wcag_ratio,
                pair.perceptual,
                pair.flags.labels().join(" ")
            ));
            Ok(token)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_tokens::TokenKind;

    fn teal() -> Color {
        Color::hex("#0EB58C").unwrap()
    }

    #[test]
    fn flags_follow_thresholds() {
        let all = PairFlags::from_metrics(21.0, -114.0);
        assert!(all.is_all());
        assert_eq!(PairFlags::from_metrics(4.6, 50.0), PairFlags::WCAG_AA | PairFlags::PERCEPTUAL_HEADING);
        assert!(PairFlags::from_metrics(2.0, 20.0).is_empty());
    }

    #[test]
    fn labels_name_each_flag_once() {
        assert_eq!(PairFlags::all().labels(), ["wcag-aaa", "wcag-aa", "lc-body", "lc-heading"]);
        assert_eq!(PairFlags::from_metrics(4.6, 50.0).labels(), ["wcag-aa", "lc-heading"]);
        assert_eq!(PairFlags::PERCEPTUAL_BODY.labels(), ["lc-body"]);
        assert!(PairFlags::empty().labels().is_empty());
    }

    #[test]
    fn every_kept_pair_has_a_flag() {
        let pairs = derive_accessibility_pairs("brand", &teal(), &DerivationConfig::default());
        assert!(!pairs.is_empty());
        assert!(pairs.iter().all(|p| !p.flags.is_empty()));
        assert!(pairs.len() <= 50);
    }

    #[test]
    fn extreme_stops_pair_at_aaa() {
        let pairs = derive_accessibility_pairs("brand", &teal(), &DerivationConfig::default());
        let pair = pairs
            .iter()
            .find(|p| p.foreground == ScaleStop::S950 && p.background == ScaleStop::S50)
            .unwrap();
        assert!(pair.flags.contains(PairFlags::WCAG_AAA));
        assert!(pair.perceptual > 0.0, "dark on light is positive");
        assert_eq!(pair.id, "brand.950-on-50");
    }

    #[test]
    fn both_directions_are_present() {
        let pairs = derive_accessibility_pairs("brand", &teal(), &DerivationConfig::default());
        assert!(pairs.iter().any(|p| p.foreground == ScaleStop::S50 && p.background == ScaleStop::S950));
        assert!(pairs.iter().any(|p| p.foreground == ScaleStop::S950 && p.background == ScaleStop::S50));
    }

    #[test]
    fn tokens_are_composites_with_descriptions() {
        let tokens = accessibility_tokens("brand", &teal(), &DerivationConfig::default()).unwrap();
        let token = tokens.iter().find(|t| t.name().as_str() == "brand.950-on-50").unwrap();
        assert_eq!(token.kind(), TokenKind::Composite);
        assert!(token.description().unwrap().contains("wcag-aaa"));
    }
}
