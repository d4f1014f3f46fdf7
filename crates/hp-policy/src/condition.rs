// SPDX-License-Identifier: MIT

//! Rule conditions.
//!
//! The set is closed except for [`Condition::Custom`], which wraps any
//! predicate over an [`EvaluationInput`]. Conditions never fail: a check
//! whose data is missing from the input passes.

use std::fmt;
use std::sync::Arc;

use hp_derive::ThemeMode;
use regex::Regex;

use crate::error::PolicyError;
use crate::input::EvaluationInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContrastMetric {
    WcagRatio,
    /// Compared by magnitude; polarity does not matter.
    Perceptual,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessibilityCondition {
    pub metric: ContrastMetric,
    pub minimum: f64,
}

impl AccessibilityCondition {
    fn check(&self, input: &EvaluationInput) -> bool {
        let measured = match self.metric {
            ContrastMetric::WcagRatio => input.contrast_ratio,
            ContrastMetric::Perceptual => input.perceptual_contrast.map(f64::abs),
        };
        measured.is_none_or(|v| v >= self.minimum)
    }
}

/// Bounds on the input color. Unset bounds are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorCondition {
    pub min_lightness: Option<f32>,
    pub max_lightness: Option<f32>,
    pub max_chroma: Option<f32>,
    /// Inclusive `(from, to)` in degrees. Wraps through 0 when `from > to`.
    pub hue_range: Option<(f32, f32)>,
}

impl ColorCondition {
    fn check(&self, input: &EvaluationInput) -> bool {
        let Some(color) = &input.color else {
            return true;
        };
        let (l, c, h) = (color.lightness(), color.chroma(), color.hue());
        self.min_lightness.is_none_or(|min| l >= min)
            && self.max_lightness.is_none_or(|max| l <= max)
            && self.max_chroma.is_none_or(|max| c <= max)
            && self.hue_range.is_none_or(|(from, to)| {
                // Achromatic colors have no meaningful hue.
                color.is_achromatic() || hue_in_range(h, from, to)
            })
    }
}

fn hue_in_range(h: f32, from: f32, to: f32) -> bool {
    if from <= to {
        (from..=to).contains(&h)
    } else {
        h >= from || h <= to
    }
}

#[derive(Debug, Clone)]
pub enum TokenCondition {
    /// Every known token name matches.
    NamePattern(Regex),
    /// Each of these names is present.
    Required(Vec<String>),
    /// At most this many tokens.
    MaxCount(usize),
    /// No token in the collection is deprecated.
    NoDeprecated,
}

impl TokenCondition {
    fn check(&self, input: &EvaluationInput) -> bool {
        match self {
            Self::NamePattern(re) => input
                .names()
                .is_none_or(|names| names.iter().all(|n| re.is_match(n))),
            Self::Required(required) => input
                .names()
                .is_none_or(|names| required.iter().all(|r| names.contains(&r.as_str()))),
            Self::MaxCount(max) => input.names().is_none_or(|names| names.len() <= *max),
            Self::NoDeprecated => input
                .tokens
                .as_ref()
                .is_none_or(|c| c.deprecated().next().is_none()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeCondition {
    pub require_light: bool,
    pub require_dark: bool,
}

impl ThemeCondition {
    fn check(&self, input: &EvaluationInput) -> bool {
        input.theme_modes.as_ref().is_none_or(|modes| {
            (!self.require_light || modes.contains(&ThemeMode::Light))
                && (!self.require_dark || modes.contains(&ThemeMode::Dark))
        })
    }
}

pub type Predicate = Arc<dyn Fn(&EvaluationInput) -> bool + Send + Sync>;

/// A named caller-supplied predicate.
#[derive(Clone)]
pub struct CustomCondition {
    pub name: String,
    pub predicate: Predicate,
}

impl fmt::Debug for CustomCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCondition").field("name", &self.name).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Condition {
    Accessibility(AccessibilityCondition),
    Color(ColorCondition),
    Token(TokenCondition),
    Theme(ThemeCondition),
    Custom(CustomCondition),
}

impl Condition {
    /// WCAG ratio at least `minimum`.
    #[must_use]
    pub const fn wcag_ratio(minimum: f64) -> Self {
        Self::Accessibility(AccessibilityCondition {
            metric: ContrastMetric::WcagRatio,
            minimum,
        })
    }

    /// |Lc| at least `minimum`.
    #[must_use]
    pub const fn perceptual(minimum: f64) -> Self {
        Self::Accessibility(AccessibilityCondition {
            metric: ContrastMetric::Perceptual,
            minimum,
        })
    }

    /// Every token name matches `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidPattern`] if `pattern` is not a valid
    /// regular expression.
    pub fn name_pattern(pattern: &str) -> Result<Self, PolicyError> {
        Regex::new(pattern)
            .map(|re| Self::Token(TokenCondition::NamePattern(re)))
            .map_err(|e| PolicyError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn custom<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&EvaluationInput) -> bool + Send + Sync + 'static,
    {
        Self::Custom(CustomCondition {
            name: name.into(),
            predicate: Arc::new(predicate),
        })
    }

    /// Whether `input` satisfies this condition.
    #[must_use]
    pub fn check(&self, input: &EvaluationInput) -> bool {
        match self {
            Self::Accessibility(c) => c.check(input),
            Self::Color(c) => c.check(input),
            Self::Token(c) => c.check(input),
            Self::Theme(c) => c.check(input),
            Self::Custom(c) => (c.predicate)(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use hp_color::Color;
    use hp_tokens::{Provenance, Token, TokenCollection, TokenContext, TokenValue};

    fn collection(names: &[&str]) -> TokenCollection {
        let tokens = names.iter().map(|n| {
            Token::named(
                n,
                TokenValue::Color(Color::WHITE),
                TokenContext::new(),
                Provenance::new("test", DateTime::<Utc>::UNIX_EPOCH),
            )
            .unwrap()
        });
        TokenCollection::from_tokens("t", "", tokens, DateTime::<Utc>::UNIX_EPOCH).unwrap()
    }

    // ── Accessibility ──

    #[test]
    fn contrast_thresholds() {
        let input = EvaluationInput::new().contrast(4.6, -50.0);
        assert!(Condition::wcag_ratio(4.5).check(&input));
        assert!(!Condition::wcag_ratio(7.0).check(&input));
        assert!(Condition::perceptual(45.0).check(&input));
        assert!(!Condition::perceptual(60.0).check(&input));
    }

    #[test]
    fn absent_data_passes() {
        let empty = EvaluationInput::new();
        assert!(Condition::wcag_ratio(7.0).check(&empty));
        assert!(Condition::Color(ColorCondition { max_chroma: Some(0.0), ..ColorCondition::default() }).check(&empty));
        assert!(Condition::Token(TokenCondition::MaxCount(0)).check(&empty));
        assert!(Condition::Theme(ThemeCondition { require_light: true, require_dark: true }).check(&empty));
    }

    // ── Color ──

    #[test]
    fn color_bounds() {
        let input = EvaluationInput::new().color(Color::oklch(0.6, 0.2, 350.0));
        let within = ColorCondition {
            min_lightness: Some(0.5),
            max_lightness: Some(0.7),
            max_chroma: Some(0.25),
            hue_range: Some((300.0, 30.0)),
        };
        assert!(Condition::Color(within).check(&input));
        let too_vivid = ColorCondition { max_chroma: Some(0.1), ..within };
        assert!(!Condition::Color(too_vivid).check(&input));
        let wrong_hue = ColorCondition { hue_range: Some((100.0, 200.0)), ..within };
        assert!(!Condition::Color(wrong_hue).check(&input));
    }

    // ── Tokens ──

    #[test]
    fn token_conditions() {
        let input = EvaluationInput::new().tokens(collection(&["brand.500", "Bad_Name"]));
        let pattern = Condition::name_pattern(r"^[a-z0-9]+(\.[a-z0-9-]+)*$").unwrap();
        assert!(!pattern.check(&input));
        assert!(Condition::Token(TokenCondition::Required(vec!["brand.500".into()])).check(&input));
        assert!(!Condition::Token(TokenCondition::Required(vec!["brand.600".into()])).check(&input));
        assert!(!Condition::Token(TokenCondition::MaxCount(1)).check(&input));
        assert!(Condition::Token(TokenCondition::NoDeprecated).check(&input));
    }

    #[test]
    fn deprecated_tokens_fail() {
        let c = collection(&["a"]);
        let stale = c.get("a").unwrap().deprecated("use b");
        let input = EvaluationInput::new().tokens(c.with_replaced(stale));
        assert!(!Condition::Token(TokenCondition::NoDeprecated).check(&input));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(matches!(Condition::name_pattern("(unclosed"), Err(PolicyError::InvalidPattern { .. })));
    }

    // ── Theme / custom ──

    #[test]
    fn theme_modes() {
        let light_only = EvaluationInput::new().theme_modes([ThemeMode::Light]);
        let both = ThemeCondition { require_light: true, require_dark: true };
        assert!(!Condition::Theme(both).check(&light_only));
        assert!(Condition::Theme(ThemeCondition { require_light: true, require_dark: false }).check(&light_only));
    }

    #[test]
    fn custom_predicate() {
        let has_component = Condition::custom("has-component", |i| i.component.is_some());
        assert!(!has_component.check(&EvaluationInput::new()));
        assert!(has_component.check(&EvaluationInput::new().component("button")));
        assert!(format!("{has_component:?}").contains("has-component"));
    }
}
