// SPDX-License-Identifier: MIT

//! What a policy is evaluated against.
//!
//! Every field is optional. A condition whose data is absent passes, so one
//! input type serves color checks, contrast checks and collection audits.

use hp_color::Color;
use hp_derive::contrast::{perceptual_contrast, wcag_ratio};
use hp_derive::ThemeMode;
use hp_tokens::TokenCollection;

use crate::policy::PolicyScope;

#[derive(Debug, Clone, Default)]
pub struct EvaluationInput {
    pub scope: Option<PolicyScope>,
    pub component: Option<String>,
    pub color: Option<Color>,
    pub tokens: Option<TokenCollection>,
    pub contrast_ratio: Option<f64>,
    /// Signed Lc; conditions compare its magnitude.
    pub perceptual_contrast: Option<f64>,
    /// Names to check in addition to those in `tokens`.
    pub token_names: Option<Vec<String>>,
    pub theme_modes: Option<Vec<ThemeMode>>,
}

impl EvaluationInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Input carrying both contrast metrics of `foreground` on `background`.
    #[must_use]
    pub fn from_contrast(foreground: &Color, background: &Color) -> Self {
        Self::new()
            .scope(PolicyScope::Accessibility)
            .contrast(wcag_ratio(foreground, background), perceptual_contrast(foreground, background))
    }

    #[must_use]
    pub const fn scope(mut self, scope: PolicyScope) -> Self {
        self.scope = Some(scope);
        self
    }

    #[must_use]
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn tokens(mut self, tokens: TokenCollection) -> Self {
        self.tokens = Some(tokens);
        self
    }

    #[must_use]
    pub const fn contrast(mut self, wcag_ratio: f64, perceptual: f64) -> Self {
        self.contrast_ratio = Some(wcag_ratio);
        self.perceptual_contrast = Some(perceptual);
        self
    }

    #[must_use]
    pub fn token_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.token_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn theme_modes(mut self, modes: impl IntoIterator<Item = ThemeMode>) -> Self {
        self.theme_modes = Some(modes.into_iter().collect());
        self
    }

    /// Every token name known to this input, or `None` if there are none
    /// to check.
    #[must_use]
    pub fn names(&self) -> Option<Vec<&str>> {
        if self.tokens.is_none() && self.token_names.is_none() {
            return None;
        }
        let mut names: Vec<&str> = self
            .tokens
            .iter()
            .flat_map(|c| c.names().map(hp_tokens::TokenName::as_str))
            .chain(self.token_names.iter().flatten().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        Some(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_contrast_measures_both_metrics() {
        let input = EvaluationInput::from_contrast(&Color::BLACK, &Color::WHITE);
        assert!((input.contrast_ratio.unwrap() - 21.0).abs() < 1e-9);
        assert!(input.perceptual_contrast.unwrap() > 100.0);
        assert_eq!(input.scope, Some(PolicyScope::Accessibility));
    }

    #[test]
    fn names_are_absent_without_token_data() {
        assert!(EvaluationInput::new().names().is_none());
        let input = EvaluationInput::new().token_names(["b", "a", "b"]);
        assert_eq!(input.names().unwrap(), ["a", "b"]);
    }
}
