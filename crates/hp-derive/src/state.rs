// SPDX-License-Identifier: MIT

//! Interaction-state variants of a base color.
//!
//! Every state is a fixed nudge in OKLCH: a lightness delta, a chroma delta
//! and an opacity multiplier. Working in OKLCH keeps "hover is 5% lighter"
//! looking the same on every hue.

use std::fmt;

use hp_color::Color;
use hp_tokens::{Provenance, Token, TokenContext, TokenName, TokenValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DerivationConfig;
use crate::error::DeriveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionState {
    Idle,
    Hover,
    Active,
    Focus,
    Disabled,
    Loading,
    Error,
    Success,
}

impl InteractionState {
    /// The states every interactive component needs.
    pub const CORE: [Self; 5] = [Self::Idle, Self::Hover, Self::Active, Self::Focus, Self::Disabled];

    pub const ALL: [Self; 8] = [
        Self::Idle,
        Self::Hover,
        Self::Active,
        Self::Focus,
        Self::Disabled,
        Self::Loading,
        Self::Error,
        Self::Success,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hover => "hover",
            Self::Active => "active",
            Self::Focus => "focus",
            Self::Disabled => "disabled",
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Success => "success",
        }
    }

    #[must_use]
    pub const fn rule(self) -> StateRule {
        match self {
            Self::Idle => StateRule::new(0.0, 0.0, 1.0),
            Self::Hover => StateRule::new(0.05, 0.01, 1.0),
            Self::Active => StateRule::new(-0.05, 0.02, 1.0),
            Self::Focus => StateRule::new(0.02, 0.015, 1.0),
            Self::Disabled => StateRule::new(0.25, -0.08, 0.5),
            Self::Loading => StateRule::new(0.10, -0.04, 0.7),
            Self::Error => StateRule::new(-0.02, 0.04, 1.0),
            Self::Success => StateRule::new(0.02, 0.02, 1.0),
        }
    }

    /// Apply this state's rule to `base`.
    #[must_use]
    pub fn apply(self, base: &Color) -> Color {
        self.rule().apply(base)
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// OKLCH adjustment for one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateRule {
    pub lightness_delta: f32,
    pub chroma_delta: f32,
    /// Multiplies the base alpha.
    pub opacity: f32,
}

impl StateRule {
    #[must_use]
    pub const fn new(lightness_delta: f32, chroma_delta: f32, opacity: f32) -> Self {
        Self {
            lightness_delta,
            chroma_delta,
            opacity,
        }
    }

    /// Shift lightness and chroma, scale alpha, then map into sRGB.
    #[must_use]
    pub fn apply(&self, base: &Color) -> Color {
        Color::oklcha(
            base.lightness() + self.lightness_delta,
            (base.chroma() + self.chroma_delta).max(0.0),
            base.hue(),
            base.alpha() * self.opacity,
        )
        .to_gamut()
    }
}

/// One token per configured state, named `{name}.{state}`.
///
/// # Errors
///
/// Returns [`DeriveError::Token`] if `name` is not a valid token name.
pub fn derive_states(name: &str, color: &Color, config: &DerivationConfig) -> Result<Vec<Token>, DeriveError> {
    let base = TokenName::parse(name)?;
    let states = config.effective_states();
    debug!(name, count = states.len(), "deriving state tokens");
    states
        .iter()
        .map(|&state| {
            let provenance = Provenance::new(config.generator.clone(), config.issued_at)
                .record(format!("state:{state}"));
            Ok(Token::new(
                base.child(state.name())?,
                TokenValue::Color(state.apply(color)),
                TokenContext::new().state(state.name()),
                provenance,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_tokens::TokenCategory;

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn default_config_yields_core_states() {
        let brand = Color::hex("#0EB58C").unwrap();
        let tokens = derive_states("button", &brand, &DerivationConfig::default()).unwrap();
        let names: Vec<_> = tokens.iter().map(|t| t.name().as_str()).collect();
        assert_eq!(
            names,
            ["button.idle", "button.hover", "button.active", "button.focus", "button.disabled"]
        );
        assert!(tokens.iter().all(|t| t.category() == TokenCategory::State));
    }

    #[test]
    fn hover_is_lighter_and_disabled_translucent() {
        let brand = Color::hex("#0EB58C").unwrap();
        let tokens = derive_states("button", &brand, &DerivationConfig::default()).unwrap();
        let color = |i: usize| tokens[i].value().as_color().unwrap().clone();

        let idle = color(0);
        let hover = color(1);
        assert!(approx_eq(hover.lightness(), idle.lightness() + 0.05, 1e-4));

        let disabled = color(4);
        assert!(approx_eq(disabled.alpha(), 0.5, 1e-6));
    }

    #[test]
    fn extended_states_add_three() {
        let config = DerivationConfig {
            include_extended_states: true,
            ..DerivationConfig::default()
        };
        let tokens = derive_states("chip", &Color::oklch(0.6, 0.1, 30.0), &config).unwrap();
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn provenance_comes_from_config() {
        let config = DerivationConfig::default();
        let tokens = derive_states("x", &Color::gray(0.5), &config).unwrap();
        let provenance = tokens[1].provenance();
        assert_eq!(provenance.created_at, config.issued_at);
        assert_eq!(provenance.transformations, ["state:hover"]);
    }

    #[test]
    fn chroma_never_goes_negative() {
        let gray = Color::gray(0.5);
        assert!(InteractionState::Disabled.apply(&gray).chroma() >= 0.0);
    }

    #[test]
    fn invalid_name_is_an_error() {
        assert!(derive_states("bad name", &Color::WHITE, &DerivationConfig::default()).is_err());
    }
}
