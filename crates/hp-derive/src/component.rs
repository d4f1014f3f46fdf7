// SPDX-License-Identifier: MIT

//! Component token derivation: intents, visual variants, semantic roles.
//!
//! A component is described by a name, a base color and an intent. The
//! intent picks default variants and a hue override for status intents
//! (success, warning, danger, info); variants are fixed recipes over the
//! base; roles are a fixed table of OKLCH transforms tinted by its hue.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use hp_color::Color;
use hp_tokens::{
    Gradient, Provenance, Shadow, Token, TokenCollection, TokenContext, TokenName, TokenValue,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DerivationConfig;
use crate::contrast::{TextPreference, ensure_readability, suggest_text_color};
use crate::error::DeriveError;
use crate::state::{InteractionState, derive_states};

/// Fixed alarm color that destructive intents use for accents.
pub const ALARM: Color = Color::oklch_unchecked(0.58, 0.22, 27.0);

// ─── Intent ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

impl Intent {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Neutral => "neutral",
        }
    }

    #[must_use]
    pub const fn default_variants(self) -> &'static [Variant] {
        match self {
            Self::Primary => &[Variant::Solid, Variant::Soft, Variant::Outline, Variant::Ghost, Variant::Gradient],
            Self::Secondary => &[Variant::Soft, Variant::Outline, Variant::Ghost],
            Self::Success | Self::Warning | Self::Danger | Self::Info => {
                &[Variant::Solid, Variant::Soft, Variant::Outline]
            }
            Self::Neutral => &[Variant::Soft, Variant::Outline, Variant::Ghost, Variant::Glass],
        }
    }

    #[must_use]
    pub const fn roles(self) -> &'static [SemanticRole] {
        match self {
            Self::Neutral => &[
                SemanticRole::Surface,
                SemanticRole::TextPrimary,
                SemanticRole::TextSecondary,
                SemanticRole::TextMuted,
                SemanticRole::Border,
                SemanticRole::FocusRing,
            ],
            _ => &[
                SemanticRole::Surface,
                SemanticRole::TextPrimary,
                SemanticRole::TextSecondary,
                SemanticRole::Border,
                SemanticRole::Accent,
                SemanticRole::FocusRing,
            ],
        }
    }

    /// States a component with this intent is expected to render.
    #[must_use]
    pub const fn states(self) -> &'static [InteractionState] {
        match self {
            Self::Danger => &[
                InteractionState::Idle,
                InteractionState::Hover,
                InteractionState::Active,
                InteractionState::Focus,
                InteractionState::Disabled,
                InteractionState::Error,
            ],
            Self::Success => &[
                InteractionState::Idle,
                InteractionState::Hover,
                InteractionState::Active,
                InteractionState::Focus,
                InteractionState::Disabled,
                InteractionState::Success,
            ],
            _ => &InteractionState::CORE,
        }
    }

    /// Status intents are pinned to a conventional hue.
    #[must_use]
    pub const fn hue_override(self) -> Option<f32> {
        match self {
            Self::Success => Some(145.0),
            Self::Warning => Some(75.0),
            Self::Danger => Some(27.0),
            Self::Info => Some(245.0),
            Self::Primary | Self::Secondary | Self::Neutral => None,
        }
    }

    /// `base` with the intent's hue applied, if it has one.
    #[must_use]
    pub fn base_color(self, base: &Color) -> Color {
        match self.hue_override() {
            Some(h) => base.with_hue(h).to_gamut(),
            None => base.to_gamut(),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Variant ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Solid,
    Soft,
    Outline,
    Ghost,
    Glass,
    Gradient,
}

impl Variant {
    pub const ALL: [Self; 6] = [Self::Solid, Self::Soft, Self::Outline, Self::Ghost, Self::Glass, Self::Gradient];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Soft => "soft",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
            Self::Glass => "glass",
            Self::Gradient => "gradient",
        }
    }

    /// Apply this variant's recipe to `base`.
    #[must_use]
    pub fn recipe(self, base: &Color) -> VariantColors {
        let (l, c, h) = (base.lightness(), base.chroma(), base.hue());
        match self {
            Self::Solid => VariantColors {
                background: base.to_gamut(),
                text: suggest_text_color(base, TextPreference::Light),
                border: base.darken(0.08).to_gamut(),
                hover_background: None,
                shadow: None,
                gradient: None,
            },
            Self::Soft => {
                let background = Color::oklch(l.max(0.94), c * 0.3, h).to_gamut();
                let text = Color::oklch(l.min(0.35), c, h);
                VariantColors {
                    text: ensure_readability(&text, &background, 4.5, false),
                    border: Color::oklch(0.85, c * 0.5, h).to_gamut(),
                    background,
                    hover_background: None,
                    shadow: None,
                    gradient: None,
                }
            }
            Self::Outline => VariantColors {
                background: Color::TRANSPARENT,
                text: ensure_readability(base, &Color::WHITE, 4.5, false),
                border: base.to_gamut(),
                hover_background: None,
                shadow: None,
                gradient: None,
            },
            Self::Ghost => VariantColors {
                background: Color::TRANSPARENT,
                text: base.to_gamut(),
                border: Color::TRANSPARENT,
                hover_background: Some(base.with_alpha(0.1).to_gamut()),
                shadow: None,
                gradient: None,
            },
            Self::Glass => VariantColors {
                background: Color::oklcha(0.98, 0.01, h, 0.6),
                text: Color::oklch(0.20, 0.02, h),
                border: base.with_alpha(0.3).to_gamut(),
                hover_background: None,
                shadow: Some(Shadow {
                    offset_x: 0.0,
                    offset_y: 8.0,
                    blur: 32.0,
                    spread: 0.0,
                    color: Color::oklcha(0.20, 0.02, h, 0.12),
                    inset: false,
                }),
                gradient: None,
            },
            Self::Gradient => {
                let end = base.rotate_hue(30.0).to_gamut();
                VariantColors {
                    background: base.to_gamut(),
                    text: suggest_text_color(base, TextPreference::Light),
                    border: Color::TRANSPARENT,
                    hover_background: None,
                    shadow: None,
                    gradient: Some(Gradient::linear(135.0, &[base.to_gamut(), end])),
                }
            }
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved colors for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantColors {
    pub background: Color,
    pub text: Color,
    pub border: Color,
    pub hover_background: Option<Color>,
    pub shadow: Option<Shadow>,
    pub gradient: Option<Gradient>,
}

impl VariantColors {
    /// Composite token value with one part per populated slot.
    #[must_use]
    pub fn to_value(&self) -> TokenValue {
        let mut parts = BTreeMap::new();
        parts.insert("background".to_string(), TokenValue::Color(self.background.clone()));
        parts.insert("text".to_string(), TokenValue::Color(self.text.clone()));
        parts.insert("border".to_string(), TokenValue::Color(self.border.clone()));
        if let Some(hover) = &self.hover_background {
            parts.insert("hover-background".to_string(), TokenValue::Color(hover.clone()));
        }
        if let Some(shadow) = &self.shadow {
            parts.insert("shadow".to_string(), TokenValue::Shadow(vec![shadow.clone()]));
        }
        if let Some(gradient) = &self.gradient {
            parts.insert("gradient".to_string(), TokenValue::Gradient(gradient.clone()));
        }
        TokenValue::Composite(parts)
    }
}

// ─── Semantic roles ──────────────────────────────────────────────────────────

/// Light or dark UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticRole {
    Background,
    Surface,
    SurfaceRaised,
    TextPrimary,
    TextSecondary,
    TextMuted,
    Border,
    Accent,
    FocusRing,
    Overlay,
}

impl SemanticRole {
    pub const ALL: [Self; 10] = [
        Self::Background,
        Self::Surface,
        Self::SurfaceRaised,
        Self::TextPrimary,
        Self::TextSecondary,
        Self::TextMuted,
        Self::Border,
        Self::Accent,
        Self::FocusRing,
        Self::Overlay,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Surface => "surface",
            Self::SurfaceRaised => "surface-raised",
            Self::TextPrimary => "text-primary",
            Self::TextSecondary => "text-secondary",
            Self::TextMuted => "text-muted",
            Self::Border => "border",
            Self::Accent => "accent",
            Self::FocusRing => "focus-ring",
            Self::Overlay => "overlay",
        }
    }

    /// The light-mode color for this role.
    #[must_use]
    pub fn apply(self, base: &Color) -> Color {
        self.apply_in(base, ThemeMode::Light)
    }

    /// Role color for `mode`. Neutral roles keep only the base hue;
    /// accent and focus ring keep its chroma.
    #[must_use]
    pub fn apply_in(self, base: &Color, mode: ThemeMode) -> Color {
        let (l, c, h) = (base.lightness(), base.chroma(), base.hue());
        let color = match (self, mode) {
            (Self::Background, ThemeMode::Light) => Color::oklch(0.99, 0.005, h),
            (Self::Surface, ThemeMode::Light) => Color::oklch(0.98, 0.01, h),
            (Self::SurfaceRaised, ThemeMode::Light) => Color::oklch(0.96, 0.012, h),
            (Self::TextPrimary, ThemeMode::Light) => Color::oklch(0.20, 0.02, h),
            (Self::TextSecondary, ThemeMode::Light) => Color::oklch(0.40, 0.02, h),
            (Self::TextMuted, ThemeMode::Light) => Color::oklch(0.55, 0.015, h),
            (Self::Border, ThemeMode::Light) => Color::oklch(0.88, 0.02, h),
            (Self::Accent, ThemeMode::Light) => base.clone(),
            (Self::FocusRing, ThemeMode::Light) => Color::oklch(0.60, c.max(0.12), h),
            (Self::Overlay, ThemeMode::Light) => Color::oklcha(0.15, 0.02, h, 0.5),

            (Self::Background, ThemeMode::Dark) => Color::oklch(0.15, 0.01, h),
            (Self::Surface, ThemeMode::Dark) => Color::oklch(0.18, 0.012, h),
            (Self::SurfaceRaised, ThemeMode::Dark) => Color::oklch(0.22, 0.014, h),
            (Self::TextPrimary, ThemeMode::Dark) => Color::oklch(0.95, 0.01, h),
            (Self::TextSecondary, ThemeMode::Dark) => Color::oklch(0.80, 0.015, h),
            (Self::TextMuted, ThemeMode::Dark) => Color::oklch(0.65, 0.015, h),
            (Self::Border, ThemeMode::Dark) => Color::oklch(0.30, 0.02, h),
            (Self::Accent, ThemeMode::Dark) => Color::oklch(l.max(0.65), c, h),
            (Self::FocusRing, ThemeMode::Dark) => Color::oklch(0.70, c.max(0.12), h),
            (Self::Overlay, ThemeMode::Dark) => Color::oklcha(0.05, 0.01, h, 0.6),
        };
        color.to_gamut()
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Component derivation ────────────────────────────────────────────────────

/// Everything derived for one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentTokens {
    pub component: String,
    pub intent: Intent,
    /// `{component}.{state}`, base color with the intent applied.
    pub states: Vec<Token>,
    /// `{component}.{variant}` composites.
    pub variants: Vec<Token>,
    /// `{component}.{role}`.
    pub roles: Vec<Token>,
    issued_at: DateTime<Utc>,
}

impl ComponentTokens {
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.states.iter().chain(&self.variants).chain(&self.roles)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len() + self.variants.len() + self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect into a collection named after the component.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError::Collection`] if two tokens collide, which
    /// happens only when a state, variant and role share a name.
    pub fn into_collection(self) -> Result<TokenCollection, DeriveError> {
        let description = format!("{} tokens for {}", self.intent, self.component);
        let tokens = self.states.into_iter().chain(self.variants).chain(self.roles);
        Ok(TokenCollection::from_tokens(self.component, description, tokens, self.issued_at)?)
    }
}

/// Derive state, variant and role tokens for `component`.
///
/// # Errors
///
/// Returns [`DeriveError::Token`] if `component` is not a valid token name.
pub fn derive_component(
    component: &str,
    color: &Color,
    intent: Intent,
    config: &DerivationConfig,
) -> Result<ComponentTokens, DeriveError> {
    let name = TokenName::parse(component)?;
    let base = intent.base_color(color);
    let variants: &[Variant] = if config.variants.is_empty() {
        intent.default_variants()
    } else {
        &config.variants
    };
    debug!(component, %intent, variants = variants.len(), "deriving component tokens");

    let provenance = |label: String| Provenance::new(config.generator.clone(), config.issued_at).record(label);
    let context = || TokenContext::new().component(component).intent(intent.name());

    let states = derive_states(component, &base, config)?
        .into_iter()
        .map(|t| {
            let ctx = t.context().clone().component(component).intent(intent.name());
            t.with_context(ctx)
        })
        .collect();

    let variant_tokens = variants
        .iter()
        .map(|&variant| {
            Ok(Token::new(
                name.child(variant.name())?,
                variant.recipe(&base).to_value(),
                context().variant(variant.name()),
                provenance(format!("variant:{variant}")),
            ))
        })
        .collect::<Result<Vec<_>, DeriveError>>()?;

    let roles = intent
        .roles()
        .iter()
        .map(|&role| {
            let color = if role == SemanticRole::Accent && intent == Intent::Danger {
                ALARM.to_gamut()
            } else {
                role.apply(&base)
            };
            Ok(Token::new(
                name.child(role.name())?,
                TokenValue::Color(color),
                context().role(role.name()),
                provenance(format!("role:{role}")),
            ))
        })
        .collect::<Result<Vec<_>, DeriveError>>()?;

    Ok(ComponentTokens {
        component: component.to_string(),
        intent,
        states,
        variants: variant_tokens,
        roles,
        issued_at: config.issued_at,
    })
}
