// SPDX-License-Identifier: MIT
//
// hp-derive — turns one color into tokens.
//
// Contrast measurement lives here too: derivation needs it to pick text
// colors and to annotate accessible pairs, and policy evaluation reuses it.

// Scale stop and elevation indices become names and floats.
#![allow(clippy::cast_precision_loss)]

pub mod accessibility;
pub mod component;
pub mod config;
pub mod contrast;
pub mod error;
pub mod scale;
pub mod state;
pub mod theme;

pub use accessibility::{AccessiblePair, PairFlags, accessibility_tokens, derive_accessibility_pairs};
pub use component::{
    ALARM, ComponentTokens, Intent, SemanticRole, ThemeMode, Variant, VariantColors, derive_component,
};
pub use config::DerivationConfig;
pub use contrast::{
    ContrastConfig, ContrastReport, PerceptualLevel, TextPreference, WcagLevel, ensure_readability, measure,
    meets_minimum, perceptual_contrast, suggest_text_color, wcag_ratio,
};
pub use error::DeriveError;
pub use scale::{ScaleStop, derive_scale};
pub use state::{InteractionState, StateRule, derive_states};
pub use theme::{ThemeTokens, derive_theme};
