// SPDX-License-Identifier: MIT

//! Derivation settings.
//!
//! Derivation is a pure function of the input color and this struct.
//! Provenance timestamps come from `issued_at` rather than the clock, so
//! deriving twice from the same inputs yields identical tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::component::Variant;
use crate::state::InteractionState;

/// Default ceiling on scale chroma. Keeps the mid stops vivid without
/// pushing most hues far out of sRGB.
pub const DEFAULT_MAX_CHROMA: f32 = 0.32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DerivationConfig {
    /// States produced by `derive_states`.
    pub states: Vec<InteractionState>,
    /// Produce every state regardless of `states`.
    pub include_extended_states: bool,
    /// Timestamp stamped into every derived token's provenance.
    pub issued_at: DateTime<Utc>,
    /// Generator id stamped into provenance.
    pub generator: String,
    /// Chroma ceiling for scale stops.
    pub max_chroma: f32,
    /// Variants produced for components. Empty means the intent's defaults.
    pub variants: Vec<Variant>,
    /// Emit dark-mode role tokens in themes.
    pub dark_mode: bool,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            states: InteractionState::CORE.to_vec(),
            include_extended_states: false,
            issued_at: DateTime::<Utc>::UNIX_EPOCH,
            generator: "hueprint".to_string(),
            max_chroma: DEFAULT_MAX_CHROMA,
            variants: Vec::new(),
            dark_mode: true,
        }
    }
}

impl DerivationConfig {
    /// The states derivation will actually produce.
    #[must_use]
    pub fn effective_states(&self) -> Vec<InteractionState> {
        if self.include_extended_states {
            InteractionState::ALL.to_vec()
        } else {
            self.states.clone()
        }
    }

    /// Same settings with a different provenance timestamp.
    #[must_use]
    pub fn issued(mut self, at: DateTime<Utc>) -> Self {
        self.issued_at = at;
        self
    }
}
