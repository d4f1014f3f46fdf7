// SPDX-License-Identifier: MIT

//! Engine configuration.
//!
//! Parsed from TOML text; the engine itself never touches the filesystem.
//! Every section and key is optional and unknown keys are rejected:
//!
//! ```toml
//! [derivation]
//! states = ["idle", "hover", "active"]
//! max_chroma = 0.28
//!
//! [contrast]
//! minimum_wcag = "aaa"
//! perceptual_floor = 75.0
//!
//! [governance]
//! enforcement = "strict"
//! minimum_accessibility = 0.4
//! ```

use hp_color::color::MAX_CHROMA;
use hp_derive::{ContrastConfig, DerivationConfig};
use serde::{Deserialize, Serialize};

use crate::decision::EnforcementLevel;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub derivation: DerivationConfig,
    pub contrast: ContrastConfig,
    pub governance: GovernanceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GovernanceConfig {
    /// Used by requests that don't set their own level.
    pub enforcement: EnforcementLevel,
    /// Lowest acceptable accessibility estimate, 0–1.
    pub minimum_accessibility: f32,
    /// Builtin policy set decisions are evaluated against.
    pub policy_set: String,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            enforcement: EnforcementLevel::Standard,
            minimum_accessibility: 0.3,
            policy_set: "wcag-aa".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate TOML.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges serde can't express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_chroma = self.derivation.max_chroma;
        if !(max_chroma > 0.0 && max_chroma <= MAX_CHROMA) {
            return Err(ConfigError::Invalid {
                field: "derivation.max_chroma",
                reason: format!("{max_chroma} is outside (0, {MAX_CHROMA}]"),
            });
        }
        if self.derivation.generator.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "derivation.generator",
                reason: "must not be empty".to_string(),
            });
        }
        let floor = self.contrast.perceptual_floor;
        if !(0.0..=114.0).contains(&floor) {
            return Err(ConfigError::Invalid {
                field: "contrast.perceptual_floor",
                reason: format!("{floor} is outside [0, 114]"),
            });
        }
        let minimum = self.governance.minimum_accessibility;
        if !(0.0..=1.0).contains(&minimum) {
            return Err(ConfigError::Invalid {
                field: "governance.minimum_accessibility",
                reason: format!("{minimum} is outside [0, 1]"),
            });
        }
        if hp_policy::builtin::policy_set(&self.governance.policy_set).is_none() {
            return Err(ConfigError::Invalid {
                field: "governance.policy_set",
                reason: format!(
                    "unknown set {:?}, expected one of {:?}",
                    self.governance.policy_set,
                    hp_policy::builtin::names()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_derive::{InteractionState, WcagLevel};

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn parses_every_section() {
        let config = EngineConfig::from_toml_str(
            r#"
            [derivation]
            states = ["idle", "hover"]
            max_chroma = 0.28
            dark_mode = false

            [contrast]
            minimum_wcag = "aaa"
            perceptual_floor = 75.0

            [governance]
            enforcement = "strict"
            minimum_accessibility = 0.4
            policy_set = "enterprise"
            "#,
        )
        .unwrap();
        assert_eq!(config.derivation.states, [InteractionState::Idle, InteractionState::Hover]);
        assert!(!config.derivation.dark_mode);
        assert_eq!(config.contrast.minimum_wcag, WcagLevel::Aaa);
        assert_eq!(config.governance.enforcement, EnforcementLevel::Strict);
        assert_eq!(config.governance.policy_set, "enterprise");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = EngineConfig::from_toml_str("[derivation]\nmax_chrome = 0.2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = EngineConfig::from_toml_str("[derivation]\nmax_chroma = 0.9\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "derivation.max_chroma", .. }));

        let err = EngineConfig::from_toml_str("[governance]\npolicy_set = \"nope\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "governance.policy_set", .. }));
    }
}
