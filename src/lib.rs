// SPDX-License-Identifier: MIT
//
// hueprint — color intelligence engine.
//
// This is the root crate that wires the engines together:
//
//   hp-color  → OKLCH color, conversions, perceptual analysis
//   hp-tokens → design tokens, collections, export formats
//   hp-derive → contrast metrics, state/scale/component/theme derivation
//   hp-policy → governance policies and weighted evaluation
//
// One request flows through all of them:
//
//   brand color → derivation → tokens → policy evaluation → audit log
//
// `UxDecision` runs that flow for a single component and keeps the only
// mutable piece of the system, its append-only audit trail.

pub mod config;
pub mod decision;
pub mod error;
pub mod governance;

pub use config::{EngineConfig, GovernanceConfig};
pub use decision::{
    AuditEntry, DecisionExport, DecisionFinding, DecisionRequest, DecisionStatus, DecisionToken, EnforcementLevel,
    UxDecision, accessibility_estimate,
};
pub use error::{ConfigError, DecisionError};
pub use governance::{AuditLogger, AutofixAttempt, GovernanceDecision, TracingAuditLogger, govern};

pub use hp_color as color;
pub use hp_derive as derive;
pub use hp_policy as policy;
pub use hp_tokens as tokens;
