// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Invalid policy configuration. Rule failures are never errors; they are
/// reported as violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("policy is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("policy {0} has no rules")]
    NoRules(String),

    #[error("policy {policy} defines rule {rule} more than once")]
    DuplicateRule { policy: String, rule: String },

    #[error("policy {policy} has invalid version {version:?}")]
    InvalidVersion { policy: String, version: String },

    #[error("invalid token name pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
