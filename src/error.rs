// SPDX-License-Identifier: MIT

use hp_tokens::{CollectionError, TokenError};
use thiserror::Error;

use crate::decision::DecisionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// Only `Pending` decisions can move, and only to `Applied` or `Rejected`.
    #[error("cannot move decision from {from} to {to}")]
    InvalidTransition { from: DecisionStatus, to: DecisionStatus },

    #[error("decision request has no {0}")]
    EmptyRequest(&'static str),

    #[error("unknown policy set: {0:?}")]
    UnknownPolicySet(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("failed to serialize decision: {0}")]
    Serialize(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
