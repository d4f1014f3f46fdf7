// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::value::TokenKind;

/// Validation failures for individual tokens and their parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Names are dot-delimited segments of `[A-Za-z0-9_-]`.
    #[error("invalid token name: {0:?}")]
    InvalidName(String),

    /// A token's value kind is fixed when it is created.
    #[error("token {name} holds a {expected} value, got {found}")]
    KindMismatch {
        name: String,
        expected: TokenKind,
        found: TokenKind,
    },

    /// Versions are `major.minor.patch` with an optional `-pre` suffix.
    #[error("invalid semantic version: {0:?}")]
    InvalidVersion(String),

    #[error("unknown export format: {0:?}")]
    UnknownFormat(String),
}

/// Failures from collection operations that would lose information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A different token already lives under this name.
    #[error("token {0} already exists with a different definition")]
    Duplicate(String),
}
