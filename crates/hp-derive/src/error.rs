// SPDX-License-Identifier: MIT

use hp_tokens::{CollectionError, TokenError};
use thiserror::Error;

/// Derivation math is total; only naming and collection assembly can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Collection(#[from] CollectionError),
}
