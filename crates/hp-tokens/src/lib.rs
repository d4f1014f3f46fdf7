// SPDX-License-Identifier: MIT
//
// hp-tokens — the design token model.
//
// A token pairs a hierarchical name with a typed value, a usage context and
// a provenance record. Collections group tokens under a semantic version and
// are immutable: every write returns a new collection.

#![allow(clippy::cast_precision_loss)]

pub mod collection;
pub mod error;
pub mod export;
pub mod name;
pub mod token;
pub mod value;
pub mod version;

pub use collection::{CollectionDiff, MergeStrategy, TokenCollection};
pub use error::{CollectionError, TokenError};
pub use export::{ExportFormat, ExportOptions};
pub use name::TokenName;
pub use token::{Provenance, Token, TokenCategory, TokenContext};
pub use value::{
    Dimension, DimensionUnit, Gradient, GradientKind, GradientStop, Shadow, TokenKind, TokenValue,
};
pub use version::SemVer;
