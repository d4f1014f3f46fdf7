// SPDX-License-Identifier: MIT

//! Hierarchical token names (`button.primary.hover`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TokenError;

/// A validated, dot-delimited token path.
///
/// Every segment is non-empty and made of ASCII letters, digits, `-` or `_`.
/// Ordering is plain string ordering, which keeps collections and exports
/// grouped by prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenName(String);

impl TokenName {
    /// Parse and validate a token name.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidName`] for empty names, empty segments
    /// (`a..b`, `.a`, `a.`) or characters outside `[A-Za-z0-9_-]`.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        if s.is_empty() || !s.split('.').all(is_valid_segment) {
            return Err(TokenError::InvalidName(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Append one segment.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidName`] if `segment` is not a valid
    /// single segment.
    pub fn child(&self, segment: &str) -> Result<Self, TokenError> {
        if !is_valid_segment(segment) {
            return Err(TokenError::InvalidName(format!("{}.{segment}", self.0)));
        }
        Ok(Self(format!("{}.{segment}", self.0)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Last segment (`hover` for `button.primary.hover`).
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything but the last segment, or `None` for a single segment.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.rsplit_once('.').map(|(parent, _)| Self(parent.to_string()))
    }

    /// Whether this name equals `prefix` or sits beneath it.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0 == prefix
            || (self.0.starts_with(prefix) && self.0.as_bytes().get(prefix.len()) == Some(&b'.'))
    }

    /// The name with dots replaced by `sep` (`button-primary-hover`).
    #[must_use]
    pub fn joined(&self, sep: &str) -> String {
        self.0.replace('.', sep)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TokenName {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TokenName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for TokenName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hierarchical_names() {
        let name = TokenName::parse("button.primary.hover").unwrap();
        assert_eq!(name.segments().collect::<Vec<_>>(), ["button", "primary", "hover"]);
        assert_eq!(name.leaf(), "hover");
        assert_eq!(name.parent().unwrap().as_str(), "button.primary");
        assert_eq!(name.joined("-"), "button-primary-hover");
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", ".a", "a.", "a..b", "a b", "a/b", "brand.5%"] {
            assert!(TokenName::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn child_validates_segment() {
        let base = TokenName::parse("brand").unwrap();
        assert_eq!(base.child("500").unwrap().as_str(), "brand.500");
        assert!(base.child("a.b").is_err());
    }

    #[test]
    fn single_segment_has_no_parent() {
        assert!(TokenName::parse("brand").unwrap().parent().is_none());
    }

    #[test]
    fn prefix_match_respects_segments() {
        let name = TokenName::parse("brand.500").unwrap();
        assert!(name.starts_with("brand"));
        assert!(name.starts_with("brand.500"));
        assert!(!name.starts_with("bra"));
        assert!(!TokenName::parse("brandx.500").unwrap().starts_with("brand"));
    }
}
