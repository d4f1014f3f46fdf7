// SPDX-License-Identifier: MIT

//! Semantic versions for collections and policies.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TokenError;

/// `major.minor.patch` with an optional `-pre` tag.
///
/// Ordering follows semver: a pre-release sorts before its release.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl SemVer {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Parse `1.2.3` or `1.2.3-beta.1`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidVersion`] for anything else, including
    /// leading zeros (`01.2.3`) and empty pre-release tags.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        let invalid = || TokenError::InvalidVersion(s.to_string());

        let (core, pre) = match s.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (s, None),
        };

        let mut parts = core.split('.');
        let mut next = || parts.next().and_then(parse_component).ok_or_else(invalid);
        let major = next()?;
        let minor = next()?;
        let patch = next()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let pre = match pre {
            None => None,
            Some(p)
                if !p.is_empty()
                    && p.split('.').all(|id| {
                        !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
                    }) =>
            {
                Some(p.to_string())
            }
            Some(_) => return Err(invalid()),
        };

        Ok(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// Whether `s` parses as a semantic version.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    #[must_use]
    pub const fn bump_patch(&self) -> Self {
        Self::new(self.major, self.minor, self.patch + 1)
    }

    #[must_use]
    pub const fn bump_minor(&self) -> Self {
        Self::new(self.major, self.minor + 1, 0)
    }

    #[must_use]
    pub const fn bump_major(&self) -> Self {
        Self::new(self.major + 1, 0, 0)
    }
}

fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() || (s.len() > 1 && s.starts_with('0')) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Default for SemVer {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl Ord for SemVer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for SemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

impl FromStr for SemVer {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SemVer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemVer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_release_and_prerelease() {
        assert_eq!(SemVer::parse("1.2.3").unwrap(), SemVer::new(1, 2, 3));
        let pre = SemVer::parse("2.0.0-rc.1").unwrap();
        assert_eq!(pre.pre.as_deref(), Some("rc.1"));
        assert_eq!(pre.to_string(), "2.0.0-rc.1");
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "1", "1.2", "1.2.3.4", "v1.2.3", "01.2.3", "1.2.3-", "1.2.x"] {
            assert!(!SemVer::is_valid(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn ordering_puts_prerelease_first() {
        let rc = SemVer::parse("1.0.0-rc.1").unwrap();
        let release = SemVer::parse("1.0.0").unwrap();
        assert!(rc < release);
        assert!(release < SemVer::new(1, 0, 1));
    }

    #[test]
    fn bumps_reset_lower_components() {
        let v = SemVer::new(1, 4, 7);
        assert_eq!(v.bump_patch(), SemVer::new(1, 4, 8));
        assert_eq!(v.bump_minor(), SemVer::new(1, 5, 0));
        assert_eq!(v.bump_major(), SemVer::new(2, 0, 0));
    }
}
