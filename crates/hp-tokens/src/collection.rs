// SPDX-License-Identifier: MIT

//! Versioned, immutable token collections.
//!
//! A collection is a sorted map of tokens plus metadata. Mutators clone the
//! map and return a new collection; the original never changes. That makes
//! writes O(n), which is fine for read-heavy theme data and lets any number
//! of readers share a collection without locks.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CollectionError;
use crate::name::TokenName;
use crate::token::{Token, TokenCategory};
use crate::value::TokenKind;
use crate::version::SemVer;

/// What to do when both sides of a merge define the same name differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Keep the token already in `self`.
    #[default]
    KeepExisting,
    /// Take the token from the incoming collection.
    PreferIncoming,
    /// Fail with [`CollectionError::Duplicate`].
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCollection {
    name: String,
    description: String,
    version: SemVer,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tokens: BTreeMap<TokenName, Token>,
}

impl TokenCollection {
    /// Empty collection at version `1.0.0`.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: SemVer::default(),
            created_at: at,
            updated_at: at,
            tokens: BTreeMap::new(),
        }
    }

    /// Build a collection in one pass. The version stays at `1.0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Duplicate`] if two tokens share a name
    /// with different definitions. Identical repeats are collapsed.
    pub fn from_tokens(
        name: impl Into<String>,
        description: impl Into<String>,
        tokens: impl IntoIterator<Item = Token>,
        at: DateTime<Utc>,
    ) -> Result<Self, CollectionError> {
        let mut collection = Self::new(name, description, at);
        for token in tokens {
            insert_unique(&mut collection.tokens, token)?;
        }
        Ok(collection)
    }

    // ─── Metadata ────────────────────────────────────────────────────────

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn version(&self) -> &SemVer {
        &self.version
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Look up a token by name. Unknown or malformed names return `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Token> {
        TokenName::parse(name).ok().and_then(|n| self.tokens.get(&n))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &TokenName> {
        self.tokens.keys()
    }

    pub fn by_category(&self, category: TokenCategory) -> impl Iterator<Item = &Token> {
        self.filter(move |t| t.category() == category)
    }

    /// Tokens named `prefix` or nested beneath it.
    pub fn by_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Token> {
        self.filter(move |t| t.name().starts_with(prefix))
    }

    pub fn by_kind(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.filter(move |t| t.kind() == kind)
    }

    pub fn deprecated(&self) -> impl Iterator<Item = &Token> {
        self.filter(Token::is_deprecated)
    }

    pub fn filter<'a, F>(&'a self, mut predicate: F) -> impl Iterator<Item = &'a Token>
    where
        F: FnMut(&Token) -> bool + 'a,
    {
        self.tokens.values().filter(move |t| predicate(t))
    }

    // ─── Mutators (return new collections) ───────────────────────────────

    /// Add a token.
    ///
    /// Adding a token identical to the one already stored is a no-op and
    /// does not bump the version.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Duplicate`] if a different token already
    /// uses the name. Use [`with_replaced`](Self::with_replaced) to overwrite.
    pub fn with_token(&self, token: Token) -> Result<Self, CollectionError> {
        if let Some(existing) = self.tokens.get(token.name()) {
            if existing.same_definition(&token) {
                return Ok(self.clone());
            }
            return Err(CollectionError::Duplicate(token.name().to_string()));
        }
        debug!(collection = %self.name, token = %token.name(), "adding token");
        let mut tokens = self.tokens.clone();
        tokens.insert(token.name().clone(), token);
        Ok(self.touched(tokens))
    }

    /// Insert or overwrite a token.
    #[must_use]
    pub fn with_replaced(&self, token: Token) -> Self {
        debug!(collection = %self.name, token = %token.name(), "replacing token");
        let mut tokens = self.tokens.clone();
        tokens.insert(token.name().clone(), token);
        self.touched(tokens)
    }

    /// Remove a token. Removing a missing name returns an unchanged copy.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        let Some(key) = TokenName::parse(name).ok().filter(|n| self.tokens.contains_key(n)) else {
            return self.clone();
        };
        debug!(collection = %self.name, token = %key, "removing token");
        let mut tokens = self.tokens.clone();
        tokens.remove(&key);
        self.touched(tokens)
    }

    /// Merge `other` into a copy of `self`.
    ///
    /// Identical definitions are never conflicts. The version bumps once,
    /// and only if something changed.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Duplicate`] for the first conflicting
    /// name when `strategy` is [`MergeStrategy::Reject`].
    pub fn merge(&self, other: &Self, strategy: MergeStrategy) -> Result<Self, CollectionError> {
        let mut tokens = self.tokens.clone();
        let mut changed = false;
        for (name, incoming) in &other.tokens {
            match tokens.get(name) {
                None => {
                    tokens.insert(name.clone(), incoming.clone());
                    changed = true;
                }
                Some(existing) if existing.same_definition(incoming) => {}
                Some(_) => match strategy {
                    MergeStrategy::KeepExisting => {}
                    MergeStrategy::PreferIncoming => {
                        tokens.insert(name.clone(), incoming.clone());
                        changed = true;
                    }
                    MergeStrategy::Reject => {
                        return Err(CollectionError::Duplicate(name.to_string()));
                    }
                },
            }
        }
        debug!(
            collection = %self.name,
            incoming = %other.name,
            ?strategy,
            changed,
            "merged collections"
        );
        Ok(if changed { self.touched(tokens) } else { self.clone() })
    }

    /// Set an explicit version. Does not bump anything else.
    #[must_use]
    pub fn with_version(&self, version: SemVer) -> Self {
        Self {
            version,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// New collection with `tokens`, next patch version, fresh `updated_at`.
    fn touched(&self, tokens: BTreeMap<TokenName, Token>) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.bump_patch(),
            created_at: self.created_at,
            updated_at: Utc::now(),
            tokens,
        }
    }

    // ─── Diff ────────────────────────────────────────────────────────────

    /// Names added, removed, or changed going from `self` to `other`.
    #[must_use]
    pub fn diff(&self, other: &Self) -> CollectionDiff {
        let mut diff = CollectionDiff::default();
        for (name, token) in &self.tokens {
            match other.tokens.get(name) {
                None => diff.removed.push(name.clone()),
                Some(theirs) if !token.same_definition(theirs) => diff.changed.push(name.clone()),
                Some(_) => {}
            }
        }
        diff.added = other
            .tokens
            .keys()
            .filter(|n| !self.tokens.contains_key(*n))
            .cloned()
            .collect();
        diff
    }
}

fn insert_unique(tokens: &mut BTreeMap<TokenName, Token>, token: Token) -> Result<(), CollectionError> {
    match tokens.get(token.name()) {
        Some(existing) if existing.same_definition(&token) => Ok(()),
        Some(_) => Err(CollectionError::Duplicate(token.name().to_string())),
        None => {
            tokens.insert(token.name().clone(), token);
            Ok(())
        }
    }
}

impl<'a> IntoIterator for &'a TokenCollection {
    type Item = &'a Token;
    type IntoIter = std::collections::btree_map::Values<'a, TokenName, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.values()
    }
}

/// Name-level difference between two collections. Every list is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDiff {
    pub added: Vec<TokenName>,
    pub removed: Vec<TokenName>,
    pub changed: Vec<TokenName>,
}

impl CollectionDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Provenance, TokenContext};
    use crate::value::{Dimension, TokenValue};
    use hp_color::Color;
    use pretty_assertions::assert_eq;

    fn token(name: &str, color: Color) -> Token {
        Token::named(
            name,
            TokenValue::Color(color),
            TokenContext::new(),
            Provenance::new("test", DateTime::<Utc>::UNIX_EPOCH),
        )
        .unwrap()
    }

    fn names(list: &[TokenName]) -> Vec<&str> {
        list.iter().map(TokenName::as_str).collect()
    }

    fn base() -> TokenCollection {
        TokenCollection::from_tokens(
            "brand",
            "brand palette",
            [token("brand.500", Color::oklch(0.6, 0.15, 160.0)), token("brand.900", Color::BLACK)],
            DateTime::<Utc>::UNIX_EPOCH,
        )
        .unwrap()
    }

    // ── Mutation ──

    #[test]
    fn with_token_bumps_patch_and_leaves_original() {
        let c = base();
        let next = c.with_token(token("brand.50", Color::WHITE)).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(next.len(), 3);
        assert_eq!(next.version().to_string(), "1.0.1");
        assert_eq!(c.version().to_string(), "1.0.0");
        assert!(next.updated_at() > c.updated_at());
    }

    #[test]
    fn identical_token_is_deduped() {
        let c = base();
        let same = c.with_token(token("brand.900", Color::BLACK)).unwrap();
        assert_eq!(same.version(), c.version());
        assert_eq!(same.len(), 2);
    }

    #[test]
    fn different_token_under_same_name_is_rejected() {
        let err = base().with_token(token("brand.900", Color::WHITE)).unwrap_err();
        assert_eq!(err, CollectionError::Duplicate("brand.900".to_string()));
    }

    #[test]
    fn replace_and_remove() {
        let c = base().with_replaced(token("brand.900", Color::WHITE));
        assert_eq!(c.get("brand.900").unwrap().value().as_color(), Some(&Color::WHITE));
        let c = c.without("brand.900");
        assert!(!c.contains("brand.900"));
        assert_eq!(c.version().to_string(), "1.0.2");
        assert_eq!(c.without("missing").version(), c.version());
    }

    #[test]
    fn from_tokens_rejects_conflicts() {
        let result = TokenCollection::from_tokens(
            "x",
            "",
            [token("a", Color::BLACK), token("a", Color::WHITE)],
            Utc::now(),
        );
        assert!(result.is_err());
    }

    // ── Merge ──

    #[test]
    fn merge_strategies() {
        let ours = base();
        let theirs = TokenCollection::from_tokens(
            "other",
            "",
            [token("brand.900", Color::WHITE), token("accent", Color::oklch(0.7, 0.2, 30.0))],
            Utc::now(),
        )
        .unwrap();

        let kept = ours.merge(&theirs, MergeStrategy::KeepExisting).unwrap();
        assert_eq!(kept.len(), 3);
        assert_eq!(kept.get("brand.900").unwrap().value().as_color(), Some(&Color::BLACK));

        let preferred = ours.merge(&theirs, MergeStrategy::PreferIncoming).unwrap();
        assert_eq!(preferred.get("brand.900").unwrap().value().as_color(), Some(&Color::WHITE));

        let err = ours.merge(&theirs, MergeStrategy::Reject).unwrap_err();
        assert_eq!(err, CollectionError::Duplicate("brand.900".to_string()));
    }

    #[test]
    fn merge_with_self_changes_nothing() {
        let c = base();
        assert_eq!(c.merge(&c, MergeStrategy::Reject).unwrap().version(), c.version());
    }

    // ── Queries ──

    #[test]
    fn queries_filter_by_shape() {
        let spacing = Token::named(
            "space.md",
            TokenValue::Dimension(Dimension::rem(1.0)),
            TokenContext::new(),
            Provenance::now("test"),
        )
        .unwrap();
        let c = base()
            .with_token(spacing)
            .unwrap()
            .with_replaced(token("brand.900", Color::BLACK).deprecated("gone"));

        assert_eq!(c.by_prefix("brand").count(), 2);
        assert_eq!(c.by_kind(TokenKind::Dimension).count(), 1);
        assert_eq!(c.by_category(TokenCategory::Primitive).count(), 3);
        assert_eq!(c.deprecated().map(|t| t.name().as_str()).collect::<Vec<_>>(), ["brand.900"]);
        assert!(c.get("not a name").is_none());
    }

    // ── Diff ──

    #[test]
    fn diff_is_sorted_and_complete() {
        let before = base();
        let after = before
            .without("brand.500")
            .with_replaced(token("brand.900", Color::WHITE))
            .with_token(token("brand.100", Color::gray(0.9)))
            .unwrap()
            .with_token(token("accent", Color::oklch(0.7, 0.2, 30.0)))
            .unwrap();

        let diff = before.diff(&after);
        assert_eq!(names(&diff.added), ["accent", "brand.100"]);
        assert_eq!(names(&diff.removed), ["brand.500"]);
        assert_eq!(names(&diff.changed), ["brand.900"]);
        assert!(before.diff(&before).is_empty());
    }

    #[test]
    fn serializes_with_string_version() {
        let json = serde_json::to_value(base()).unwrap();
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["tokens"]["brand.900"]["value"]["value"], "#000000");
    }
}
