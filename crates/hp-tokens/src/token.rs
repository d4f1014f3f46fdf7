// SPDX-License-Identifier: MIT

//! A single design token: name, typed value, context, and provenance.
//!
//! Tokens are immutable. Every "mutator" returns a new token whose
//! provenance records what changed, so a token can always explain how it
//! came to be.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::name::TokenName;
use crate::value::{TokenKind, TokenValue};

/// Where a token sits in the design system hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    /// Raw palette values (`brand.500`).
    Primitive,
    /// Values bound to a meaning (`surface`, `text-primary`).
    Semantic,
    /// Values bound to a component (`button.solid.background`).
    Component,
    /// Interaction-state variants (`button.hover`).
    State,
}

impl TokenCategory {
    /// Infer the category from context.
    ///
    /// State wins over component, component over role/intent.
    #[must_use]
    pub const fn infer(context: &TokenContext) -> Self {
        if context.state.is_some() {
            Self::State
        } else if context.component.is_some() {
            Self::Component
        } else if context.role.is_some() || context.intent.is_some() {
            Self::Semantic
        } else {
            Self::Primitive
        }
    }
}

/// Free-form labels describing what a token is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl TokenContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    #[must_use]
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.state.is_none()
            && self.intent.is_none()
            && self.component.is_none()
            && self.variant.is_none()
    }
}

/// How and when a token was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub created_at: DateTime<Utc>,
    /// Identifier of whatever produced the token (`hp-derive/states`).
    pub generator: String,
    /// Transformations applied, oldest first.
    pub transformations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl Provenance {
    #[must_use]
    pub fn new(generator: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            generator: generator.into(),
            transformations: Vec::new(),
            deprecated: None,
        }
    }

    /// Provenance stamped with the current time.
    #[must_use]
    pub fn now(generator: impl Into<String>) -> Self {
        Self::new(generator, Utc::now())
    }

    /// Append a transformation label.
    #[must_use]
    pub fn record(mut self, transformation: impl Into<String>) -> Self {
        self.transformations.push(transformation.into());
        self
    }
}

/// A named, typed, versioned design value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    name: TokenName,
    value: TokenValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    category: TokenCategory,
    #[serde(skip_serializing_if = "TokenContext::is_empty", default)]
    context: TokenContext,
    provenance: Provenance,
}

impl Token {
    /// Create a token. The category is inferred from `context`.
    #[must_use]
    pub fn new(
        name: TokenName,
        value: TokenValue,
        context: TokenContext,
        provenance: Provenance,
    ) -> Self {
        Self {
            name,
            category: TokenCategory::infer(&context),
            value,
            description: None,
            context,
            provenance,
        }
    }

    /// Parse the name and create a token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidName`] if `name` is not a valid token name.
    pub fn named(
        name: &str,
        value: TokenValue,
        context: TokenContext,
        provenance: Provenance,
    ) -> Result<Self, TokenError> {
        Ok(Self::new(TokenName::parse(name)?, value, context, provenance))
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub const fn name(&self) -> &TokenName {
        &self.name
    }

    #[must_use]
    pub const fn value(&self) -> &TokenValue {
        &self.value
    }

    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.value.kind()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn category(&self) -> TokenCategory {
        self.category
    }

    #[must_use]
    pub const fn context(&self) -> &TokenContext {
        &self.context
    }

    #[must_use]
    pub const fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.provenance.deprecated.is_some()
    }

    /// CSS text of the value.
    #[must_use]
    pub fn css_value(&self) -> String {
        self.value.css_value()
    }

    /// Whether two tokens define the same thing, ignoring provenance.
    #[must_use]
    pub fn same_definition(&self, other: &Self) -> bool {
        self.name == other.name
            && self.value == other.value
            && self.description == other.description
            && self.context == other.context
            && self.provenance.deprecated == other.provenance.deprecated
    }

    // ─── Mutators (return new tokens) ────────────────────────────────────

    /// Replace the value, keeping its kind.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::KindMismatch`] if `value` is a different kind.
    pub fn with_value(&self, value: TokenValue) -> Result<Self, TokenError> {
        if value.kind() != self.kind() {
            return Err(TokenError::KindMismatch {
                name: self.name.to_string(),
                expected: self.kind(),
                found: value.kind(),
            });
        }
        Ok(Self {
            value,
            provenance: self.provenance.clone().record("value"),
            ..self.clone()
        })
    }

    /// Replace the context; the category is re-inferred.
    #[must_use]
    pub fn with_context(&self, context: TokenContext) -> Self {
        Self {
            category: TokenCategory::infer(&context),
            context,
            provenance: self.provenance.clone().record("context"),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            provenance: self.provenance.clone().record("description"),
            ..self.clone()
        }
    }

    /// Record an applied transformation without touching the value.
    #[must_use]
    pub fn with_transformation(&self, label: impl Into<String>) -> Self {
        Self {
            provenance: self.provenance.clone().record(label),
            ..self.clone()
        }
    }

    /// Mark the token deprecated with a note for consumers.
    #[must_use]
    pub fn deprecated(&self, note: impl Into<String>) -> Self {
        let mut provenance = self.provenance.clone().record("deprecated");
        provenance.deprecated = Some(note.into());
        Self {
            provenance,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Dimension;
    use hp_color::Color;

    fn brand() -> Token {
        Token::named(
            "brand.500",
            TokenValue::Color(Color::oklch(0.6, 0.15, 160.0)),
            TokenContext::new(),
            Provenance::new("test", DateTime::<Utc>::UNIX_EPOCH),
        )
        .unwrap()
    }

    #[test]
    fn category_inference_order() {
        assert_eq!(TokenCategory::infer(&TokenContext::new()), TokenCategory::Primitive);
        assert_eq!(TokenCategory::infer(&TokenContext::new().role("surface")), TokenCategory::Semantic);
        assert_eq!(
            TokenCategory::infer(&TokenContext::new().role("surface").component("button")),
            TokenCategory::Component
        );
        assert_eq!(
            TokenCategory::infer(&TokenContext::new().component("button").state("hover")),
            TokenCategory::State
        );
    }

    #[test]
    fn with_value_keeps_kind() {
        let token = brand();
        let updated = token.with_value(TokenValue::Color(Color::WHITE)).unwrap();
        assert_eq!(updated.provenance().transformations, ["value"]);
        assert!(token.provenance().transformations.is_empty());

        let err = token.with_value(TokenValue::Dimension(Dimension::px(1.0))).unwrap_err();
        assert!(matches!(
            err,
            TokenError::KindMismatch { expected: TokenKind::Color, found: TokenKind::Dimension, .. }
        ));
    }

    #[test]
    fn context_change_reinfers_category() {
        let token = brand().with_context(TokenContext::new().state("hover"));
        assert_eq!(token.category(), TokenCategory::State);
    }

    #[test]
    fn deprecation_is_recorded() {
        let token = brand().deprecated("use brand.600");
        assert!(token.is_deprecated());
        assert_eq!(token.provenance().deprecated.as_deref(), Some("use brand.600"));
        assert_eq!(token.provenance().transformations.last().map(String::as_str), Some("deprecated"));
    }

    #[test]
    fn same_definition_ignores_transform_history() {
        let a = brand();
        let b = brand().with_transformation("imported");
        assert!(a.same_definition(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn invalid_name_is_rejected() {
        let err = Token::named(
            "brand..500",
            TokenValue::Color(Color::WHITE),
            TokenContext::new(),
            Provenance::now("test"),
        );
        assert!(matches!(err, Err(TokenError::InvalidName(_))));
    }
}
