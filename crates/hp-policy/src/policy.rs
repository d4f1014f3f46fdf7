// SPDX-License-Identifier: MIT

//! Policies: versioned, validated groups of rules.

use std::collections::BTreeSet;
use std::fmt;

use hp_tokens::SemVer;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::PolicyError;

// ─── Classification ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyCategory {
    Accessibility,
    Color,
    Naming,
    Consistency,
    Theme,
    Custom,
}

/// What a policy applies to. `Global` policies apply everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyScope {
    Global,
    Component,
    Token,
    Theme,
    Accessibility,
}

impl PolicyScope {
    /// Whether a policy with this scope applies to an input scoped `target`.
    #[must_use]
    pub fn covers(self, target: Self) -> bool {
        self == Self::Global || self == target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Enforcement {
    Required,
    Recommended,
    Optional,
}

impl Enforcement {
    /// Weight multiplier in aggregate scoring.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Required => 2.0,
            Self::Recommended => 1.5,
            Self::Optional => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Critical => 10.0,
            Self::High => 7.0,
            Self::Medium => 4.0,
            Self::Low => 2.0,
            Self::Info => 1.0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        })
    }
}

// ─── Rule ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub condition: Condition,
    /// Shown when the condition fails.
    pub message: String,
    pub suggestion: Option<String>,
    /// A fixer exists for failures of this rule. Fixes are applied elsewhere.
    pub auto_fixable: bool,
}

impl Rule {
    #[must_use]
    pub fn new(id: impl Into<String>, condition: Condition, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            condition,
            message: message.into(),
            suggestion: None,
            auto_fixable: false,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub const fn auto_fixable(mut self) -> Self {
        self.auto_fixable = true;
        self
    }
}

// ─── Policy ──────────────────────────────────────────────────────────────────

/// A validated policy. Build one with [`Policy::builder`].
#[derive(Debug, Clone)]
pub struct Policy {
    id: String,
    name: String,
    description: String,
    version: SemVer,
    category: PolicyCategory,
    scope: PolicyScope,
    enforcement: Enforcement,
    severity: Severity,
    rules: Vec<Rule>,
    enabled: bool,
    tags: Vec<String>,
}

impl Policy {
    #[must_use]
    pub fn builder(id: impl Into<String>) -> PolicyBuilder {
        PolicyBuilder::new(id)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

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
    pub const fn category(&self) -> PolicyCategory {
        self.category
    }

    #[must_use]
    pub const fn scope(&self) -> PolicyScope {
        self.scope
    }

    #[must_use]
    pub const fn enforcement(&self) -> Enforcement {
        self.enforcement
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Failures of advisory policies are warnings, not violations.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        self.enforcement == Enforcement::Optional || self.severity == Severity::Info
    }

    /// A failure of a blocking policy fails the whole evaluation.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.enforcement == Enforcement::Required && self.severity == Severity::Critical
    }

    /// Weight in aggregate scoring.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.severity.weight() * self.enforcement.multiplier()
    }

    #[must_use]
    pub fn with_enabled(&self, enabled: bool) -> Self {
        Self {
            enabled,
            ..self.clone()
        }
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Collects policy fields; [`build`](Self::build) validates them.
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    id: String,
    name: String,
    description: String,
    version: String,
    category: PolicyCategory,
    scope: PolicyScope,
    enforcement: Enforcement,
    severity: Severity,
    rules: Vec<Rule>,
    enabled: bool,
    tags: Vec<String>,
}

impl PolicyBuilder {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            version: "1.0.0".to_string(),
            category: PolicyCategory::Custom,
            scope: PolicyScope::Global,
            enforcement: Enforcement::Recommended,
            severity: Severity::Medium,
            rules: Vec::new(),
            enabled: true,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub const fn category(mut self, category: PolicyCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn scope(mut self, scope: PolicyScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub const fn enforcement(mut self, enforcement: Enforcement) -> Self {
        self.enforcement = enforcement;
        self
    }

    #[must_use]
    pub const fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Validate and produce the policy.
    ///
    /// # Errors
    ///
    /// - [`PolicyError::MissingField`] for an empty id, name or description
    /// - [`PolicyError::InvalidVersion`] if the version is not semver
    /// - [`PolicyError::NoRules`] if no rules were added
    /// - [`PolicyError::DuplicateRule`] if two rules share an id
    pub fn build(self) -> Result<Policy, PolicyError> {
        if self.id.trim().is_empty() {
            return Err(PolicyError::MissingField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(PolicyError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(PolicyError::MissingField("description"));
        }
        let version = SemVer::parse(&self.version).map_err(|_| PolicyError::InvalidVersion {
            policy: self.id.clone(),
            version: self.version.clone(),
        })?;
        if self.rules.is_empty() {
            return Err(PolicyError::NoRules(self.id));
        }
        let mut seen = BTreeSet::new();
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(PolicyError::MissingField("rule id"));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(PolicyError::DuplicateRule {
                    policy: self.id.clone(),
                    rule: rule.id.clone(),
                });
            }
        }

        Ok(Policy {
            id: self.id,
            name: self.name,
            description: self.description,
            version,
            category: self.category,
            scope: self.scope,
            enforcement: self.enforcement,
            severity: self.severity,
            rules: self.rules,
            enabled: self.enabled,
            tags: self.tags,
        })
    }
}
