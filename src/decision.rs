// SPDX-License-Identifier: MIT

//! One component decision: request in, governed tokens out.
//!
//! A [`UxDecision`] derives a token for every (role, state) pair the
//! request names, scores each with a standalone accessibility estimate and
//! files low scorers as violations or warnings depending on the
//! enforcement level. Everything but the status is fixed at construction.
//! Status moves once, from `Pending` to `Applied` or `Rejected`, and every
//! move is appended to the audit trail.

use std::fmt;

use chrono::{DateTime, Utc};
use hp_color::Color;
use hp_derive::{ALARM, ContrastConfig, ContrastReport, InteractionState, Intent, SemanticRole, measure};
use hp_policy::{EvaluationInput, PolicySet};
use hp_tokens::{Provenance, Token, TokenCollection, TokenContext, TokenValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::DecisionError;
use crate::governance::{self, AuditLogger, GovernanceDecision};

// ─── Request ─────────────────────────────────────────────────────────────────

/// How strictly low accessibility estimates are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnforcementLevel {
    /// Low estimates are violations.
    Strict,
    /// Low estimates are warnings.
    #[default]
    Standard,
    /// Low estimates are warnings.
    Advisory,
}

impl EnforcementLevel {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Standard => "standard",
            Self::Advisory => "advisory",
        }
    }
}

impl fmt::Display for EnforcementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub component_id: String,
    pub intent: Intent,
    pub brand_color: Color,
    pub states: Vec<InteractionState>,
    pub roles: Vec<SemanticRole>,
    /// Falls back to the configured governance level when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<EnforcementLevel>,
}

impl DecisionRequest {
    /// A request for the intent's default states and roles.
    #[must_use]
    pub fn new(component_id: impl Into<String>, intent: Intent, brand_color: Color) -> Self {
        Self {
            component_id: component_id.into(),
            intent,
            brand_color,
            states: intent.states().to_vec(),
            roles: intent.roles().to_vec(),
            enforcement: None,
        }
    }

    #[must_use]
    pub fn with_states(mut self, states: impl IntoIterator<Item = InteractionState>) -> Self {
        self.states = states.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = SemanticRole>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_enforcement(mut self, enforcement: EnforcementLevel) -> Self {
        self.enforcement = Some(enforcement);
        self
    }
}

// ─── Status and audit ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionStatus {
    #[default]
    Pending,
    Applied,
    Rejected,
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Applied => "applied",
            Self::Rejected => "rejected",
        })
    }
}

/// One status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub from: DecisionStatus,
    pub to: DecisionStatus,
    pub at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ─── Tokens and findings ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionToken {
    pub token: Token,
    pub role: SemanticRole,
    pub state: InteractionState,
    /// 0–1 heuristic: distance of lightness from mid-gray, scaled by alpha.
    pub accessibility_estimate: f32,
}

/// A token whose accessibility estimate is below the configured minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionFinding {
    pub token: String,
    pub estimate: f32,
    pub minimum: f32,
    pub message: String,
}

/// Lightness distance from 0.5, doubled into 0–1, times alpha.
///
/// A cheap stand-in for real contrast when no background is known.
#[must_use]
pub fn accessibility_estimate(color: &Color) -> f32 {
    ((color.lightness() - 0.5).abs() * 2.0 * color.alpha()).clamp(0.0, 1.0)
}

/// Role color for `state`: role rule, then state rule, then the intent
/// override.
///
/// A destructive accent is always [`ALARM`]. Only the state's opacity
/// survives the override, so a disabled delete button still fades.
fn role_state_color(intent: Intent, base: &Color, role: SemanticRole, state: InteractionState) -> Color {
    let color = state.apply(&role.apply(base));
    if intent == Intent::Danger && role == SemanticRole::Accent {
        ALARM.to_gamut().with_alpha(color.alpha())
    } else {
        color
    }
}

// ─── Decision ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct UxDecision {
    request: DecisionRequest,
    enforcement: EnforcementLevel,
    minimum_accessibility: f32,
    contrast: ContrastConfig,
    created_at: DateTime<Utc>,
    tokens: Vec<DecisionToken>,
    violations: Vec<DecisionFinding>,
    warnings: Vec<DecisionFinding>,
    status: DecisionStatus,
    audit: Vec<AuditEntry>,
}

impl UxDecision {
    /// Derive and govern every (role, state) token of `request`.
    ///
    /// # Errors
    ///
    /// - [`DecisionError::EmptyRequest`] for a blank component id or empty
    ///   state or role lists
    /// - [`DecisionError::Token`] if the component id is not a valid token
    ///   name segment
    pub fn new(request: DecisionRequest, config: &EngineConfig) -> Result<Self, DecisionError> {
        if request.component_id.trim().is_empty() {
            return Err(DecisionError::EmptyRequest("component id"));
        }
        if request.states.is_empty() {
            return Err(DecisionError::EmptyRequest("states"));
        }
        if request.roles.is_empty() {
            return Err(DecisionError::EmptyRequest("roles"));
        }

        let derivation = &config.derivation;
        let enforcement = request.enforcement.unwrap_or(config.governance.enforcement);
        let minimum = config.governance.minimum_accessibility;
        let base = request.intent.base_color(&request.brand_color);
        debug!(
            component = %request.component_id,
            intent = %request.intent,
            %enforcement,
            "building decision"
        );

        let mut tokens = Vec::with_capacity(request.roles.len() * request.states.len());
        let mut findings = Vec::new();
        for &role in &request.roles {
            for &state in &request.states {
                let color = role_state_color(request.intent, &base, role, state);
                let estimate = accessibility_estimate(&color);
                let name = format!("{}.{role}.{state}", request.component_id);
                let token = Token::named(
                    &name,
                    TokenValue::Color(color),
                    TokenContext::new()
                        .component(request.component_id.as_str())
                        .intent(request.intent.name())
                        .role(role.name())
                        .state(state.name()),
                    Provenance::new(derivation.generator.clone(), derivation.issued_at)
                        .record(format!("role:{role}"))
                        .record(format!("state:{state}")),
                )?;
                if estimate < minimum {
                    findings.push(DecisionFinding {
                        message: format!("{name} scores {estimate:.2}, below the {minimum:.2} minimum"),
                        token: name,
                        estimate,
                        minimum,
                    });
                }
                tokens.push(DecisionToken {
                    token,
                    role,
                    state,
                    accessibility_estimate: estimate,
                });
            }
        }

        let (violations, warnings) = match enforcement {
            EnforcementLevel::Strict => (findings, Vec::new()),
            EnforcementLevel::Standard | EnforcementLevel::Advisory => (Vec::new(), findings),
        };

        Ok(Self {
            request,
            enforcement,
            minimum_accessibility: minimum,
            contrast: config.contrast,
            created_at: derivation.issued_at,
            tokens,
            violations,
            warnings,
            status: DecisionStatus::Pending,
            audit: Vec::new(),
        })
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub const fn request(&self) -> &DecisionRequest {
        &self.request
    }

    #[must_use]
    pub fn component_id(&self) -> &str {
        &self.request.component_id
    }

    #[must_use]
    pub const fn enforcement(&self) -> EnforcementLevel {
        self.enforcement
    }

    #[must_use]
    pub const fn status(&self) -> DecisionStatus {
        self.status
    }

    #[must_use]
    pub fn tokens(&self) -> &[DecisionToken] {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, role: SemanticRole, state: InteractionState) -> Option<&DecisionToken> {
        self.tokens.iter().find(|t| t.role == role && t.state == state)
    }

    #[must_use]
    pub fn violations(&self) -> &[DecisionFinding] {
        &self.violations
    }

    #[must_use]
    pub fn warnings(&self) -> &[DecisionFinding] {
        &self.warnings
    }

    #[must_use]
    pub fn audit_trail(&self) -> &[AuditEntry] {
        &self.audit
    }

    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    // ─── Contrast ────────────────────────────────────────────────────────

    /// Primary text measured on the surface, both in `state`.
    ///
    /// `None` unless the request covers both roles and the state.
    #[must_use]
    pub fn text_contrast(&self, state: InteractionState) -> Option<ContrastReport> {
        let color = |role| match self.token(role, state)?.token.value() {
            TokenValue::Color(c) => Some(c.clone()),
            _ => None,
        };
        let text = color(SemanticRole::TextPrimary)?;
        let surface = color(SemanticRole::Surface)?;
        Some(measure(&text, &surface))
    }

    /// Whether idle text on surface meets the configured contrast minimum.
    #[must_use]
    pub fn meets_contrast(&self) -> Option<bool> {
        let report = self.text_contrast(InteractionState::Idle)?;
        Some(
            report.wcag_level >= self.contrast.minimum_wcag
                && report.perceptual.abs() >= self.contrast.perceptual_floor,
        )
    }

    // ─── Transitions ─────────────────────────────────────────────────────

    /// Mark the decision applied.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError::InvalidTransition`] unless pending.
    pub fn apply(&mut self) -> Result<(), DecisionError> {
        self.transition(DecisionStatus::Applied, None)
    }

    /// Mark the decision rejected, recording why.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError::InvalidTransition`] unless pending.
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), DecisionError> {
        self.transition(DecisionStatus::Rejected, Some(reason.into()))
    }

    fn transition(&mut self, to: DecisionStatus, note: Option<String>) -> Result<(), DecisionError> {
        let from = self.status;
        if from != DecisionStatus::Pending {
            return Err(DecisionError::InvalidTransition { from, to });
        }
        info!(component = %self.request.component_id, %from, %to, "decision status changed");
        self.audit.push(AuditEntry {
            from,
            to,
            at: Utc::now(),
            note,
        });
        self.status = to;
        Ok(())
    }

    // ─── Views ───────────────────────────────────────────────────────────

    /// The decision's tokens as a collection named after the component.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError::Collection`] if the request repeats a role
    /// or state.
    pub fn collection(&self) -> Result<TokenCollection, DecisionError> {
        let description = format!(
            "{} decision for {}",
            self.request.intent, self.request.component_id
        );
        Ok(TokenCollection::from_tokens(
            self.request.component_id.as_str(),
            description,
            self.tokens.iter().map(|t| t.token.clone()),
            self.created_at,
        )?)
    }

    /// What policy evaluation sees: the brand color, the token collection
    /// and, when both roles exist, idle text-on-surface contrast.
    ///
    /// # Errors
    ///
    /// Propagates [`collection`](Self::collection) errors.
    pub fn evaluation_input(&self) -> Result<EvaluationInput, DecisionError> {
        let mut input = EvaluationInput::new()
            .component(self.request.component_id.as_str())
            .color(self.request.brand_color.clone())
            .tokens(self.collection()?);
        if let Some(report) = self.text_contrast(InteractionState::Idle) {
            input = input.contrast(report.wcag_ratio, report.perceptual);
        }
        Ok(input)
    }

    /// Evaluate the decision against `set`.
    ///
    /// # Errors
    ///
    /// Propagates [`collection`](Self::collection) errors.
    pub fn evaluate(&self, set: &PolicySet) -> Result<GovernanceDecision, DecisionError> {
        let input = self.evaluation_input()?;
        Ok(GovernanceDecision::new(self.subject(), hp_policy::evaluate(set, &input)))
    }

    /// Evaluate against the configured builtin policy set and hand the
    /// result to `logger`.
    ///
    /// # Errors
    ///
    /// - [`DecisionError::UnknownPolicySet`] if `config.governance.policy_set`
    ///   names no builtin set
    /// - [`collection`](Self::collection) errors
    pub fn govern(&self, config: &EngineConfig, logger: &dyn AuditLogger) -> Result<GovernanceDecision, DecisionError> {
        let name = &config.governance.policy_set;
        let set = hp_policy::builtin::policy_set(name).ok_or_else(|| DecisionError::UnknownPolicySet(name.clone()))?;
        let input = self.evaluation_input()?;
        Ok(governance::govern(self.subject(), &set, &input, logger))
    }

    fn subject(&self) -> String {
        format!("{} ({})", self.request.component_id, self.request.intent)
    }

    #[must_use]
    pub fn export(&self) -> DecisionExport {
        DecisionExport {
            component_id: self.request.component_id.clone(),
            intent: self.request.intent,
            brand_color: self.request.brand_color.clone(),
            enforcement: self.enforcement,
            minimum_accessibility: self.minimum_accessibility,
            status: self.status,
            created_at: self.created_at,
            tokens: self.tokens.clone(),
            violations: self.violations.clone(),
            warnings: self.warnings.clone(),
            audit_trail: self.audit.clone(),
        }
    }

    /// Pretty JSON of [`export`](Self::export).
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DecisionError> {
        serde_json::to_string_pretty(&self.export()).map_err(|e| DecisionError::Serialize(e.to_string()))
    }
}

/// Serializable snapshot of a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionExport {
    pub component_id: String,
    pub intent: Intent,
    pub brand_color: Color,
    pub enforcement: EnforcementLevel,
    pub minimum_accessibility: f32,
    pub status: DecisionStatus,
    pub created_at: DateTime<Utc>,
    pub tokens: Vec<DecisionToken>,
    pub violations: Vec<DecisionFinding>,
    pub warnings: Vec<DecisionFinding>,
    pub audit_trail: Vec<AuditEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn teal() -> Color {
        Color::hex("#0EB58C").unwrap()
    }

    fn decision(request: DecisionRequest) -> UxDecision {
        UxDecision::new(request, &EngineConfig::default()).unwrap()
    }

    // ── Construction ──

    #[test]
    fn one_token_per_role_and_state() {
        let d = decision(DecisionRequest::new("button", Intent::Primary, teal()));
        assert_eq!(d.tokens().len(), 6 * 5);
        assert!(d.token(SemanticRole::Accent, InteractionState::Hover).is_some());
        let first = &d.tokens()[0].token;
        assert_eq!(first.name().as_str(), "button.surface.idle");
        assert_eq!(first.context().component.as_deref(), Some("button"));
    }

    #[test]
    fn empty_requests_are_rejected() {
        let config = EngineConfig::default();
        let err = UxDecision::new(DecisionRequest::new(" ", Intent::Primary, teal()), &config).unwrap_err();
        assert_eq!(err, DecisionError::EmptyRequest("component id"));
        let err = UxDecision::new(
            DecisionRequest::new("button", Intent::Primary, teal()).with_states([]),
            &config,
        )
        .unwrap_err();
        assert_eq!(err, DecisionError::EmptyRequest("states"));
    }

    #[test]
    fn invalid_component_id_is_a_token_error() {
        let err = UxDecision::new(
            DecisionRequest::new("Big Button", Intent::Primary, teal()),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DecisionError::Token(_)));
    }

    #[test]
    fn danger_accent_is_alarm_regardless_of_brand() {
        let request = DecisionRequest::new("delete", Intent::Danger, Color::hex("#3366FF").unwrap())
            .with_roles([SemanticRole::Accent]);
        let d = decision(request);
        assert_eq!(d.tokens().len(), Intent::Danger.states().len());
        let alarm = ALARM.to_gamut();
        for t in d.tokens() {
            let TokenValue::Color(color) = t.token.value() else { panic!("not a color") };
            let expected = if t.state == InteractionState::Disabled {
                alarm.with_alpha(0.5)
            } else {
                alarm.clone()
            };
            assert_eq!(*color, expected, "{}", t.state);
        }
    }

    #[test]
    fn danger_override_leaves_other_roles_to_the_state_rule() {
        let request = DecisionRequest::new("delete", Intent::Danger, Color::hex("#3366FF").unwrap())
            .with_roles([SemanticRole::Border]);
        let d = decision(request);
        let color = |state| match d.token(SemanticRole::Border, state).unwrap().token.value() {
            TokenValue::Color(c) => c.clone(),
            other => panic!("not a color: {other:?}"),
        };
        assert!(color(InteractionState::Hover).lightness() > color(InteractionState::Idle).lightness());
    }

    // ── Governance ──

    #[test]
    fn estimate_is_lightness_distance_times_alpha() {
        assert!((accessibility_estimate(&Color::BLACK) - 1.0).abs() < 1e-6);
        assert!(accessibility_estimate(&Color::gray(0.5)).abs() < 1e-6);
        let faded = Color::oklcha(1.0, 0.0, 0.0, 0.5);
        assert!((accessibility_estimate(&faded) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn strict_files_violations_and_standard_files_warnings() {
        // Focus ring sits at lightness 0.6, well under the 0.3 default.
        let request = DecisionRequest::new("button", Intent::Primary, teal()).with_roles([SemanticRole::FocusRing]);

        let strict = decision(request.clone().with_enforcement(EnforcementLevel::Strict));
        assert!(!strict.violations().is_empty());
        assert!(strict.warnings().is_empty());
        assert!(!strict.is_compliant());

        let standard = decision(request);
        assert_eq!(standard.enforcement(), EnforcementLevel::Standard);
        assert!(standard.violations().is_empty());
        assert_eq!(standard.warnings().len(), strict.violations().len());
    }

    #[test]
    fn text_on_surface_meets_default_contrast() {
        let d = decision(DecisionRequest::new("card", Intent::Neutral, teal()));
        assert_eq!(d.meets_contrast(), Some(true));
        let no_surface = decision(
            DecisionRequest::new("card", Intent::Neutral, teal()).with_roles([SemanticRole::TextPrimary]),
        );
        assert_eq!(no_surface.meets_contrast(), None);
    }

    #[test]
    fn advisory_files_warnings() {
        let request = DecisionRequest::new("button", Intent::Primary, teal())
            .with_roles([SemanticRole::FocusRing])
            .with_enforcement(EnforcementLevel::Advisory);
        let d = decision(request);
        assert_eq!(d.enforcement(), EnforcementLevel::Advisory);
        assert!(d.violations().is_empty());
        assert!(!d.warnings().is_empty());
        assert!(d.is_compliant());
    }

    #[test]
    fn govern_uses_the_configured_set_and_logs_once() {
        let d = decision(DecisionRequest::new("card", Intent::Neutral, teal()));
        let seen = RefCell::new(Vec::new());
        let logger = |g: &GovernanceDecision| seen.borrow_mut().push(g.result.total);

        let mut config = EngineConfig::default();
        config.governance.policy_set = "wcag-aaa".to_string();
        let governed = d.govern(&config, &logger).unwrap();
        let expected = d.evaluate(&hp_policy::builtin::policy_set("wcag-aaa").unwrap()).unwrap();
        assert_eq!(governed, expected);
        assert_eq!(*seen.borrow(), [expected.result.total]);

        config.governance.policy_set = "house-style".to_string();
        let err = d.govern(&config, &logger).unwrap_err();
        assert_eq!(err, DecisionError::UnknownPolicySet("house-style".to_string()));
        assert_eq!(seen.borrow().len(), 1);
    }

    // ── Transitions ──

    #[test]
    fn apply_then_reject_is_invalid() {
        let mut d = decision(DecisionRequest::new("button", Intent::Primary, teal()));
        d.apply().unwrap();
        let err = d.reject("too late").unwrap_err();
        assert_eq!(
            err,
            DecisionError::InvalidTransition {
                from: DecisionStatus::Applied,
                to: DecisionStatus::Rejected
            }
        );
        assert_eq!(d.status(), DecisionStatus::Applied);
        assert_eq!(d.audit_trail().len(), 1);
    }

    #[test]
    fn failed_transition_leaves_audit_trail_alone() {
        let mut d = decision(DecisionRequest::new("button", Intent::Primary, teal()));
        d.apply().unwrap();
        let before = d.audit_trail().to_vec();

        assert!(d.reject("too late").is_err());
        assert!(d.apply().is_err());
        assert_eq!(d.audit_trail(), before.as_slice());
        let entry = &d.audit_trail()[0];
        assert_eq!((entry.from, entry.to), (DecisionStatus::Pending, DecisionStatus::Applied));
        assert_eq!(entry.at, before[0].at);
    }

    #[test]
    fn reject_records_reason() {
        let mut d = decision(DecisionRequest::new("button", Intent::Primary, teal()));
        d.reject("brand refresh pending").unwrap();
        let entry = &d.audit_trail()[0];
        assert_eq!(entry.from, DecisionStatus::Pending);
        assert_eq!(entry.to, DecisionStatus::Rejected);
        assert_eq!(entry.note.as_deref(), Some("brand refresh pending"));
    }

    // ── Views ──

    #[test]
    fn collection_holds_every_token() {
        let d = decision(DecisionRequest::new("button", Intent::Primary, teal()));
        let collection = d.collection().unwrap();
        assert_eq!(collection.len(), d.tokens().len());
        assert_eq!(collection.name(), "button");
        assert!(collection.contains("button.accent.disabled"));
    }

    #[test]
    fn json_export_is_camel_case() {
        let mut d = decision(DecisionRequest::new("button", Intent::Primary, teal()));
        d.apply().unwrap();
        let json: serde_json::Value = serde_json::from_str(&d.to_json().unwrap()).unwrap();
        assert_eq!(json["componentId"], "button");
        assert_eq!(json["status"], "applied");
        assert_eq!(json["auditTrail"][0]["to"], "applied");
        assert_eq!(json["tokens"].as_array().unwrap().len(), 30);
    }
}
