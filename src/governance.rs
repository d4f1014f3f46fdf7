// SPDX-License-Identifier: MIT

//! Governance records handed to audit logging.
//!
//! The engine builds a [`GovernanceDecision`] and calls
//! [`AuditLogger::log_decision`] exactly once. Where the record goes is up
//! to the logger.

use hp_policy::{AggregateResult, EvaluationInput, PolicySet, evaluate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A fix somebody tried for a violation. Fixing happens outside the engine;
/// this is only the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofixAttempt {
    pub policy_id: String,
    pub rule_id: String,
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceDecision {
    pub subject: String,
    pub result: AggregateResult,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub autofix_attempts: Vec<AutofixAttempt>,
}

impl GovernanceDecision {
    #[must_use]
    pub fn new(subject: impl Into<String>, result: AggregateResult) -> Self {
        let subject = subject.into();
        let summary = summarize(&subject, &result);
        Self {
            subject,
            result,
            summary,
            autofix_attempts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_autofix_attempt(mut self, attempt: AutofixAttempt) -> Self {
        self.autofix_attempts.push(attempt);
        self
    }

    #[must_use]
    pub const fn passed(&self) -> bool {
        self.result.overall_passed
    }

    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.result.has_blocking_violation
    }
}

fn summarize(subject: &str, result: &AggregateResult) -> String {
    if result.overall_passed {
        format!(
            "{subject}: passed {}/{} policies (score {:.1})",
            result.passed, result.total, result.score
        )
    } else {
        format!(
            "{subject}: failed {}/{} policies (score {:.1}, {} violations, {} blocking)",
            result.failed,
            result.total,
            result.score,
            result.violations.len(),
            result.critical_violations.len()
        )
    }
}

// ─── Audit logging ───────────────────────────────────────────────────────────

/// Receives every governance decision.
pub trait AuditLogger {
    fn log_decision(&self, decision: &GovernanceDecision);
}

impl<F> AuditLogger for F
where
    F: Fn(&GovernanceDecision),
{
    fn log_decision(&self, decision: &GovernanceDecision) {
        self(decision);
    }
}

/// Emits each decision as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLogger;

impl AuditLogger for TracingAuditLogger {
    fn log_decision(&self, decision: &GovernanceDecision) {
        info!(
            subject = %decision.subject,
            passed = decision.result.overall_passed,
            score = decision.result.score,
            blocking = decision.result.has_blocking_violation,
            "{}",
            decision.summary
        );
    }
}

/// Evaluate `input` against `set`, log the decision once, return it.
pub fn govern(
    subject: impl Into<String>,
    set: &PolicySet,
    input: &EvaluationInput,
    logger: &dyn AuditLogger,
) -> GovernanceDecision {
    let decision = GovernanceDecision::new(subject, evaluate(set, input));
    logger.log_decision(&decision);
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use hp_color::Color;
    use hp_policy::builtin;

    #[test]
    fn govern_logs_exactly_once() {
        let seen = RefCell::new(Vec::new());
        let logger = |d: &GovernanceDecision| seen.borrow_mut().push(d.subject.clone());
        let set = builtin::policy_set("wcag-aa").unwrap();
        let input = EvaluationInput::from_contrast(&Color::BLACK, &Color::WHITE);

        let decision = govern("body text", &set, &input, &logger);
        assert!(decision.passed());
        assert_eq!(*seen.borrow(), ["body text"]);
    }

    #[test]
    fn summary_reports_blocking_failures() {
        let set = builtin::policy_set("wcag-aa").unwrap();
        let input = EvaluationInput::from_contrast(&Color::gray(0.8), &Color::WHITE);
        let decision = govern("caption", &set, &input, &TracingAuditLogger);
        assert!(decision.is_blocked());
        assert!(decision.summary.starts_with("caption: failed 2/2 policies"));
        assert!(decision.summary.ends_with("2 violations, 1 blocking)"));
    }

    #[test]
    fn autofix_ledger_serializes_only_when_present() {
        let set = builtin::policy_set("wcag-aa").unwrap();
        let input = EvaluationInput::from_contrast(&Color::BLACK, &Color::WHITE);
        let decision = GovernanceDecision::new("x", evaluate(&set, &input));
        let json = serde_json::to_value(&decision).unwrap();
        assert!(json.get("autofixAttempts").is_none());

        let json = serde_json::to_value(decision.with_autofix_attempt(AutofixAttempt {
            policy_id: "wcag-aa-contrast".to_string(),
            rule_id: "ratio-4.5".to_string(),
            succeeded: true,
            note: None,
        }))
        .unwrap();
        assert_eq!(json["autofixAttempts"][0]["ruleId"], "ratio-4.5");
    }
}
