// SPDX-License-Identifier: MIT

//! Policy evaluation and weighted aggregation.
//!
//! Per policy: score = passed rules / total rules × 100. A failed rule is a
//! violation, or a warning when the policy is advisory.
//!
//! Across a set: each policy weighs severity × enforcement, the overall
//! score is the weighted mean, and the set passes only with zero
//! violations. A failed blocking policy (required + critical) is also
//! reported separately so callers can stop a rollout without reading
//! scores.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::input::EvaluationInput;
use crate::policy::{Enforcement, Policy, PolicyScope, Severity};
use crate::set::PolicySet;

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub policy_id: String,
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub scope: PolicyScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub auto_fixable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOutcome {
    pub rule_id: String,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResult {
    pub policy_id: String,
    pub severity: Severity,
    pub enforcement: Enforcement,
    /// No violations. Warnings do not fail a policy.
    pub passed: bool,
    /// 0–100.
    pub score: f64,
    pub weight: f64,
    pub blocking: bool,
    pub rules: Vec<RuleOutcome>,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

/// Evaluate every rule of `policy` against `input`.
///
/// Disabled policies are still evaluated here; [`evaluate`] is what skips
/// them.
#[must_use]
pub fn evaluate_policy(policy: &Policy, input: &EvaluationInput) -> PolicyResult {
    let mut rules = Vec::with_capacity(policy.rules().len());
    let mut failures = Vec::new();

    for rule in policy.rules() {
        let passed = rule.condition.check(input);
        rules.push(RuleOutcome {
            rule_id: rule.id.clone(),
            passed,
        });
        if !passed {
            failures.push(Violation {
                policy_id: policy.id().to_string(),
                rule_id: rule.id.clone(),
                severity: policy.severity(),
                message: rule.message.clone(),
                scope: input.scope.unwrap_or(policy.scope()),
                component: input.component.clone(),
                suggestion: rule.suggestion.clone(),
                auto_fixable: rule.auto_fixable,
            });
        }
    }

    let total = rules.len();
    let passed_rules = total - failures.len();
    let score = if total == 0 {
        100.0
    } else {
        passed_rules as f64 / total as f64 * 100.0
    };

    let (violations, warnings) = if policy.is_advisory() {
        (Vec::new(), failures)
    } else {
        (failures, Vec::new())
    };

    debug!(
        policy = policy.id(),
        score,
        violations = violations.len(),
        warnings = warnings.len(),
        "evaluated policy"
    );

    PolicyResult {
        policy_id: policy.id().to_string(),
        severity: policy.severity(),
        enforcement: policy.enforcement(),
        passed: violations.is_empty(),
        score,
        weight: policy.weight(),
        blocking: policy.is_blocking(),
        rules,
        violations,
        warnings,
    }
}

/// Results across a policy set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub set_name: String,
    pub results: Vec<PolicyResult>,
    /// Weighted mean of policy scores; 100 when nothing applied.
    pub score: f64,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Violation>,
    /// Violations from blocking policies.
    pub critical_violations: Vec<Violation>,
    pub has_blocking_violation: bool,
    pub overall_passed: bool,
}

impl AggregateResult {
    /// Violations and warnings whose rule has a fixer.
    #[must_use]
    pub fn auto_fixable(&self) -> Vec<&Violation> {
        self.violations
            .iter()
            .chain(&self.warnings)
            .filter(|v| v.auto_fixable)
            .collect()
    }

    #[must_use]
    pub fn result(&self, policy_id: &str) -> Option<&PolicyResult> {
        self.results.iter().find(|r| r.policy_id == policy_id)
    }
}

/// Evaluate every enabled policy in `set` that applies to `input.scope`.
#[must_use]
pub fn evaluate(set: &PolicySet, input: &EvaluationInput) -> AggregateResult {
    let results: Vec<PolicyResult> = set
        .applicable(input.scope)
        .map(|policy| evaluate_policy(policy, input))
        .collect();

    let total_weight: f64 = results.iter().map(|r| r.weight).sum();
    let score = if total_weight > 0.0 {
        results.iter().map(|r| r.score * r.weight).sum::<f64>() / total_weight
    } else {
        100.0
    };

    let violations: Vec<Violation> = results.iter().flat_map(|r| r.violations.iter().cloned()).collect();
    let warnings: Vec<Violation> = results.iter().flat_map(|r| r.warnings.iter().cloned()).collect();
    let critical_violations: Vec<Violation> = results
        .iter()
        .filter(|r| r.blocking)
        .flat_map(|r| r.violations.iter().cloned())
        .collect();
    let has_blocking_violation = !critical_violations.is_empty();
    let passed = results.iter().filter(|r| r.passed).count();

    if has_blocking_violation {
        warn!(
            set = set.name(),
            blocking = critical_violations.len(),
            "blocking policy failed"
        );
    }

    AggregateResult {
        set_name: set.name().to_string(),
        total: results.len(),
        passed,
        failed: results.len() - passed,
        overall_passed: violations.is_empty() && !has_blocking_violation,
        results,
        score,
        violations,
        warnings,
        critical_violations,
        has_blocking_violation,
    }
}
