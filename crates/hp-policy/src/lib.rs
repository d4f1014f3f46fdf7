// SPDX-License-Identifier: MIT
//
// hp-policy — declarative design-governance policies.
//
// A policy is a validated bundle of rules with a severity and an
// enforcement level. Evaluation never fails: rule failures come back as
// violations (or warnings, for advisory policies) with a weighted score.

// Rule counts become scores.
#![allow(clippy::cast_precision_loss)]

pub mod builtin;
pub mod condition;
pub mod error;
pub mod evaluate;
pub mod input;
pub mod policy;
pub mod set;

pub use condition::{
    AccessibilityCondition, ColorCondition, Condition, ContrastMetric, CustomCondition, ThemeCondition,
    TokenCondition,
};
pub use error::PolicyError;
pub use evaluate::{AggregateResult, PolicyResult, RuleOutcome, Violation, evaluate, evaluate_policy};
pub use input::EvaluationInput;
pub use policy::{Enforcement, Policy, PolicyBuilder, PolicyCategory, PolicyScope, Rule, Severity};
pub use set::PolicySet;
