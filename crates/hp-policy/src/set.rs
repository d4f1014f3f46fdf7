// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::Arc;

use hp_tokens::SemVer;

use crate::policy::{Policy, PolicyScope};

/// An id-keyed group of policies.
///
/// Policies are shared behind `Arc`, so the copy-on-write mutators clone
/// the map of pointers, never the policies themselves.
#[derive(Debug, Clone)]
pub struct PolicySet {
    name: String,
    version: SemVer,
    policies: BTreeMap<String, Arc<Policy>>,
}

impl PolicySet {
    #[must_use]
    pub fn new(name: impl Into<String>, version: SemVer) -> Self {
        Self {
            name: name.into(),
            version,
            policies: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn version(&self) -> &SemVer {
        &self.version
    }

    /// Add a policy, replacing any with the same id.
    #[must_use]
    pub fn with_policy(&self, policy: Policy) -> Self {
        let mut policies = self.policies.clone();
        policies.insert(policy.id().to_string(), Arc::new(policy));
        Self {
            policies,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn without(&self, id: &str) -> Self {
        let mut policies = self.policies.clone();
        policies.remove(id);
        Self {
            policies,
            ..self.clone()
        }
    }

    /// Enable or disable one policy. Unknown ids leave the set unchanged.
    #[must_use]
    pub fn with_enabled(&self, id: &str, enabled: bool) -> Self {
        match self.policies.get(id) {
            Some(policy) => self.with_policy(policy.with_enabled(enabled)),
            None => self.clone(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Policy> {
        self.policies.get(id).map(|p| &**p)
    }

    /// Enabled policies that apply to `scope`; every enabled policy when
    /// `scope` is `None`.
    pub fn applicable(&self, scope: Option<PolicyScope>) -> impl Iterator<Item = &Policy> {
        self.iter()
            .filter(move |p| p.is_enabled() && scope.is_none_or(|s| p.scope().covers(s)))
    }

    /// Policies carrying `tag`, in id order, enabled or not.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Policy> {
        self.iter().filter(move |p| p.tags().iter().any(|t| t == tag))
    }

    /// All policies in id order, enabled or not.
    pub fn iter(&self) -> impl Iterator<Item = &Policy> {
        self.policies.values().map(|p| &**p)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
