// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # User Profile Entity
//!
//! Read-only from the orchestrator's point of view: credentials, spend
//! limits, and default preferences are all owned and edited elsewhere
//! (an operator-facing admin surface), never by a running job. The
//! orchestrator only ever reads a profile to resolve credentials and
//! enforce budgets.

use crate::value_objects::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLimits {
    pub monthly_usd_cap: Option<f64>,
    pub alert_threshold_usd: Option<f64>,
}

impl BudgetLimits {
    pub fn unlimited() -> Self {
        Self {
            monthly_usd_cap: None,
            alert_threshold_usd: None,
        }
    }

    pub fn exceeds_cap(&self, spent_usd: f64) -> bool {
        matches!(self.monthly_usd_cap, Some(cap) if spent_usd > cap)
    }

    pub fn crosses_alert_threshold(&self, spent_usd: f64) -> bool {
        matches!(self.alert_threshold_usd, Some(threshold) if spent_usd >= threshold)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    /// Credential names this user has provisioned (e.g. `"asr_api_key"`)
    /// mapped to an opaque reference string; actual secret values are
    /// resolved at stage-execution time from the configured credential
    /// store, never held here.
    credential_refs: HashMap<String, String>,
    budget: BudgetLimits,
    default_preferences: HashMap<String, String>,
}

impl UserProfile {
    pub fn new(
        user_id: UserId,
        credential_refs: HashMap<String, String>,
        budget: BudgetLimits,
        default_preferences: HashMap<String, String>,
    ) -> Self {
        Self {
            user_id,
            credential_refs,
            budget,
            default_preferences,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn credential_ref(&self, name: &str) -> Option<&str> {
        self.credential_refs.get(name).map(String::as_str)
    }

    pub fn budget(&self) -> &BudgetLimits {
        &self.budget
    }

    pub fn default_preference(&self, key: &str) -> Option<&str> {
        self.default_preferences.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_budget_never_exceeds() {
        let budget = BudgetLimits::unlimited();
        assert!(!budget.exceeds_cap(1_000_000.0));
    }

    #[test]
    fn capped_budget_flags_overspend() {
        let budget = BudgetLimits {
            monthly_usd_cap: Some(10.0),
            alert_threshold_usd: Some(8.0),
        };
        assert!(!budget.crosses_alert_threshold(7.0));
        assert!(budget.crosses_alert_threshold(8.5));
        assert!(budget.exceeds_cap(10.01));
        assert!(!budget.exceeds_cap(10.0));
    }

    #[test]
    fn missing_credential_ref_is_none() {
        let profile = UserProfile::new(UserId::new(1), HashMap::new(), BudgetLimits::unlimited(), HashMap::new());
        assert!(profile.credential_ref("asr_api_key").is_none());
    }
}
