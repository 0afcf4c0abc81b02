mod policy;
mod rules;
mod verifier;

pub use policy::{Decision, RejectionReason, APPROVAL_MESSAGE};
pub use rules::{
    rule_table, rules_for, AmountTier, CategoryRules, DocumentRequirement, RequirementView,
    RuleTableEntry, COMMON_LIABILITY_CAP,
};
pub use verifier::{satisfied, verify, DocumentMatch};

use super::domain::{ApplicationInput, DocumentEvidence};
use serde::{Deserialize, Serialize};

/// Stateless evaluator over the static rule table.
///
/// Holds no configuration so it can be shared or copied freely between callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, input: &ApplicationInput, evidence: &DocumentEvidence) -> Decision {
        self.assess(input, evidence).decision
    }

    /// Evaluate and keep the trail of checks that ran, ending at the deciding one.
    pub fn assess(
        &self,
        input: &ApplicationInput,
        evidence: &DocumentEvidence,
    ) -> EvaluationOutcome {
        policy::run_checks(input, evidence)
    }
}

pub fn evaluate(input: &ApplicationInput, evidence: &DocumentEvidence) -> Decision {
    DecisionEngine.evaluate(input, evidence)
}

/// Checks in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    CommonLiabilityGate,
    DocumentsPresent,
    IncomeFloor,
    LiabilityCap,
    PrimaryDocument,
    HighAmountDocument,
}

/// Audit entry for one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub check: CheckKind,
    pub passed: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub decision: Decision,
    pub checks: Vec<CheckRecord>,
}
