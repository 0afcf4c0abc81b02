use super::super::domain::{ApplicationInput, DocumentEvidence, LoanApplicationStatus};
use super::rules::{rules_for, DocumentRequirement, COMMON_LIABILITY_CAP};
use super::verifier::{verify, DocumentMatch};
use super::{CheckKind, CheckRecord, EvaluationOutcome};
use serde::{Deserialize, Serialize};

pub const APPROVAL_MESSAGE: &str = "All conditions satisfied";

/// Outcome of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected(RejectionReason),
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved)
    }

    pub fn status(&self) -> LoanApplicationStatus {
        match self {
            Decision::Approved => LoanApplicationStatus::Approved,
            Decision::Rejected(_) => LoanApplicationStatus::Rejected,
        }
    }

    /// Human-readable reason relayed to the submitter.
    pub fn reason(&self) -> &'static str {
        match self {
            Decision::Approved => APPROVAL_MESSAGE,
            Decision::Rejected(reason) => reason.message(),
        }
    }
}

/// Closed set of rejection reasons reported to submitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    TooManyExistingLoans,
    NoDocumentsUploaded,
    LowIncome,
    MissingLandOwnership,
    MissingCropPlan,
    MissingPropertyDocument,
    MissingItReturns,
    MissingAdmissionLetter,
    MissingGuarantorProof,
    MissingBusinessRegistration,
    MissingFinancialReturns,
}

impl RejectionReason {
    pub const fn message(self) -> &'static str {
        match self {
            RejectionReason::TooManyExistingLoans => "Too many existing loans",
            RejectionReason::NoDocumentsUploaded => "No documents uploaded",
            RejectionReason::LowIncome => "Low income",
            RejectionReason::MissingLandOwnership => {
                "Missing land ownership document (Patta/Chitta/Adangal)"
            }
            RejectionReason::MissingCropPlan => {
                "Missing required document for high amount (Crop Plan/Subsidy Proof)"
            }
            RejectionReason::MissingPropertyDocument => "Missing property document",
            RejectionReason::MissingItReturns => "Missing IT returns for high amount",
            RejectionReason::MissingAdmissionLetter => "Missing admission letter",
            RejectionReason::MissingGuarantorProof => "Missing guarantor proof for high amount",
            RejectionReason::MissingBusinessRegistration => {
                "Missing business registration proof (Udyam/MSME/GST)"
            }
            RejectionReason::MissingFinancialReturns => "Missing GST/IT returns for high amount",
        }
    }
}

/// Walks the checks in their fixed order and stops at the first failure.
pub(crate) fn run_checks(
    input: &ApplicationInput,
    evidence: &DocumentEvidence,
) -> EvaluationOutcome {
    let mut trail = Trail::default();

    if input.liabilities > COMMON_LIABILITY_CAP {
        return trail.reject(
            CheckKind::CommonLiabilityGate,
            format!(
                "{} existing loans exceed the common cap of {}",
                input.liabilities, COMMON_LIABILITY_CAP
            ),
            RejectionReason::TooManyExistingLoans,
        );
    }
    trail.pass(
        CheckKind::CommonLiabilityGate,
        format!("{} existing loans within common cap", input.liabilities),
    );

    if evidence.is_empty() {
        return trail.reject(
            CheckKind::DocumentsPresent,
            "no documents were uploaded".to_string(),
            RejectionReason::NoDocumentsUploaded,
        );
    }
    trail.pass(
        CheckKind::DocumentsPresent,
        format!("{} document(s) uploaded", evidence.documents().len()),
    );

    let rules = rules_for(input.category);

    if input.income < rules.income_floor {
        return trail.reject(
            CheckKind::IncomeFloor,
            format!(
                "income {} below {} floor {}",
                input.income, input.category, rules.income_floor
            ),
            RejectionReason::LowIncome,
        );
    }
    trail.pass(
        CheckKind::IncomeFloor,
        format!("income {} meets floor {}", input.income, rules.income_floor),
    );

    if input.liabilities > rules.liability_cap {
        return trail.reject(
            CheckKind::LiabilityCap,
            format!(
                "{} existing loans exceed {} cap {}",
                input.liabilities, input.category, rules.liability_cap
            ),
            RejectionReason::TooManyExistingLoans,
        );
    }
    trail.pass(
        CheckKind::LiabilityCap,
        format!(
            "{} existing loans within cap {}",
            input.liabilities, rules.liability_cap
        ),
    );

    if let Err(outcome) = trail.require(CheckKind::PrimaryDocument, &rules.primary, evidence) {
        return outcome;
    }

    if input.amount > rules.high_amount.threshold {
        if let Err(outcome) = trail.require(
            CheckKind::HighAmountDocument,
            &rules.high_amount.requirement,
            evidence,
        ) {
            return outcome;
        }
    }

    trail.finish(Decision::Approved)
}

#[derive(Default)]
struct Trail {
    checks: Vec<CheckRecord>,
}

impl Trail {
    fn pass(&mut self, check: CheckKind, notes: String) {
        self.checks.push(CheckRecord {
            check,
            passed: true,
            notes,
        });
    }

    fn reject(
        mut self,
        check: CheckKind,
        notes: String,
        reason: RejectionReason,
    ) -> EvaluationOutcome {
        self.checks.push(CheckRecord {
            check,
            passed: false,
            notes,
        });
        self.finish(Decision::Rejected(reason))
    }

    fn require(
        &mut self,
        check: CheckKind,
        requirement: &DocumentRequirement,
        evidence: &DocumentEvidence,
    ) -> Result<(), EvaluationOutcome> {
        match verify(requirement, evidence) {
            DocumentMatch::Field(tag) => {
                self.pass(check, format!("found {tag} field"));
                Ok(())
            }
            DocumentMatch::Keyword { document, keyword } => {
                self.pass(check, format!("'{document}' matched keyword '{keyword}'"));
                Ok(())
            }
            DocumentMatch::Missing => {
                let trail = std::mem::take(self);
                Err(trail.reject(
                    check,
                    format!("no {} field or matching file name", requirement.field_list()),
                    requirement.failure,
                ))
            }
        }
    }

    fn finish(self, decision: Decision) -> EvaluationOutcome {
        EvaluationOutcome {
            decision,
            checks: self.checks,
        }
    }
}
