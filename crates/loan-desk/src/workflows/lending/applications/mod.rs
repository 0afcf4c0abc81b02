//! Loan application intake, eligibility decisioning, and storage boundaries.
//!
//! The decision engine in [`evaluation`] is a pure function of its inputs. Everything
//! around it (intake validation, the repository and notice traits, the HTTP router)
//! exists to feed it validated inputs once per submission and relay the result.

pub mod domain;
pub mod evaluation;
pub mod evidence;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationInput, DocumentEvidence, FieldTag, LoanApplicationStatus,
    LoanCategory, LoanSubmission, UploadedDocument,
};
pub use evaluation::{
    evaluate, rule_table, rules_for, CheckKind, CheckRecord, Decision, DecisionEngine,
    DocumentMatch, EvaluationOutcome, RejectionReason, RuleTableEntry,
};
pub use evidence::extract_evidence;
pub use intake::{IntakeError, IntakeGuard, ValidatedSubmission};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, NoticeError, NoticeLevel,
    NoticePublisher, RepositoryError, SubmitterNotice,
};
pub use router::application_router;
pub use service::{ApplicationServiceError, LoanApplicationService};
