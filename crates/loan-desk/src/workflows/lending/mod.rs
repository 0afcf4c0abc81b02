pub mod applications;

pub use applications::{
    evaluate, extract_evidence, ApplicationInput, Decision, DecisionEngine, DocumentEvidence,
    LoanCategory, RejectionReason,
};
