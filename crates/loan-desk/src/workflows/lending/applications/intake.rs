use super::domain::{ApplicationInput, DocumentEvidence, LoanCategory, LoanSubmission};
use super::evidence::extract_evidence;

/// Validation errors raised before a submission reaches the decision engine.
///
/// These are distinct from a rejected decision: the engine never sees the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("applicant email is required")]
    MissingApplicant,
    #[error("unknown loan type '{0}'")]
    UnknownCategory(String),
    #[error("loan amount must be greater than zero (found {0})")]
    NonPositiveAmount(i64),
    #[error("monthly income cannot be negative (found {0})")]
    NegativeIncome(i64),
    #[error("existing liabilities cannot be negative (found {0})")]
    NegativeLiabilities(i64),
    #[error("{field} must be a whole number (found '{raw}')")]
    InvalidNumber { field: &'static str, raw: String },
}

/// Submission that passed intake and is ready for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub applicant: String,
    pub input: ApplicationInput,
    pub evidence: DocumentEvidence,
}

/// Guard turning raw submissions into engine inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn validate(
        &self,
        submission: LoanSubmission,
    ) -> Result<ValidatedSubmission, IntakeError> {
        let applicant = submission.applicant.trim().to_ascii_lowercase();
        if applicant.is_empty() {
            return Err(IntakeError::MissingApplicant);
        }

        let category = LoanCategory::parse(&submission.category)
            .ok_or_else(|| IntakeError::UnknownCategory(submission.category.clone()))?;

        let amount = u64::try_from(submission.amount)
            .ok()
            .filter(|amount| *amount > 0)
            .ok_or(IntakeError::NonPositiveAmount(submission.amount))?;
        let income = u64::try_from(submission.income)
            .map_err(|_| IntakeError::NegativeIncome(submission.income))?;
        let liabilities = u64::try_from(submission.liabilities)
            .map_err(|_| IntakeError::NegativeLiabilities(submission.liabilities))?;

        let evidence = extract_evidence(
            submission
                .documents
                .into_iter()
                .filter(|document| !document.file_name.trim().is_empty())
                .map(|document| (document.field, sanitize_file_name(&document.file_name))),
        );

        Ok(ValidatedSubmission {
            applicant,
            input: ApplicationInput {
                category,
                amount,
                income,
                liabilities,
            },
            evidence,
        })
    }
}

/// Keep the original name while stripping anything that could act as a path.
///
/// Spaces and non-ASCII characters survive; directory components and NUL bytes
/// do not, and any remaining backslash runs collapse to a single underscore.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or_default();
    let without_nul: String = base.chars().filter(|c| *c != '\0').collect();

    let mut sanitized = String::with_capacity(without_nul.len());
    let mut previous_was_separator = false;
    for c in without_nul.chars() {
        if c == '\\' {
            if !previous_was_separator {
                sanitized.push('_');
            }
            previous_was_separator = true;
        } else {
            sanitized.push(c);
            previous_was_separator = false;
        }
    }

    if sanitized.is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}

/// Parse a form field into a signed whole number, leaving range checks to the guard.
pub fn parse_number_field(field: &'static str, raw: &str) -> Result<i64, IntakeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| IntakeError::InvalidNumber {
            field,
            raw: raw.to_string(),
        })
}
