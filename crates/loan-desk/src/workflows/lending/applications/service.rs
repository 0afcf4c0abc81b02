use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{ApplicationId, LoanSubmission};
use super::evaluation::DecisionEngine;
use super::intake::{IntakeError, IntakeGuard};
use super::repository::{
    ApplicationRecord, ApplicationRepository, NoticePublisher, RepositoryError, SubmitterNotice,
};
use crate::config::IntakeConfig;

/// Service composing intake validation, the decision engine, and storage.
pub struct LoanApplicationService<R, N> {
    guard: IntakeGuard,
    engine: DecisionEngine,
    repository: Arc<R>,
    notices: Arc<N>,
    reviewer_email: Option<String>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R, N> LoanApplicationService<R, N>
where
    R: ApplicationRepository + 'static,
    N: NoticePublisher + 'static,
{
    pub fn new(repository: Arc<R>, notices: Arc<N>, config: IntakeConfig) -> Self {
        Self {
            guard: IntakeGuard,
            engine: DecisionEngine::new(),
            repository,
            notices,
            reviewer_email: config.reviewer_email,
        }
    }

    /// Validate, evaluate once, and store a single record for the submission.
    pub fn submit(
        &self,
        submission: LoanSubmission,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let validated = self.guard.validate(submission)?;

        let outcome = self.engine.assess(&validated.input, &validated.evidence);
        debug!(
            category = %validated.input.category,
            amount = validated.input.amount,
            income = validated.input.income,
            liabilities = validated.input.liabilities,
            documents = validated.evidence.documents().len(),
            tagged_fields = validated.evidence.by_field().len(),
            checks = outcome.checks.len(),
            decision = outcome.decision.reason(),
            "evaluated loan application"
        );

        let record = ApplicationRecord {
            application_id: next_application_id(),
            applicant: validated.applicant,
            input: validated.input,
            documents: validated.evidence.into_documents(),
            decision: outcome.decision,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %stored.application_id.0,
            status = stored.status().label(),
            "stored loan application"
        );

        if let Err(err) = self.notices.publish(SubmitterNotice::for_record(&stored)) {
            warn!(
                application_id = %stored.application_id.0,
                error = %err,
                "submitter notice not delivered"
            );
        }

        Ok(stored)
    }

    /// Fetch a stored application for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// The reviewer sees every application; everyone else only their own.
    pub fn list(&self, viewer: &str) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        let viewer = viewer.trim().to_ascii_lowercase();
        let records = if self.reviewer_email.as_deref() == Some(viewer.as_str()) {
            self.repository.list_all()?
        } else {
            self.repository.list_for(&viewer)?
        };
        Ok(records)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
