use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationInput, LoanApplicationStatus, LoanCategory};
use super::evaluation::Decision;

/// Repository record written once per evaluated submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub applicant: String,
    pub input: ApplicationInput,
    pub documents: Vec<String>,
    pub decision: Decision,
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn status(&self) -> LoanApplicationStatus {
        self.decision.status()
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            status: self.status().label(),
            reason: self.decision.reason(),
            loan_type: self.input.category,
            documents: self.documents.clone(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn list_for(&self, applicant: &str) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn list_all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook relaying decisions back to the submitter (flash message, e-mail, ...).
pub trait NoticePublisher: Send + Sync {
    fn publish(&self, notice: SubmitterNotice) -> Result<(), NoticeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Message shown to the submitter once their application is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitterNotice {
    pub application_id: ApplicationId,
    pub applicant: String,
    pub level: NoticeLevel,
    pub message: String,
}

impl SubmitterNotice {
    pub fn for_record(record: &ApplicationRecord) -> Self {
        let (level, message) = match record.decision {
            Decision::Approved => (NoticeLevel::Success, "Successfully Saved".to_string()),
            Decision::Rejected(reason) => {
                (NoticeLevel::Error, format!("Rejected: {}", reason.message()))
            }
        };

        Self {
            application_id: record.application_id.clone(),
            applicant: record.applicant.clone(),
            level,
            message,
        }
    }
}

/// Notice dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NoticeError {
    #[error("notice transport unavailable: {0}")]
    Transport(String),
}

/// Structured response for programmatic callers.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub reason: &'static str,
    pub loan_type: LoanCategory,
    pub documents: Vec<String>,
}
