use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::IntakeConfig;
use crate::workflows::lending::applications::domain::{
    ApplicationId, ApplicationInput, DocumentEvidence, FieldTag, LoanCategory, LoanSubmission,
    UploadedDocument,
};
use crate::workflows::lending::applications::evidence::extract_evidence;
use crate::workflows::lending::applications::repository::{
    ApplicationRecord, ApplicationRepository, NoticeError, NoticePublisher, RepositoryError,
    SubmitterNotice,
};
use crate::workflows::lending::applications::{application_router, LoanApplicationService};

pub(super) const REVIEWER: &str = "reviewer@gmail.com";

pub(super) fn input(
    category: LoanCategory,
    amount: u64,
    income: u64,
    liabilities: u64,
) -> ApplicationInput {
    ApplicationInput {
        category,
        amount,
        income,
        liabilities,
    }
}

/// Files uploaded through a generic control, so only their names carry intent.
pub(super) fn files(names: &[&str]) -> DocumentEvidence {
    extract_evidence(names.iter().map(|name| (None::<&str>, *name)))
}

/// Files uploaded on named form fields.
pub(super) fn tagged(pairs: &[(&str, &str)]) -> DocumentEvidence {
    extract_evidence(pairs.iter().map(|(field, name)| (Some(*field), *name)))
}

pub(super) fn tag_map(pairs: &[(FieldTag, &str)]) -> BTreeMap<FieldTag, String> {
    pairs
        .iter()
        .map(|(tag, name)| (*tag, name.to_string()))
        .collect()
}

pub(super) fn submission(
    applicant: &str,
    category: &str,
    amount: i64,
    income: i64,
    liabilities: i64,
    documents: Vec<UploadedDocument>,
) -> LoanSubmission {
    LoanSubmission {
        applicant: applicant.to_string(),
        category: category.to_string(),
        amount,
        income,
        liabilities,
        documents,
    }
}

pub(super) fn approved_agriculture_submission(applicant: &str) -> LoanSubmission {
    submission(
        applicant,
        "agriculture",
        900_000,
        20_000,
        2,
        vec![UploadedDocument::untagged("patta_card.pdf")],
    )
}

pub(super) fn low_income_home_submission(applicant: &str) -> LoanSubmission {
    submission(
        applicant,
        "home",
        2_000_000,
        25_000,
        1,
        vec![UploadedDocument::tagged("property_doc", "deed.pdf")],
    )
}

pub(super) fn intake_config() -> IntakeConfig {
    IntakeConfig {
        reviewer_email: Some(REVIEWER.to_string()),
    }
}

pub(super) fn build_service() -> (
    LoanApplicationService<MemoryRepository, MemoryNotices>,
    Arc<MemoryRepository>,
    Arc<MemoryNotices>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notices = Arc::new(MemoryNotices::default());
    let service = LoanApplicationService::new(repository.clone(), notices.clone(), intake_config());
    (service, repository, notices)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_for(&self, applicant: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.applicant == applicant)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotices {
    events: Arc<Mutex<Vec<SubmitterNotice>>>,
}

impl MemoryNotices {
    pub(super) fn events(&self) -> Vec<SubmitterNotice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }
}

impl NoticePublisher for MemoryNotices {
    fn publish(&self, notice: SubmitterNotice) -> Result<(), NoticeError> {
        self.events
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct OfflineNotices;

impl NoticePublisher for OfflineNotices {
    fn publish(&self, _notice: SubmitterNotice) -> Result<(), NoticeError> {
        Err(NoticeError::Transport("smtp offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn list_for(&self, _applicant: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn list_all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for(&self, _applicant: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn application_router_with_service(
    service: LoanApplicationService<MemoryRepository, MemoryNotices>,
) -> axum::Router {
    application_router(Arc::new(service))
}
