use loan_desk::workflows::lending::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository, NoticeError, NoticePublisher,
    RepositoryError, SubmitterNotice, UploadedDocument,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store; records are ordered by id so listings are stable.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<BTreeMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
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
pub(crate) struct InMemoryNoticePublisher {
    events: Arc<Mutex<Vec<SubmitterNotice>>>,
}

impl NoticePublisher for InMemoryNoticePublisher {
    fn publish(&self, notice: SubmitterNotice) -> Result<(), NoticeError> {
        let mut guard = self.events.lock().expect("notice mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryNoticePublisher {
    pub(crate) fn events(&self) -> Vec<SubmitterNotice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }
}

/// Parse `--document` values of the form `field=file` or a bare `file`.
///
/// Only a prefix made of lowercase letters and underscores counts as a field name,
/// so file names that happen to contain `=` stay intact.
pub(crate) fn parse_document_arg(raw: &str) -> Result<UploadedDocument, String> {
    if raw.trim().is_empty() {
        return Err("document must not be empty".to_string());
    }

    match raw.split_once('=') {
        Some((field, file_name))
            if !field.is_empty()
                && field
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_') =>
        {
            Ok(UploadedDocument::tagged(field, file_name))
        }
        _ => Ok(UploadedDocument::untagged(raw)),
    }
}
