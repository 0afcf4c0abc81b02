use super::common::*;
use crate::workflows::lending::applications::domain::{
    ApplicationId, LoanApplicationStatus, UploadedDocument,
};
use crate::workflows::lending::applications::intake::IntakeError;
use crate::workflows::lending::applications::repository::{
    ApplicationRepository, NoticeLevel, RepositoryError,
};
use crate::workflows::lending::applications::{
    ApplicationServiceError, Decision, LoanApplicationService, RejectionReason,
};
use std::sync::Arc;

#[test]
fn submit_stores_approved_record_and_notifies() {
    let (service, repository, notices) = build_service();

    let record = service
        .submit(approved_agriculture_submission("farmer@gmail.com"))
        .expect("submission stored");

    assert_eq!(record.decision, Decision::Approved);
    assert_eq!(record.status(), LoanApplicationStatus::Approved);
    assert_eq!(record.documents, vec!["patta_card.pdf".to_string()]);

    let stored = repository
        .fetch(&record.application_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);

    let events = notices.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, NoticeLevel::Success);
    assert_eq!(events[0].message, "Successfully Saved");
    assert_eq!(events[0].applicant, "farmer@gmail.com");
}

#[test]
fn rejected_decisions_are_stored_not_raised() {
    let (service, repository, notices) = build_service();

    let record = service
        .submit(low_income_home_submission("owner@gmail.com"))
        .expect("rejection is a normal outcome");

    assert_eq!(
        record.decision,
        Decision::Rejected(RejectionReason::LowIncome)
    );
    assert_eq!(repository.len(), 1);

    let events = notices.events();
    assert_eq!(events[0].level, NoticeLevel::Error);
    assert_eq!(events[0].message, "Rejected: Low income");
}

#[test]
fn intake_errors_store_nothing() {
    let (service, repository, notices) = build_service();

    let result = service.submit(submission(
        "a@gmail.com",
        "personal",
        10,
        10,
        0,
        vec![UploadedDocument::untagged("x.pdf")],
    ));

    match result {
        Err(ApplicationServiceError::Intake(IntakeError::UnknownCategory(category))) => {
            assert_eq!(category, "personal")
        }
        other => panic!("expected intake error, got {other:?}"),
    }
    assert_eq!(repository.len(), 0);
    assert!(notices.events().is_empty());
}

#[test]
fn each_submission_gets_its_own_record() {
    let (service, repository, _) = build_service();

    let first = service
        .submit(approved_agriculture_submission("farmer@gmail.com"))
        .expect("first stored");
    let second = service
        .submit(approved_agriculture_submission("farmer@gmail.com"))
        .expect("second stored");

    assert_ne!(first.application_id, second.application_id);
    assert_eq!(repository.len(), 2);
}

#[test]
fn submit_propagates_repository_conflicts() {
    let service = LoanApplicationService::new(
        Arc::new(ConflictRepository),
        Arc::new(MemoryNotices::default()),
        intake_config(),
    );

    match service.submit(approved_agriculture_submission("farmer@gmail.com")) {
        Err(ApplicationServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn notice_failures_do_not_lose_the_record() {
    let repository = Arc::new(MemoryRepository::default());
    let service = LoanApplicationService::new(
        repository.clone(),
        Arc::new(OfflineNotices),
        intake_config(),
    );

    let record = service
        .submit(approved_agriculture_submission("farmer@gmail.com"))
        .expect("record stored despite notice failure");

    assert!(repository
        .fetch(&record.application_id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&ApplicationId("missing".to_string())) {
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn reviewer_lists_everything_others_only_their_own() {
    let (service, _, _) = build_service();
    service
        .submit(approved_agriculture_submission("farmer@gmail.com"))
        .expect("stored");
    service
        .submit(low_income_home_submission("owner@gmail.com"))
        .expect("stored");

    let own = service.list(" Farmer@gmail.com").expect("list own");
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].applicant, "farmer@gmail.com");

    let all = service.list(REVIEWER).expect("list all");
    assert_eq!(all.len(), 2);

    assert!(service
        .list("stranger@gmail.com")
        .expect("list empty")
        .is_empty());
}

#[test]
fn status_view_exposes_reason_and_documents() {
    let (service, _, _) = build_service();
    let record = service
        .submit(low_income_home_submission("owner@gmail.com"))
        .expect("stored");

    let view = record.status_view();
    assert_eq!(view.status, "rejected");
    assert_eq!(view.reason, "Low income");
    assert_eq!(view.documents, vec!["deed.pdf".to_string()]);
}
