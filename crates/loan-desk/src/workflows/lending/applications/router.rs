use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, LoanSubmission};
use super::evaluation::rule_table;
use super::repository::{ApplicationRepository, NoticePublisher, RepositoryError};
use super::service::{ApplicationServiceError, LoanApplicationService};

/// Router builder exposing HTTP endpoints for submission and lookup.
pub fn application_router<R, N>(service: Arc<LoanApplicationService<R, N>>) -> Router
where
    R: ApplicationRepository + 'static,
    N: NoticePublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/loans/applications",
            get(list_handler::<R, N>).post(submit_handler::<R, N>),
        )
        .route(
            "/api/v1/loans/applications/:application_id",
            get(status_handler::<R, N>),
        )
        .route("/api/v1/loans/rules", get(rules_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    pub(crate) viewer: String,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<LoanApplicationService<R, N>>>,
    Json(submission): Json<LoanSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NoticePublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record.status_view())).into_response(),
        Err(ApplicationServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(ApplicationServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<LoanApplicationService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NoticePublisher + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "application not found",
                "application_id": id.0,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<LoanApplicationService<R, N>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NoticePublisher + 'static,
{
    match service.list(&query.viewer) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn rules_handler() -> Response {
    (StatusCode::OK, Json(rule_table())).into_response()
}

fn internal_error(error: ApplicationServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
